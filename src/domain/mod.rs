// Domain layer: view models, raw content records, query vocabulary and ports.

pub mod model;
pub mod ports;
pub mod query;
