// Adapters layer: concrete implementations of the domain ports.

pub mod prismic;
pub mod storage;
