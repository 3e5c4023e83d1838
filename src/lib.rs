pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{Cli, Command};

pub use adapters::{prismic::PrismicClient, storage::LocalStorage};
pub use config::SiteConfig;
pub use core::{
    detail::DetailView,
    listing::ListingSession,
    site::{BuildReport, SiteBuilder},
};
pub use utils::error::{BlogError, Result};
