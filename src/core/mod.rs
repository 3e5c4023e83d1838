pub mod detail;
pub mod listing;
pub mod projection;
pub mod reading_time;
pub mod site;

pub use crate::domain::model::{PostDetail, PostPage, PostSummary, PostsPagination};
pub use crate::domain::ports::{ConfigProvider, ContentSource, Storage};
pub use crate::utils::error::Result;
