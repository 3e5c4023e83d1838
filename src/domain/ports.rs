use crate::domain::model::{QueryPage, RawDocument};
use crate::domain::query::{Predicate, QueryOptions};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn access_token(&self) -> Option<&str>;
    fn timeout_seconds(&self) -> u64;
    fn output_path(&self) -> &str;
    fn document_type(&self) -> &str;
    fn page_size(&self) -> usize;
}

/// The hosted content repository. Every call is a single request, never retried.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn query(&self, predicates: &[Predicate], options: &QueryOptions) -> Result<QueryPage>;

    /// `Ok(None)` when no document of that type carries the uid.
    async fn get_by_uid(&self, document_type: &str, uid: &str) -> Result<Option<RawDocument>>;

    /// Follows a `next_page` cursor URL from an earlier page.
    async fn fetch_page(&self, url: &str) -> Result<QueryPage>;
}
