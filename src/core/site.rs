use crate::core::detail::{resolve_post_page, static_paths, DetailView};
use crate::core::listing::fetch_home_page;
use crate::domain::model::PostPage;
use crate::domain::ports::{ConfigProvider, ContentSource, Storage};
use crate::utils::error::{BlogError, Result};
use crate::utils::validation::validate_uid;

pub const INDEX_PAGE: &str = "index.json";

pub fn post_page_path(uid: &str) -> String {
    format!("post/{}.json", uid)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub listing_items: usize,
    pub next_page: Option<String>,
    pub detail_pages: Vec<String>,
}

/// Writes the data every rendered page embeds: the listing props and one file per
/// pre-built post. Posts outside the pre-built set are produced by [`SiteBuilder::page_for`].
pub struct SiteBuilder<'a, S: Storage, C: ContentSource + ?Sized> {
    storage: S,
    source: &'a C,
    document_type: String,
    page_size: usize,
}

impl<'a, S: Storage, C: ContentSource + ?Sized> SiteBuilder<'a, S, C> {
    pub fn new<P: ConfigProvider>(storage: S, source: &'a C, config: &P) -> Self {
        Self {
            storage,
            source,
            document_type: config.document_type().to_string(),
            page_size: config.page_size(),
        }
    }

    pub async fn build(&self) -> Result<BuildReport> {
        tracing::info!("🚀 Building pages for '{}' documents", self.document_type);

        let home = fetch_home_page(self.source, &self.document_type, self.page_size).await?;
        self.write_json(INDEX_PAGE, &home).await?;
        tracing::info!("📄 Wrote {} ({} posts)", INDEX_PAGE, home.results.len());

        let paths = static_paths(self.source, &self.document_type).await?;
        let mut detail_pages = Vec::with_capacity(paths.identifiers.len());
        for uid in &paths.identifiers {
            let path = self.render_post(uid).await?;
            detail_pages.push(path);
        }

        tracing::info!(
            "✅ Build finished: {} detail pages, fallback {}",
            detail_pages.len(),
            if paths.fallback { "on" } else { "off" }
        );

        Ok(BuildReport {
            listing_items: home.results.len(),
            next_page: home.next_page,
            detail_pages,
        })
    }

    /// Serves a detail page, resolving and writing it on first request.
    pub async fn page_for(&self, uid: &str) -> Result<PostPage> {
        validate_uid(uid)?;
        let path = post_page_path(uid);

        match self.storage.read_file(&path).await {
            Ok(bytes) => {
                tracing::debug!("Serving pre-built {}", path);
                Ok(serde_json::from_slice(&bytes)?)
            }
            Err(BlogError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("⏳ {} not built yet, resolving on demand", uid);
                self.render_post(uid).await?;
                let bytes = self.storage.read_file(&path).await?;
                Ok(serde_json::from_slice(&bytes)?)
            }
            Err(e) => Err(e),
        }
    }

    /// The view for a request: the placeholder until a page exists, never partial data.
    pub async fn view_for(&self, uid: &str) -> Result<DetailView> {
        validate_uid(uid)?;
        match self.storage.read_file(&post_page_path(uid)).await {
            Ok(bytes) => Ok(DetailView::Ready(serde_json::from_slice(&bytes)?)),
            Err(BlogError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(DetailView::Loading)
            }
            Err(e) => Err(e),
        }
    }

    async fn render_post(&self, uid: &str) -> Result<String> {
        validate_uid(uid)?;
        let page = resolve_post_page(self.source, &self.document_type, uid).await?;
        let path = post_page_path(uid);
        self.write_json(&path, &page).await?;
        tracing::debug!(
            "Wrote {} ({} min read)",
            path,
            page.reading_time_minutes
        );
        Ok(path)
    }

    async fn write_json<T: serde::Serialize>(&self, path: &str, value: &T) -> Result<()> {
        let json = serde_json::to_vec_pretty(value)?;
        self.storage.write_file(path, &json).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{PostsPagination, QueryPage, RawDocument};
    use crate::domain::query::{Predicate, QueryOptions};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.lock().await.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                BlogError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files
                .lock()
                .await
                .insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig;

    impl ConfigProvider for MockConfig {
        fn api_endpoint(&self) -> &str {
            "http://test.com/api/v2"
        }

        fn access_token(&self) -> Option<&str> {
            None
        }

        fn timeout_seconds(&self) -> u64 {
            5
        }

        fn output_path(&self) -> &str {
            "test_output"
        }

        fn document_type(&self) -> &str {
            "posts"
        }

        fn page_size(&self) -> usize {
            2
        }
    }

    fn doc(uid: &str) -> RawDocument {
        RawDocument {
            id: format!("id-{}", uid),
            uid: Some(uid.to_string()),
            document_type: "posts".to_string(),
            first_publication_date: Some("2021-03-25T19:25:28+0000".to_string()),
            last_publication_date: None,
            data: serde_json::json!({
                "title": format!("Post {}", uid),
                "subtitle": "sub",
                "author": "Ana",
                "banner": {"url": "https://images.prismic.io/b.png"},
                "content": [{"heading": "Intro", "body": [
                    {"type": "paragraph", "text": "one two three", "spans": []}
                ]}]
            }),
        }
    }

    struct MemorySource {
        docs: Vec<RawDocument>,
    }

    #[async_trait]
    impl ContentSource for MemorySource {
        async fn query(&self, _: &[Predicate], options: &QueryOptions) -> Result<QueryPage> {
            let results: Vec<RawDocument> =
                self.docs.iter().take(options.page_size).cloned().collect();
            let next_page = (self.docs.len() > options.page_size)
                .then(|| "http://test.com/api/v2/documents/search?page=2".to_string());
            Ok(QueryPage {
                next_page,
                results,
                ..QueryPage::default()
            })
        }

        async fn get_by_uid(&self, _: &str, uid: &str) -> Result<Option<RawDocument>> {
            Ok(self
                .docs
                .iter()
                .find(|d| d.uid.as_deref() == Some(uid))
                .cloned())
        }

        async fn fetch_page(&self, _: &str) -> Result<QueryPage> {
            Ok(QueryPage::default())
        }
    }

    #[tokio::test]
    async fn test_build_writes_index_and_prebuilt_posts() {
        let storage = MockStorage::new();
        let source = MemorySource {
            docs: vec![doc("a"), doc("b"), doc("c")],
        };
        let builder = SiteBuilder::new(storage.clone(), &source, &MockConfig);

        let report = builder.build().await.unwrap();

        assert_eq!(report.listing_items, 2);
        assert!(report.next_page.is_some());
        assert_eq!(report.detail_pages, vec!["post/a.json", "post/b.json"]);

        let index: PostsPagination =
            serde_json::from_slice(&storage.get_file(INDEX_PAGE).await.unwrap()).unwrap();
        assert_eq!(index.results[0].id, "a");
        assert_eq!(index.results[1].title, "Post b");
        assert!(storage.get_file("post/c.json").await.is_none());
    }

    #[tokio::test]
    async fn test_unbuilt_post_resolves_on_demand() {
        let storage = MockStorage::new();
        let source = MemorySource {
            docs: vec![doc("a"), doc("b"), doc("c")],
        };
        let builder = SiteBuilder::new(storage.clone(), &source, &MockConfig);

        assert!(builder.view_for("c").await.unwrap().is_loading());

        let page = builder.page_for("c").await.unwrap();
        assert_eq!(page.post.title, "Post c");
        assert_eq!(page.reading_time_minutes, 1);
        assert_eq!(page.revalidate_seconds, 86_400);
        assert!(storage.get_file("post/c.json").await.is_some());

        match builder.view_for("c").await.unwrap() {
            DetailView::Ready(ready) => assert_eq!(ready, page),
            DetailView::Loading => panic!("page should be ready"),
        }
    }

    #[tokio::test]
    async fn test_unknown_post_is_not_found_and_writes_nothing() {
        let storage = MockStorage::new();
        let source = MemorySource { docs: vec![doc("a")] };
        let builder = SiteBuilder::new(storage.clone(), &source, &MockConfig);

        let err = builder.page_for("ghost").await.unwrap_err();

        assert!(matches!(err, BlogError::NotFound { .. }));
        assert!(storage.get_file("post/ghost.json").await.is_none());
    }

    #[tokio::test]
    async fn test_invalid_uid_is_rejected_before_any_io() {
        let storage = MockStorage::new();
        let source = MemorySource { docs: vec![] };
        let builder = SiteBuilder::new(storage, &source, &MockConfig);

        assert!(matches!(
            builder.page_for("../secret").await,
            Err(BlogError::InvalidConfigValueError { .. })
        ));
    }
}
