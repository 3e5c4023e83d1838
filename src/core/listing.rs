use crate::core::projection::project_summaries;
use crate::domain::model::{PostSummary, PostsPagination};
use crate::domain::ports::ContentSource;
use crate::domain::query::{Ordering, Predicate, QueryOptions};
use crate::utils::error::Result;

pub const HOME_PAGE_SIZE: usize = 2;

/// Query for the build-time listing: newest first, summary fields only.
pub fn home_query(document_type: &str, page_size: usize) -> (Vec<Predicate>, QueryOptions) {
    let fetch = ["uid", "title", "subtitle", "author", "first_publication_date"]
        .iter()
        .map(|field| format!("{}.{}", document_type, field))
        .collect();

    (
        vec![Predicate::document_type(document_type)],
        QueryOptions {
            fetch,
            orderings: vec![Ordering::desc("document.first_publication_date")],
            page_size,
        },
    )
}

/// First page of the listing plus the cursor for the next one.
pub async fn fetch_home_page<C: ContentSource + ?Sized>(
    source: &C,
    document_type: &str,
    page_size: usize,
) -> Result<PostsPagination> {
    let (predicates, options) = home_query(document_type, page_size);
    let page = source.query(&predicates, &options).await?;

    let results = project_summaries(&page.results)?;
    tracing::info!(
        "📰 Home page: {} posts, more available: {}",
        results.len(),
        page.next_page.is_some()
    );

    Ok(PostsPagination {
        next_page: page.next_page,
        results,
    })
}

/// Client-held listing state: a growing sequence of summaries and the next cursor.
///
/// Items are appended in arrival order and never deduplicated. A failed fetch leaves the
/// session exactly as it was, so the same cursor can be tried again.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingSession {
    cursor: Option<String>,
    items: Vec<PostSummary>,
}

impl ListingSession {
    pub fn initialize(seed_cursor: Option<String>, seed_items: Vec<PostSummary>) -> Self {
        Self {
            cursor: seed_cursor,
            items: seed_items,
        }
    }

    pub fn from_pagination(pagination: PostsPagination) -> Self {
        Self::initialize(pagination.next_page, pagination.results)
    }

    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    pub fn items(&self) -> &[PostSummary] {
        &self.items
    }

    pub fn has_more(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn into_parts(self) -> (Option<String>, Vec<PostSummary>) {
        (self.cursor, self.items)
    }

    /// Fetches the page behind the cursor and appends it. Returns how many items were added.
    ///
    /// Without a cursor this is a no-op returning `Ok(0)`; no request is made.
    pub async fn load_more<C: ContentSource + ?Sized>(&mut self, source: &C) -> Result<usize> {
        let Some(url) = self.cursor.as_deref() else {
            tracing::debug!("Listing exhausted, nothing to load");
            return Ok(0);
        };

        tracing::debug!("Loading next page: {}", url);
        let page = source.fetch_page(url).await?;
        let projected = project_summaries(&page.results)?;

        let added = projected.len();
        self.items.extend(projected);
        self.cursor = page.next_page;

        tracing::debug!(
            "Appended {} posts ({} total), next cursor: {:?}",
            added,
            self.items.len(),
            self.cursor
        );
        Ok(added)
    }

    /// Follows cursors until the source reports no further page.
    pub async fn load_all<C: ContentSource + ?Sized>(&mut self, source: &C) -> Result<usize> {
        let mut added = 0;
        while self.has_more() {
            added += self.load_more(source).await?;
        }
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{QueryPage, RawDocument};
    use crate::utils::error::BlogError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn raw(uid: &str) -> RawDocument {
        RawDocument {
            id: format!("id-{}", uid),
            uid: Some(uid.to_string()),
            document_type: "posts".to_string(),
            first_publication_date: None,
            last_publication_date: None,
            data: serde_json::json!({
                "title": format!("Title {}", uid),
                "subtitle": "",
                "author": "Ana",
                "slices": []
            }),
        }
    }

    fn summary(uid: &str) -> PostSummary {
        PostSummary {
            id: uid.to_string(),
            published_at: None,
            title: format!("Title {}", uid),
            subtitle: String::new(),
            author: "Ana".to_string(),
        }
    }

    /// Serves canned pages by URL and records every URL requested.
    #[derive(Default)]
    struct PagedSource {
        pages: HashMap<String, QueryPage>,
        requested: Mutex<Vec<String>>,
    }

    impl PagedSource {
        fn with_page(mut self, url: &str, uids: &[&str], next: Option<&str>) -> Self {
            self.pages.insert(
                url.to_string(),
                QueryPage {
                    next_page: next.map(str::to_string),
                    results: uids.iter().map(|u| raw(u)).collect(),
                    ..QueryPage::default()
                },
            );
            self
        }

        fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ContentSource for PagedSource {
        async fn query(&self, _: &[Predicate], _: &QueryOptions) -> Result<QueryPage> {
            unreachable!("listing sessions only follow cursors")
        }

        async fn get_by_uid(&self, _: &str, _: &str) -> Result<Option<RawDocument>> {
            unreachable!("listing sessions only follow cursors")
        }

        async fn fetch_page(&self, url: &str) -> Result<QueryPage> {
            self.requested.lock().unwrap().push(url.to_string());
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| BlogError::UnexpectedStatus {
                    url: url.to_string(),
                    status: 500,
                })
        }
    }

    #[test]
    fn test_home_query_shape() {
        let (predicates, options) = home_query("posts", HOME_PAGE_SIZE);
        assert_eq!(predicates, vec![Predicate::document_type("posts")]);
        assert_eq!(options.page_size, 2);
        assert_eq!(
            options.fetch,
            vec![
                "posts.uid",
                "posts.title",
                "posts.subtitle",
                "posts.author",
                "posts.first_publication_date"
            ]
        );
        assert_eq!(
            options.orderings,
            vec![Ordering::desc("document.first_publication_date")]
        );
    }

    #[test]
    fn test_load_more_appends_in_arrival_order() {
        let source = PagedSource::default()
            .with_page("p2", &["c", "d"], Some("p3"))
            .with_page("p3", &["e"], None);
        let mut session =
            ListingSession::initialize(Some("p2".to_string()), vec![summary("a"), summary("b")]);

        tokio_test::block_on(async {
            assert_eq!(session.load_more(&source).await.unwrap(), 2);
            assert_eq!(session.cursor(), Some("p3"));
            assert_eq!(session.load_more(&source).await.unwrap(), 1);
        });

        let ids: Vec<&str> = session.items().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d", "e"]);
        assert!(!session.has_more());
    }

    #[test]
    fn test_exhausted_session_makes_no_requests() {
        let source = PagedSource::default().with_page("p2", &["b"], None);
        let mut session = ListingSession::initialize(Some("p2".to_string()), vec![summary("a")]);

        tokio_test::block_on(async {
            session.load_more(&source).await.unwrap();
            assert_eq!(session.load_more(&source).await.unwrap(), 0);
            assert_eq!(session.load_more(&source).await.unwrap(), 0);
        });

        assert_eq!(source.requested(), vec!["p2"]);
        assert_eq!(session.items().len(), 2);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let source = PagedSource::default().with_page("p2", &["b", "c"], None);
        let mut session =
            ListingSession::initialize(Some("p2".to_string()), vec![summary("a"), summary("b")]);

        tokio_test::block_on(session.load_more(&source)).unwrap();

        let ids: Vec<&str> = session.items().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "b", "c"]);
    }

    #[test]
    fn test_failed_fetch_leaves_session_unchanged() {
        let source = PagedSource::default();
        let mut session = ListingSession::initialize(Some("broken".to_string()), vec![summary("a")]);
        let before = session.clone();

        let result = tokio_test::block_on(session.load_more(&source));

        assert!(result.is_err());
        assert_eq!(session, before);
        assert_eq!(session.cursor(), Some("broken"));
    }

    #[test]
    fn test_malformed_page_leaves_session_unchanged() {
        let mut source = PagedSource::default();
        let mut bad = raw("bad");
        bad.data = serde_json::json!({"title": "missing the rest"});
        source.pages.insert(
            "p2".to_string(),
            QueryPage {
                next_page: Some("p3".to_string()),
                results: vec![raw("ok"), bad],
                ..QueryPage::default()
            },
        );
        let mut session = ListingSession::initialize(Some("p2".to_string()), vec![]);

        let result = tokio_test::block_on(session.load_more(&source));

        assert!(matches!(result, Err(BlogError::MalformedRecord { .. })));
        assert!(session.items().is_empty());
        assert_eq!(session.cursor(), Some("p2"));
    }

    #[tokio::test]
    async fn test_load_all_follows_every_cursor() {
        let source = PagedSource::default()
            .with_page("p2", &["c", "d"], Some("p3"))
            .with_page("p3", &["e", "f"], Some("p4"))
            .with_page("p4", &["g"], None);
        let mut session = ListingSession::from_pagination(PostsPagination {
            next_page: Some("p2".to_string()),
            results: vec![summary("a"), summary("b")],
        });

        let added = session.load_all(&source).await.unwrap();

        assert_eq!(added, 5);
        assert_eq!(source.requested(), vec!["p2", "p3", "p4"]);
        let (cursor, items) = session.into_parts();
        assert!(cursor.is_none());
        assert_eq!(items.len(), 7);
    }
}
