use crate::core::projection::project_detail;
use crate::core::reading_time::reading_time_minutes;
use crate::domain::model::{PostDetail, PostPage};
use crate::domain::ports::ContentSource;
use crate::domain::query::{Ordering, Predicate, QueryOptions};
use crate::utils::error::{BlogError, Result};
use crate::utils::format::format_optional_date;
use std::time::Duration;

/// How many identifiers get pre-built. The rest resolve on first request.
pub const PREBUILT_PAGE_SIZE: usize = 2;

/// Built detail pages stay valid this long before the pipeline re-resolves them.
pub const REVALIDATE_AFTER: Duration = Duration::from_secs(60 * 60 * 24);

pub const LOADING_PLACEHOLDER: &str = "Carregando...";

/// Identifiers to pre-build. `fallback` means unknown ones are resolved on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticPaths {
    pub identifiers: Vec<String>,
    pub fallback: bool,
}

/// What a detail surface shows: the placeholder while resolving, then the page.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
    Loading,
    Ready(PostPage),
}

impl DetailView {
    pub fn from_resolution(page: Option<PostPage>) -> Self {
        match page {
            Some(page) => Self::Ready(page),
            None => Self::Loading,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// A terminal rendering of the view.
    pub fn render_text(&self) -> String {
        match self {
            Self::Loading => LOADING_PLACEHOLDER.to_string(),
            Self::Ready(page) => {
                let post = &page.post;
                let mut out = format!("{}\n", post.title);
                if !post.subtitle.is_empty() {
                    out.push_str(&format!("{}\n", post.subtitle));
                }
                out.push_str(&format!(
                    "{} | {} | {} min\n",
                    page.published_display.as_deref().unwrap_or("-"),
                    post.author,
                    page.reading_time_minutes
                ));
                for block in &post.content {
                    out.push_str(&format!("\n## {}\n", block.heading));
                    for node in &block.body {
                        out.push_str(&format!("{}\n", node.text));
                    }
                }
                out
            }
        }
    }
}

pub async fn list_known_identifiers<C: ContentSource + ?Sized>(
    source: &C,
    document_type: &str,
) -> Result<Vec<String>> {
    let options = QueryOptions {
        fetch: vec![format!("{}.uid", document_type)],
        orderings: vec![Ordering::desc("document.first_publication_date")],
        page_size: PREBUILT_PAGE_SIZE,
    };
    let page = source
        .query(&[Predicate::document_type(document_type)], &options)
        .await?;

    let identifiers: Vec<String> = page
        .results
        .into_iter()
        .filter_map(|doc| {
            if doc.uid.is_none() {
                tracing::warn!("Skipping document {} without uid", doc.id);
            }
            doc.uid
        })
        .collect();

    tracing::debug!("Known identifiers: {:?}", identifiers);
    Ok(identifiers)
}

pub async fn static_paths<C: ContentSource + ?Sized>(
    source: &C,
    document_type: &str,
) -> Result<StaticPaths> {
    Ok(StaticPaths {
        identifiers: list_known_identifiers(source, document_type).await?,
        fallback: true,
    })
}

pub async fn resolve_by_identifier<C: ContentSource + ?Sized>(
    source: &C,
    document_type: &str,
    uid: &str,
) -> Result<PostDetail> {
    let doc = source
        .get_by_uid(document_type, uid)
        .await?
        .ok_or_else(|| BlogError::NotFound {
            document_type: document_type.to_string(),
            uid: uid.to_string(),
        })?;

    project_detail(&doc)
}

/// Detail props: the post plus its display date, reading time and freshness hint.
pub fn build_post_page(post: PostDetail) -> Result<PostPage> {
    let published_display = format_optional_date(post.published_at.as_deref())?;
    let reading_time_minutes = reading_time_minutes(&post.content);

    Ok(PostPage {
        post,
        published_display,
        reading_time_minutes,
        revalidate_seconds: REVALIDATE_AFTER.as_secs(),
    })
}

pub async fn resolve_post_page<C: ContentSource + ?Sized>(
    source: &C,
    document_type: &str,
    uid: &str,
) -> Result<PostPage> {
    let post = resolve_by_identifier(source, document_type, uid).await?;
    build_post_page(post)
}
