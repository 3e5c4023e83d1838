use serde::{Deserialize, Serialize};

/// A document as the content API returns it. `data` stays untyped until projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDocument {
    pub id: String,
    pub uid: Option<String>,
    #[serde(rename = "type", default)]
    pub document_type: String,
    pub first_publication_date: Option<String>,
    pub last_publication_date: Option<String>,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// One page of a search response. `next_page` is a fully-qualified URL or null.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryPage {
    pub page: Option<u32>,
    pub total_pages: Option<u32>,
    pub total_results_size: Option<u64>,
    pub next_page: Option<String>,
    pub results: Vec<RawDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    #[serde(rename = "uid")]
    pub id: String,
    #[serde(rename = "first_publication_date")]
    pub published_at: Option<String>,
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDetail {
    #[serde(rename = "uid")]
    pub id: String,
    #[serde(rename = "first_publication_date")]
    pub published_at: Option<String>,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub banner_url: String,
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub heading: String,
    pub body: Vec<RichTextNode>,
}

/// A structured-text block (paragraph, list item, image, embed, ...) with its inline spans.
///
/// Keys beyond `type`, `text` and `spans` (`url`, `alt`, `dimensions`, `oembed`, `label`)
/// are carried in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichTextNode {
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub spans: Vec<RichTextSpan>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichTextSpan {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub span_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Props embedded in the listing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostsPagination {
    pub next_page: Option<String>,
    pub results: Vec<PostSummary>,
}

/// Props embedded in a detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostPage {
    pub post: PostDetail,
    pub published_display: Option<String>,
    pub reading_time_minutes: u64,
    pub revalidate_seconds: u64,
}
