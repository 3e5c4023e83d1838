use crate::domain::model::{ContentBlock, PostDetail, PostSummary, RawDocument, RichTextNode};
use crate::utils::error::{BlogError, Result};
use serde::{Deserialize, Deserializer};

// Typed views over `RawDocument::data`. Unknown document keys are dropped by serde, a missing
// key is an error, and a JSON null on a text field reads as the empty string. Rich-text nodes
// keep their own extra keys (see `RichTextNode::extra`).

#[derive(Deserialize)]
struct SummaryData {
    #[serde(deserialize_with = "nullable_string")]
    title: String,
    #[serde(deserialize_with = "nullable_string")]
    subtitle: String,
    #[serde(deserialize_with = "nullable_string")]
    author: String,
}

#[derive(Deserialize)]
struct DetailData {
    #[serde(deserialize_with = "nullable_string")]
    title: String,
    #[serde(default, deserialize_with = "nullable_string")]
    subtitle: String,
    #[serde(deserialize_with = "nullable_string")]
    author: String,
    banner: Banner,
    content: Vec<RawContentBlock>,
}

#[derive(Deserialize)]
struct Banner {
    #[serde(deserialize_with = "nullable_string")]
    url: String,
}

#[derive(Deserialize)]
struct RawContentBlock {
    #[serde(default, deserialize_with = "nullable_string")]
    heading: String,
    #[serde(default, deserialize_with = "nullable_nodes")]
    body: Vec<RichTextNode>,
}

fn nullable_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn nullable_nodes<'de, D>(deserializer: D) -> std::result::Result<Vec<RichTextNode>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<RichTextNode>>::deserialize(deserializer)?.unwrap_or_default())
}

fn uid_of(doc: &RawDocument) -> Result<String> {
    doc.uid.clone().ok_or_else(|| BlogError::MalformedRecord {
        id: doc.id.clone(),
        reason: "document has no uid".to_string(),
    })
}

fn typed_data<'a, T: Deserialize<'a>>(doc: &'a RawDocument) -> Result<T> {
    T::deserialize(&doc.data).map_err(|e| BlogError::MalformedRecord {
        id: doc.uid.clone().unwrap_or_else(|| doc.id.clone()),
        reason: e.to_string(),
    })
}

/// Keeps uid, publication date, title, subtitle and author; everything else is dropped.
pub fn project_summary(doc: &RawDocument) -> Result<PostSummary> {
    let id = uid_of(doc)?;
    let data: SummaryData = typed_data(doc)?;

    Ok(PostSummary {
        id,
        published_at: doc.first_publication_date.clone(),
        title: data.title,
        subtitle: data.subtitle,
        author: data.author,
    })
}

/// Projects a whole page or nothing: one malformed record fails the batch.
pub fn project_summaries(docs: &[RawDocument]) -> Result<Vec<PostSummary>> {
    docs.iter().map(project_summary).collect()
}

pub fn project_detail(doc: &RawDocument) -> Result<PostDetail> {
    let id = uid_of(doc)?;
    let data: DetailData = typed_data(doc)?;

    Ok(PostDetail {
        id,
        published_at: doc.first_publication_date.clone(),
        title: data.title,
        subtitle: data.subtitle,
        author: data.author,
        banner_url: data.banner.url,
        content: data
            .content
            .into_iter()
            .map(|block| ContentBlock {
                heading: block.heading,
                body: block.body,
            })
            .collect(),
    })
}
