use crate::domain::model::{QueryPage, RawDocument};
use crate::domain::ports::{ConfigProvider, ContentSource};
use crate::domain::query::{orderings_string, query_string, Predicate, QueryOptions};
use crate::utils::error::{BlogError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

#[derive(Debug, Deserialize)]
struct ApiInfo {
    refs: Vec<ApiRef>,
}

#[derive(Debug, Deserialize)]
struct ApiRef {
    id: String,
    #[serde(rename = "ref")]
    reference: String,
    #[serde(rename = "isMasterRef", default)]
    is_master_ref: bool,
}

/// Client for a Prismic repository's REST API (`https://<repo>.cdn.prismic.io/api/v2`).
///
/// The master ref is read once at connect time and pinned for every later query, so one
/// build sees one consistent release of the content.
#[derive(Debug, Clone)]
pub struct PrismicClient {
    client: Client,
    endpoint: String,
    access_token: Option<String>,
    master_ref: String,
}

impl PrismicClient {
    pub async fn connect<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;
        Self::connect_with(client, config.api_endpoint(), config.access_token()).await
    }

    pub async fn connect_with(
        client: Client,
        endpoint: &str,
        access_token: Option<&str>,
    ) -> Result<Self> {
        let endpoint = endpoint.trim_end_matches('/').to_string();
        let mut api_url = parse_url(&endpoint)?;
        if let Some(token) = access_token {
            api_url.query_pairs_mut().append_pair("access_token", token);
        }

        tracing::debug!("Reading repository refs from {}", endpoint);
        let info: ApiInfo = get_json(&client, api_url.as_str()).await?;
        let master = info
            .refs
            .into_iter()
            .find(|r| r.is_master_ref)
            .ok_or_else(|| BlogError::ConfigError {
                message: format!("{} exposes no master ref", endpoint),
            })?;
        tracing::debug!("Using ref '{}' ({})", master.reference, master.id);

        Ok(Self {
            client,
            endpoint,
            access_token: access_token.map(str::to_string),
            master_ref: master.reference,
        })
    }

    pub fn master_ref(&self) -> &str {
        &self.master_ref
    }

    fn search_url(&self, predicates: &[Predicate], options: &QueryOptions) -> Result<Url> {
        let mut url = parse_url(&format!("{}/documents/search", self.endpoint))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("ref", &self.master_ref);
            pairs.append_pair("q", &query_string(predicates));
            if !options.orderings.is_empty() {
                pairs.append_pair("orderings", &orderings_string(&options.orderings));
            }
            if !options.fetch.is_empty() {
                pairs.append_pair("fetch", &options.fetch.join(","));
            }
            pairs.append_pair("pageSize", &options.page_size.to_string());
            if let Some(token) = &self.access_token {
                pairs.append_pair("access_token", token);
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl ContentSource for PrismicClient {
    async fn query(&self, predicates: &[Predicate], options: &QueryOptions) -> Result<QueryPage> {
        let url = self.search_url(predicates, options)?;
        tracing::debug!("Querying {}", url);

        let page: QueryPage = get_json(&self.client, url.as_str()).await?;
        tracing::debug!(
            "Query returned {} results (page {:?} of {:?})",
            page.results.len(),
            page.page,
            page.total_pages
        );
        Ok(page)
    }

    async fn get_by_uid(&self, document_type: &str, uid: &str) -> Result<Option<RawDocument>> {
        let options = QueryOptions {
            page_size: 1,
            ..QueryOptions::default()
        };
        let predicates = [
            Predicate::document_type(document_type),
            Predicate::uid(document_type, uid),
        ];

        let page = self.query(&predicates, &options).await?;
        Ok(page.results.into_iter().next())
    }

    async fn fetch_page(&self, url: &str) -> Result<QueryPage> {
        tracing::debug!("Following cursor {}", url);
        get_json(&self.client, url).await
    }
}

fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| BlogError::InvalidConfigValueError {
        field: "source.endpoint".to_string(),
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

async fn get_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!("{} answered {}", url, status);
        return Err(BlogError::UnexpectedStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    Ok(response.json().await?)
}
