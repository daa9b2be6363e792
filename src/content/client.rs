//! HTTP client for the Prismic REST API (v2)

use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::api::ContentApi;
use super::predicate::{render_query, Predicate, QueryOptions};
use super::raw::{QueryResponse, RawDocument};
use crate::config::BlogConfig;
use crate::error::{ContentError, Result};

/// API entry document, listing the available refs
#[derive(Debug, Deserialize)]
struct ApiInfo {
    #[serde(default)]
    refs: Vec<ApiRef>,
}

#[derive(Debug, Deserialize)]
struct ApiRef {
    #[serde(rename = "ref")]
    reference: String,
    #[serde(rename = "isMasterRef", default)]
    is_master_ref: bool,
}

/// Content service client over HTTP
pub struct PrismicClient {
    endpoint: String,
    access_token: Option<String>,
    http: reqwest::Client,
}

impl PrismicClient {
    /// Create a client for an API endpoint such as
    /// `https://<repo>.cdn.prismic.io/api/v2`
    pub fn new(endpoint: &str, access_token: Option<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("spacetraveling/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            access_token: access_token.filter(|t| !t.is_empty()),
            http,
        })
    }

    pub fn from_config(config: &BlogConfig) -> Result<Self> {
        Self::new(
            &config.api_endpoint,
            config.access_token.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// The ref of the published snapshot.
    ///
    /// Looked up on every call, since each publish in the CMS moves it.
    async fn master_ref(&self) -> Result<String> {
        let url = self.build_url(&self.endpoint, Vec::new())?;
        let info: ApiInfo = self.get_json(url).await?;
        let master = info
            .refs
            .into_iter()
            .find(|r| r.is_master_ref)
            .map(|r| r.reference)
            .ok_or_else(|| ContentError::malformed_payload("master ref"))?;

        debug!(master_ref = %master, "Resolved master ref");
        Ok(master)
    }

    async fn resolve_ref(&self, preview_ref: Option<&str>) -> Result<String> {
        match preview_ref {
            Some(reference) => Ok(reference.to_string()),
            None => self.master_ref().await,
        }
    }

    fn build_url(&self, base: &str, mut params: Vec<(&'static str, String)>) -> Result<Url> {
        let mut url = Url::parse(base)
            .map_err(|e| ContentError::FetchFailure(format!("invalid URL '{}': {}", base, e)))?;

        if let Some(token) = &self.access_token {
            if !url.query_pairs().any(|(key, _)| key == "access_token") {
                params.push(("access_token", token.clone()));
            }
        }

        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &params {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Whether a URL points at the content API host
    fn same_origin(&self, url: &Url) -> bool {
        Url::parse(&self.endpoint)
            .map(|endpoint| endpoint.origin() == url.origin())
            .unwrap_or(false)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(path = %url.path(), "GET");

        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::FetchFailure(format!(
                "{} responded with {}",
                url.path(),
                status
            )));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ContentApi for PrismicClient {
    async fn query(
        &self,
        predicates: &[Predicate],
        options: &QueryOptions,
    ) -> Result<QueryResponse> {
        let reference = self.resolve_ref(options.preview_ref.as_deref()).await?;

        let mut params = vec![("ref", reference), ("q", render_query(predicates))];
        if !options.fetch.is_empty() {
            params.push(("fetch", options.fetch.join(",")));
        }
        if let Some(size) = options.page_size {
            params.push(("pageSize", size.to_string()));
        }
        if let Some(ordering) = &options.ordering {
            params.push(("orderings", ordering.to_string()));
        }

        let url = self.build_url(&format!("{}/documents/search", self.endpoint), params)?;
        self.get_json(url).await
    }

    async fn fetch_page(&self, cursor: &str) -> Result<QueryResponse> {
        let url = self.build_url(cursor, Vec::new())?;
        if !self.same_origin(&url) {
            return Err(ContentError::FetchFailure(format!(
                "cursor {} is not on the content API host",
                url.path()
            )));
        }
        self.get_json(url).await
    }

    async fn get_by_uid(
        &self,
        doc_type: &str,
        uid: &str,
        preview_ref: Option<&str>,
    ) -> Result<Option<RawDocument>> {
        let options = QueryOptions {
            page_size: Some(1),
            preview_ref: preview_ref.map(str::to_string),
            ..Default::default()
        };
        let response = self
            .query(&[Predicate::uid(doc_type, uid)], &options)
            .await?;
        Ok(response.results.into_iter().next())
    }
}
