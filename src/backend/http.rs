//! HTTP backend for Elasticsearch-compatible `_search` endpoints.

use super::response::{parse_hits, RawHit};
use super::SearchBackend;
use crate::config::Config;
use crate::error::SearchError;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde_json::Value;

/// Blocking HTTP client bound to one backend address.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: Client,
    base_url: String,
}

impl HttpBackend {
    /// Build a client for the backend named in `config`.
    pub fn new(config: &Config) -> Result<Self, SearchError> {
        config.validate()?;
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| SearchError::InvalidConfig {
            reason: format!("cannot build HTTP client: {}", e),
        })?;
        Ok(Self {
            http,
            base_url: config.endpoint(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl SearchBackend for HttpBackend {
    fn search(&self, index: &str, body: &Value, size: usize) -> Result<Vec<RawHit>, SearchError> {
        let url = format!("{}/{}/_search", self.base_url, index);
        tracing::debug!(%url, size, "sending search request");

        let resp = self
            .http
            .post(&url)
            .query(&[("size", size)])
            .json(body)
            .send()
            .map_err(|e| SearchError::BackendUnavailable {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            tracing::warn!(%url, status = status.as_u16(), "search request failed");
            return Err(SearchError::BackendStatus {
                status: status.as_u16(),
                body,
            });
        }

        let value: Value = resp.json()?;
        let hits = parse_hits(value)?;
        tracing::debug!(%url, hits = hits.len(), "search request answered");
        Ok(hits)
    }
}
