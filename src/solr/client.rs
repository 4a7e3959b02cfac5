//! HTTP client for Solr's JSON API.
//!
//! A [`SolrClient`] is cheap to build and owned by exactly one call: the
//! connector constructs a fresh one per search or export and drops it on
//! every exit path, so no connection state is shared across calls.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::{SolrBackend, SolrSelectResponse};
use crate::config::ConnectorConfig;
use crate::error::BackendError;
use crate::query::SolrQuery;

pub struct SolrClient {
    http: reqwest::Client,
    base_url: String,
    collection: String,
}

impl SolrClient {
    /// Build a client against the configured Solr instance.
    pub fn new(config: &ConnectorConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.solr_url.trim_end_matches('/').to_string(),
            collection: config.collection.clone(),
        })
    }

    /// Base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Collection this client queries.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    fn select_url(&self) -> String {
        format!("{}/{}/select", self.base_url, self.collection)
    }

    /// Index a single document, committing immediately.
    pub async fn index(&self, document: &Value) -> Result<(), BackendError> {
        let url = format!("{}/{}/update/json/docs", self.base_url, self.collection);
        debug!(url = %url, "Indexing document");

        let response = self
            .http
            .post(&url)
            .query(&[("commit", "true")])
            .json(document)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl SolrBackend for SolrClient {
    async fn select(
        &self,
        query: &SolrQuery,
        cursor: Option<&str>,
    ) -> Result<SolrSelectResponse, BackendError> {
        let params = query.params(cursor);
        debug!(url = %self.select_url(), cursor = ?cursor, "Executing select");

        let response = self
            .http
            .get(self.select_url())
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<SolrSelectResponse>()
            .await
            .map_err(|e| BackendError::Malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let config = ConnectorConfig {
            solr_url: "http://localhost:8983/solr/".into(),
            collection: "openaire-index".into(),
            ..Default::default()
        };
        let client = SolrClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8983/solr");
        assert_eq!(client.select_url(), "http://localhost:8983/solr/openaire-index/select");
    }
}
