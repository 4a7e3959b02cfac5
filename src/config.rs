//! Configuration for the connector.
//!
//! # Example
//!
//! ```
//! use openaire_connector::ConnectorConfig;
//!
//! // Minimal config (uses defaults)
//! let config = ConnectorConfig::default();
//! assert_eq!(config.result_field, "__result");
//!
//! // Full config
//! let config = ConnectorConfig {
//!     solr_url: "http://localhost:8983/solr".into(),
//!     collection: "openaire-index".into(),
//!     query_limit: 100_000,
//!     ..Default::default()
//! };
//! ```

use serde::Deserialize;

/// Configuration for the connector.
///
/// All fields are supplied at construction and immutable afterward. At
/// minimum you should configure `solr_url` and `collection`.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectorConfig {
    /// Base URL of the Solr instance (e.g., "http://localhost:8983/solr")
    #[serde(default = "default_solr_url")]
    pub solr_url: String,

    /// Default collection to query
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Maximum number of records an export scan will emit (0 = unlimited).
    /// The running count advances by the page-size hint, so the actual
    /// number of emitted documents may exceed this value by up to one page.
    #[serde(default)]
    pub query_limit: u64,

    /// Document field holding the embedded oaf XML record
    #[serde(default = "default_result_field")]
    pub result_field: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Capacity of the export pipe in bytes; the worker blocks once the
    /// reader lags by this much
    #[serde(default = "default_export_buffer_bytes")]
    pub export_buffer_bytes: usize,
}

fn default_solr_url() -> String {
    "http://localhost:8983/solr".to_string()
}
fn default_collection() -> String {
    "openaire-index".to_string()
}
fn default_result_field() -> String {
    "__result".to_string()
}
fn default_request_timeout_secs() -> u64 {
    60
}
fn default_export_buffer_bytes() -> usize {
    64 * 1024
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            solr_url: default_solr_url(),
            collection: default_collection(),
            query_limit: 0,
            result_field: default_result_field(),
            request_timeout_secs: default_request_timeout_secs(),
            export_buffer_bytes: default_export_buffer_bytes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ConnectorConfig::default();
        assert_eq!(config.query_limit, 0);
        assert_eq!(config.result_field, "__result");
        assert_eq!(config.request_timeout_secs, 60);
        assert_eq!(config.export_buffer_bytes, 64 * 1024);
    }

    #[test]
    fn deserializes_with_partial_fields() {
        let config: ConnectorConfig = serde_json::from_str(
            r#"{"solr_url": "http://solr:8983/solr", "query_limit": 500}"#,
        )
        .unwrap();
        assert_eq!(config.solr_url, "http://solr:8983/solr");
        assert_eq!(config.query_limit, 500);
        assert_eq!(config.collection, "openaire-index");
    }
}
