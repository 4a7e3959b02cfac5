//! Serde models for Solr's JSON response envelope.
//!
//! Only the parts the connector consumes are modeled: the document list,
//! facet counts, and the next cursor token. Facet maps rely on
//! `serde_json/preserve_order` so fields and values stay in the order the
//! backend delivered them.

use serde::Deserialize;
use serde_json::Value;

/// Envelope of a `/select` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SolrSelectResponse {
    #[serde(default)]
    pub response: SolrDocList,
    /// Present when faceting was requested
    #[serde(default)]
    pub facet_counts: Option<FacetCounts>,
    /// Present when the request carried a cursorMark
    #[serde(rename = "nextCursorMark", default)]
    pub next_cursor_mark: Option<String>,
}

/// The matched-document window.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SolrDocList {
    #[serde(rename = "numFound", default)]
    pub num_found: u64,
    #[serde(default)]
    pub start: u64,
    /// Documents as delivered; each is an opaque JSON object
    #[serde(default)]
    pub docs: Vec<Value>,
}

/// Facet section of a response.
///
/// Solr encodes per-field counts as a flat array alternating value and
/// count: `["article", 120, "dataset", 7]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FacetCounts {
    #[serde(default)]
    pub facet_fields: serde_json::Map<String, Value>,
}
