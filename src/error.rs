//! Error taxonomy for the connector.
//!
//! Failures are typed by seam:
//! - [`TranslationError`] — the caller's query cannot become a valid Solr
//!   query; surfaced synchronously before any backend contact.
//! - [`BackendError`] — transport or server-side failure; fatal to the
//!   current call, no retry.
//! - [`DocumentError`] — a single record failed extraction or parsing;
//!   logged and skipped, never fatal to a scan.
//! - [`ConnectorError`] — top-level sum returned by the caller surface.

use thiserror::Error;

/// The caller-supplied query cannot be turned into a valid Solr query.
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("unrecognized sort direction '{direction}' for field '{field}'")]
    InvalidSortDirection { field: String, direction: String },
}

/// Transport or server-side failure during query execution or page fetch.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("solr request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("solr returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed solr response: {0}")]
    Malformed(String),
}

/// A single document failed extraction or parsing into a domain record.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document is missing result field '{0}'")]
    MissingField(String),
    #[error("result field '{0}' holds no usable value")]
    EmptyField(String),
    #[error("xml parse error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("failed to render record: {0}")]
    Render(String),
}

/// Top-level error returned by the connector surface.
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("query translation failed: {0}")]
    Translation(#[from] TranslationError),
    #[error("backend failure: {0}")]
    Backend(#[from] BackendError),
    #[error("output stream failure: {0}")]
    Io(#[from] std::io::Error),
}
