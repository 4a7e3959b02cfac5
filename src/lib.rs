//! # OpenAIRE Content Connector
//!
//! A connector that bridges a generic publication-metadata search surface to
//! the OpenAIRE publication index hosted on Apache Solr.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Caller surface                          │
//! │  • search(query)         → SearchResult (page + facets)     │
//! │  • fetch_metadata(query) → byte stream (full export)        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Query translation                        │
//! │  • Generic Query → SolrQuery (fq/sort/fl/facet/paging)      │
//! │  • Mandatory publication + not-deleted filters              │
//! │  • Year/date values expanded to Solr range clauses          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Solr backend                            │
//! │  • One dedicated HTTP client per call                       │
//! │  • /select with cursorMark for deep paging                  │
//! │  • Facet counts in backend-delivered order                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                   (export path only)
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Streaming export                          │
//! │  • Cursor pager on a dedicated worker task                  │
//! │  • oaf XML → Publication → OMTD XML per document            │
//! │  • Bounded duplex pipe back to the caller (back-pressure)   │
//! │  • Literal </OMTDPublications> terminator on success        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use openaire_connector::{ConnectorConfig, OpenAireConnector, Query};
//! use tokio::io::AsyncReadExt;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ConnectorConfig {
//!         solr_url: "http://localhost:8983/solr".into(),
//!         collection: "openaire-index".into(),
//!         ..Default::default()
//!     };
//!     let connector = OpenAireConnector::new(config);
//!
//!     // Synchronous search: one page plus facets
//!     let query = Query::new("digital libraries", 0, 10)
//!         .with_facet("instancetypename")
//!         .with_param("resultlanguageid", ["eng"]);
//!     let result = connector.search(&query).await.expect("search failed");
//!     println!("{} hits", result.total_hits);
//!
//!     // Streaming export: cursor-driven scan of the full result set
//!     let mut stream = connector.fetch_metadata(&query).await.expect("export failed");
//!     let mut buf = Vec::new();
//!     stream.read_to_end(&mut buf).await.expect("read failed");
//! }
//! ```
//!
//! ## Modules
//!
//! - [`query`]: generic [`Query`] model and translation to [`SolrQuery`]
//! - [`solr`]: the [`SolrBackend`] seam and the reqwest-based [`SolrClient`]
//! - [`cursor`]: [`CursorPager`] driving a cursorMark scan into a sink
//! - [`facet`]: facet aggregation and the OMTD↔OpenAIRE facet name map
//! - [`publication`]: oaf XML parsing into [`Publication`] records
//! - [`connector`]: the [`OpenAireConnector`] caller surface

pub mod config;
pub mod connector;
pub mod cursor;
pub mod error;
pub mod facet;
pub mod metrics;
pub mod publication;
pub mod query;
pub mod solr;

pub use config::ConnectorConfig;
pub use connector::{OpenAireConnector, PublicationSink, SearchResult};
pub use cursor::{CursorPager, DocumentSink, ScanOutcome};
pub use error::{BackendError, ConnectorError, DocumentError, TranslationError};
pub use facet::{Facet, FacetValue};
pub use publication::Publication;
pub use query::{Query, SolrQuery, SortOrder};
pub use solr::{SolrBackend, SolrClient};
