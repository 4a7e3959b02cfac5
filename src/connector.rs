//! The caller-facing connector.
//!
//! [`OpenAireConnector`] exposes the two paths over the shared translation
//! step: a synchronous, single-page [`search`](OpenAireConnector::search)
//! with facet aggregation, and an asynchronous
//! [`fetch_metadata`](OpenAireConnector::fetch_metadata) export that streams
//! the full result set through a bounded in-process pipe.
//!
//! Each call builds its own backend client and owns it for the call's
//! lifetime; nothing is pooled or shared across calls.

use std::time::Instant;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tokio::io::{duplex, AsyncWriteExt, DuplexStream};
use tracing::{info, warn};

use crate::config::ConnectorConfig;
use crate::cursor::{CursorPager, DocumentSink};
use crate::error::ConnectorError;
use crate::facet::{facets_from_response, Facet};
use crate::metrics;
use crate::publication::{self, Publication};
use crate::query::{translate, Query, SolrQuery};
use crate::solr::{SolrBackend, SolrClient};

/// One page of results plus facets.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResult {
    pub from: u64,
    pub to: u64,
    pub total_hits: u64,
    /// Parsed records in backend order
    pub publications: Vec<Publication>,
    /// Facets in backend order
    pub facets: Vec<Facet>,
}

/// Connector between the metadata-search surface and the OpenAIRE Solr
/// index.
pub struct OpenAireConnector {
    config: ConnectorConfig,
}

impl OpenAireConnector {
    pub fn new(config: ConnectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    pub fn source_name(&self) -> &'static str {
        "OpenAIRE"
    }

    /// Synchronous search: one page of parsed records plus facet counts.
    ///
    /// Backend failures surface as typed errors; individual records that
    /// fail to parse are logged and skipped.
    pub async fn search(&self, query: &Query) -> Result<SearchResult, ConnectorError> {
        let started = Instant::now();
        let solr_query = translate(query)?;
        let client = SolrClient::new(&self.config)?;

        let response = match client.select(&solr_query, None).await {
            Ok(response) => response,
            Err(err) => {
                metrics::record_call("search", "error");
                return Err(err.into());
            }
        };
        metrics::record_query_latency("search", started.elapsed());

        let from = response.response.start;
        let to = from + response.response.docs.len() as u64;
        let total_hits = response.response.num_found;

        let mut publications = Vec::with_capacity(response.response.docs.len());
        for document in &response.response.docs {
            match publication::extract_record(document, &self.config.result_field)
                .and_then(|xml| publication::parse_publication(&xml))
            {
                Ok(record) => publications.push(record),
                Err(err) => {
                    warn!(%err, "Skipping unparsable result document");
                    metrics::record_document("skipped");
                }
            }
        }

        let facets = response
            .facet_counts
            .as_ref()
            .map(facets_from_response)
            .unwrap_or_default();

        metrics::record_call("search", "success");
        metrics::record_search_hits(total_hits);
        info!(total_hits, returned = publications.len(), facets = facets.len(),
              "Search completed");

        Ok(SearchResult {
            from,
            to,
            total_hits,
            publications,
            facets,
        })
    }

    /// Streaming export: returns immediately with the read end of a bounded
    /// pipe populated by a dedicated worker until exhaustion, the configured
    /// limit, or an error.
    ///
    /// On success the stream ends with the literal `</OMTDPublications>`
    /// terminator; a stream that closes without it was truncated by a
    /// failure.
    pub async fn fetch_metadata(&self, query: &Query) -> Result<DuplexStream, ConnectorError> {
        let solr_query = translate(query)?;
        let client = SolrClient::new(&self.config)?;
        let (reader, writer) = duplex(self.config.export_buffer_bytes);

        let limit = self.config.query_limit;
        let result_field = self.config.result_field.clone();
        tokio::spawn(async move {
            run_export(client, solr_query, limit, result_field, writer).await;
        });

        Ok(reader)
    }

    /// Index one document into the configured collection, committing
    /// immediately.
    pub async fn index_document(&self, document: &Value) -> Result<(), ConnectorError> {
        let client = SolrClient::new(&self.config)?;
        match client.index(document).await {
            Ok(()) => {
                metrics::record_call("index", "success");
                Ok(())
            }
            Err(err) => {
                metrics::record_call("index", "error");
                Err(err.into())
            }
        }
    }
}

/// Per-document transform on the export path: unwrap the result field,
/// parse the record, and append its OMTD XML rendering to the pipe.
///
/// Malformed records are logged and skipped; pipe failures abort the scan.
pub struct PublicationSink {
    writer: DuplexStream,
    result_field: String,
}

impl PublicationSink {
    /// Literal terminator written once after the last record.
    pub const CLOSING_TAG: &'static [u8] = b"</OMTDPublications>\n";

    pub fn new(writer: DuplexStream, result_field: impl Into<String>) -> Self {
        Self {
            writer,
            result_field: result_field.into(),
        }
    }

    /// Write the terminator and close the pipe. Consumed on the success
    /// path only; dropping the sink instead closes the pipe without the
    /// terminator.
    pub async fn finish(mut self) -> std::io::Result<()> {
        self.writer.write_all(Self::CLOSING_TAG).await?;
        self.writer.flush().await?;
        self.writer.shutdown().await
    }
}

#[async_trait]
impl DocumentSink for PublicationSink {
    async fn accept(&mut self, document: &Value) -> Result<(), ConnectorError> {
        let record = match publication::extract_record(document, &self.result_field)
            .and_then(|xml| publication::parse_publication(&xml))
            .and_then(|record| record.to_omtd_xml())
        {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(%err, "Skipping malformed export document");
                metrics::record_document("skipped");
                return Ok(());
            }
        };

        self.writer.write_all(&record).await?;
        self.writer.write_all(b"\n").await?;
        metrics::record_document("streamed");
        Ok(())
    }
}

/// Worker body of one export: drive the pager into a [`PublicationSink`]
/// and close the pipe exactly once on every exit path.
async fn run_export<B: SolrBackend>(
    backend: B,
    query: SolrQuery,
    limit: u64,
    result_field: String,
    writer: DuplexStream,
) {
    let started = Instant::now();
    let mut sink = PublicationSink::new(writer, result_field);
    let pager = CursorPager::new(&backend, &query, limit);

    match pager.run(&mut sink).await {
        Ok(outcome) => match sink.finish().await {
            Ok(()) => {
                metrics::record_call("export", "success");
                metrics::record_query_latency("export", started.elapsed());
                info!(pages = outcome.pages, count = outcome.count,
                      exhausted = outcome.exhausted, "Export completed");
            }
            Err(err) => {
                metrics::record_call("export", "error");
                warn!(%err, "Failed to terminate export stream");
            }
        },
        Err(err) => {
            // the pipe closes on drop without the terminator; the consumer
            // reads that as truncation
            metrics::record_call("export", "error");
            warn!(%err, "Export aborted");
        }
    }
}
