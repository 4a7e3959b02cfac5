// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Cursor-driven scan over a Solr result set.
//!
//! [`CursorPager`] repeatedly issues one translated query with an attached
//! cursor token, forwarding every delivered document to a caller-supplied
//! [`DocumentSink`]. The scan ends when the backend repeats a cursor token
//! (exhaustion) or when the running count reaches a configured limit.
//!
//! The running count advances by the query's row hint rather than the
//! delivered page size, so a limit stop may emit up to one page more than
//! the nominal limit. See [`ScanOutcome::count`].
//!
//! A single transport failure ends the scan; there is no retry. Documents
//! and pages are forwarded strictly in backend delivery order.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::error::ConnectorError;
use crate::metrics;
use crate::query::SolrQuery;
use crate::solr::{SolrBackend, CURSOR_MARK_START};

/// Per-document consumer fed by the pager during a scan.
#[async_trait]
pub trait DocumentSink: Send {
    /// Receive one document, in backend delivery order. An error aborts the
    /// whole scan.
    async fn accept(&mut self, document: &Value) -> Result<(), ConnectorError>;
}

/// How a completed scan ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Pages fetched
    pub pages: u64,
    /// Running count at termination; advanced by the row hint per page, so
    /// an approximation of (and possibly above) the documents emitted
    pub count: u64,
    /// True when the backend signaled exhaustion, false on a limit stop
    pub exhausted: bool,
}

/// Drives one scan of a translated query against a backend.
pub struct CursorPager<'a, B: SolrBackend> {
    backend: &'a B,
    query: &'a SolrQuery,
    limit: u64,
}

impl<'a, B: SolrBackend> CursorPager<'a, B> {
    /// A limit of 0 scans to exhaustion.
    pub fn new(backend: &'a B, query: &'a SolrQuery, limit: u64) -> Self {
        Self {
            backend,
            query,
            limit,
        }
    }

    /// Run the scan, feeding every document to `sink`.
    pub async fn run<S: DocumentSink>(&self, sink: &mut S) -> Result<ScanOutcome, ConnectorError> {
        let hint = self.query.rows.max(0) as u64;
        let mut cursor = CURSOR_MARK_START.to_string();
        let mut count: u64 = 0;
        let mut pages: u64 = 0;

        loop {
            let response = self.backend.select(self.query, Some(&cursor)).await?;
            pages += 1;

            for document in &response.response.docs {
                sink.accept(document).await?;
            }
            count += hint;

            debug!(page = pages, delivered = response.response.docs.len(), count,
                   "Scan page forwarded");

            if self.limit > 0 && count >= self.limit {
                metrics::record_scan_pages(pages);
                debug!(count, limit = self.limit, "Scan stopped at configured limit");
                return Ok(ScanOutcome {
                    pages,
                    count,
                    exhausted: false,
                });
            }

            // an absent next cursor means the backend cannot advance the scan
            let next = response.next_cursor_mark.unwrap_or_else(|| cursor.clone());
            if next == cursor {
                metrics::record_scan_pages(pages);
                debug!(pages, count, "Backend signaled exhaustion");
                return Ok(ScanOutcome {
                    pages,
                    count,
                    exhausted: true,
                });
            }
            cursor = next;
        }
    }
}
