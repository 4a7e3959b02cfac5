// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Solr backend access.
//!
//! [`SolrBackend`] is the seam between the connector and the wire: the
//! cursor pager and the search path only ever talk to this trait, so tests
//! can script a backend in memory while production uses the reqwest-based
//! [`SolrClient`].
//!
//! # Cursor paging
//!
//! ```text
//! select(query, cursorMark=*)      → page 1 + nextCursorMark=c1
//! select(query, cursorMark=c1)     → page 2 + nextCursorMark=c2
//! select(query, cursorMark=c2)     → page 3 + nextCursorMark=c2   (equal → end)
//! ```

mod client;
mod response;

use async_trait::async_trait;

use crate::error::BackendError;
use crate::query::SolrQuery;

pub use client::SolrClient;
pub use response::{FacetCounts, SolrDocList, SolrSelectResponse};

/// Well-known start-of-scan cursor token.
pub const CURSOR_MARK_START: &str = "*";

/// A backend that executes translated queries.
///
/// One page per call; an attached cursor token requests the page at that
/// scan position. Implementations must preserve the backend's document
/// order.
#[async_trait]
pub trait SolrBackend: Send + Sync {
    /// Execute a `/select` request, optionally positioned at a cursor.
    async fn select(
        &self,
        query: &SolrQuery,
        cursor: Option<&str>,
    ) -> Result<SolrSelectResponse, BackendError>;
}
