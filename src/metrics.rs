// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Metrics instrumentation for the connector.
//!
//! Uses the `metrics` crate for backend-agnostic metrics collection.
//! The host application is responsible for choosing the exporter
//! (Prometheus, OTEL, etc.)
//!
//! # Metric Naming Convention
//! - `openaire_connector_` prefix for all metrics
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Labels
//! - `path`: search, export, index
//! - `status`: success, error
//! - `outcome`: streamed, skipped

use metrics::{counter, histogram};
use std::time::Duration;

/// Record a completed connector call
pub fn record_call(path: &str, status: &str) {
    counter!(
        "openaire_connector_calls_total",
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record backend query latency
pub fn record_query_latency(path: &str, duration: Duration) {
    histogram!(
        "openaire_connector_query_seconds",
        "path" => path.to_string()
    )
    .record(duration.as_secs_f64());
}

/// Record pages fetched during a cursor scan
pub fn record_scan_pages(pages: u64) {
    counter!("openaire_connector_scan_pages_total").increment(pages);
}

/// Record a document outcome on the export path
pub fn record_document(outcome: &str) {
    counter!(
        "openaire_connector_documents_total",
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

/// Record the number of hits a search reported
pub fn record_search_hits(hits: u64) {
    histogram!("openaire_connector_search_hits").record(hits as f64);
}

/// Record a date/year filter value that failed every accepted format
pub fn record_dropped_filter_value() {
    counter!("openaire_connector_dropped_filter_values_total").increment(1);
}
