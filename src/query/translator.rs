// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Query → Solr translation.
//!
//! [`translate`] is a pure function from the generic [`Query`] to the
//! [`SolrQuery`] wire form. The result-type and not-deleted system filters
//! are always appended after all caller-derived clauses and cannot be
//! overridden through `params`.

use chrono::Utc;
use tracing::{debug, warn};

use crate::error::TranslationError;
use crate::metrics;
use crate::query::model::{Query, SortOrder};

/// System filter restricting results to publications.
pub const FILTER_RESULT_TYPE_NAME: &str = "resulttypename:publication";
/// System filter excluding records deleted by inference.
pub const FILTER_DELETED_BY_INFERENCE: &str = "deletedbyinference:false";

const DEFAULT_ROWS: i64 = 10;

/// A translated query in Solr's terms, built fresh per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolrQuery {
    /// Free-text query, caller's keyword verbatim
    pub q: String,
    /// Result window offset
    pub start: u64,
    /// Result window size; non-positive values pass through unchanged
    pub rows: i64,
    /// ANDed filter clauses, system filters last
    pub filter_queries: Vec<String>,
    /// Sort fields in caller order
    pub sorts: Vec<(String, SortOrder)>,
    /// Return-field projection
    pub fields: Vec<String>,
    /// Facet fields in caller order
    pub facet_fields: Vec<String>,
}

impl SolrQuery {
    /// Render the `/select` request parameters. With a cursor attached,
    /// `start` is omitted: Solr rejects cursor paging from a non-zero
    /// offset.
    pub fn params(&self, cursor: Option<&str>) -> Vec<(String, String)> {
        let mut params = vec![
            ("q".to_string(), self.q.clone()),
            ("wt".to_string(), "json".to_string()),
        ];

        match cursor {
            Some(mark) => params.push(("cursorMark".to_string(), mark.to_string())),
            None => params.push(("start".to_string(), self.start.to_string())),
        }
        params.push(("rows".to_string(), self.rows.to_string()));

        for fq in &self.filter_queries {
            params.push(("fq".to_string(), fq.clone()));
        }

        if !self.sorts.is_empty() {
            let sort = self
                .sorts
                .iter()
                .map(|(field, order)| format!("{} {}", field, order.as_str()))
                .collect::<Vec<_>>()
                .join(",");
            params.push(("sort".to_string(), sort));
        }

        if !self.fields.is_empty() {
            params.push(("fl".to_string(), self.fields.join(",")));
        }

        if !self.facet_fields.is_empty() {
            params.push(("facet".to_string(), "true".to_string()));
            for field in &self.facet_fields {
                params.push(("facet.field".to_string(), field.clone()));
            }
        }

        params
    }
}

/// Translate a generic [`Query`] into a [`SolrQuery`].
///
/// Deterministic and side-effect-free apart from diagnostics. Fails only on
/// an unrecognized sort direction; date/year values that fit no accepted
/// format are dropped with a warning and translation continues.
pub fn translate(query: &Query) -> Result<SolrQuery, TranslationError> {
    let start = if query.from > 0 { query.from as u64 } else { 0 };
    let rows = if query.to > 0 {
        query.to - start as i64
    } else {
        DEFAULT_ROWS
    };

    let mut sorts = Vec::new();
    let mut fields = Vec::new();
    let mut filter_queries = Vec::new();

    for (key, values) in &query.params {
        if key.eq_ignore_ascii_case("sort") {
            for value in values {
                let tokens: Vec<&str> = value.split_whitespace().collect();
                match tokens.as_slice() {
                    [field, direction] => {
                        let order = SortOrder::parse(direction).ok_or_else(|| {
                            TranslationError::InvalidSortDirection {
                                field: (*field).to_string(),
                                direction: (*direction).to_string(),
                            }
                        })?;
                        sorts.push(((*field).to_string(), order));
                    }
                    [field] => sorts.push(((*field).to_string(), SortOrder::Descending)),
                    _ => {}
                }
            }
        } else if key.eq_ignore_ascii_case("fl") {
            fields.extend(values.iter().cloned());
        } else if is_temporal_field(key) {
            if let Some(clause) = temporal_clause(key, values) {
                filter_queries.push(clause);
            }
        } else {
            let clause = values
                .iter()
                .map(|value| format!("{}:\"{}\"", key, value))
                .collect::<Vec<_>>()
                .join(" OR ");
            if !clause.is_empty() {
                filter_queries.push(clause);
            }
        }
    }

    filter_queries.push(FILTER_RESULT_TYPE_NAME.to_string());
    filter_queries.push(FILTER_DELETED_BY_INFERENCE.to_string());

    let solr_query = SolrQuery {
        q: query.keyword.clone(),
        start,
        rows,
        filter_queries,
        sorts,
        fields,
        facet_fields: query.facets.clone(),
    };

    debug!(q = %solr_query.q, start = solr_query.start, rows = solr_query.rows,
           filters = solr_query.filter_queries.len(), "Query translated");

    Ok(solr_query)
}

fn is_temporal_field(key: &str) -> bool {
    let lower = key.to_ascii_lowercase();
    lower.contains("year") || lower.contains("date")
}

/// Build one OR-combined range clause for a date/year field. Values failing
/// every accepted format are dropped; `None` means nothing survived.
fn temporal_clause(key: &str, values: &[String]) -> Option<String> {
    let mut parts = Vec::new();
    for value in values {
        match range_anchor(value) {
            Some(anchor) => {
                parts.push(format!("{}:[{} TO {}+1YEAR]", key, anchor, anchor));
            }
            None => {
                warn!(field = %key, value = %value, "Dropping unparsable date/year filter value");
                metrics::record_dropped_filter_value();
            }
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" OR "))
    }
}

/// Resolve a filter value to a UTC range anchor. A bare 4-digit year expands
/// to the start-of-year instant; otherwise the value must be a full ISO-8601
/// timestamp.
fn range_anchor(value: &str) -> Option<String> {
    let value = value.trim();
    if value.len() == 4 && value.bytes().all(|b| b.is_ascii_digit()) {
        return Some(format!("{}-01-01T00:00:00.000Z", value));
    }
    chrono::DateTime::parse_from_rfc3339(value).ok().map(|dt| {
        dt.with_timezone(&Utc)
            .format("%Y-%m-%dT%H:%M:%S%.3fZ")
            .to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mandatory_tail(sq: &SolrQuery) -> &[String] {
        let n = sq.filter_queries.len();
        &sq.filter_queries[n - 2..]
    }

    #[test]
    fn window_resolves_from_and_to() {
        let sq = translate(&Query::new("test", 20, 50)).unwrap();
        assert_eq!(sq.start, 20);
        assert_eq!(sq.rows, 30);
    }

    #[test]
    fn non_positive_window_falls_back_to_defaults() {
        let sq = translate(&Query::new("test", -5, 0)).unwrap();
        assert_eq!(sq.start, 0);
        assert_eq!(sq.rows, 10);
    }

    #[test]
    fn inverted_window_passes_through_unguarded() {
        // to <= offset yields a non-positive row count; the translation
        // does not special-case it
        let sq = translate(&Query::new("test", 30, 20)).unwrap();
        assert_eq!(sq.start, 30);
        assert_eq!(sq.rows, -10);
    }

    #[test]
    fn mandatory_filters_always_present_and_last() {
        let empty = translate(&Query::new("test", 0, 10)).unwrap();
        assert_eq!(
            empty.filter_queries,
            vec![FILTER_RESULT_TYPE_NAME, FILTER_DELETED_BY_INFERENCE]
        );

        let with_params = translate(
            &Query::new("test", 0, 10)
                .with_param("publisher", ["Elsevier"])
                .with_param("resulttypename", ["dataset"]),
        )
        .unwrap();
        assert_eq!(
            mandatory_tail(&with_params),
            &[
                FILTER_RESULT_TYPE_NAME.to_string(),
                FILTER_DELETED_BY_INFERENCE.to_string()
            ]
        );
        // a caller param on the same field does not displace the system filter
        assert_eq!(with_params.filter_queries.len(), 4);
    }

    #[test]
    fn sort_two_tokens_with_bad_direction_fails() {
        let err = translate(
            &Query::new("test", 0, 10).with_param("sort", ["resultdateofacceptance sideways"]),
        )
        .unwrap_err();
        let TranslationError::InvalidSortDirection { field, direction } = err;
        assert_eq!(field, "resultdateofacceptance");
        assert_eq!(direction, "sideways");
    }

    #[test]
    fn sort_single_token_defaults_to_descending() {
        let sq =
            translate(&Query::new("test", 0, 10).with_param("sort", ["resultdateofacceptance"]))
                .unwrap();
        assert_eq!(
            sq.sorts,
            vec![(
                "resultdateofacceptance".to_string(),
                SortOrder::Descending
            )]
        );
    }

    #[test]
    fn sort_key_is_case_insensitive() {
        let sq = translate(&Query::new("test", 0, 10).with_param("SORT", ["publisher asc"]))
            .unwrap();
        assert_eq!(sq.sorts, vec![("publisher".to_string(), SortOrder::Ascending)]);
        assert!(sq.filter_queries.iter().all(|fq| !fq.contains("publisher")));
    }

    #[test]
    fn fl_values_become_projection() {
        let sq = translate(&Query::new("test", 0, 10).with_param("fl", ["__result", "id"]))
            .unwrap();
        assert_eq!(sq.fields, vec!["__result", "id"]);
    }

    #[test]
    fn year_value_expands_to_range_clause() {
        let sq = translate(&Query::new("test", 0, 10).with_param("year", ["2019"])).unwrap();
        assert_eq!(
            sq.filter_queries[0],
            "year:[2019-01-01T00:00:00.000Z TO 2019-01-01T00:00:00.000Z+1YEAR]"
        );
    }

    #[test]
    fn iso_timestamp_expands_to_same_range_shape() {
        let sq = translate(
            &Query::new("test", 0, 10)
                .with_param("resultdateofacceptance", ["2019-06-15T12:30:00.000Z"]),
        )
        .unwrap();
        assert_eq!(
            sq.filter_queries[0],
            "resultdateofacceptance:[2019-06-15T12:30:00.000Z TO 2019-06-15T12:30:00.000Z+1YEAR]"
        );
    }

    #[test]
    fn unparsable_date_value_is_dropped_not_fatal() {
        let sq = translate(
            &Query::new("test", 0, 10).with_param("year", ["not-a-year", "2019"]),
        )
        .unwrap();
        // the bad value vanished, the good one survived
        assert_eq!(
            sq.filter_queries[0],
            "year:[2019-01-01T00:00:00.000Z TO 2019-01-01T00:00:00.000Z+1YEAR]"
        );

        // all values bad → no clause at all, only the system filters
        let sq = translate(&Query::new("test", 0, 10).with_param("year", ["nope"])).unwrap();
        assert_eq!(
            sq.filter_queries,
            vec![FILTER_RESULT_TYPE_NAME, FILTER_DELETED_BY_INFERENCE]
        );
    }

    #[test]
    fn equality_values_or_combine_into_one_clause() {
        let sq = translate(
            &Query::new("test", 0, 10).with_param("resultlanguageid", ["eng", "fra"]),
        )
        .unwrap();
        assert_eq!(
            sq.filter_queries[0],
            "resultlanguageid:\"eng\" OR resultlanguageid:\"fra\""
        );
    }

    #[test]
    fn end_to_end_year_query() {
        let sq = translate(&Query::new("test", 0, 5).with_param("year", ["2019"])).unwrap();
        assert_eq!(sq.q, "test");
        assert_eq!(sq.start, 0);
        assert_eq!(sq.rows, 5);
        assert_eq!(
            sq.filter_queries,
            vec![
                "year:[2019-01-01T00:00:00.000Z TO 2019-01-01T00:00:00.000Z+1YEAR]".to_string(),
                FILTER_RESULT_TYPE_NAME.to_string(),
                FILTER_DELETED_BY_INFERENCE.to_string(),
            ]
        );
    }

    #[test]
    fn params_render_start_without_cursor_and_cursor_without_start() {
        let sq = translate(
            &Query::new("test", 10, 20)
                .with_facet("instancetypename")
                .with_param("sort", ["id asc"]),
        )
        .unwrap();

        let plain = sq.params(None);
        assert!(plain.contains(&("start".to_string(), "10".to_string())));
        assert!(!plain.iter().any(|(k, _)| k == "cursorMark"));
        assert!(plain.contains(&("sort".to_string(), "id asc".to_string())));
        assert!(plain.contains(&("facet".to_string(), "true".to_string())));
        assert!(plain.contains(&("facet.field".to_string(), "instancetypename".to_string())));

        let cursored = sq.params(Some("*"));
        assert!(cursored.contains(&("cursorMark".to_string(), "*".to_string())));
        assert!(!cursored.iter().any(|(k, _)| k == "start"));
    }

    #[test]
    fn empty_facets_disable_faceting() {
        let sq = translate(&Query::new("test", 0, 10)).unwrap();
        assert!(!sq.params(None).iter().any(|(k, _)| k == "facet"));
    }
}
