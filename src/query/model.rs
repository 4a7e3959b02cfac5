//! Generic query model.
//!
//! [`Query`] is the caller-owned search request: free text, an absolute
//! pagination window, facet fields, and an ordered filter-param map. It is
//! immutable for the duration of one call.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A generic search request.
///
/// # Example
///
/// ```
/// use openaire_connector::Query;
///
/// let query = Query::new("machine translation", 0, 20)
///     .with_facet("instancetypename")
///     .with_param("resultlanguageid", ["eng", "fra"])
///     .with_param("sort", ["resultdateofacceptance desc"]);
///
/// assert_eq!(query.from, 0);
/// assert_eq!(query.to, 20);
/// assert_eq!(query.params.len(), 2);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Query {
    /// Free-text search string. Passed to the backend verbatim — the caller
    /// is responsible for backend-safe input.
    pub keyword: String,
    /// Absolute offset of the first record requested.
    pub from: i64,
    /// Absolute offset one past the last record requested; `to - from`
    /// yields the page size.
    pub to: i64,
    /// Fields to aggregate facet counts over; empty disables faceting.
    #[serde(default)]
    pub facets: Vec<String>,
    /// Filter-field → ordered values. The reserved keys `sort` and `fl`
    /// (case-insensitive) are interpreted specially; all others become
    /// filter clauses. Iteration follows insertion order.
    #[serde(default)]
    pub params: IndexMap<String, Vec<String>>,
}

impl Query {
    /// Create a query with a keyword and pagination window.
    pub fn new(keyword: impl Into<String>, from: i64, to: i64) -> Self {
        Self {
            keyword: keyword.into(),
            from,
            to,
            facets: Vec::new(),
            params: IndexMap::new(),
        }
    }

    /// Request facet counts for a field.
    pub fn with_facet(mut self, field: impl Into<String>) -> Self {
        self.facets.push(field.into());
        self
    }

    /// Add a filter param (or a reserved `sort`/`fl` param). Values for an
    /// existing key are appended.
    pub fn with_param<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params
            .entry(key.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }
}

/// Sort direction for one sort field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Parse a direction token (case-insensitive). Accepts the short and
    /// long keyword forms; anything else is unrecognized.
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(Self::Ascending),
            "desc" | "descending" => Some(Self::Descending),
            _ => None,
        }
    }

    /// The Solr sort-param rendering of this direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}
