// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Query model and translation
//!
//! The caller builds a generic [`Query`]; [`translate`] turns it into the
//! [`SolrQuery`] the backend understands.
//!
//! ```text
//! Query (keyword, from/to, facets, params)
//!     ↓ translate
//! SolrQuery (q, start/rows, fq…, sort, fl, facet.field…)
//! ```
//!
//! # Reserved params
//!
//! Two params keys are interpreted instead of becoming filters:
//!
//! ```text
//! sort = "field asc" | "field desc" | "field"   (bare field → desc)
//! fl   = field name to include in the projection
//! ```
//!
//! Every other key becomes one ANDed filter clause; multiple values for the
//! same key OR-combine. Keys whose name contains "year" or "date" get range
//! treatment:
//!
//! ```text
//! year = "2019"  →  year:[2019-01-01T00:00:00.000Z TO 2019-01-01T00:00:00.000Z+1YEAR]
//! ```

mod model;
mod translator;

pub use model::{Query, SortOrder};
pub use translator::{
    translate, SolrQuery, FILTER_DELETED_BY_INFERENCE, FILTER_RESULT_TYPE_NAME,
};
