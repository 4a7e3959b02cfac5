//! Facet model, aggregation, and the OMTD↔OpenAIRE facet name map.
//!
//! Aggregation keeps the backend's native ordering: facet fields appear in
//! response order and values in delivered-count order, never re-sorted.
//!
//! The name map is a fixed bidirectional table between the connector
//! framework's canonical facet names and the OpenAIRE index fields. It is
//! built once, never mutated, and deliberately not consulted by the search
//! or export paths — it exists for hosts that present canonical names.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::solr::FacetCounts;

/// One value bucket of a facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetValue {
    pub value: String,
    pub count: u64,
}

/// Backend-computed counts of documents grouped by one field's values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facet {
    pub label: String,
    pub field: String,
    pub values: Vec<FacetValue>,
}

/// Translate a response's facet section into domain facets.
///
/// Label and field both carry the backend field name; no remapping occurs
/// on this path.
pub fn facets_from_response(counts: &FacetCounts) -> Vec<Facet> {
    counts
        .facet_fields
        .iter()
        .map(|(field, flat)| {
            let mut values = Vec::new();
            if let Some(pairs) = flat.as_array() {
                for pair in pairs.chunks(2) {
                    if let [value, count] = pair {
                        values.push(FacetValue {
                            value: value
                                .as_str()
                                .map(str::to_string)
                                .unwrap_or_else(|| value.to_string()),
                            count: count.as_u64().unwrap_or(0),
                        });
                    }
                }
            }
            Facet {
                label: field.clone(),
                field: field.clone(),
                values,
            }
        })
        .collect()
}

// Canonical facet names on the framework side
pub const OMTD_PUBLICATION_TYPE: &str = "publicationtype";
pub const OMTD_PUBLICATION_YEAR: &str = "publicationyear";
pub const OMTD_RIGHTS_STMT_NAME: &str = "rightsstmtname";
pub const OMTD_RIGHTS: &str = "rights";
pub const OMTD_DOCUMENT_LANG: &str = "documentlanguage";
pub const OMTD_DOCUMENT_TYPE: &str = "documenttype";
pub const OMTD_PUBLISHER: &str = "publisher";
pub const OMTD_KEYWORD: &str = "keyword";

// Native field names on the OpenAIRE index
const INSTANCE_TYPE_NAME: &str = "instancetypename";
const RESULT_DATE_OF_ACCEPTANCE: &str = "resultdateofacceptance";
const RESULT_RIGHTS: &str = "resultrights";
const RESULT_LANGUAGE_ID: &str = "resultlanguageid";
const MIMETYPE: &str = "mimetype";

struct FacetNameMap {
    to_openaire: HashMap<&'static str, &'static str>,
    to_omtd: HashMap<&'static str, &'static str>,
}

fn name_map() -> &'static FacetNameMap {
    static MAP: OnceLock<FacetNameMap> = OnceLock::new();
    MAP.get_or_init(|| {
        let to_openaire = HashMap::from([
            (OMTD_PUBLICATION_TYPE, INSTANCE_TYPE_NAME),
            (OMTD_PUBLICATION_YEAR, RESULT_DATE_OF_ACCEPTANCE),
            (OMTD_RIGHTS_STMT_NAME, RESULT_RIGHTS),
            (OMTD_RIGHTS, RESULT_RIGHTS),
            (OMTD_DOCUMENT_LANG, RESULT_LANGUAGE_ID),
            (OMTD_DOCUMENT_TYPE, MIMETYPE),
            (OMTD_PUBLISHER, OMTD_PUBLISHER),
            (OMTD_KEYWORD, OMTD_KEYWORD),
        ]);
        // both rights flavors share one native field; the reverse direction
        // resolves to the plain rights facet
        let to_omtd = HashMap::from([
            (INSTANCE_TYPE_NAME, OMTD_PUBLICATION_TYPE),
            (RESULT_DATE_OF_ACCEPTANCE, OMTD_PUBLICATION_YEAR),
            (RESULT_RIGHTS, OMTD_RIGHTS),
            (RESULT_LANGUAGE_ID, OMTD_DOCUMENT_LANG),
            (MIMETYPE, OMTD_DOCUMENT_TYPE),
            (OMTD_PUBLISHER, OMTD_PUBLISHER),
            (OMTD_KEYWORD, OMTD_KEYWORD),
        ]);
        FacetNameMap {
            to_openaire,
            to_omtd,
        }
    })
}

/// Map a canonical facet name to its OpenAIRE index field.
pub fn omtd_to_openaire(name: &str) -> Option<&'static str> {
    name_map().to_openaire.get(name).copied()
}

/// Map an OpenAIRE index field back to its canonical facet name.
pub fn openaire_to_omtd(field: &str) -> Option<&'static str> {
    name_map().to_omtd.get(field).copied()
}
