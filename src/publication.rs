// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Publication records.
//!
//! Each Solr document embeds one oaf result record as XML inside a
//! bracketed-list textual encoding. [`extract_record`] unwraps that
//! encoding and prepends the fixed UTF-8 prolog; [`parse_publication`]
//! walks the XML events into a [`Publication`]; [`Publication::to_omtd_xml`]
//! renders the export form.
//!
//! The parser is tolerant: unknown elements are ignored, and class
//! attributes fall back between `classid` and `classname` forms.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DocumentError;

/// Fixed prolog prepended to every extracted record.
pub const XML_PROLOG: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";

/// A parsed publication metadata record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    /// Repository object identifier
    pub id: Option<String>,
    pub title: Option<String>,
    pub abstract_text: Option<String>,
    /// Creators in record order
    pub authors: Vec<String>,
    pub date_of_acceptance: Option<String>,
    pub publisher: Option<String>,
    /// ISO language id
    pub language: Option<String>,
    /// Instance type, e.g. "Article"
    pub publication_type: Option<String>,
    /// Best access right, e.g. "Open Access"
    pub rights: Option<String>,
    /// Persistent identifiers (doi etc.)
    pub identifiers: Vec<String>,
    /// Subject keywords in record order
    pub keywords: Vec<String>,
}

/// Unwrap the configured result field of a Solr document into a standalone
/// XML string with the prolog attached.
///
/// The field arrives either as a JSON array of strings (multivalued Solr
/// field) or as one bracket-wrapped string.
pub fn extract_record(document: &Value, result_field: &str) -> Result<String, DocumentError> {
    let value = document
        .get(result_field)
        .ok_or_else(|| DocumentError::MissingField(result_field.to_string()))?;

    let raw = match value {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(""),
        Value::String(s) => s
            .trim()
            .trim_start_matches('[')
            .trim_end_matches(']')
            .to_string(),
        _ => String::new(),
    };

    if raw.trim().is_empty() {
        return Err(DocumentError::EmptyField(result_field.to_string()));
    }
    Ok(format!("{}{}", XML_PROLOG, raw))
}

/// Parse one oaf result record into a [`Publication`].
pub fn parse_publication(xml: &str) -> Result<Publication, DocumentError> {
    let mut reader = Reader::from_str(xml);
    let mut publication = Publication::default();
    // local name of the element whose text is being captured
    let mut capturing: Option<Vec<u8>> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = e.local_name().as_ref().to_vec();
                match name.as_slice() {
                    b"language" => {
                        publication.language = class_attr(&e, &["classid", "classname"]);
                        capturing = None;
                    }
                    b"instancetype" => {
                        publication.publication_type = class_attr(&e, &["classname", "classid"]);
                        capturing = None;
                    }
                    b"bestaccessright" => {
                        publication.rights = class_attr(&e, &["classname", "classid"]);
                        capturing = None;
                    }
                    b"title" | b"description" | b"creator" | b"dateofacceptance"
                    | b"publisher" | b"subject" | b"pid" | b"objIdentifier" => {
                        capturing = Some(name);
                    }
                    _ => capturing = None,
                }
            }
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"language" => publication.language = class_attr(&e, &["classid", "classname"]),
                b"instancetype" => {
                    publication.publication_type = class_attr(&e, &["classname", "classid"])
                }
                b"bestaccessright" => {
                    publication.rights = class_attr(&e, &["classname", "classid"])
                }
                _ => {}
            },
            Ok(Event::Text(t)) => {
                if let Some(name) = &capturing {
                    if let Ok(text) = t.unescape() {
                        let text = text.trim();
                        if !text.is_empty() {
                            capture(&mut publication, name, text);
                        }
                    }
                }
            }
            Ok(Event::End(_)) => capturing = None,
            Ok(Event::Eof) => break,
            Err(e) => return Err(DocumentError::Xml(e)),
            _ => {}
        }
    }

    Ok(publication)
}

fn capture(publication: &mut Publication, element: &[u8], text: &str) {
    match element {
        // repeated titles keep the first (main) one
        b"title" => {
            if publication.title.is_none() {
                publication.title = Some(text.to_string());
            }
        }
        b"description" => {
            if publication.abstract_text.is_none() {
                publication.abstract_text = Some(text.to_string());
            }
        }
        b"creator" => publication.authors.push(text.to_string()),
        b"dateofacceptance" => publication.date_of_acceptance = Some(text.to_string()),
        b"publisher" => publication.publisher = Some(text.to_string()),
        b"subject" => publication.keywords.push(text.to_string()),
        b"pid" => publication.identifiers.push(text.to_string()),
        b"objIdentifier" => publication.id = Some(text.to_string()),
        _ => {}
    }
}

fn class_attr(element: &BytesStart<'_>, preference: &[&str]) -> Option<String> {
    for attr in preference {
        if let Ok(Some(a)) = element.try_get_attribute(*attr) {
            if let Ok(value) = a.unescape_value() {
                let value = value.trim();
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}

impl Publication {
    /// Render this record as one OMTD publication element.
    pub fn to_omtd_xml(&self) -> Result<Vec<u8>, DocumentError> {
        let mut writer = Writer::new(Vec::new());

        start(&mut writer, "publication")?;
        if let Some(id) = &self.id {
            text_element(&mut writer, "identifier", id)?;
        }
        if let Some(title) = &self.title {
            text_element(&mut writer, "title", title)?;
        }
        if !self.authors.is_empty() {
            start(&mut writer, "authors")?;
            for author in &self.authors {
                text_element(&mut writer, "author", author)?;
            }
            end(&mut writer, "authors")?;
        }
        if let Some(abstract_text) = &self.abstract_text {
            text_element(&mut writer, "abstract", abstract_text)?;
        }
        if let Some(date) = &self.date_of_acceptance {
            text_element(&mut writer, "publicationDate", date)?;
        }
        if let Some(publisher) = &self.publisher {
            text_element(&mut writer, "publisher", publisher)?;
        }
        if let Some(language) = &self.language {
            text_element(&mut writer, "language", language)?;
        }
        if let Some(publication_type) = &self.publication_type {
            text_element(&mut writer, "publicationType", publication_type)?;
        }
        if let Some(rights) = &self.rights {
            text_element(&mut writer, "rights", rights)?;
        }
        if !self.identifiers.is_empty() {
            start(&mut writer, "identifiers")?;
            for pid in &self.identifiers {
                text_element(&mut writer, "identifier", pid)?;
            }
            end(&mut writer, "identifiers")?;
        }
        if !self.keywords.is_empty() {
            start(&mut writer, "keywords")?;
            for keyword in &self.keywords {
                text_element(&mut writer, "keyword", keyword)?;
            }
            end(&mut writer, "keywords")?;
        }
        end(&mut writer, "publication")?;

        Ok(writer.into_inner())
    }
}

fn start(writer: &mut Writer<Vec<u8>>, tag: &str) -> Result<(), DocumentError> {
    writer
        .write_event(Event::Start(BytesStart::new(tag)))
        .map_err(|e| DocumentError::Render(e.to_string()))
}

fn end(writer: &mut Writer<Vec<u8>>, tag: &str) -> Result<(), DocumentError> {
    writer
        .write_event(Event::End(BytesEnd::new(tag)))
        .map_err(|e| DocumentError::Render(e.to_string()))
}

fn text_element(writer: &mut Writer<Vec<u8>>, tag: &str, text: &str) -> Result<(), DocumentError> {
    start(writer, tag)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(|e| DocumentError::Render(e.to_string()))?;
    end(writer, tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SAMPLE: &str = r#"<result xmlns:oaf="http://namespace.openaire.eu/oaf">
        <oaf:result>
            <title classid="main title">Neural Machine Translation</title>
            <title classid="alternative title">NMT Survey</title>
            <creator rank="1">Ada Lovelace</creator>
            <creator rank="2">Alan Turing</creator>
            <description>A survey of &amp; about NMT.</description>
            <dateofacceptance>2019-04-02</dateofacceptance>
            <publisher>ACM</publisher>
            <language classid="eng" classname="English"/>
            <instancetype classid="0001" classname="Article"/>
            <bestaccessright classid="OPEN" classname="Open Access"/>
            <pid classid="doi">10.1000/182</pid>
            <subject classid="keyword">translation</subject>
            <subject classid="keyword">neural networks</subject>
        </oaf:result>
    </result>"#;

    #[test]
    fn parses_sample_record() {
        let publication = parse_publication(SAMPLE).unwrap();
        assert_eq!(publication.title.as_deref(), Some("Neural Machine Translation"));
        assert_eq!(
            publication.authors,
            vec!["Ada Lovelace".to_string(), "Alan Turing".to_string()]
        );
        assert_eq!(publication.abstract_text.as_deref(), Some("A survey of & about NMT."));
        assert_eq!(publication.date_of_acceptance.as_deref(), Some("2019-04-02"));
        assert_eq!(publication.publisher.as_deref(), Some("ACM"));
        assert_eq!(publication.language.as_deref(), Some("eng"));
        assert_eq!(publication.publication_type.as_deref(), Some("Article"));
        assert_eq!(publication.rights.as_deref(), Some("Open Access"));
        assert_eq!(publication.identifiers, vec!["10.1000/182".to_string()]);
        assert_eq!(publication.keywords.len(), 2);
    }

    #[test]
    fn extract_unwraps_json_array_field() {
        let document = json!({"__result": ["<result><title>T</title></result>"]});
        let xml = extract_record(&document, "__result").unwrap();
        assert!(xml.starts_with(XML_PROLOG));
        assert!(xml.ends_with("</result>"));
    }

    #[test]
    fn extract_unwraps_bracketed_string_field() {
        let document = json!({"__result": "[<result><title>T</title></result>]"});
        let xml = extract_record(&document, "__result").unwrap();
        assert_eq!(
            xml,
            format!("{}<result><title>T</title></result>", XML_PROLOG)
        );
    }

    #[test]
    fn extract_rejects_missing_and_empty_fields() {
        assert!(matches!(
            extract_record(&json!({"other": "x"}), "__result"),
            Err(DocumentError::MissingField(_))
        ));
        assert!(matches!(
            extract_record(&json!({"__result": "[]"}), "__result"),
            Err(DocumentError::EmptyField(_))
        ));
    }

    #[test]
    fn renders_omtd_xml_with_escaping() {
        let publication = Publication {
            title: Some("Cats & Dogs".into()),
            authors: vec!["A. Author".into()],
            ..Default::default()
        };
        let xml = String::from_utf8(publication.to_omtd_xml().unwrap()).unwrap();
        assert!(xml.starts_with("<publication>"));
        assert!(xml.ends_with("</publication>"));
        assert!(xml.contains("<title>Cats &amp; Dogs</title>"));
        assert!(xml.contains("<authors><author>A. Author</author></authors>"));
    }

    #[test]
    fn parse_then_render_roundtrip() {
        let publication = parse_publication(SAMPLE).unwrap();
        let xml = String::from_utf8(publication.to_omtd_xml().unwrap()).unwrap();
        assert!(xml.contains("<publicationDate>2019-04-02</publicationDate>"));
        assert!(xml.contains("<rights>Open Access</rights>"));
        assert!(xml.contains("<keyword>neural networks</keyword>"));
    }
}
