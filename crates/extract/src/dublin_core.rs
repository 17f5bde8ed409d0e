//! Dublin Core mapping shared by every document type.
//!
//! Reads the fifteen elements from their `dc:` fields with a few fallbacks
//! for parsers that use other names (`title`, `dcterms:created`,
//! `meta:keyword`, `Keywords`). Mapping never fails and never claims fields:
//! the type builders decide what lands in the fallback map.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bag::MetadataBag;
use crate::builders::split_values;
use crate::value::clean_text;

/// The fifteen Dublin Core elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DublinCore {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub creators: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subjects: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contributors: Vec<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rights: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

impl DublinCore {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

const KEYWORD_FIELDS: &[&str] = &["meta:keyword", "Keywords"];
const KEYWORD_SEPARATORS: &[char] = &[',', ';'];

/// Maps `bag` onto the Dublin Core elements.
pub fn map(bag: &MetadataBag, strip_control_chars: bool) -> DublinCore {
    let text = |name: &str| bag.get(name).and_then(|raw| clean_text(raw, strip_control_chars));
    let texts = |name: &str| -> Vec<String> {
        bag.values(name)
            .iter()
            .filter_map(|raw| clean_text(raw, strip_control_chars))
            .collect()
    };

    let mut subjects = texts("dc:subject");
    if subjects.is_empty() {
        subjects = KEYWORD_FIELDS
            .iter()
            .map(|name| split_values(bag.values(name), KEYWORD_SEPARATORS, strip_control_chars))
            .find(|keywords| !keywords.is_empty())
            .unwrap_or_default();
    }

    DublinCore {
        title: text("dc:title").or_else(|| text("title")),
        creators: texts("dc:creator"),
        subjects,
        description: text("dc:description"),
        publisher: text("dc:publisher"),
        contributors: texts("dc:contributor"),
        kind: text("dc:type"),
        format: text("dc:format"),
        identifier: text("dc:identifier"),
        source: text("dc:source"),
        language: text("dc:language"),
        relation: text("dc:relation"),
        coverage: text("dc:coverage"),
        rights: text("dc:rights"),
        date: bag.date("dc:date").or_else(|| bag.date("dcterms:created")),
    }
}
