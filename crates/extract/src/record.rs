//! Output record model.
//!
//! A [`DocumentRecord`] carries exactly one primary [`DocumentMetadata`]
//! variant, an always-present [`DublinCore`] block and, independently of the
//! primary variant, an optional Creative Commons overlay.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::bag::MetadataBag;
use crate::detect::DocumentType;
use crate::dublin_core::DublinCore;

pub use crate::builders::climate::ClimateForecastMetadata;
pub use crate::builders::creative_commons::CreativeCommonsMetadata;
pub use crate::builders::database::DatabaseMetadata;
pub use crate::builders::email::EmailMetadata;
pub use crate::builders::epub::EpubMetadata;
pub use crate::builders::font::FontMetadata;
pub use crate::builders::generic::GenericMetadata;
pub use crate::builders::html::{HtmlMetadata, OpenGraphMetadata};
pub use crate::builders::image::{ExifMetadata, GpsMetadata, ImageMetadata, IptcMetadata};
pub use crate::builders::media::MediaMetadata;
pub use crate::builders::office::OfficeMetadata;
pub use crate::builders::pdf::PdfMetadata;
pub use crate::builders::rtf::RtfMetadata;
pub use crate::builders::warc::WarcMetadata;

/// One document as handed over by the content-extraction engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDocument {
    /// Caller-supplied identifier; sanitized, or derived when absent.
    #[serde(default)]
    pub doc_id: Option<String>,
    pub metadata: MetadataBag,
    /// Plain-text body produced by the engine.
    #[serde(default)]
    pub body: Option<String>,
    pub engine_version: String,
    /// Embedded XMP packet, when the engine surfaced one.
    #[serde(default)]
    pub xmp_packet: Option<String>,
}

/// Structured result for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_length: Option<u64>,
    pub dublin_core: DublinCore,
    pub metadata: DocumentMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creative_commons: Option<CreativeCommonsRights>,
}

impl DocumentRecord {
    pub fn document_type(&self) -> DocumentType {
        self.metadata.document_type()
    }
}

/// Type-specific metadata, one variant per [`DocumentType`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "document_type", rename_all = "snake_case")]
pub enum DocumentMetadata {
    Pdf(PdfMetadata),
    Office(OfficeMetadata),
    Image(ImageMetadata),
    Email(EmailMetadata),
    Media(MediaMetadata),
    Html(HtmlMetadata),
    Rtf(RtfMetadata),
    Database(DatabaseMetadata),
    Font(FontMetadata),
    Epub(EpubMetadata),
    Warc(WarcMetadata),
    ClimateForecast(ClimateForecastMetadata),
    CreativeCommons(CreativeCommonsMetadata),
    Generic(GenericMetadata),
}

impl DocumentMetadata {
    pub fn document_type(&self) -> DocumentType {
        match self {
            DocumentMetadata::Pdf(_) => DocumentType::Pdf,
            DocumentMetadata::Office(_) => DocumentType::Office,
            DocumentMetadata::Image(_) => DocumentType::Image,
            DocumentMetadata::Email(_) => DocumentType::Email,
            DocumentMetadata::Media(_) => DocumentType::Media,
            DocumentMetadata::Html(_) => DocumentType::Html,
            DocumentMetadata::Rtf(_) => DocumentType::Rtf,
            DocumentMetadata::Database(_) => DocumentType::Database,
            DocumentMetadata::Font(_) => DocumentType::Font,
            DocumentMetadata::Epub(_) => DocumentType::Epub,
            DocumentMetadata::Warc(_) => DocumentType::Warc,
            DocumentMetadata::ClimateForecast(_) => DocumentType::ClimateForecast,
            DocumentMetadata::CreativeCommons(_) => DocumentType::CreativeCommons,
            DocumentMetadata::Generic(_) => DocumentType::Generic,
        }
    }

    pub fn base(&self) -> &BaseMetadata {
        match self {
            DocumentMetadata::Pdf(m) => &m.base,
            DocumentMetadata::Office(m) => &m.base,
            DocumentMetadata::Image(m) => &m.base,
            DocumentMetadata::Email(m) => &m.base,
            DocumentMetadata::Media(m) => &m.base,
            DocumentMetadata::Html(m) => &m.base,
            DocumentMetadata::Rtf(m) => &m.base,
            DocumentMetadata::Database(m) => &m.base,
            DocumentMetadata::Font(m) => &m.base,
            DocumentMetadata::Epub(m) => &m.base,
            DocumentMetadata::Warc(m) => &m.base,
            DocumentMetadata::ClimateForecast(m) => &m.base,
            DocumentMetadata::CreativeCommons(m) => &m.base,
            DocumentMetadata::Generic(m) => &m.base,
        }
    }

    /// Fields the variant's builder did not claim.
    pub fn additional(&self) -> &AdditionalMetadata {
        &self.base().additional
    }
}

/// Fields shared by every variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parser: Option<String>,
    pub engine_version: String,
    pub additional: AdditionalMetadata,
}

/// Unclaimed bag fields with every value kept, in original order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdditionalMetadata(BTreeMap<String, Vec<String>>);

impl AdditionalMetadata {
    /// Copies every field of `bag` whose name is not in `claimed`.
    ///
    /// Dates the engine supplied only in parsed form are kept as RFC 3339
    /// strings so no field goes missing.
    pub(crate) fn unclaimed(bag: &MetadataBag, claimed: &[&str]) -> Self {
        let mut map: BTreeMap<String, Vec<String>> = bag
            .iter()
            .filter(|(name, _)| !claimed.contains(name))
            .map(|(name, values)| (name.to_string(), values.to_vec()))
            .collect();
        for (name, date) in bag.date_entries() {
            if !claimed.contains(&name) && !map.contains_key(name) {
                map.insert(name.to_string(), vec![date.to_rfc3339()]);
            }
        }
        AdditionalMetadata(map)
    }

    /// First value of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(|v| v.first()).map(String::as_str)
    }

    pub fn values(&self, name: &str) -> &[String] {
        self.0.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Rights and licensing signals; also the shape of the overlay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreativeCommonsRights {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_terms: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_statement: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub owners: Vec<String>,
    /// License URL from the CC REL vocabulary (`cc:license`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribution_name: Option<String>,
}

impl CreativeCommonsRights {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<rights::RightsFields> for CreativeCommonsRights {
    fn from(fields: rights::RightsFields) -> Self {
        CreativeCommonsRights {
            certificate: fields.certificate,
            marked: fields.marked,
            usage_terms: fields.usage_terms,
            web_statement: fields.web_statement,
            owners: fields.owners,
            license: None,
            attribution_name: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn unclaimed_keeps_all_values_and_skips_claimed() {
        let bag = MetadataBag::new()
            .with("a", "1")
            .with("a", "2")
            .with("b", "x")
            .with("claimed", "y");
        let additional = AdditionalMetadata::unclaimed(&bag, &["claimed"]);
        assert_eq!(additional.values("a"), ["1", "2"]);
        assert_eq!(additional.get("b"), Some("x"));
        assert!(!additional.contains_key("claimed"));
        assert_eq!(additional.keys().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn unclaimed_keeps_date_only_fields() {
        let bag = MetadataBag::new().with_date(
            "meta:save-date",
            Utc.with_ymd_and_hms(2022, 5, 6, 7, 8, 9).unwrap(),
        );
        let additional = AdditionalMetadata::unclaimed(&bag, &[]);
        assert_eq!(additional.get("meta:save-date"), Some("2022-05-06T07:08:09+00:00"));
    }

    #[test]
    fn rights_conversion() {
        let fields = rights::RightsFields {
            marked: Some(false),
            owners: vec!["A".into()],
            ..Default::default()
        };
        let overlay = CreativeCommonsRights::from(fields);
        assert_eq!(overlay.marked, Some(false));
        assert_eq!(overlay.owners, ["A"]);
        assert!(!overlay.is_empty());
        assert!(CreativeCommonsRights::default().is_empty());
    }
}
