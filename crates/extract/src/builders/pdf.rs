use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BuildContext, FieldReader};
use crate::bag::MetadataBag;
use crate::record::{BaseMetadata, DocumentMetadata};

pub const FIELDS: &[&str] = &[
    "xmpTPg:NPages",
    "pdf:PDFVersion",
    "pdf:producer",
    "xmp:CreatorTool",
    "pdf:encrypted",
    "pdf:hasXFA",
    "pdf:hasMarkedContent",
    "pdfa:PDFVersion",
    "pdf:docinfo:created",
    "pdf:docinfo:modified",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfMetadata {
    #[serde(flatten)]
    pub base: BaseMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_tool: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encrypted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_xfa: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_marked_content: Option<bool>,
    /// PDF/A conformance, e.g. `A-1b`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdfa_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
}

pub fn build(bag: &MetadataBag, ctx: &BuildContext<'_>) -> DocumentMetadata {
    let r = FieldReader::new(bag, FIELDS, ctx.strip_control_chars);
    DocumentMetadata::Pdf(PdfMetadata {
        base: r.base(ctx),
        page_count: r.number("xmpTPg:NPages"),
        pdf_version: r.text("pdf:PDFVersion"),
        producer: r.text("pdf:producer"),
        creator_tool: r.text("xmp:CreatorTool"),
        encrypted: r.boolean("pdf:encrypted"),
        has_xfa: r.boolean("pdf:hasXFA"),
        has_marked_content: r.boolean("pdf:hasMarkedContent"),
        pdfa_version: r.text("pdfa:PDFVersion"),
        created: r.date("pdf:docinfo:created"),
        modified: r.date("pdf:docinfo:modified"),
    })
}

#[cfg(test)]
mod tests {
    use chrono::Datelike;

    use super::*;
    use crate::builders::test_support::ctx;

    #[test]
    fn reads_typed_fields_and_keeps_the_rest() {
        let bag = MetadataBag::new()
            .with("Content-Type", "application/pdf")
            .with("xmpTPg:NPages", " 12 ")
            .with("pdf:PDFVersion", "1.7")
            .with("pdf:encrypted", "false")
            .with("pdf:docinfo:created", "2019-07-01T10:00:00Z")
            .with("pdf:docinfo:custom:Department", "R&D");

        let DocumentMetadata::Pdf(pdf) = build(&bag, &ctx()) else {
            panic!("expected pdf variant");
        };
        assert_eq!(pdf.page_count, Some(12));
        assert_eq!(pdf.pdf_version.as_deref(), Some("1.7"));
        assert_eq!(pdf.encrypted, Some(false));
        assert_eq!(pdf.created.map(|d| d.year()), Some(2019));
        assert_eq!(pdf.producer, None);

        let additional = &pdf.base.additional;
        assert_eq!(additional.get("pdf:docinfo:custom:Department"), Some("R&D"));
        assert_eq!(additional.get("Content-Type"), Some("application/pdf"));
        assert!(!additional.contains_key("xmpTPg:NPages"));
    }

    #[test]
    fn malformed_page_count_is_dropped() {
        let bag = MetadataBag::new().with("xmpTPg:NPages", "many");
        let DocumentMetadata::Pdf(pdf) = build(&bag, &ctx()) else {
            panic!("expected pdf variant");
        };
        assert_eq!(pdf.page_count, None);
        assert!(!pdf.base.additional.contains_key("xmpTPg:NPages"));
    }
}
