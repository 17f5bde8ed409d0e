use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BuildContext, FieldReader};
use crate::bag::MetadataBag;
use crate::record::{BaseMetadata, DocumentMetadata};

pub const FIELDS: &[&str] = &[
    "meta:page-count",
    "meta:word-count",
    "meta:character-count",
    "meta:paragraph-count",
    "meta:line-count",
    "meta:last-author",
    "extended-properties:Application",
    "extended-properties:AppVersion",
    "extended-properties:Company",
    "extended-properties:Template",
    "cp:revision",
    "dcterms:created",
    "dcterms:modified",
];

/// OOXML, OLE2 and OpenDocument properties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfficeMetadata {
    #[serde(flatten)]
    pub base: BaseMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraph_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
}

pub fn build(bag: &MetadataBag, ctx: &BuildContext<'_>) -> DocumentMetadata {
    let r = FieldReader::new(bag, FIELDS, ctx.strip_control_chars);
    DocumentMetadata::Office(OfficeMetadata {
        base: r.base(ctx),
        page_count: r.number("meta:page-count"),
        word_count: r.number("meta:word-count"),
        character_count: r.number("meta:character-count"),
        paragraph_count: r.number("meta:paragraph-count"),
        line_count: r.number("meta:line-count"),
        last_author: r.text("meta:last-author"),
        application: r.text("extended-properties:Application"),
        app_version: r.text("extended-properties:AppVersion"),
        company: r.text("extended-properties:Company"),
        template: r.text("extended-properties:Template"),
        revision: r.text("cp:revision"),
        created: r.date("dcterms:created"),
        modified: r.date("dcterms:modified"),
    })
}
