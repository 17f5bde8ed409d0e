use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BuildContext, FieldReader};
use crate::bag::MetadataBag;
use crate::record::{BaseMetadata, DocumentMetadata};

pub const FIELDS: &[&str] = &[
    "meta:page-count",
    "meta:word-count",
    "meta:character-count",
    "extended-properties:Company",
    "extended-properties:Manager",
    "cp:category",
    "dcterms:created",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RtfMetadata {
    #[serde(flatten)]
    pub base: BaseMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

pub fn build(bag: &MetadataBag, ctx: &BuildContext<'_>) -> DocumentMetadata {
    let r = FieldReader::new(bag, FIELDS, ctx.strip_control_chars);
    DocumentMetadata::Rtf(RtfMetadata {
        base: r.base(ctx),
        page_count: r.number("meta:page-count"),
        word_count: r.number("meta:word-count"),
        character_count: r.number("meta:character-count"),
        company: r.text("extended-properties:Company"),
        manager: r.text("extended-properties:Manager"),
        category: r.text("cp:category"),
        created: r.date("dcterms:created"),
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::builders::test_support::ctx;

    #[test]
    fn counts_and_properties() {
        let bag = MetadataBag::new()
            .with("meta:page-count", "2")
            .with("meta:word-count", "310 words")
            .with("extended-properties:Manager", "  Grace ")
            .with("dcterms:created", "2019-11-05T08:30:00")
            .with("cp:category", "");

        let DocumentMetadata::Rtf(rtf) = build(&bag, &ctx()) else {
            panic!("expected rtf variant");
        };
        assert_eq!(rtf.page_count, Some(2));
        assert_eq!(rtf.word_count, Some(310));
        assert_eq!(rtf.manager.as_deref(), Some("Grace"));
        assert_eq!(rtf.category, None);
        assert_eq!(
            rtf.created,
            Some(Utc.with_ymd_and_hms(2019, 11, 5, 8, 30, 0).unwrap())
        );
        assert!(!rtf.base.additional.contains_key("cp:category"));
    }
}
