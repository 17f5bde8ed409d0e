use serde::{Deserialize, Serialize};

use super::{BuildContext, FieldReader};
use crate::bag::MetadataBag;
use crate::record::{BaseMetadata, DocumentMetadata};

pub const FIELDS: &[&str] = &[
    "FontName",
    "FontFamilyName",
    "FontSubFamilyName",
    "PSName",
    "FontVersion",
    "FontVendorID",
    "FontNotice",
    "FontWeight",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontMetadata {
    #[serde(flatten)]
    pub base: BaseMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_family_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postscript_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    /// Numeric (`400`) or named (`Medium`) depending on the font format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
}

pub fn build(bag: &MetadataBag, ctx: &BuildContext<'_>) -> DocumentMetadata {
    let r = FieldReader::new(bag, FIELDS, ctx.strip_control_chars);
    DocumentMetadata::Font(FontMetadata {
        base: r.base(ctx),
        font_name: r.text("FontName"),
        family_name: r.text("FontFamilyName"),
        sub_family_name: r.text("FontSubFamilyName"),
        postscript_name: r.text("PSName"),
        version: r.text("FontVersion"),
        vendor_id: r.text("FontVendorID"),
        notice: r.text("FontNotice"),
        weight: r.text("FontWeight"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::test_support::ctx;

    #[test]
    fn names_and_weight() {
        let bag = MetadataBag::new()
            .with("FontName", "Inter Regular")
            .with("FontFamilyName", "Inter")
            .with("PSName", "Inter-Regular")
            .with("FontWeight", "400")
            .with("UnitsPerEm", "2048");

        let DocumentMetadata::Font(font) = build(&bag, &ctx()) else {
            panic!("expected font variant");
        };
        assert_eq!(font.font_name.as_deref(), Some("Inter Regular"));
        assert_eq!(font.family_name.as_deref(), Some("Inter"));
        assert_eq!(font.postscript_name.as_deref(), Some("Inter-Regular"));
        assert_eq!(font.weight.as_deref(), Some("400"));
        assert_eq!(font.base.additional.get("UnitsPerEm"), Some("2048"));
    }
}
