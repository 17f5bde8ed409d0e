//! Rights and licensing fields.
//!
//! Used both as the primary builder for XMP/RDF sidecar documents and, through
//! [`rights`], for the overlay attached to documents of any type. Both read
//! the same fields, so the overlay holds everything the primary variant does
//! apart from the base metadata.
use rights::{field, parse_marked};
use serde::{Deserialize, Serialize};

use super::{BuildContext, FieldReader};
use crate::bag::MetadataBag;
use crate::record::{BaseMetadata, CreativeCommonsRights, DocumentMetadata};

/// CC REL license URL.
pub const LICENSE: &str = "cc:license";
pub const ATTRIBUTION_NAME: &str = "cc:attributionName";

pub const FIELDS: &[&str] = &[
    field::CERTIFICATE,
    field::MARKED,
    field::USAGE_TERMS,
    field::WEB_STATEMENT,
    field::OWNER,
    LICENSE,
    ATTRIBUTION_NAME,
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreativeCommonsMetadata {
    #[serde(flatten)]
    pub base: BaseMetadata,
    pub rights: CreativeCommonsRights,
}

pub fn build(bag: &MetadataBag, ctx: &BuildContext<'_>) -> DocumentMetadata {
    let r = FieldReader::new(bag, FIELDS, ctx.strip_control_chars);
    DocumentMetadata::CreativeCommons(CreativeCommonsMetadata {
        base: r.base(ctx),
        rights: read_rights(&r),
    })
}

/// The rights block of `bag`, as used for the overlay.
pub fn rights(bag: &MetadataBag, strip_control_chars: bool) -> CreativeCommonsRights {
    read_rights(&FieldReader::new(bag, FIELDS, strip_control_chars))
}

fn read_rights(r: &FieldReader<'_>) -> CreativeCommonsRights {
    CreativeCommonsRights {
        certificate: r.text(field::CERTIFICATE),
        marked: r.text(field::MARKED).map(|raw| parse_marked(&raw)),
        usage_terms: r.text(field::USAGE_TERMS),
        web_statement: r.text(field::WEB_STATEMENT),
        owners: r.texts(field::OWNER),
        license: r.text(LICENSE),
        attribution_name: r.text(ATTRIBUTION_NAME),
    }
}
