use serde::{Deserialize, Serialize};

use super::{BuildContext, FieldReader};
use crate::bag::MetadataBag;
use crate::record::{BaseMetadata, DocumentMetadata};

/// Upstream field holding the original file name.
pub const RESOURCE_NAME: &str = "resourceName";

/// Generic documents claim nothing: every field stays in the fallback map.
pub const FIELDS: &[&str] = &[];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenericMetadata {
    #[serde(flatten)]
    pub base: BaseMetadata,
    /// Derived from `resourceName`, which itself stays in the fallback map.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_extension: Option<String>,
}

pub fn build(bag: &MetadataBag, ctx: &BuildContext<'_>) -> DocumentMetadata {
    let r = FieldReader::new(bag, FIELDS, ctx.strip_control_chars);
    DocumentMetadata::Generic(GenericMetadata {
        base: r.base(ctx),
        file_extension: r.peek(RESOURCE_NAME).as_deref().and_then(file_extension),
    })
}

/// Text after the last `.`, unless that dot is the first or last character.
pub fn file_extension(name: &str) -> Option<String> {
    let dot = name.rfind('.')?;
    (dot > 0 && dot + 1 < name.len()).then(|| name[dot + 1..].to_string())
}
