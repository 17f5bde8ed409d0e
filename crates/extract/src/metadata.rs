//! Record-level fields: document ID, body and content length.
//!
//! ```text
//! RawDocument
//!      │
//!      ▼
//! ┌──────────────────────────────┐
//! │ doc_id                       │
//! │   caller value, sanitized    │
//! │   else UUIDv5 (if enabled)   │
//! ├──────────────────────────────┤
//! │ body                         │
//! │   cut to max_body_bytes      │
//! ├──────────────────────────────┤
//! │ content_length               │
//! │   lenient Content-Length     │
//! └──────────────────────────────┘
//! ```
use tracing::warn;
use uuid::Uuid;

use crate::bag::MetadataBag;
use crate::builders::generic::RESOURCE_NAME;
use crate::config::ExtractConfig;
use crate::detect::CONTENT_TYPE;
use crate::value::parse_number;

/// Upstream field holding the source size in bytes.
pub const CONTENT_LENGTH: &str = "Content-Length";

/// Caller doc ID if usable, else a derived one when enabled.
pub(crate) fn resolve_doc_id(
    doc_id: Option<String>,
    bag: &MetadataBag,
    cfg: &ExtractConfig,
) -> Option<String> {
    sanitize_optional_string(doc_id, cfg.strip_control_chars)
        .or_else(|| cfg.derive_doc_id.then(|| derive_doc_id(cfg.doc_id_namespace, bag)))
}

/// Deterministic ID from the fields that identify the source file.
///
/// ```text
/// material = resourceName "\0" Content-Type "\0" Content-Length
/// doc_id   = UUIDv5(namespace, material)
/// ```
///
/// Missing fields contribute an empty string; the separators keep
/// `("ab", "c")` and `("a", "bc")` apart.
pub(crate) fn derive_doc_id(namespace: Uuid, bag: &MetadataBag) -> String {
    let parts = [RESOURCE_NAME, CONTENT_TYPE, CONTENT_LENGTH]
        .map(|name| bag.get(name).map(str::trim).unwrap_or_default());
    let mut material = Vec::with_capacity(parts.iter().map(|p| p.len() + 1).sum());
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            material.push(0);
        }
        material.extend_from_slice(part.as_bytes());
    }
    Uuid::new_v5(&namespace, &material).to_string()
}

/// Cuts `body` to at most `limit` bytes without splitting a character.
pub(crate) fn truncate_body(mut body: String, limit: Option<usize>) -> String {
    let Some(limit) = limit else {
        return body;
    };
    if body.len() <= limit {
        return body;
    }
    let mut cut = limit;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    warn!(
        original_bytes = body.len(),
        kept_bytes = cut,
        limit,
        "body_truncated"
    );
    body.truncate(cut);
    body
}

/// `Content-Length` as a byte count; absent when missing or non-numeric.
pub(crate) fn content_length(bag: &MetadataBag) -> Option<u64> {
    bag.get(CONTENT_LENGTH)
        .and_then(|raw| parse_number(CONTENT_LENGTH, raw))
}

/// Strips control characters (when asked) and trims; blank becomes `None`.
pub(crate) fn sanitize_optional_string(
    value: Option<String>,
    strip_control: bool,
) -> Option<String> {
    value.and_then(|raw| crate::value::clean_text(&raw, strip_control))
}
