use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BuildContext, FieldReader};
use crate::bag::MetadataBag;
use crate::record::{BaseMetadata, DocumentMetadata};

pub const FIELDS: &[&str] = &[
    "warc:WARC-Type",
    "warc:WARC-Record-ID",
    "warc:WARC-Target-URI",
    "warc:WARC-Date",
    "warc:WARC-Payload-Digest",
    "warc:WARC-Block-Digest",
    "warc:WARC-IP-Address",
    "warc:http:status",
];

/// Web archive record headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarcMetadata {
    #[serde(flatten)]
    pub base: BaseMetadata,
    /// `response`, `request`, `warcinfo`, ...
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload_digest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_digest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
}

pub fn build(bag: &MetadataBag, ctx: &BuildContext<'_>) -> DocumentMetadata {
    let r = FieldReader::new(bag, FIELDS, ctx.strip_control_chars);
    DocumentMetadata::Warc(WarcMetadata {
        base: r.base(ctx),
        record_type: r.text("warc:WARC-Type"),
        record_id: r.text("warc:WARC-Record-ID"),
        target_uri: r.text("warc:WARC-Target-URI"),
        date: r.date("warc:WARC-Date"),
        payload_digest: r.text("warc:WARC-Payload-Digest"),
        block_digest: r.text("warc:WARC-Block-Digest"),
        ip_address: r.text("warc:WARC-IP-Address"),
        http_status: r.number("warc:http:status"),
    })
}
