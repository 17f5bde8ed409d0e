use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BuildContext, FieldReader};
use crate::bag::MetadataBag;
use crate::record::{BaseMetadata, DocumentMetadata};

pub const FIELDS: &[&str] = &[
    "Message-From",
    "Message:From-Email",
    "Message-To",
    "Message-Cc",
    "Message-Bcc",
    "Message:Raw-Header:Message-ID",
    "Message:Raw-Header:In-Reply-To",
    "Message:Raw-Header:Return-Path",
    "dcterms:created",
];

/// RFC 822 / mailbox message headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailMetadata {
    #[serde(flatten)]
    pub base: BaseMetadata,
    /// Display form of the sender, e.g. `Ada <ada@example.org>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_email: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub to: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cc: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bcc: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_reply_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent: Option<DateTime<Utc>>,
}

pub fn build(bag: &MetadataBag, ctx: &BuildContext<'_>) -> DocumentMetadata {
    let r = FieldReader::new(bag, FIELDS, ctx.strip_control_chars);
    DocumentMetadata::Email(EmailMetadata {
        base: r.base(ctx),
        from: r.text("Message-From"),
        from_email: r.text("Message:From-Email"),
        to: r.texts("Message-To"),
        cc: r.texts("Message-Cc"),
        bcc: r.texts("Message-Bcc"),
        message_id: r.text("Message:Raw-Header:Message-ID"),
        in_reply_to: r.text("Message:Raw-Header:In-Reply-To"),
        return_path: r.text("Message:Raw-Header:Return-Path"),
        sent: r.date("dcterms:created"),
    })
}
