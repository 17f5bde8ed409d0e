//! Document metadata extraction.
//!
//! Turns the flat, multi-valued metadata bag produced by a content-extraction
//! engine into a typed [`DocumentRecord`]:
//!
//! - **Detect** the document type from MIME and parser identifiers
//!   ([`detect`](crate::detect::detect)).
//! - **Build** the type-specific variant; fields a builder does not claim are
//!   kept verbatim in its fallback map.
//! - **Map** Dublin Core for every document.
//! - **Overlay** Creative Commons rights next to the primary variant whenever
//!   rights fields are present, including rights recovered from an embedded
//!   XMP packet.
//!
//! Malformed values never fail an extraction; they are logged with `warn!`
//! and left out. Only contract violations surface as [`ExtractError`].
//!
//! ## Example
//!
//! ```
//! use extract::{extract, DocumentType, ExtractConfig, MetadataBag, RawDocument};
//!
//! let metadata = MetadataBag::new()
//!     .with("Content-Type", "application/pdf")
//!     .with("Content-Length", "12345")
//!     .with("dc:title", "Report");
//!
//! let record = extract(
//!     RawDocument {
//!         metadata,
//!         engine_version: "tika 2.9.1".into(),
//!         ..Default::default()
//!     },
//!     &ExtractConfig::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(record.document_type(), DocumentType::Pdf);
//! assert_eq!(record.content_length, Some(12345));
//! assert_eq!(record.dublin_core.title.as_deref(), Some("Report"));
//! ```
use std::time::Instant;

use rights::RightsExtractor;
use tracing::{debug, info, warn, Level};

mod bag;
pub mod builders;
mod config;
pub mod detect;
pub mod dublin_core;
mod error;
mod metadata;
pub mod overlay;
mod record;
pub mod value;

pub use crate::bag::MetadataBag;
pub use crate::builders::{builder_for, claimed_fields, BuildContext, BuildFn};
pub use crate::config::{ConfigError, ExtractConfig, CURRENT_CONFIG_VERSION};
pub use crate::detect::{detect, detect_with_reason, DetectionReason, DocumentType};
pub use crate::dublin_core::DublinCore;
pub use crate::error::{ExtractError, OverlayError};
pub use crate::metadata::CONTENT_LENGTH;
pub use crate::record::*;

/// Extracts one document.
pub fn extract(raw: RawDocument, cfg: &ExtractConfig) -> Result<DocumentRecord, ExtractError> {
    let start = Instant::now();
    let doc_hint = raw.doc_id.clone();

    if let Err(err) = validate(&raw, cfg) {
        let elapsed_micros = start.elapsed().as_micros();
        warn!(doc_id = ?doc_hint, error = %err, elapsed_micros, "extract_failure");
        return Err(err);
    }

    let span = tracing::span!(
        Level::INFO,
        "extract.extract",
        doc_id = ?doc_hint,
        engine_version = %raw.engine_version.trim()
    );
    let _guard = span.enter();

    let input_fields = raw.metadata.len();
    let (record, reason) = extract_inner(raw, cfg);
    let elapsed_micros = start.elapsed().as_micros();
    info!(
        doc_id = ?record.doc_id,
        document_type = %record.document_type(),
        detection = %reason,
        input_fields,
        additional_fields = record.metadata.additional().len(),
        overlay = record.creative_commons.is_some(),
        elapsed_micros,
        "extract_success"
    );
    Ok(record)
}

/// Extracts a batch; every document succeeds or fails on its own.
pub fn extract_many<I>(docs: I, cfg: &ExtractConfig) -> Vec<Result<DocumentRecord, ExtractError>>
where
    I: IntoIterator<Item = RawDocument>,
{
    docs.into_iter().map(|doc| extract(doc, cfg)).collect()
}

fn validate(raw: &RawDocument, cfg: &ExtractConfig) -> Result<(), ExtractError> {
    cfg.validate()?;
    if raw.engine_version.trim().is_empty() {
        return Err(ExtractError::MissingEngineVersion);
    }
    Ok(())
}

/// Infallible part of [`extract`]; input is already validated.
fn extract_inner(raw: RawDocument, cfg: &ExtractConfig) -> (DocumentRecord, DetectionReason) {
    let RawDocument {
        doc_id,
        metadata: mut bag,
        body,
        engine_version,
        xmp_packet,
    } = raw;

    // Rights from an embedded packet only fill gaps in the upstream bag.
    if let Some(packet) = xmp_packet.as_deref() {
        let fields_added = overlay::merge_xmp(&RightsExtractor::default(), packet, &mut bag);
        debug!(fields_added, "xmp_rights_merged");
    }

    // Detected once; dispatch and the overlay guard must agree.
    let (doc_type, reason) = detect_with_reason(&bag);
    let mime_type = detect::mime_type(&bag);
    let ctx = BuildContext {
        mime_type: mime_type.as_deref(),
        parser: detect::parser_id(&bag),
        engine_version: engine_version.trim(),
        strip_control_chars: cfg.strip_control_chars,
    };

    let doc_id = metadata::resolve_doc_id(doc_id, &bag, cfg);
    let body = body.map(|body| metadata::truncate_body(body, cfg.max_body_bytes));
    let content_length = metadata::content_length(&bag);
    let dublin_core = dublin_core::map(&bag, cfg.strip_control_chars);
    let metadata = builder_for(doc_type)(&bag, &ctx);

    let creative_commons = if cfg.enable_rights_overlay && doc_type != DocumentType::CreativeCommons
    {
        match overlay::build_overlay(&bag, cfg.strip_control_chars) {
            Ok(rights) => rights,
            Err(err) => {
                debug!(error = %err, "overlay_skipped");
                None
            }
        }
    } else {
        None
    };

    let record = DocumentRecord {
        doc_id,
        body,
        content_length,
        dublin_core,
        metadata,
        creative_commons,
    };
    (record, reason)
}
