//! XMP rights extraction.
//!
//! Reads the `xmpRights` schema (the carrier for Creative Commons signals)
//! out of an embedded XMP packet. Extraction is an ordered chain of
//! [`RightsStrategy`] implementations where the first success wins:
//!
//! 1. [`SchemaStrategy`] parses the packet strictly into an
//!    [`XmpRightsSchema`] and reads each property through typed accessors.
//!    A schema with no readable `xmpRights` property counts as a failure.
//! 2. [`RawTreeStrategy`] parses leniently and walks the raw tree, so broken
//!    or non-canonical packets still yield whatever rights they carry.
//!
//! Lookups that fail locally just leave the property unset. Recovered values
//! can be written back into any [`RightsSink`], typically the metadata bag of
//! the document the packet came from.
//!
//! ## Example
//!
//! ```
//! use rights::extract_rights;
//!
//! let packet = r#"<x:xmpmeta xmlns:x="adobe:ns:meta/"
//!     xmlns:xmpRights="http://ns.adobe.com/xap/1.0/rights/" xmpRights:Marked="True"/>"#;
//!
//! let fields = extract_rights(packet).unwrap();
//! assert_eq!(fields.marked, Some(true));
//! ```
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

mod error;
pub mod fallback;
pub mod schema;
pub mod xml;

pub use crate::error::RightsError;
pub use crate::schema::{XmpRightsSchema, XmpValue};
pub use crate::xml::{ParseMode, MAX_DEPTH};

/// XMP Rights Management namespace.
pub const XMP_RIGHTS_NS: &str = "http://ns.adobe.com/xap/1.0/rights/";
/// RDF syntax namespace.
pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
/// Namespace of the reserved `xml:` prefix.
pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// Metadata field names used when rights are written into a sink.
pub mod field {
    pub const CERTIFICATE: &str = "xmpRights:Certificate";
    pub const MARKED: &str = "xmpRights:Marked";
    pub const USAGE_TERMS: &str = "xmpRights:UsageTerms";
    pub const WEB_STATEMENT: &str = "xmpRights:WebStatement";
    pub const OWNER: &str = "xmpRights:Owner";
}

/// Rights values recovered from one packet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RightsFields {
    pub certificate: Option<String>,
    pub marked: Option<bool>,
    pub usage_terms: Option<String>,
    pub web_statement: Option<String>,
    /// Owners in document order, duplicates kept.
    pub owners: Vec<String>,
}

impl RightsFields {
    pub fn is_empty(&self) -> bool {
        self.certificate.is_none()
            && self.marked.is_none()
            && self.usage_terms.is_none()
            && self.web_statement.is_none()
            && self.owners.is_empty()
    }

    /// Writes every present value under its `xmpRights:*` field name.
    pub fn write_to<S: RightsSink + ?Sized>(&self, sink: &mut S) {
        if let Some(certificate) = &self.certificate {
            sink.put(field::CERTIFICATE, vec![certificate.clone()]);
        }
        if let Some(marked) = self.marked {
            sink.put(field::MARKED, vec![marked.to_string()]);
        }
        if let Some(terms) = &self.usage_terms {
            sink.put(field::USAGE_TERMS, vec![terms.clone()]);
        }
        if let Some(statement) = &self.web_statement {
            sink.put(field::WEB_STATEMENT, vec![statement.clone()]);
        }
        if !self.owners.is_empty() {
            sink.put(field::OWNER, self.owners.clone());
        }
    }
}

/// Destination for recovered rights values.
///
/// Implementations decide how to merge with values already present.
pub trait RightsSink {
    fn put(&mut self, name: &str, values: Vec<String>);
}

/// Keeps existing entries; only absent names are inserted.
impl RightsSink for BTreeMap<String, Vec<String>> {
    fn put(&mut self, name: &str, values: Vec<String>) {
        self.entry(name.to_string()).or_insert(values);
    }
}

/// Parses an `xmpRights:Marked` literal: `True` in any case is `true`,
/// every other string is `false`.
pub fn parse_marked(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("true")
}

/// One way of getting rights out of a packet.
pub trait RightsStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn extract(&self, packet: &str) -> Result<RightsFields, RightsError>;
}

/// Structured path through [`XmpRightsSchema`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaStrategy;

impl RightsStrategy for SchemaStrategy {
    fn name(&self) -> &'static str {
        "schema"
    }

    /// An empty schema is a failure so the next strategy gets its turn.
    fn extract(&self, packet: &str) -> Result<RightsFields, RightsError> {
        let schema = XmpRightsSchema::parse(packet)?;
        if schema.is_empty() {
            return Err(RightsError::NoRightsSchema);
        }
        Ok(schema.to_fields())
    }
}

/// Lenient walk of the raw XML tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawTreeStrategy;

impl RightsStrategy for RawTreeStrategy {
    fn name(&self) -> &'static str {
        "raw_tree"
    }

    fn extract(&self, packet: &str) -> Result<RightsFields, RightsError> {
        fallback::extract(packet)
    }
}

/// Ordered strategy chain; the first strategy returning `Ok` wins.
pub struct RightsExtractor {
    strategies: Vec<Box<dyn RightsStrategy>>,
}

impl RightsExtractor {
    /// Schema first, raw tree second.
    pub fn new() -> Self {
        Self::with_strategies(vec![Box::new(SchemaStrategy), Box::new(RawTreeStrategy)])
    }

    pub fn with_strategies(strategies: Vec<Box<dyn RightsStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn extract(&self, packet: &str) -> Result<RightsFields, RightsError> {
        let mut failures = Vec::with_capacity(self.strategies.len());
        for strategy in &self.strategies {
            match strategy.extract(packet) {
                Ok(fields) => {
                    debug!(
                        strategy = strategy.name(),
                        fallbacks = failures.len(),
                        "rights_extracted"
                    );
                    return Ok(fields);
                }
                Err(err) => {
                    debug!(strategy = strategy.name(), error = %err, "rights_strategy_failed");
                    failures.push(format!("{}: {err}", strategy.name()));
                }
            }
        }
        Err(RightsError::AllStrategiesFailed(failures))
    }
}

impl Default for RightsExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RightsExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RightsExtractor")
            .field("strategies", &self.strategy_names())
            .finish()
    }
}

/// Runs the default chain over `packet`.
pub fn extract_rights(packet: &str) -> Result<RightsFields, RightsError> {
    RightsExtractor::new().extract(packet)
}
