//! Error types produced by the rights crate.
//!
//! None of these errors reach the caller of the document extractor: a failed
//! strategy hands over to the next one, and when every strategy fails the
//! dispatcher logs the failure and carries on without rights values.
use thiserror::Error;

/// Errors raised while reading an XMP packet.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RightsError {
    /// The packet is not well-formed XML (strict parsing only).
    #[error("malformed xmp packet: {0}")]
    Xml(String),

    /// The packet parsed but carries no `rdf:RDF` element to hang a schema on.
    #[error("xmp packet has no rdf:RDF element")]
    MissingRdf,

    /// Element nesting went past [`MAX_DEPTH`](crate::MAX_DEPTH).
    #[error("xml nesting exceeds {limit} levels")]
    DepthExceeded {
        /// The configured nesting limit.
        limit: usize,
    },

    /// `rdf:RDF` is present but no description carries a readable
    /// `xmpRights` property.
    #[error("xmp packet has no readable xmpRights properties")]
    NoRightsSchema,

    /// The packet contained no element at all.
    #[error("xmp packet is empty")]
    EmptyPacket,

    /// Every configured strategy failed; one message per strategy, in order.
    #[error("no rights strategy succeeded: {}", .0.join("; "))]
    AllStrategiesFailed(Vec<String>),
}
