//! Configuration for the extraction stage.
//!
//! [`ExtractConfig`] is cheap to clone and deserializes from any serde format
//! (the `docmeta` binary reads it from YAML). Missing keys take their
//! defaults, so an empty document is a valid configuration.
//!
//! # Quick Start
//!
//! ```rust
//! use extract::ExtractConfig;
//!
//! let config = ExtractConfig::default();
//! config.validate().expect("default configuration is valid");
//! ```
//!
//! # Stable document IDs
//!
//! ```rust
//! use extract::ExtractConfig;
//! use uuid::Uuid;
//!
//! let config = ExtractConfig {
//!     derive_doc_id: true,
//!     doc_id_namespace: Uuid::new_v5(&Uuid::NAMESPACE_DNS, b"archive.example.org"),
//!     max_body_bytes: Some(4 * 1024 * 1024),
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Highest configuration version this crate understands.
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// Runtime configuration for [`extract`](crate::extract).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Configuration schema version.
    ///
    /// Default: `1`
    pub version: u32,

    /// Whether control characters are removed from metadata values before
    /// they are trimmed and written to typed slots.
    ///
    /// The fallback map always keeps values verbatim.
    ///
    /// Default: `true`
    pub strip_control_chars: bool,

    /// Attach the Creative Commons overlay when rights fields are found.
    ///
    /// Default: `true`
    pub enable_rights_overlay: bool,

    /// Derive a document ID when the caller does not supply one.
    ///
    /// The ID is `UUIDv5(doc_id_namespace, resourceName "\0" Content-Type
    /// "\0" Content-Length)`, so the same upstream metadata always yields the
    /// same ID.
    ///
    /// Default: `false`
    pub derive_doc_id: bool,

    /// Namespace for derived document IDs.
    ///
    /// Default: [`Uuid::NAMESPACE_OID`]
    pub doc_id_namespace: Uuid,

    /// Maximum body size in bytes. Longer bodies are cut at the nearest
    /// character boundary below the limit.
    ///
    /// Default: `None` (unlimited)
    pub max_body_bytes: Option<usize>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            strip_control_chars: true,
            enable_rights_overlay: true,
            derive_doc_id: false,
            doc_id_namespace: Uuid::NAMESPACE_OID,
            max_body_bytes: None,
        }
    }
}

impl ExtractConfig {
    /// Checks internal consistency. In-memory only; call it once at start-up.
    ///
    /// ```rust
    /// use extract::{ConfigError, ExtractConfig};
    ///
    /// let config = ExtractConfig { max_body_bytes: Some(0), ..Default::default() };
    /// assert_eq!(config.validate(), Err(ConfigError::ZeroBodyLimit));
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version == 0 || self.version > CURRENT_CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                version: self.version,
                supported: CURRENT_CONFIG_VERSION,
            });
        }
        if self.max_body_bytes == Some(0) {
            return Err(ConfigError::ZeroBodyLimit);
        }
        Ok(())
    }
}

/// Errors raised by [`ExtractConfig::validate`].
///
/// These are configuration-time problems and should surface at start-up,
/// not per document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("unsupported config version {version}; this build supports 1..={supported}")]
    UnsupportedVersion { version: u32, supported: u32 },

    /// `max_body_bytes` is `Some(0)`, which would blank every body.
    #[error("max_body_bytes must be greater than zero when set")]
    ZeroBodyLimit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ExtractConfig::default();
        assert_eq!(config.version, 1);
        assert!(config.strip_control_chars);
        assert!(config.enable_rights_overlay);
        assert!(!config.derive_doc_id);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_unknown_versions() {
        for version in [0, 2] {
            let config = ExtractConfig {
                version,
                ..Default::default()
            };
            assert_eq!(
                config.validate(),
                Err(ConfigError::UnsupportedVersion {
                    version,
                    supported: 1
                })
            );
        }
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: ExtractConfig =
            serde_json::from_str(r#"{"derive_doc_id": true}"#).expect("valid config json");
        assert!(config.derive_doc_id);
        assert_eq!(config.doc_id_namespace, Uuid::NAMESPACE_OID);
        assert_eq!(config.max_body_bytes, None);
    }
}
