//! Error types produced by the extract crate.
//!
//! Extraction degrades instead of failing: absent or malformed metadata just
//! leaves fields unset. The only hard failures are contract violations by the
//! caller, reported as [`ExtractError`].
//!
//! | Error | Category | Description |
//! |-------|----------|-------------|
//! | [`MissingEngineVersion`](ExtractError::MissingEngineVersion) | Contract | Input carries no engine version |
//! | [`Config`](ExtractError::Config) | Configuration | [`ExtractConfig`](crate::ExtractConfig) failed validation |
//!
//! [`OverlayError`] never reaches callers; the dispatcher logs and drops it.
use thiserror::Error;

use crate::config::ConfigError;

/// Hard failures of [`extract`](crate::extract).
///
/// ```rust
/// use extract::{extract, ExtractConfig, ExtractError, RawDocument};
///
/// let doc = RawDocument { engine_version: "  ".into(), ..Default::default() };
/// assert_eq!(
///     extract(doc, &ExtractConfig::default()),
///     Err(ExtractError::MissingEngineVersion)
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExtractError {
    /// The engine version is empty after trimming.
    #[error("raw document has no engine version")]
    MissingEngineVersion,

    #[error("invalid extract config: {0}")]
    Config(#[from] ConfigError),
}

/// Why the Creative Commons overlay could not be built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum OverlayError {
    /// Rights fields were present by name but every value was blank.
    #[error("rights fields {fields:?} carry no usable values")]
    NoRightsValues { fields: Vec<String> },
}
