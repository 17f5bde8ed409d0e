//! YAML configuration file support for docmeta.
//!
//! One file carries the extraction settings and the logging setup used by the
//! `docmeta` binary. Every section is optional; missing keys take the same
//! defaults as [`ExtractConfig::default`].
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! # docmeta configuration
//! version: "1.0"
//! name: "archive import"
//!
//! extract:
//!   version: 1
//!   strip_control_chars: true
//!   enable_rights_overlay: true
//!   derive_doc_id: true
//!   doc_id_namespace: "6ba7b812-9dad-11d1-80b4-00c04fd430c8"
//!   max_body_bytes: 1048576
//!
//! logging:
//!   level: "info"
//!   json: false
//! ```

use std::fs;
use std::path::Path;

use extract::{ConfigError, ExtractConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),

    #[error("invalid extract section: {0}")]
    Extract(#[from] ConfigError),
}

/// Top-level YAML configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DocmetaConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    /// Extraction settings handed to [`extract::extract`]
    #[serde(default)]
    pub extract: ExtractConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DocmetaConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: DocmetaConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize back to YAML; `from_yaml_str` accepts the output.
    pub fn to_yaml_string(&self) -> Result<String, ConfigLoadError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.extract.validate()?;
        self.logging.validate()?;

        Ok(())
    }
}

impl Default for DocmetaConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            extract: ExtractConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging setup for the binary.
///
/// `level` is a `tracing_subscriber::EnvFilter` directive (`"info"`,
/// `"extract=debug,rights=warn"`); `RUST_LOG` takes precedence when set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit newline-delimited JSON instead of human-readable lines.
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.level.trim().is_empty() {
            return Err(ConfigLoadError::Validation(
                "logging.level must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_valid_yaml() {
        let yaml = r#"
version: "1.0"
name: "test config"
extract:
  derive_doc_id: true
  max_body_bytes: 4096
logging:
  level: "debug"
"#;

        let config = DocmetaConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.name, Some("test config".to_string()));
        assert!(config.extract.derive_doc_id);
        assert_eq!(config.extract.max_body_bytes, Some(4096));
        assert!(config.extract.enable_rights_overlay);
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_load_from_file() {
        let yaml = r#"
version: "1"
logging:
  json: true
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml.as_bytes()).unwrap();

        let config = DocmetaConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.version, "1");
        assert!(config.logging.json);
        assert_eq!(config.extract, ExtractConfig::default());
    }

    #[test]
    fn test_missing_file() {
        let result = DocmetaConfig::from_file("/definitely/not/here.yaml");
        assert!(matches!(result, Err(ConfigLoadError::FileRead(_))));
    }

    #[test]
    fn test_default_config() {
        let config = DocmetaConfig::default();
        assert_eq!(config.version, "1.0");
        assert!(config.name.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unsupported_version() {
        let result = DocmetaConfig::from_yaml_str("version: \"2.0\"\n");
        assert!(matches!(
            result,
            Err(ConfigLoadError::UnsupportedVersion(v)) if v == "2.0"
        ));
    }

    #[test]
    fn test_extract_validation() {
        let yaml = r#"
version: "1.0"
extract:
  max_body_bytes: 0
"#;

        let result = DocmetaConfig::from_yaml_str(yaml);
        assert!(matches!(
            result,
            Err(ConfigLoadError::Extract(ConfigError::ZeroBodyLimit))
        ));

        let yaml = r#"
version: "1.0"
extract:
  version: 7
"#;
        let err = DocmetaConfig::from_yaml_str(yaml).unwrap_err();
        assert!(err.to_string().contains("extract"));
    }

    #[test]
    fn test_logging_validation() {
        let yaml = r#"
version: "1.0"
logging:
  level: "  "
"#;

        let result = DocmetaConfig::from_yaml_str(yaml);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("logging.level"));
    }

    #[test]
    fn test_malformed_yaml() {
        let result = DocmetaConfig::from_yaml_str("version: [unterminated");
        assert!(matches!(result, Err(ConfigLoadError::YamlParse(_))));
    }

    #[test]
    fn test_full_yaml_roundtrip() {
        let yaml = r#"
version: "1.0"
name: "production"
extract:
  version: 1
  strip_control_chars: false
  enable_rights_overlay: false
  derive_doc_id: true
  doc_id_namespace: "6ba7b811-9dad-11d1-80b4-00c04fd430c8"
  max_body_bytes: 10485760
logging:
  level: "extract=debug"
  json: true
"#;

        let config = DocmetaConfig::from_yaml_str(yaml).unwrap();
        assert!(!config.extract.strip_control_chars);
        assert_eq!(
            config.extract.doc_id_namespace.to_string(),
            "6ba7b811-9dad-11d1-80b4-00c04fd430c8"
        );

        let reparsed = DocmetaConfig::from_yaml_str(&config.to_yaml_string().unwrap()).unwrap();
        assert_eq!(reparsed, config);
    }
}
