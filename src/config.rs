//! Dispatcher configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Keywords and lookup settings of a dispatcher, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Leading phrase keyword that inverts an assertion (`"not to be ..."`).
    pub negation_keyword: String,
    /// Bare argument that chains assertions against one subject.
    pub conjunction_keyword: String,
    /// Narrow candidates through the phrase index. When false every call
    /// scans all definitions.
    pub use_phrase_index: bool,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            negation_keyword: "not".to_string(),
            conjunction_keyword: "and".to_string(),
            use_phrase_index: true,
        }
    }
}

/// Errors loading a [`DispatcherConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dispatcher config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid dispatcher config: {0}")]
    Invalid(String),
}

impl DispatcherConfig {
    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.negation_keyword.trim().is_empty() {
            return Err(ConfigError::Invalid("negation_keyword is empty".into()));
        }
        if self.conjunction_keyword.trim().is_empty() {
            return Err(ConfigError::Invalid("conjunction_keyword is empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = DispatcherConfig::default();
        assert_eq!(config.negation_keyword, "not");
        assert_eq!(config.conjunction_keyword, "and");
        assert!(config.use_phrase_index);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = DispatcherConfig::from_toml_str("conjunction_keyword = \"und\"").unwrap();
        assert_eq!(config.conjunction_keyword, "und");
        assert_eq!(config.negation_keyword, "not");
    }

    #[test]
    fn test_empty_keyword_is_rejected() {
        let err = DispatcherConfig::from_toml_str("negation_keyword = \"\"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_bad_toml() {
        let err = DispatcherConfig::from_toml_str("use_phrase_index = \"yes\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
negation_keyword = "nicht"
conjunction_keyword = "und"
use_phrase_index = false
"#
        )
        .unwrap();

        let config = DispatcherConfig::load(file.path()).unwrap();
        assert_eq!(config.negation_keyword, "nicht");
        assert_eq!(config.conjunction_keyword, "und");
        assert!(!config.use_phrase_index);
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let config = DispatcherConfig::load(Path::new("/nonexistent/dispatcher.toml")).unwrap();
        assert_eq!(config, DispatcherConfig::default());
    }
}
