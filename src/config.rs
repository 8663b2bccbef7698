//! Layout configuration.
//!
//! Configuration files are YAML (JSON is accepted too, being a subset):
//!
//! ```yaml
//! indent: 4
//! newline: "\n"
//! ```
//!
//! Missing keys fall back to the defaults (`indent: 2`, `newline: "\n"`).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::PrettifyError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrettifierConfig {
    /// Spaces per nesting level.
    pub indent: usize,
    /// Line terminator; empty renders everything on one line.
    pub newline: String,
}

impl PrettifierConfig {
    /// Settings used for parametrized test ids.
    pub fn single_line() -> Self {
        Self {
            indent: 0,
            newline: String::new(),
        }
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    /// `Io` when the file cannot be read, `Config` when it does not parse.
    pub fn load(path: &Path) -> Result<Self, PrettifyError> {
        let source = fs::read_to_string(path).map_err(|source| PrettifyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&source).map_err(|message| PrettifyError::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    fn from_yaml_str(source: &str) -> Result<Self, String> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(source).map_err(|e| e.to_string())
    }
}

impl Default for PrettifierConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            newline: "\n".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_use_defaults() {
        let config = PrettifierConfig::from_yaml_str("indent: 4").unwrap();
        assert_eq!(config.indent, 4);
        assert_eq!(config.newline, "\n");
    }

    #[test]
    fn json_is_accepted() {
        let config = PrettifierConfig::from_yaml_str(r#"{"indent": 0, "newline": ""}"#).unwrap();
        assert_eq!(config, PrettifierConfig::single_line());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(PrettifierConfig::from_yaml_str("indnet: 4").is_err());
    }
}
