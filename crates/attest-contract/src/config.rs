//! Report rendering options, loadable from TOML.
//!
//! ```toml
//! indent = 4
//! show_rationale = true
//! show_passing = false
//! show_elapsed = false
//! ```
//!
//! Every key is optional; missing keys take their default.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read file: {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid toml at {path}: {source}")]
    ParseToml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid format config: {0}")]
    Invalid(String),
}

/// Options for [`TextFormatter`](crate::TextFormatter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatConfig {
    /// Spaces per tree level.
    pub indent: usize,
    /// Print expected / actual / hint under each expanded node.
    pub show_rationale: bool,
    /// Expand passing nodes. When false they collapse to a single line.
    pub show_passing: bool,
    /// Append the elapsed time of each evaluated node.
    pub show_elapsed: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            show_rationale: true,
            show_passing: true,
            show_elapsed: false,
        }
    }
}

const MAX_INDENT: usize = 16;

impl FormatConfig {
    /// Parse from TOML text. `origin` names the source in error messages.
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: FormatConfig = toml::from_str(text).map_err(|source| ConfigError::ParseToml {
            path: origin.to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text, &path.display().to_string())
    }

    /// Like [`FormatConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "format config not found, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.indent == 0 || self.indent > MAX_INDENT {
            return Err(ConfigError::Invalid(format!(
                "indent must be between 1 and {MAX_INDENT}, got {}",
                self.indent
            )));
        }
        Ok(())
    }
}
