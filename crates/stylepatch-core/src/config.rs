//! Configuration types for stylepatch.

use crate::line_ending::LineEnding;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Top-level configuration for stylepatch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Patcher configuration.
    #[serde(default)]
    pub patcher: PatcherConfig,

    /// Per-formatter configurations, keyed by violation key.
    #[serde(default)]
    pub formatters: HashMap<String, FormatterConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if the formatter for a violation key is enabled.
    #[must_use]
    pub fn is_formatter_enabled(&self, key: &str) -> bool {
        self.formatters
            .get(key)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Resolves the configured line ending, falling back to the system default.
    #[must_use]
    pub fn line_ending(&self) -> LineEnding {
        LineEnding::resolve(self.patcher.line_ending.as_deref())
    }
}

/// Patcher-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatcherConfig {
    /// Line terminator for written files: "system", "lf", "crlf" or "cr".
    #[serde(default)]
    pub line_ending: Option<String>,

    /// Tab stop width used when expanding tab characters.
    #[serde(default = "default_tab_width")]
    pub tab_width: usize,

    /// Patch files in parallel.
    #[serde(default)]
    pub parallel: bool,

    /// Glob patterns of files that are never patched.
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for PatcherConfig {
    fn default() -> Self {
        Self {
            line_ending: None,
            tab_width: default_tab_width(),
            parallel: false,
            exclude: Vec::new(),
        }
    }
}

fn default_tab_width() -> usize {
    4
}

/// Per-formatter configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormatterConfig {
    /// Whether this formatter is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}
