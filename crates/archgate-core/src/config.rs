//! Configuration types for archgate.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::verdict::Priority;

/// Config file names searched for, in priority order.
pub const CONFIG_FILE_NAMES: &[&str] = &["archgate.toml", ".archgate.toml"];

/// Top-level configuration, usually read from `archgate.toml`.
///
/// ```toml
/// fail_on_empty_should = true
///
/// [rules.jpa-entities-have-public-empty-constructor]
/// enabled = true
/// allow_empty_should = false
/// priority = "high"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Whether a rule whose selection is empty fails (default: true).
    #[serde(default = "default_true")]
    pub fail_on_empty_should: bool,

    /// Per-rule configurations, keyed by rule name.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fail_on_empty_should: true,
            rules: HashMap::new(),
        }
    }
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
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
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

    /// Returns the first config file present in `dir`.
    #[must_use]
    pub fn find_in(dir: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Loads the config file found in `dir`, or the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read or parsed.
    pub fn discover(dir: &Path) -> Result<Self, ConfigError> {
        match Self::find_in(dir) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the empty-selection override for a rule.
    #[must_use]
    pub fn allow_empty_should(&self, rule_name: &str) -> Option<bool> {
        self.rules.get(rule_name).and_then(|c| c.allow_empty_should)
    }

    /// Gets the priority override for a rule.
    #[must_use]
    pub fn rule_priority(&self, rule_name: &str) -> Option<Priority> {
        self.rules.get(rule_name).and_then(|c| c.priority)
    }
}

fn default_true() -> bool {
    true
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Whether an empty selection passes for this rule.
    #[serde(default)]
    pub allow_empty_should: Option<bool>,

    /// Priority override for this rule.
    #[serde(default)]
    pub priority: Option<Priority>,
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
