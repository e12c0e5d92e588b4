//! Suite settings (`[suite]` table)
//!
//! Shared by the project file (cul-test.toml) and the global file
//! (~/.cul/config.toml).

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default for printing a line per successful test case
pub const DEFAULT_SHOW_SUCCESSES: bool = true;

/// Default for ANSI colored output
pub const DEFAULT_COLOR: bool = false;

/// A configuration file as found on disk
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Test suite settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suite: Option<SuiteConfig>,
}

/// Test suite settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct SuiteConfig {
    /// Print a line for each successful test case
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_successes: Option<bool>,

    /// Color PASS/FAIL markers and the summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

/// Suite settings with every default applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSuiteConfig {
    pub show_successes: bool,
    pub color: bool,
}

impl Default for ResolvedSuiteConfig {
    fn default() -> Self {
        Self {
            show_successes: DEFAULT_SHOW_SUCCESSES,
            color: DEFAULT_COLOR,
        }
    }
}

impl ConfigFile {
    /// Load a configuration file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        Self::parse(&content, path)
    }

    /// Parse configuration text; `path` is only used for error reporting
    pub fn parse(content: &str, path: &Path) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::TomlParseError {
            file: path.to_path_buf(),
            error: e,
        })
    }

    /// Suite settings, empty if the file has no `[suite]` table
    pub fn suite(&self) -> SuiteConfig {
        self.suite.clone().unwrap_or_default()
    }
}

impl SuiteConfig {
    /// Merge another config into this one
    /// Other config takes precedence for non-None values
    pub fn merge(&mut self, other: &SuiteConfig) {
        if other.show_successes.is_some() {
            self.show_successes = other.show_successes;
        }
        if other.color.is_some() {
            self.color = other.color;
        }
    }

    /// Fill unset values with defaults
    pub fn resolve(&self) -> ResolvedSuiteConfig {
        ResolvedSuiteConfig {
            show_successes: self.show_successes.unwrap_or(DEFAULT_SHOW_SUCCESSES),
            color: self.color.unwrap_or(DEFAULT_COLOR),
        }
    }
}
