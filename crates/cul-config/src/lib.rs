//! Runner configuration for the cul test suite
//!
//! Provides the settings a `TestSuite` starts from:
//! - Project configuration (cul-test.toml)
//! - Global user configuration (~/.cul/config.toml)
//! - Environment overrides (CUL_TEST_*)
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded and merged in the following order (later overrides earlier):
//! 1. Global config (~/.cul/config.toml)
//! 2. Project config (./cul-test.toml, searched upwards)
//! 3. Environment variables (CUL_TEST_*)
//!
//! # Example
//!
//! ```no_run
//! use cul_config::ConfigLoader;
//! use std::path::Path;
//!
//! let mut loader = ConfigLoader::new();
//! let config = loader.load_from_directory(Path::new(".")).unwrap();
//! let settings = config.suite();
//! ```

pub mod global;
pub mod loader;
pub mod suite;

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax in {file}: {error}")]
    TomlParseError {
        file: PathBuf,
        error: toml::de::Error,
    },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Home directory not found")]
    HomeNotFound,
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

pub use global::GlobalConfig;
pub use loader::{Config, ConfigLoader};
pub use suite::{ConfigFile, ResolvedSuiteConfig, SuiteConfig};
