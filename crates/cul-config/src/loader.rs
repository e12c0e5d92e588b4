//! Configuration Loader
//!
//! Handles loading and merging configuration from multiple sources with proper precedence.

use crate::global::GlobalConfig;
use crate::suite::{ConfigFile, ResolvedSuiteConfig, SuiteConfig};
use crate::{ConfigError, ConfigResult};
use std::env;
use std::path::{Path, PathBuf};

/// Name of the project configuration file
pub const PROJECT_CONFIG_FILE: &str = "cul-test.toml";

/// Overrides `suite.show_successes`
pub const ENV_SHOW_SUCCESSES: &str = "CUL_TEST_SHOW_SUCCESSES";

/// Overrides `suite.color`
pub const ENV_COLOR: &str = "CUL_TEST_COLOR";

/// Configuration loader
///
/// Loads configuration from multiple sources and merges them with proper precedence:
/// 1. Global config (~/.cul/config.toml) - lowest priority
/// 2. Project config (./cul-test.toml) - overrides global
/// 3. Environment variables (CUL_TEST_*) - overrides project
pub struct ConfigLoader {
    /// Cached global config path
    global_config_path: Option<PathBuf>,
}

/// Merged configuration result
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Project settings, with environment overrides applied
    pub project: SuiteConfig,

    /// Global settings
    pub global: SuiteConfig,

    /// Project root directory (where cul-test.toml was found)
    pub project_root: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            global_config_path: None,
        }
    }

    /// Read the global config from `path` instead of ~/.cul/config.toml
    pub fn with_global_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.global_config_path = Some(path.into());
        self
    }

    /// Load configuration starting from the given directory
    ///
    /// Walks up the directory tree to find cul-test.toml, then loads and merges
    /// global config if it exists.
    pub fn load_from_directory(&mut self, start_dir: &Path) -> ConfigResult<Config> {
        let (project_root, project) = self.find_project_config(start_dir)?;
        let global = self.load_global_config().unwrap_or_default();
        let project = self.apply_env_overrides(project)?;

        Ok(Config {
            project,
            global,
            project_root,
        })
    }

    /// Load configuration from a specific project config file
    pub fn load_from_file(&mut self, config_path: &Path) -> ConfigResult<Config> {
        let project = ConfigFile::load_from_file(config_path)?.suite();
        let global = self.load_global_config().unwrap_or_default();
        let project = self.apply_env_overrides(project)?;

        Ok(Config {
            project,
            global,
            project_root: config_path.parent().map(|p| p.to_path_buf()),
        })
    }

    /// Find project configuration by walking up directory tree
    fn find_project_config(&self, start_dir: &Path) -> ConfigResult<(Option<PathBuf>, SuiteConfig)> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(PROJECT_CONFIG_FILE);

            if config_path.exists() {
                let project = ConfigFile::load_from_file(&config_path)?.suite();
                return Ok((Some(current), project));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Ok((None, SuiteConfig::default())),
            }
        }
    }

    /// Load global configuration, empty if the file does not exist
    fn load_global_config(&mut self) -> ConfigResult<SuiteConfig> {
        let path = match &self.global_config_path {
            Some(path) => path.clone(),
            None => {
                let path = GlobalConfig::global_config_path()?;
                self.global_config_path = Some(path.clone());
                path
            }
        };

        if !path.exists() {
            return Ok(SuiteConfig::default());
        }

        Ok(GlobalConfig::load_from_file(&path)?.suite())
    }

    /// Apply environment variable overrides to the project settings
    fn apply_env_overrides(&self, mut config: SuiteConfig) -> ConfigResult<SuiteConfig> {
        if let Ok(value) = env::var(ENV_SHOW_SUCCESSES) {
            config.show_successes = Some(parse_env_bool(ENV_SHOW_SUCCESSES, &value)?);
        }

        if let Ok(value) = env::var(ENV_COLOR) {
            config.color = Some(parse_env_bool(ENV_COLOR, &value)?);
        }

        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Effective suite settings (env > project > global > default)
    pub fn suite(&self) -> ResolvedSuiteConfig {
        let mut merged = self.global.clone();
        merged.merge(&self.project);
        merged.resolve()
    }

    /// Get the project root directory
    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    /// Check if a cul-test.toml was found
    pub fn is_project(&self) -> bool {
        self.project_root.is_some()
    }
}

fn parse_env_bool(field: &str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("expected a boolean, got '{}'", other),
        }),
    }
}
