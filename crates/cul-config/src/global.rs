//! Global Configuration (~/.cul/config.toml)

use crate::suite::{ConfigFile, SuiteConfig};
use crate::{ConfigError, ConfigResult};
use std::path::{Path, PathBuf};

/// Global user configuration from ~/.cul/config.toml
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GlobalConfig {
    file: ConfigFile,
}

impl GlobalConfig {
    /// Load global configuration from a file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        Ok(Self {
            file: ConfigFile::load_from_file(path)?,
        })
    }

    /// Get the global configuration directory (~/.cul)
    pub fn global_config_dir() -> ConfigResult<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        Ok(home.join(".cul"))
    }

    /// Get the global config file path (~/.cul/config.toml)
    pub fn global_config_path() -> ConfigResult<PathBuf> {
        Ok(Self::global_config_dir()?.join("config.toml"))
    }

    /// Suite settings from the global file
    pub fn suite(&self) -> SuiteConfig {
        self.file.suite()
    }
}
