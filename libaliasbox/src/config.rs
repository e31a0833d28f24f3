//! Configuration management for aliasbox

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::generator::{is_valid_domain, normalize_domain};
use crate::types::{Settings, DEFAULT_BASE_DOMAIN};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub storage: StorageConfig,
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub path: String,
}

/// Initial settings, used until settings have been persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    pub base_domain: String,
    #[serde(default = "default_auto_clipboard")]
    pub auto_clipboard: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

fn default_auto_clipboard() -> bool {
    true
}

fn default_tick_rate_ms() -> u64 {
    100
}

impl Config {
    /// Load configuration from the default location, falling back to the
    /// default configuration when no file exists
    pub fn load_or_default() -> Result<Self> {
        let config_path = resolve_config_path()?;
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default_config());
        }
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// Write configuration to `path`, creating parent directories
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::WriteError)?;
        }
        let content = toml::to_string_pretty(self).map_err(ConfigError::SerializeError)?;
        std::fs::write(path, content).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Create a default configuration
    pub fn default_config() -> Self {
        Self {
            storage: StorageConfig {
                path: "~/.local/share/aliasbox/aliases.db".to_string(),
            },
            defaults: DefaultsConfig {
                base_domain: DEFAULT_BASE_DOMAIN.to_string(),
                auto_clipboard: default_auto_clipboard(),
            },
            ui: UiConfig::default(),
        }
    }

    /// Settings to start with before stored settings are loaded
    pub fn initial_settings(&self) -> Settings {
        Settings {
            auto_clipboard_enabled: self.defaults.auto_clipboard,
            base_domain: normalize_domain(&self.defaults.base_domain),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.storage.path.trim().is_empty() {
            return Err(ConfigError::MissingField("storage.path".to_string()).into());
        }
        if !is_valid_domain(&self.defaults.base_domain) {
            return Err(ConfigError::InvalidValue(format!(
                "defaults.base_domain '{}' is not a domain",
                self.defaults.base_domain
            ))
            .into());
        }
        Ok(())
    }
}

/// Resolve the configuration file path following the XDG base directory layout
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("ALIASBOX_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("aliasbox").join("config.toml"))
}

/// Resolve the data directory path following the XDG base directory layout
pub fn resolve_data_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| ConfigError::MissingField("data directory".to_string()))?;

    Ok(data_dir.join("aliasbox"))
}
