//! # Phiz Core Configuration
//!
//! Events manager settings and listener bindings, loaded from JSON, YAML or
//! TOML files. The format follows the file extension.
//!
//! ```toml
//! enable_priorities = true
//! collect_responses = false
//!
//! [[listeners]]
//! event = "db"
//! handler = "audit"
//! priority = 150
//! ```
//!
//! Handler names are resolved through a
//! [`ListenerRegistry`](crate::event::ListenerRegistry) by
//! [`EventsManager::from_config`](crate::event::EventsManager::from_config).
pub mod error;

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

pub use error::{ConfigError, Result};

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml) - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => "yaml",
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => "toml",
        }
    }

    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                #[cfg(feature = "yaml-config")]
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                #[cfg(feature = "toml-config")]
                "toml" => Some(ConfigFormat::Toml),
                _ => None,
            })
    }
}

/// Attaches the handler registered as `handler` to `event`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListenerBinding {
    /// Group (`db`) or full event type (`db:afterQuery`)
    pub event: String,
    pub handler: String,
    /// Defaults to [`DEFAULT_PRIORITY`](crate::event::DEFAULT_PRIORITY)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

/// Settings and bindings for one events manager
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventsConfig {
    pub enable_priorities: bool,
    pub collect_responses: bool,
    pub listeners: Vec<ListenerBinding>,
}

impl EventsConfig {
    /// Read `path`, picking the format from its extension.
    pub fn load(path: &Path) -> Result<Self> {
        let format = ConfigFormat::from_path(path)
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.display().to_string()))?;
        let data = fs::read_to_string(path).map_err(|e| ConfigError::io(e, "read", path.to_path_buf()))?;
        let config = Self::parse(&data, format)?;
        debug!(
            "Loaded events config from {} ({} binding(s))",
            path.display(),
            config.listeners.len()
        );
        Ok(config)
    }

    pub fn parse(data: &str, format: ConfigFormat) -> Result<Self> {
        match format {
            ConfigFormat::Json => serde_json::from_str(data).map_err(|e| ConfigError::deserialization(format, e)),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::from_str(data).map_err(|e| ConfigError::deserialization(format, e)),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::from_str(data).map_err(|e| ConfigError::deserialization(format, e)),
        }
    }

    pub fn render(&self, format: ConfigFormat) -> Result<String> {
        match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self).map_err(|e| ConfigError::serialization(format, e)),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::to_string(self).map_err(|e| ConfigError::serialization(format, e)),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::to_string_pretty(self).map_err(|e| ConfigError::serialization(format, e)),
        }
    }

    /// Write to `path` in the format its extension names.
    pub fn save(&self, path: &Path) -> Result<()> {
        let format = ConfigFormat::from_path(path)
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.display().to_string()))?;
        let data = self.render(format)?;
        fs::write(path, data).map_err(|e| ConfigError::io(e, "write", path.to_path_buf()))
    }
}
