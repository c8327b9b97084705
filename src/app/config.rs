//! Host Configuration
//!
//! TOML configuration for the preview host: log settings, the root slot to
//! render, and per-plugin config/state overrides that are fed into the
//! registry's `load` call.
//!
//! ```toml
//! [preview]
//! root_slot = "root"
//!
//! [log]
//! level = "debug"
//!
//! [plugins.responsivePreview.state]
//! enabled = true
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::plugin::api::LoadOverrides;

#[derive(Debug, Default, Deserialize)]
pub struct PreviewConfig {
    #[serde(default)]
    pub preview: PreviewSection,
    #[serde(default)]
    pub log: LogSection,
    #[serde(default)]
    pub plugins: HashMap<String, PluginOverrides>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PreviewSection {
    pub root_slot: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LogSection {
    pub level: Option<String>,
    pub format: Option<String>,
    pub file: Option<String>,
    pub color: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PluginOverrides {
    #[serde(default)]
    pub config: toml::Table,
    #[serde(default)]
    pub state: toml::Table,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Platform default: `<config dir>/vitrine/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("vitrine").join("config.toml"))
}

impl PreviewConfig {
    /// Load from an explicit path, or from the platform default location.
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match default_config_path() {
                Some(p) => (p, false),
                None => return Ok(Self::default()),
            },
        };

        if !required && !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: PreviewConfig =
            toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Convert the per-plugin override tables into registry load overrides.
    pub fn load_overrides(&self) -> LoadOverrides {
        let mut overrides = LoadOverrides::new();
        for (plugin_name, plugin) in &self.plugins {
            for (key, value) in &plugin.config {
                overrides = overrides.config(plugin_name, key, toml_to_json(value));
            }
            for (key, value) in &plugin.state {
                overrides = overrides.state(plugin_name, key, toml_to_json(value));
            }
        }
        overrides
    }
}

fn toml_to_json(value: &toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s.clone()),
        toml::Value::Integer(i) => serde_json::Value::from(*i),
        toml::Value::Float(f) => {
            serde_json::Number::from_f64(*f).map_or(serde_json::Value::Null, serde_json::Value::Number)
        }
        toml::Value::Boolean(b) => serde_json::Value::Bool(*b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(items) => {
            serde_json::Value::Array(items.iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => serde_json::Value::Object(
            table
                .iter()
                .map(|(k, v)| (k.clone(), toml_to_json(v)))
                .collect(),
        ),
    }
}
