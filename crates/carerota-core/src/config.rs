//! TOML-based application configuration.
//!
//! Stores local preferences:
//! - Shared-document location (document path, backing file)
//! - View defaults (initial day count, load-more increment)
//! - Edit defaults (time step size)
//!
//! Configuration is stored at `~/.config/carerota/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the data directory, `~/.config/carerota[-dev]/`.
///
/// `CAREROTA_DATA_DIR` overrides the location entirely; otherwise
/// `CAREROTA_ENV=dev` switches to the development directory.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let dir = match std::env::var("CAREROTA_DATA_DIR") {
        Ok(explicit) => PathBuf::from(explicit),
        Err(_) => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("CAREROTA_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("carerota-dev")
            } else {
                base_dir.join("carerota")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Shared-document store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Document path within the shared store.
    #[serde(default = "default_document_path")]
    pub path: String,
    /// Backing file for the bundled file store. Defaults to
    /// `rota.json` under the data directory when unset.
    #[serde(default)]
    pub file: Option<String>,
}

/// View configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default = "default_initial_days")]
    pub initial_days: usize,
    #[serde(default = "default_load_more_days")]
    pub load_more_days: usize,
}

/// Edit configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditConfig {
    /// Minutes moved per adjustment step.
    #[serde(default = "default_step_minutes")]
    pub step_minutes: u32,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/carerota/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub edit: EditConfig,
}

// Default functions
fn default_document_path() -> String {
    "shifts".to_string()
}
fn default_initial_days() -> usize {
    21
}
fn default_load_more_days() -> usize {
    14
}
fn default_step_minutes() -> u32 {
    30
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_document_path(),
            file: None,
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            initial_days: default_initial_days(),
            load_more_days: default_load_more_days(),
        }
    }
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            step_minutes: default_step_minutes(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            view: ViewConfig::default(),
            edit: EditConfig::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(ConfigError::MissingKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::MissingKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::MissingKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Number(_) => {
                        let n: u64 = value.parse().map_err(|_| ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: format!("cannot parse '{value}' as number"),
                        })?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Null => serde_json::Value::String(value.into()),
                    serde_json::Value::String(_) => serde_json::Value::String(value.into()),
                    other => {
                        serde_json::from_str(value).map_err(|e| ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: format!("cannot parse '{value}' as {other}: {e}"),
                        })?
                    }
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::MissingKey(key.to_string()))?;
        }

        Err(ConfigError::MissingKey(key.to_string()))
    }

    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/carerota"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk or write and return the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key and persist. Returns an error if the
    /// key is unknown or the value cannot be parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.save()
    }

    /// Backing file for the bundled file store.
    pub fn store_file(&self) -> Result<PathBuf, ConfigError> {
        match &self.store.file {
            Some(explicit) => Ok(PathBuf::from(explicit)),
            None => {
                let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
                    path: PathBuf::from("~/.config/carerota"),
                    message: e.to_string(),
                })?;
                Ok(dir.join("rota.json"))
            }
        }
    }
}
