//! TOML-based application configuration.
//!
//! Stores:
//! - Which model artifact to load (bundled by default)
//! - Default wake time, sleep amount and coffee intake
//! - Bedtime display format
//!
//! Configuration is stored at `~/.config/betterrest/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, ValidationError};
use crate::estimator::TimeFormat;
use crate::inputs::{CoffeeCount, SleepAmount, WakeTime};
use crate::model::ModelSource;

/// Model artifact location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Path to a SleepCalculator JSON artifact. Unset means the bundled model.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Values used when an input is not given explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_wake_time")]
    pub wake_time: String,
    #[serde(default = "default_sleep_amount")]
    pub sleep_amount: f64,
    #[serde(default = "default_coffee_cups")]
    pub coffee_cups: u32,
}

/// Output configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub time_format: TimeFormat,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/betterrest/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

fn default_wake_time() -> String {
    "07:00".into()
}
fn default_sleep_amount() -> f64 {
    8.0
}
fn default_coffee_cups() -> u32 {
    1
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            wake_time: default_wake_time(),
            sleep_amount: default_sleep_amount(),
            coffee_cups: default_coffee_cups(),
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
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    // Optional values: empty input clears them
                    serde_json::Value::Null if value.is_empty() => serde_json::Value::Null,
                    _ if value.is_empty() && is_optional_key(part) => serde_json::Value::Null,
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if !path.exists() {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            return Ok(cfg);
        }
        Self::load_from(&path)
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let load_failed = |message: String| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = std::fs::read_to_string(path).map_err(|e| load_failed(e.to_string()))?;
        let cfg: Config = toml::from_str(&content).map_err(|e| load_failed(e.to_string()))?;
        cfg.validate().map_err(|e| load_failed(e.to_string()))?;
        Ok(cfg)
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using default configuration");
            Self::default()
        })
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => Some(String::new()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key.
    ///
    /// The change is only applied if the resulting configuration is valid.
    /// Nothing is written to disk; call [`save`](Self::save) afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// into a valid setting.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;

        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate().map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        *self = updated;
        Ok(())
    }

    /// Check that the stored defaults are usable inputs.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.wake_time()?;
        self.sleep_amount()?;
        self.coffee_count()?;
        Ok(())
    }

    pub fn wake_time(&self) -> Result<WakeTime, ValidationError> {
        self.defaults.wake_time.parse()
    }

    pub fn sleep_amount(&self) -> Result<SleepAmount, ValidationError> {
        SleepAmount::new(self.defaults.sleep_amount)
    }

    pub fn coffee_count(&self) -> Result<CoffeeCount, ValidationError> {
        CoffeeCount::new(self.defaults.coffee_cups)
    }

    pub fn model_source(&self) -> ModelSource {
        ModelSource::from_optional_path(self.model.path.clone())
    }
}

fn is_optional_key(key: &str) -> bool {
    key == "path"
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.defaults.wake_time, "07:00");
        assert_eq!(parsed.display.time_format, TimeFormat::TwelveHour);
        assert!(parsed.model.path.is_none());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[display]\ntime_format = \"24h\"\n").unwrap();
        assert_eq!(parsed.display.time_format, TimeFormat::TwentyFourHour);
        assert_eq!(parsed.defaults.coffee_cups, 1);
        assert_eq!(parsed.defaults.sleep_amount, 8.0);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("defaults.wake_time").as_deref(), Some("07:00"));
        assert_eq!(cfg.get("defaults.coffee_cups").as_deref(), Some("1"));
        assert_eq!(cfg.get("display.time_format").as_deref(), Some("12h"));
        assert_eq!(cfg.get("model.path").as_deref(), Some(""));
        assert!(cfg.get("defaults.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_values() {
        let mut cfg = Config::default();
        cfg.set("defaults.sleep_amount", "7.5").unwrap();
        cfg.set("defaults.coffee_cups", "3").unwrap();
        cfg.set("defaults.wake_time", "06:15").unwrap();
        cfg.set("display.time_format", "24h").unwrap();
        cfg.set("model.path", "/opt/models/SleepCalculator.json").unwrap();

        assert_eq!(cfg.defaults.sleep_amount, 7.5);
        assert_eq!(cfg.coffee_count().unwrap().cups(), 3);
        assert_eq!(cfg.wake_time().unwrap(), WakeTime::new(6, 15).unwrap());
        assert_eq!(cfg.display.time_format, TimeFormat::TwentyFourHour);
        assert_eq!(
            cfg.model_source(),
            ModelSource::File(PathBuf::from("/opt/models/SleepCalculator.json"))
        );
    }

    #[test]
    fn set_empty_model_path_restores_bundled() {
        let mut cfg = Config::default();
        cfg.set("model.path", "/tmp/model.json").unwrap();
        cfg.set("model.path", "").unwrap();
        assert_eq!(cfg.model_source(), ModelSource::Bundled);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        let result = cfg.set("defaults.nonexistent_key", "value");
        assert!(matches!(result, Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_rejects_out_of_range_values() {
        let mut cfg = Config::default();
        assert!(cfg.set("defaults.sleep_amount", "13").is_err());
        assert!(cfg.set("defaults.coffee_cups", "0").is_err());
        assert!(cfg.set("defaults.coffee_cups", "2.5").is_err());
        assert!(cfg.set("defaults.wake_time", "7am").is_err());
        assert!(cfg.set("display.time_format", "36h").is_err());

        // Nothing was applied
        assert_eq!(cfg.defaults.sleep_amount, 8.0);
        assert_eq!(cfg.defaults.coffee_cups, 1);
        assert_eq!(cfg.defaults.wake_time, "07:00");
    }

    #[test]
    fn save_and_load_from_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut cfg = Config::default();
        cfg.set("defaults.coffee_cups", "4").unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.defaults.coffee_cups, 4);
    }

    #[test]
    fn load_from_rejects_invalid_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[defaults]\ncoffee_cups = 50\n").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ConfigError::LoadFailed { .. })));
    }
}
