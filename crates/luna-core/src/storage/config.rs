//! TOML-based application configuration.
//!
//! Stores:
//! - Cycle analysis parameters (coverline window, shift floor, luteal length)
//! - Reading retention
//! - Profile, notification and display preferences
//!
//! Configuration is stored at `<data dir>/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::cycle::CycleParams;
use crate::error::ConfigError;

/// How long readings are kept and how much history views show.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionConfig {
    /// Readings older than this are pruned
    #[serde(default = "default_days_to_keep")]
    pub days_to_keep: u32,
    /// Default window for history listings
    #[serde(default = "default_history_days")]
    pub history_days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default = "default_profile_name")]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub period_reminders: bool,
    #[serde(default = "default_true")]
    pub daily_logs: bool,
    #[serde(default)]
    pub ovulation_window: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// Convert a Celsius value into this unit.
    pub fn from_celsius(&self, celsius: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }

    /// Convert a value in this unit back to Celsius.
    pub fn to_celsius(&self, value: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => value,
            TemperatureUnit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PreferencesConfig {
    #[serde(default)]
    pub temperature_unit: TemperatureUnit,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data dir>/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub analysis: CycleParams,
    #[serde(default)]
    pub retention: RetentionConfig,
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub preferences: PreferencesConfig,
}

fn default_days_to_keep() -> u32 {
    90
}
fn default_history_days() -> u32 {
    14
}
fn default_profile_name() -> String {
    "Luna User".into()
}
fn default_true() -> bool {
    true
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            days_to_keep: default_days_to_keep(),
            history_days: default_history_days(),
        }
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: default_profile_name(),
            email: String::new(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            period_reminders: true,
            daily_logs: true,
            ovulation_window: false,
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
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<i64>() {
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
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk or return (and persist) the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// holds invalid analysis parameters, or if the default config cannot
    /// be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.analysis.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

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
            other => Some(other.to_string()),
        }
    }

    /// Update a value by dot-separated key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed
    /// into the field's type, or the resulting analysis parameters are
    /// inconsistent.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.analysis.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a value by key and persist. Returns error if key is unknown.
    ///
    /// # Errors
    ///
    /// See [`Config::apply`]; also fails if the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("using default configuration: {e}");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.retention.days_to_keep, 90);
        assert_eq!(parsed.analysis, CycleParams::default());
        assert_eq!(parsed.preferences.temperature_unit, TemperatureUnit::Celsius);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str(
            "[analysis]\nluteal_length_days = 12\n\n[retention]\ndays_to_keep = 30\n",
        )
        .unwrap();
        assert_eq!(parsed.analysis.luteal_length_days, 12);
        assert_eq!(parsed.analysis.baseline_window, 6);
        assert_eq!(parsed.retention.days_to_keep, 30);
        assert_eq!(parsed.retention.history_days, 14);
        assert!(parsed.notifications.period_reminders);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("analysis.baseline_window").as_deref(), Some("6"));
        assert_eq!(cfg.get("notifications.ovulation_window").as_deref(), Some("false"));
        assert_eq!(cfg.get("profile.name").as_deref(), Some("Luna User"));
        assert_eq!(cfg.get("preferences.temperature_unit").as_deref(), Some("Celsius"));
        assert!(cfg.get("analysis.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn apply_updates_nested_float() {
        let mut cfg = Config::default();
        cfg.apply("analysis.min_shift_celsius", "0.25").unwrap();
        assert_eq!(cfg.analysis.min_shift_celsius, 0.25);
    }

    #[test]
    fn apply_accepts_integer_for_float_field() {
        let mut cfg = Config::default();
        cfg.apply("analysis.max_plausible_celsius", "40").unwrap();
        assert_eq!(cfg.analysis.max_plausible_celsius, 40.0);
    }

    #[test]
    fn apply_updates_bool_and_string() {
        let mut cfg = Config::default();
        cfg.apply("notifications.daily_logs", "false").unwrap();
        cfg.apply("profile.email", "luna@example.com").unwrap();
        cfg.apply("preferences.temperature_unit", "Fahrenheit").unwrap();
        assert!(!cfg.notifications.daily_logs);
        assert_eq!(cfg.profile.email, "luna@example.com");
        assert_eq!(cfg.preferences.temperature_unit, TemperatureUnit::Fahrenheit);
    }

    #[test]
    fn apply_rejects_unknown_key() {
        let mut cfg = Config::default();
        let err = cfg.apply("analysis.nonexistent", "1").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKey(_)));
    }

    #[test]
    fn apply_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(cfg.apply("notifications.daily_logs", "sometimes").is_err());
        assert!(cfg.apply("analysis.baseline_window", "six").is_err());
        assert!(cfg.apply("preferences.temperature_unit", "Kelvin").is_err());
    }

    #[test]
    fn apply_rejects_inconsistent_analysis_params() {
        let mut cfg = Config::default();
        let err = cfg.apply("analysis.baseline_window", "0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        // Unchanged on failure.
        assert_eq!(cfg.analysis.baseline_window, 6);
    }

    #[test]
    fn load_from_writes_defaults_then_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.retention.days_to_keep, 90);

        let mut cfg = cfg;
        cfg.apply("retention.days_to_keep", "60").unwrap();
        cfg.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.retention.days_to_keep, 60);
    }

    #[test]
    fn load_from_rejects_invalid_analysis_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[analysis]\nconfirm_days = 0\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn fahrenheit_conversion() {
        assert_eq!(TemperatureUnit::Celsius.from_celsius(36.5), 36.5);
        assert!((TemperatureUnit::Fahrenheit.from_celsius(37.0) - 98.6).abs() < 1e-9);
        assert!((TemperatureUnit::Fahrenheit.to_celsius(98.6) - 37.0).abs() < 1e-9);
        assert_eq!(TemperatureUnit::Celsius.to_celsius(36.5), 36.5);
    }
}
