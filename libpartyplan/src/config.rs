//! Configuration management for Party Planner

use serde::{de, Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};
use crate::latency::Latency;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub latency: LatencyConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    pub enabled: bool,
    pub fetch_all: ConfigDuration,
    pub fetch_one: ConfigDuration,
    pub write: ConfigDuration,
    pub register: ConfigDuration,
    pub list_secondary: ConfigDuration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Start from the sample events, reminders and vendors
    pub seed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// User id sent along with event registrations
    pub user_id: String,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        let simulated = Latency::simulated();
        Self {
            enabled: true,
            fetch_all: ConfigDuration(simulated.fetch_all),
            fetch_one: ConfigDuration(simulated.fetch_one),
            write: ConfigDuration(simulated.write),
            register: ConfigDuration(simulated.register),
            list_secondary: ConfigDuration(simulated.list_secondary),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { seed: true }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            user_id: "current-user-id".to_string(),
        }
    }
}

impl LatencyConfig {
    /// The delays to inject into the data source
    pub fn to_latency(&self) -> Latency {
        if !self.enabled {
            return Latency::none();
        }

        Latency {
            fetch_all: self.fetch_all.0,
            fetch_one: self.fetch_one.0,
            write: self.write.0,
            register: self.register.0,
            list_secondary: self.list_secondary.0,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        Ok(config)
    }

    /// Load configuration from the default location, falling back to the
    /// defaults when no file exists there
    pub fn load_or_default() -> Result<Self> {
        let config_path = resolve_config_path()?;
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default_config());
        }
        Self::load_from_path(&config_path)
    }

    /// Create a default configuration
    pub fn default_config() -> Self {
        Self {
            latency: LatencyConfig::default(),
            store: StoreConfig::default(),
            defaults: DefaultsConfig::default(),
        }
    }
}

/// Resolve the configuration file path following the XDG Base Directory layout
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("PARTYPLAN_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("partyplan").join("config.toml"))
}

/// A duration written as a humantime string ("500ms", "1s", "2m")
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigDuration(pub Duration);

impl From<Duration> for ConfigDuration {
    fn from(d: Duration) -> Self {
        Self(d)
    }
}

impl Serialize for ConfigDuration {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&humantime::format_duration(self.0).to_string())
    }
}

impl<'de> Deserialize<'de> for ConfigDuration {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct DurationVisitor;

        impl<'de> de::Visitor<'de> for DurationVisitor {
            type Value = ConfigDuration;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str(r#"a duration string like "500ms", "1s" or "0s""#)
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                humantime::parse_duration(value)
                    .map(ConfigDuration)
                    .map_err(|e| de::Error::custom(format!("invalid duration '{}': {}", value, e)))
            }
        }

        deserializer.deserialize_str(DurationVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_matches_simulated_latency() {
        let config = Config::default_config();

        assert!(config.store.seed);
        assert_eq!(config.defaults.user_id, "current-user-id");
        assert_eq!(config.latency.to_latency(), Latency::simulated());
    }

    #[test]
    fn test_load_from_path_parses_durations() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[latency]
enabled = true
fetch_all = "2s"
fetch_one = "250ms"
write = "1s"
register = "100ms"
list_secondary = "0s"

[store]
seed = false

[defaults]
user_id = "alice"
"#
        )
        .unwrap();

        let config = Config::load_from_path(file.path()).unwrap();
        let latency = config.latency.to_latency();

        assert_eq!(latency.fetch_all, Duration::from_secs(2));
        assert_eq!(latency.fetch_one, Duration::from_millis(250));
        assert_eq!(latency.register, Duration::from_millis(100));
        assert_eq!(latency.list_secondary, Duration::ZERO);
        assert!(!config.store.seed);
        assert_eq!(config.defaults.user_id, "alice");
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[latency]\nwrite = \"5ms\"\n").unwrap();

        let config = Config::load_from_path(file.path()).unwrap();

        assert_eq!(config.latency.write.0, Duration::from_millis(5));
        assert_eq!(config.latency.fetch_one.0, Duration::from_millis(500));
        assert!(config.store.seed);
        assert_eq!(config.defaults.user_id, "current-user-id");
    }

    #[test]
    fn test_disabled_latency_is_zero() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[latency]\nenabled = false\nfetch_all = \"3s\"\n").unwrap();

        let config = Config::load_from_path(file.path()).unwrap();
        assert!(config.latency.to_latency().is_zero());
    }

    #[test]
    fn test_invalid_duration_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[latency]\nwrite = \"soon\"\n").unwrap();

        let err = Config::load_from_path(file.path()).unwrap_err();
        assert!(matches!(
            err,
            crate::error::PartyPlanError::Config(ConfigError::ParseError(_))
        ));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from_path(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(
            err,
            crate::error::PartyPlanError::Config(ConfigError::ReadError(_))
        ));
    }

    #[test]
    fn test_config_serializes_back_to_toml() {
        let text = toml::to_string(&Config::default_config()).unwrap();
        assert!(text.contains("fetch_one = \"500ms\""));
        assert!(text.contains("user_id = \"current-user-id\""));

        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, Config::default_config());
    }

    #[test]
    #[serial]
    fn test_resolve_config_path_uses_env_var() {
        std::env::set_var("PARTYPLAN_CONFIG", "/tmp/partyplan-test/config.toml");
        let path = resolve_config_path().unwrap();
        std::env::remove_var("PARTYPLAN_CONFIG");

        assert_eq!(path, PathBuf::from("/tmp/partyplan-test/config.toml"));
    }

    #[test]
    #[serial]
    fn test_load_or_default_without_file() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("PARTYPLAN_CONFIG", dir.path().join("absent.toml"));
        let config = Config::load_or_default().unwrap();
        std::env::remove_var("PARTYPLAN_CONFIG");

        assert_eq!(config, Config::default_config());
    }

    #[test]
    #[serial]
    fn test_load_or_default_reads_existing_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[store]\nseed = false\n").unwrap();

        std::env::set_var("PARTYPLAN_CONFIG", file.path());
        let config = Config::load_or_default().unwrap();
        std::env::remove_var("PARTYPLAN_CONFIG");

        assert!(!config.store.seed);
    }
}
