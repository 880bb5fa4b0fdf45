//! Configuration loading from multiple sources

use crate::{AppConfig, ConfigError, DeviceConfig, HistorySettings, LoggingConfig, Result};
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use std::path::Path;
use tracing::debug;

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "SWAP_CONFIRMATION";

/// Configuration loader with support for multiple formats and sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a file
    ///
    /// Supports TOML, YAML, and JSON formats based on file extension
    pub fn from_file(path: &Path) -> Result<AppConfig> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| ConfigError::LoadError("No file extension found".to_string()))?;

        let content = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), format = extension, "Loading config file");

        match extension {
            "toml" => Self::from_toml(&content),
            "yaml" | "yml" => Self::from_yaml(&content),
            "json" => Self::from_json(&content),
            _ => Err(ConfigError::LoadError(format!(
                "Unsupported file extension: {extension}"
            ))),
        }
    }

    pub fn from_toml(content: &str) -> Result<AppConfig> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    pub fn from_yaml(content: &str) -> Result<AppConfig> {
        serde_yaml::from_str(content).map_err(ConfigError::from)
    }

    pub fn from_json(content: &str) -> Result<AppConfig> {
        serde_json::from_str(content).map_err(ConfigError::from)
    }

    /// Load configuration from environment variables with the default prefix
    pub fn from_env() -> Result<AppConfig> {
        Self::from_env_with_prefix(ENV_PREFIX)
    }

    /// Load configuration from environment variables with custom prefix
    ///
    /// Variables use the format `PREFIX_SECTION__KEY`, for example
    /// `SWAP_CONFIRMATION_HISTORY__MAX_PENDING_OPERATIONS=50`.
    pub fn from_env_with_prefix(prefix: &str) -> Result<AppConfig> {
        let config = Config::builder().add_source(env_source(prefix)).build()?;
        config.try_deserialize().map_err(ConfigError::from)
    }

    /// Merge two configurations, with overlay taking precedence
    ///
    /// Merging is per key: an overlay key left at its default keeps the base
    /// value.
    pub fn merge(base: AppConfig, overlay: AppConfig) -> AppConfig {
        let defaults = AppConfig::default();
        AppConfig {
            logging: LoggingConfig {
                level: pick(base.logging.level, overlay.logging.level, &defaults.logging.level),
                json: pick(base.logging.json, overlay.logging.json, &defaults.logging.json),
            },
            device: DeviceConfig {
                app_name: pick(
                    base.device.app_name,
                    overlay.device.app_name,
                    &defaults.device.app_name,
                ),
            },
            history: HistorySettings {
                max_pending_operations: pick(
                    base.history.max_pending_operations,
                    overlay.history.max_pending_operations,
                    &defaults.history.max_pending_operations,
                ),
            },
        }
    }

    /// Load configuration from file with environment variable overrides
    ///
    /// Individual keys set in the environment replace the file's values.
    pub fn from_file_with_env(path: &Path, env_prefix: &str) -> Result<AppConfig> {
        if !path.exists() {
            return Err(ConfigError::LoadError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        Self::builder()
            .add_file(path, true)
            .add_env(env_prefix)
            .build()
    }

    /// Build configuration using the config crate's builder pattern
    pub fn builder() -> ConfigLoaderBuilder {
        ConfigLoaderBuilder {
            builder: Config::builder(),
        }
    }
}

fn pick<T: PartialEq>(base: T, overlay: T, default: &T) -> T {
    if overlay == *default {
        base
    } else {
        overlay
    }
}

fn env_source(prefix: &str) -> Environment {
    Environment::with_prefix(prefix)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Builder for layered configuration loading
pub struct ConfigLoaderBuilder {
    builder: ConfigBuilder<config::builder::DefaultState>,
}

impl ConfigLoaderBuilder {
    /// Add a configuration file source
    pub fn add_file(mut self, path: &Path, required: bool) -> Self {
        let format = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => FileFormat::Yaml,
            Some("json") => FileFormat::Json,
            _ => FileFormat::Toml,
        };

        self.builder = self
            .builder
            .add_source(File::from(path).format(format).required(required));
        self
    }

    /// Add environment variable source with prefix
    pub fn add_env(mut self, prefix: &str) -> Self {
        self.builder = self.builder.add_source(env_source(prefix));
        self
    }

    /// Set a default value for a key such as `logging.level`
    pub fn set_default(mut self, key: &str, value: &str) -> Result<Self> {
        self.builder = self.builder.set_default(key, value)?;
        Ok(self)
    }

    /// Build the final configuration
    pub fn build(self) -> Result<AppConfig> {
        let config = self.builder.build()?;
        config.try_deserialize().map_err(ConfigError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_from_toml() {
        let toml = r#"
            [logging]
            level = "debug"
            json = true

            [device]
            app_name = "Exchange"

            [history]
            max_pending_operations = 20
        "#;

        let config = ConfigLoader::from_toml(toml).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
        assert_eq!(config.history.max_pending_operations, 20);
    }

    #[test]
    fn test_load_from_yaml() {
        let yaml = r#"
logging:
  level: warn
history:
  max_pending_operations: 5
        "#;

        let config = ConfigLoader::from_yaml(yaml).unwrap();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.history.max_pending_operations, 5);
        assert_eq!(config.device.app_name, "Exchange");
    }

    #[test]
    fn test_load_from_json() {
        let json = r#"{ "device": { "app_name": "Swap" } }"#;

        let config = ConfigLoader::from_json(json).unwrap();
        assert_eq!(config.device.app_name, "Swap");
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let file = write_temp(".toml", "[logging]\nlevel = \"trace\"\n");

        let config = ConfigLoader::from_file(file.path()).unwrap();
        assert_eq!(config.logging.level, "trace");
    }

    #[test]
    fn test_unsupported_extension() {
        let file = write_temp(".ini", "level = trace");

        let result = ConfigLoader::from_file(file.path());
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn test_env_overrides_single_key() {
        let prefix = "SWAP_CONFIRMATION_TEST_ENV";
        std::env::set_var(format!("{prefix}_HISTORY__MAX_PENDING_OPERATIONS"), "7");

        let file = write_temp(
            ".toml",
            "[logging]\nlevel = \"debug\"\n\n[history]\nmax_pending_operations = 50\n",
        );
        let config = ConfigLoader::from_file_with_env(file.path(), prefix).unwrap();

        std::env::remove_var(format!("{prefix}_HISTORY__MAX_PENDING_OPERATIONS"));
        assert_eq!(config.history.max_pending_operations, 7);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_from_env_without_variables_uses_defaults() {
        let config = ConfigLoader::from_env_with_prefix("SWAP_CONFIRMATION_TEST_UNSET").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_missing_file_with_env() {
        let result = ConfigLoader::from_file_with_env(
            Path::new("/nonexistent/swap-confirmation.toml"),
            ENV_PREFIX,
        );
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn test_builder_default_applies() {
        let config = ConfigLoader::builder()
            .set_default("logging.level", "error")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(config.logging.level, "error");
    }

    #[test]
    fn test_merge_configs() {
        let base = AppConfig {
            logging: LoggingConfig {
                level: "debug".to_string(),
                json: true,
            },
            history: HistorySettings {
                max_pending_operations: 10,
            },
            ..Default::default()
        };

        let overlay = AppConfig {
            device: DeviceConfig {
                app_name: "Swap".to_string(),
            },
            ..Default::default()
        };

        let merged = ConfigLoader::merge(base, overlay);
        assert_eq!(merged.logging.level, "debug");
        assert_eq!(merged.history.max_pending_operations, 10);
        assert_eq!(merged.device.app_name, "Swap");
    }

    #[test]
    fn test_merge_is_per_key_within_section() {
        let base = AppConfig {
            logging: LoggingConfig {
                level: "debug".to_string(),
                json: false,
            },
            ..Default::default()
        };

        // only `json` set in the overlay
        let overlay = AppConfig {
            logging: LoggingConfig {
                json: true,
                ..Default::default()
            },
            ..Default::default()
        };

        let merged = ConfigLoader::merge(base, overlay);
        assert_eq!(
            merged.logging,
            LoggingConfig {
                level: "debug".to_string(),
                json: true,
            }
        );
    }
}
