//! Core configuration structures

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Hardware wallet interaction settings
    #[serde(default)]
    pub device: DeviceConfig,

    /// Account history recording settings
    #[serde(default)]
    pub history: HistorySettings,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

/// Hardware wallet interaction settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Application name passed with the sign request
    #[serde(default = "default_app_name")]
    pub app_name: String,
}

/// Account history recording settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySettings {
    /// Pending operations kept per account
    #[serde(default = "default_max_pending_operations")]
    pub max_pending_operations: usize,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_app_name() -> String {
    "Exchange".to_string()
}

fn default_max_pending_operations() -> usize {
    100
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
        }
    }
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            max_pending_operations: default_max_pending_operations(),
        }
    }
}
