// In crates/app-config/src/types.rs

use std::path::PathBuf;

use serde::Deserialize;

use core_types::StrategyConfig;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    #[serde(default)]
    pub app: AppSettings,
    /// Where market data is read from and signals are written to.
    #[serde(default)]
    pub data: DataSettings,
    /// The strategy to run and its parameters.
    pub strategy: StrategyConfig,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The log level for the application.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct DataSettings {
    /// The wide market CSV with `timestamp` and `close_*` columns.
    #[serde(default = "default_input_path")]
    pub input_path: PathBuf,
    /// Where the signal table is written.
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
            output_path: default_output_path(),
        }
    }
}

/// Helper functions for serde defaults
fn default_log_level() -> String { "info".to_string() }
fn default_input_path() -> PathBuf { PathBuf::from("market_data.csv") }
fn default_output_path() -> PathBuf { PathBuf::from("signals.csv") }
