// In crates/app-config/src/lib.rs

use std::path::Path;

use config::{Config, Environment, File};

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{AppSettings, DataSettings, Settings};

/// Loads the application settings from the `config/` directory.
///
/// The environment name comes from `APP_ENVIRONMENT` and defaults to
/// "development".
pub fn load_settings() -> Result<Settings> {
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());
    load_settings_from(Path::new("config"), &environment)
}

/// Loads settings from an explicit directory.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads from `<dir>/base.toml`.
/// 2. Merges settings from `<dir>/<environment>.toml`, if present.
/// 3. Merges settings from environment variables (e.g. `APP__DATA__INPUT_PATH=...`).
pub fn load_settings_from(dir: &Path, environment: &str) -> Result<Settings> {
    let settings = Config::builder()
        .add_source(File::from(dir.join("base.toml")))
        .add_source(File::from(dir.join(format!("{environment}.toml"))).required(false))
        // The prefix is `APP`, separator is `__`.
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    // Deserialize the configuration into our `Settings` struct.
    let settings: Settings = settings.try_deserialize()?;

    Ok(settings)
}
