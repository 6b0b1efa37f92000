// In crates/app-config/src/lib.rs

use config::{Config, Environment, File};
use std::path::Path;

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{AppSettings, MarketDataSettings, ServerSettings, Settings};

/// Loads the application settings from the `config/` directory.
pub fn load_settings() -> Result<Settings> {
    load_settings_from(Path::new("config"))
}

/// Loads the application settings from various sources.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads from a default `base.toml` file.
/// 2. Merges settings from an environment-specific file (e.g., `development.toml`).
/// 3. Merges settings from environment variables.
pub fn load_settings_from(config_dir: &Path) -> Result<Settings> {
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

    let settings = Config::builder()
        // 1. Load the base configuration file.
        .add_source(File::from(config_dir.join("base")))
        // 2. Load the environment-specific configuration file.
        .add_source(File::from(config_dir.join(&environment)).required(false))
        // 3. Load settings from environment variables (e.g., `APP__SERVER__PORT=8080`).
        // The prefix is `APP`, separator is `__`.
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    // Deserialize the configuration into our `Settings` struct.
    let settings: Settings = settings.try_deserialize()?;
    validate(&settings)?;

    Ok(settings)
}

fn validate(settings: &Settings) -> Result<()> {
    let market = &settings.market_data;
    if market.start_date >= market.end_date {
        return Err(Error::InvalidSettings(format!(
            "market_data.start_date ({}) must be before market_data.end_date ({})",
            market.start_date, market.end_date
        )));
    }
    if market.timeout_secs == 0 {
        return Err(Error::InvalidSettings(
            "market_data.timeout_secs must be positive".into(),
        ));
    }
    Ok(())
}
