// In crates/app-config/src/types.rs

use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
    pub server: ServerSettings,
    /// Where and how daily price history is fetched.
    pub market_data: MarketDataSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The log level for the application.
    pub log_level: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct MarketDataSettings {
    /// Base URL of the Yahoo Finance chart API.
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Default evaluation window when a request does not name one.
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Helper functions for serde defaults
fn default_timeout_secs() -> u64 { 30 }
