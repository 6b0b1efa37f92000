// In crates/api-client/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to build the API client: {0}")]
    ClientBuildError(String),
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(#[from] serde_json::Error),
    #[error("API error: code {code}, msg: {msg}")]
    ApiError { code: String, msg: String },
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),
    #[error("No price history for {symbol} between {start} and {end}")]
    EmptyHistory {
        symbol: String,
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },
    #[error("Failed to read CSV price file: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Malformed price data: {0}")]
    MalformedData(String),
    #[error(transparent)]
    Series(#[from] core_types::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
