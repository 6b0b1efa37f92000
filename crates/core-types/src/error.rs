// In crates/core-types/src/error.rs

use thiserror::Error;

/// Validation failures raised by the evaluation pipeline.
///
/// Every variant aborts the whole evaluation; no partial report is produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Bad or missing strategy kind, non-positive or inconsistent windows.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The price history is too short for the requested computation.
    #[error("Insufficient data: {required} price points required, {available} available")]
    InsufficientData { required: usize, available: usize },

    /// The raw price history violates the series invariants.
    #[error("Invalid price series: {0}")]
    InvalidPriceSeries(String),
}

pub type Result<T> = std::result::Result<T, Error>;
