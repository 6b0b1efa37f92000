// In crates/api-client/src/types.rs

//! Wire types of the Yahoo Finance v8 chart API.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: ChartResult,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    pub result: Option<Vec<ChartData>>,
    pub error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ChartData {
    pub meta: Option<ChartMeta>,
    /// Unix timestamps (seconds) of each bar.
    pub timestamp: Option<Vec<i64>>,
    pub indicators: Indicators,
}

#[derive(Debug, Deserialize)]
pub struct ChartMeta {
    /// Exchange offset from UTC, in seconds.
    #[serde(default)]
    pub gmtoffset: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct Indicators {
    pub quote: Vec<QuoteData>,
    pub adjclose: Option<Vec<AdjCloseData>>,
}

/// Yahoo reports missing bars as `null`.
#[derive(Debug, Deserialize)]
pub struct QuoteData {
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
pub struct AdjCloseData {
    #[serde(default)]
    pub adjclose: Vec<Option<f64>>,
}
