// In crates/api-client/src/yahoo.rs

use crate::types::ChartResponse;
use crate::{Error, PriceSource, Result};
use app_config::MarketDataSettings;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use core_types::{PricePoint, PriceSeries};
use reqwest::{Client, Url};
use std::time::Duration;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36";

/// The client for the Yahoo Finance v8 chart API.
#[derive(Debug, Clone)]
pub struct YahooClient {
    /// The persistent HTTP client.
    http_client: Client,
    /// e.g. `https://query2.finance.yahoo.com`
    base_url: Url,
}

impl YahooClient {
    /// Constructs a new client from the market data settings.
    pub fn new(settings: &MarketDataSettings) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::ClientBuildError(e.to_string()))?;

        let base_url = Url::parse(&settings.base_url)
            .map_err(|e| Error::ClientBuildError(format!("invalid base_url '{}': {e}", settings.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::ClientBuildError(format!(
                "base_url '{}' cannot carry a path",
                settings.base_url
            )));
        }

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Builds the chart URL for a symbol and a `[start, end)` date range.
    ///
    /// The symbol is a single percent-encoded path segment.
    fn chart_url(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Url {
        let period1 = start.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc().timestamp()).unwrap_or_default();
        let period2 = end.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc().timestamp()).unwrap_or_default();

        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["v8", "finance", "chart", symbol]);
        }
        url.query_pairs_mut()
            .clear()
            .append_pair("period1", &period1.to_string())
            .append_pair("period2", &period2.to_string())
            .append_pair("interval", "1d")
            .append_pair("includeAdjustedClose", "true");
        url
    }
}

#[async_trait]
impl PriceSource for YahooClient {
    fn name(&self) -> &'static str {
        "yahoo"
    }

    /// Fetches daily closes.
    ///
    /// This corresponds to the `GET /v8/finance/chart/{symbol}` endpoint.
    async fn daily_closes(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<PriceSeries> {
        let url = self.chart_url(symbol, start, end);
        tracing::info!(symbol, %start, %end, "Fetching daily price history from Yahoo.");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(Error::RequestFailed)?;
        let status = response.status();
        let body = response.text().await.map_err(Error::RequestFailed)?;

        // Yahoo returns an error object for unknown symbols, so try the chart shape first.
        let chart: ChartResponse = serde_json::from_str(&body).map_err(|e| {
            if status.is_success() {
                Error::DeserializationFailed(e)
            } else {
                Error::ApiError {
                    code: status.as_u16().to_string(),
                    msg: body.chars().take(200).collect(),
                }
            }
        })?;

        let points = parse_chart(symbol, chart)?;
        if points.is_empty() {
            return Err(Error::EmptyHistory {
                symbol: symbol.to_string(),
                start,
                end,
            });
        }
        tracing::info!(symbol, count = points.len(), "Received price history.");

        Ok(PriceSeries::new(points)?)
    }
}

/// Converts a chart response into ordered price points.
///
/// Prefers adjusted closes when present, drops bars with a null close and
/// keeps the last bar when Yahoo repeats a trading day. Dates are taken in
/// the exchange's time zone (`meta.gmtoffset`).
pub fn parse_chart(symbol: &str, response: ChartResponse) -> Result<Vec<PricePoint>> {
    let results = match (response.chart.result, response.chart.error) {
        (_, Some(err)) if err.code == "Not Found" => {
            return Err(Error::SymbolNotFound(symbol.to_string()));
        }
        (_, Some(err)) => {
            return Err(Error::ApiError {
                code: err.code,
                msg: err.description,
            });
        }
        (Some(results), None) => results,
        (None, None) => return Err(Error::MalformedData("empty result with no error".into())),
    };

    let data = results
        .into_iter()
        .next()
        .ok_or_else(|| Error::MalformedData("result array is empty".into()))?;

    // Bars are dated in the exchange's local time.
    let gmtoffset = data.meta.as_ref().and_then(|m| m.gmtoffset).unwrap_or(0);

    // A symbol with no bars in the range comes back without timestamps.
    let Some(timestamps) = data.timestamp else {
        return Ok(Vec::new());
    };

    let closes = match data.indicators.adjclose.and_then(|a| a.into_iter().next()) {
        Some(adj) if !adj.adjclose.is_empty() => adj.adjclose,
        _ => data
            .indicators
            .quote
            .into_iter()
            .next()
            .map(|q| q.close)
            .ok_or_else(|| Error::MalformedData("no quote data".into()))?,
    };

    if closes.len() != timestamps.len() {
        return Err(Error::MalformedData(format!(
            "{} timestamps but {} closes",
            timestamps.len(),
            closes.len()
        )));
    }

    let mut points: Vec<PricePoint> = Vec::with_capacity(timestamps.len());
    for (ts, close) in timestamps.into_iter().zip(closes) {
        let Some(close) = close else { continue };
        let date = DateTime::from_timestamp(ts.saturating_add(gmtoffset), 0)
            .ok_or_else(|| Error::MalformedData(format!("invalid timestamp {ts}")))?
            .date_naive();

        match points.last_mut() {
            Some(last) if last.date == date => *last = PricePoint::new(date, close),
            _ => points.push(PricePoint::new(date, close)),
        }
    }

    Ok(points)
}
