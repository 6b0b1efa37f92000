// In crates/analytics/src/returns.rs

use crate::types::ReturnCurves;
use core_types::{Error, PriceSeries, Result, ReturnSeries};

/// Computes daily, strategy and cumulative returns.
///
/// The strategy return on day `i` uses the buy signal of day `i - 1`: a
/// decision taken at yesterday's close earns today's return. Same-day
/// signals never feed into same-day returns.
pub fn accumulate_returns(series: &PriceSeries, buy: &[bool]) -> Result<ReturnCurves> {
    if series.len() < 2 {
        return Err(Error::InsufficientData {
            required: 2,
            available: series.len(),
        });
    }
    if buy.len() != series.len() {
        return Err(Error::InvalidParameter(format!(
            "buy signal length {} does not match price series length {}",
            buy.len(),
            series.len()
        )));
    }

    let closes = series.closes();

    let mut daily: ReturnSeries = Vec::with_capacity(closes.len());
    daily.push(None);
    daily.extend(closes.windows(2).map(|w| Some(w[1] / w[0] - 1.0)));

    let strategy: ReturnSeries = daily
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let r = (*r)?;
            Some(if buy[i - 1] { r } else { 0.0 })
        })
        .collect();

    let mut cumulative = Vec::with_capacity(closes.len());
    let mut value = 1.0;
    for r in &strategy {
        value *= 1.0 + r.unwrap_or(0.0);
        cumulative.push(value);
    }

    Ok(ReturnCurves {
        daily,
        strategy,
        cumulative,
    })
}
