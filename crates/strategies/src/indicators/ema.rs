// In crates/strategies/src/indicators/ema.rs

//! Exponential Moving Average.
//!
//! EMA[t] = alpha * close[t] + (1 - alpha) * EMA[t-1], alpha = 2 / (period + 1).
//! Seeded at index period-1 with the SMA of the first `period` values, so the
//! first defined value matches the SMA. Lookback: period - 1.

use super::Indicator;
use core_types::{Error, IndicatorSeries, Result};

#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Result<Self> {
        if period == 0 {
            return Err(Error::InvalidParameter("EMA period must be >= 1".into()));
        }
        Ok(Self { period })
    }
}

impl Indicator for Ema {
    fn name(&self) -> String {
        format!("ema_{}", self.period)
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, closes: &[f64]) -> IndicatorSeries {
        ema_of_series(closes, self.period)
    }
}

/// EMA of an arbitrary value slice. Composed indicators (MACD) use this for
/// their derived lines.
pub(crate) fn ema_of_series(values: &[f64], period: usize) -> IndicatorSeries {
    if period == 0 {
        return vec![None; values.len()];
    }
    ema_seeded_at(values, period, period - 1)
}

/// EMA whose first value sits at `seed_index`, seeded with the mean of the
/// `period` values ending there. Requires `seed_index >= period - 1`.
pub(crate) fn ema_seeded_at(values: &[f64], period: usize, seed_index: usize) -> IndicatorSeries {
    let n = values.len();
    let mut result = vec![None; n];
    if period == 0 || seed_index + 1 < period || n <= seed_index {
        return result;
    }

    let alpha = 2.0 / (period as f64 + 1.0);
    let window = &values[seed_index + 1 - period..=seed_index];
    let seed = window.iter().sum::<f64>() / period as f64;
    result[seed_index] = Some(seed);

    let mut prev = seed;
    for i in (seed_index + 1)..n {
        let ema = alpha * values[i] + (1.0 - alpha) * prev;
        result[i] = Some(ema);
        prev = ema;
    }

    result
}
