// In crates/strategies/src/indicators/rsi.rs

//! Relative Strength Index with Wilder smoothing.
//!
//! Seed: plain mean of the first `period` gains and losses, first value at
//! index `period`. Afterwards avg = (avg * (period - 1) + x) / period.
//! RSI = 100 * avg_gain / (avg_gain + avg_loss), and 0 when there was no
//! movement at all. Lookback: period.

use super::Indicator;
use core_types::{Error, IndicatorSeries, Result};

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    pub fn new(period: usize) -> Result<Self> {
        if period == 0 {
            return Err(Error::InvalidParameter("RSI period must be >= 1".into()));
        }
        Ok(Self { period })
    }
}

impl Indicator for Rsi {
    fn name(&self) -> String {
        format!("rsi_{}", self.period)
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, closes: &[f64]) -> IndicatorSeries {
        let n = closes.len();
        let p = self.period;
        let mut result = vec![None; n];
        if n <= p {
            return result;
        }

        let mut avg_gain = 0.0;
        let mut avg_loss = 0.0;
        for i in 1..=p {
            let (gain, loss) = split_change(closes[i] - closes[i - 1]);
            avg_gain += gain;
            avg_loss += loss;
        }
        avg_gain /= p as f64;
        avg_loss /= p as f64;
        result[p] = Some(rsi_value(avg_gain, avg_loss));

        let smoothing = (p - 1) as f64;
        for i in (p + 1)..n {
            let (gain, loss) = split_change(closes[i] - closes[i - 1]);
            avg_gain = (avg_gain * smoothing + gain) / p as f64;
            avg_loss = (avg_loss * smoothing + loss) / p as f64;
            result[i] = Some(rsi_value(avg_gain, avg_loss));
        }

        result
    }
}

fn split_change(change: f64) -> (f64, f64) {
    if change > 0.0 {
        (change, 0.0)
    } else {
        (0.0, -change)
    }
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    let total = avg_gain + avg_loss;
    if total == 0.0 {
        0.0
    } else {
        100.0 * avg_gain / total
    }
}
