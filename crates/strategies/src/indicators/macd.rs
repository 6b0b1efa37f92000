// In crates/strategies/src/indicators/macd.rs

//! Moving Average Convergence Divergence.
//!
//! MACD line = EMA(fast) - EMA(slow); signal line = EMA(signal) of the MACD
//! line. Both EMAs start at index slow - 1, the fast one seeded with the mean
//! of the `fast` closes ending there (TA-Lib alignment). Both outputs stay
//! undefined until the signal line exists, i.e. for the first
//! (slow - 1) + (signal - 1) entries.

use super::Indicator;
use super::ema::{ema_of_series, ema_seeded_at};
use core_types::{Error, IndicatorSeries, Result};

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
}

impl Default for Macd {
    fn default() -> Self {
        Self {
            fast: DEFAULT_FAST,
            slow: DEFAULT_SLOW,
            signal: DEFAULT_SIGNAL,
        }
    }
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Result<Self> {
        if fast == 0 || slow == 0 || signal == 0 {
            return Err(Error::InvalidParameter("MACD periods must be >= 1".into()));
        }
        if fast >= slow {
            return Err(Error::InvalidParameter(format!(
                "MACD fast period ({fast}) must be smaller than slow period ({slow})"
            )));
        }
        Ok(Self { fast, slow, signal })
    }

    /// Computes the MACD line and the signal line.
    pub fn compute_lines(&self, closes: &[f64]) -> (IndicatorSeries, IndicatorSeries) {
        let n = closes.len();
        let mut macd = vec![None; n];
        let mut signal = vec![None; n];

        let start = self.slow - 1;
        let fast = ema_seeded_at(closes, self.fast, start);
        let slow = ema_of_series(closes, self.slow);

        let raw: Vec<f64> = fast
            .iter()
            .zip(&slow)
            .filter_map(|(f, s)| Some((*f)? - (*s)?))
            .collect();
        let signal_tail = ema_of_series(&raw, self.signal);

        for (offset, sig) in signal_tail.into_iter().enumerate() {
            if let Some(sig) = sig {
                macd[start + offset] = Some(raw[offset]);
                signal[start + offset] = Some(sig);
            }
        }

        (macd, signal)
    }
}

impl Indicator for Macd {
    fn name(&self) -> String {
        format!("macd_{}_{}_{}", self.fast, self.slow, self.signal)
    }

    fn lookback(&self) -> usize {
        (self.slow - 1) + (self.signal - 1)
    }

    fn compute(&self, closes: &[f64]) -> IndicatorSeries {
        self.compute_lines(closes).0
    }
}
