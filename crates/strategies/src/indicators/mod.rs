// In crates/strategies/src/indicators/mod.rs

//! The indicator engine.
//!
//! Every indicator implements [`Indicator`] and returns a series of the same
//! length as its input, with `None` for the warm-up span.

pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use ema::Ema;
pub use macd::Macd;
pub use rsi::Rsi;
pub use sma::Sma;

use crate::types::IndicatorOutput;
use core_types::{Error, IndicatorSeries, PriceSeries, Result, StrategyKind, StrategyParams};

/// A single-series indicator computed over closing prices.
pub trait Indicator {
    /// Short name used in logs, e.g. `sma_20`.
    fn name(&self) -> String;

    /// Number of leading entries that are undefined.
    fn lookback(&self) -> usize;

    fn compute(&self, closes: &[f64]) -> IndicatorSeries;
}

/// Computes the indicator series the strategy kind needs.
///
/// Validates the windows first and refuses series so short that every
/// output entry would be undefined.
pub fn compute_indicators(series: &PriceSeries, params: &StrategyParams) -> Result<IndicatorOutput> {
    validate(params)?;
    let closes = series.closes();

    // Length is checked against the raw windows before any indicator
    // allocates its buffers.
    let output = match params.kind {
        StrategyKind::Sma => {
            require_len(series, window(params.long_window))?;
            let short = Sma::new(window(params.short_window))?;
            let long = Sma::new(window(params.long_window))?;
            IndicatorOutput::Crossover {
                short: short.compute(&closes),
                long: long.compute(&closes),
            }
        }
        StrategyKind::Ema => {
            require_len(series, window(params.long_window))?;
            let short = Ema::new(window(params.short_window))?;
            let long = Ema::new(window(params.long_window))?;
            IndicatorOutput::Crossover {
                short: short.compute(&closes),
                long: long.compute(&closes),
            }
        }
        StrategyKind::Rsi => {
            require_len(series, window(params.short_window).saturating_add(1))?;
            let rsi = Rsi::new(window(params.short_window))?;
            IndicatorOutput::Oscillator {
                rsi: rsi.compute(&closes),
            }
        }
        StrategyKind::Macd => {
            let macd = Macd::default();
            require_len(series, macd.lookback() + 1)?;
            let (line, signal) = macd.compute_lines(&closes);
            IndicatorOutput::Macd { macd: line, signal }
        }
    };

    tracing::debug!(
        kind = %params.kind,
        len = output.len(),
        warm_up = output.warm_up(),
        "Indicators computed."
    );

    Ok(output)
}

fn validate(params: &StrategyParams) -> Result<()> {
    if params.short_window <= 0 {
        return Err(Error::InvalidParameter(format!(
            "short_window must be positive, got {}",
            params.short_window
        )));
    }
    if params.long_window <= 0 {
        return Err(Error::InvalidParameter(format!(
            "long_window must be positive, got {}",
            params.long_window
        )));
    }
    if matches!(params.kind, StrategyKind::Sma | StrategyKind::Ema)
        && params.short_window >= params.long_window
    {
        return Err(Error::InvalidParameter(format!(
            "short_window ({}) must be smaller than long_window ({})",
            params.short_window, params.long_window
        )));
    }
    Ok(())
}

/// A validated (positive) window as a length. Saturates on targets where
/// `i64` does not fit in `usize`.
fn window(value: i64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

fn require_len(series: &PriceSeries, required: usize) -> Result<()> {
    if series.len() < required {
        return Err(Error::InsufficientData {
            required,
            available: series.len(),
        });
    }
    Ok(())
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}
