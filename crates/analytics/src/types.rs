// In crates/analytics/src/types.rs

use core_types::ReturnSeries;
use serde::{Deserialize, Serialize};

/// The three return series of one evaluation, index-aligned with the prices.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnCurves {
    /// close[i] / close[i-1] - 1; `None` at index 0.
    pub daily: ReturnSeries,
    /// daily[i] gated by the previous day's buy signal; `None` at index 0.
    pub strategy: ReturnSeries,
    /// Running product of (1 + strategy), seeded at 1.0.
    pub cumulative: Vec<f64>,
}

impl ReturnCurves {
    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    /// Terminal value of the compounded curve.
    pub fn final_value(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(1.0)
    }

    pub fn defined_strategy_returns(&self) -> impl Iterator<Item = f64> + '_ {
        self.strategy.iter().flatten().copied()
    }
}

/// Risk/return statistics of a strategy over its evaluation window.
///
/// Values are fractions (0.1234 = 12.34%). The percentage convention is
/// applied by [`StrategySummary`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct PerformanceReport {
    /// Annualized geometric mean rate of return (GMRR).
    pub annualized_return: f64,
    /// Sample standard deviation of strategy returns, annualized.
    pub annualized_volatility: f64,
    /// annualized_return / annualized_volatility, or 0 when volatility is 0.
    pub sharpe_ratio: f64,
    /// cumulative[last] - 1.
    pub total_return: f64,
    /// Largest peak-to-trough decline of the cumulative curve, as a positive fraction.
    pub max_drawdown: f64,
    /// Number of price points the report was computed over.
    pub trading_days: usize,
}

impl PerformanceReport {
    /// Creates a new, empty report with zero values.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the zero-volatility fallback produced the Sharpe ratio.
    pub fn is_degenerate(&self) -> bool {
        self.annualized_volatility <= 0.0
    }

    pub fn summary(&self) -> StrategySummary {
        StrategySummary::from(self)
    }
}

/// The formatted result returned to API clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StrategySummary {
    /// e.g. "12.34%"
    pub gmrr: String,
    /// e.g. "20.00%"
    pub volatility: String,
    /// e.g. "0.62"
    pub sharpe_ratio: String,
}

impl From<&PerformanceReport> for StrategySummary {
    fn from(report: &PerformanceReport) -> Self {
        Self {
            gmrr: format_percent(report.annualized_return),
            volatility: format_percent(report.annualized_volatility),
            sharpe_ratio: format!("{:.2}", report.sharpe_ratio),
        }
    }
}

fn format_percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}
