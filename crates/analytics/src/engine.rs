// In crates/analytics/src/engine.rs

use crate::types::{PerformanceReport, ReturnCurves};

/// Trading days used to annualize daily statistics.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// The engine responsible for calculating performance metrics from return curves.
#[derive(Debug, Default)]
pub struct AnalyticsEngine;

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reduces the return curves to a performance report.
    ///
    /// `trading_days` is the number of price points the curves span.
    pub fn calculate(&self, curves: &ReturnCurves, trading_days: usize) -> PerformanceReport {
        let mut report = PerformanceReport::new();
        if curves.is_empty() || trading_days == 0 {
            return report;
        }
        report.trading_days = trading_days;

        // 1. GMRR: rescale the terminal compounded value to one year.
        let final_value = curves.final_value();
        report.total_return = final_value - 1.0;
        report.annualized_return =
            final_value.powf(TRADING_DAYS_PER_YEAR / trading_days as f64) - 1.0;

        // 2. Volatility of the defined strategy returns.
        let returns: Vec<f64> = curves.defined_strategy_returns().collect();
        report.annualized_volatility =
            sample_std_dev(&returns).unwrap_or(0.0) * TRADING_DAYS_PER_YEAR.sqrt();

        // 3. Sharpe ratio, with an explicit zero for the degenerate case.
        report.sharpe_ratio = if report.annualized_volatility > 0.0 {
            report.annualized_return / report.annualized_volatility
        } else {
            tracing::debug!(
                samples = returns.len(),
                "Strategy returns have no volatility; Sharpe ratio falls back to 0."
            );
            0.0
        };

        // 4. Max drawdown of the compounded curve.
        let mut peak = f64::MIN;
        let mut max_drawdown = 0.0_f64;
        for &value in &curves.cumulative {
            peak = peak.max(value);
            max_drawdown = max_drawdown.max((peak - value) / peak);
        }
        report.max_drawdown = max_drawdown;

        report
    }
}

/// Sample standard deviation (N - 1 denominator). `None` for fewer than two values.
fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Some(variance.sqrt())
}
