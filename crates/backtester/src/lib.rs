// In crates/backtester/src/lib.rs

//! The stateless evaluation pipeline:
//! prices -> indicators -> signals -> returns -> performance report.

pub mod trace;

use analytics::{accumulate_returns, AnalyticsEngine, PerformanceReport, ReturnCurves, StrategySummary};
use core_types::{PriceSeries, Result, SignalPoint, StrategyParams};
use strategies::{compute_indicators, generate_signals, IndicatorOutput, SignalPair};

pub use trace::{build_trace, write_trace_csv};

/// Everything one evaluation produces.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub report: PerformanceReport,
    pub indicators: IndicatorOutput,
    pub signals: SignalPair,
    pub returns: ReturnCurves,
    /// Aligned (date, close, buy, sell) rows for charting.
    pub trace: Vec<SignalPoint>,
}

impl Evaluation {
    pub fn summary(&self) -> StrategySummary {
        self.report.summary()
    }
}

/// Runs the full pipeline for one price history and parameter set.
///
/// Any validation error aborts the evaluation; no partial report is returned.
pub fn evaluate(series: &PriceSeries, params: &StrategyParams) -> Result<Evaluation> {
    tracing::info!(
        strategy = %params.kind,
        short_window = params.short_window,
        long_window = params.long_window,
        points = series.len(),
        from = %series.first().date,
        to = %series.last().date,
        "Evaluating strategy."
    );
    if let Some(stop_loss_pct) = params.stop_loss_pct {
        tracing::debug!(stop_loss_pct, "stop_loss_pct is accepted but not applied.");
    }

    // 1. Indicator engine
    let indicators = compute_indicators(series, params)?;

    // 2. Signal generator
    let signals = generate_signals(&indicators);

    // 3. Return accumulator
    let returns = accumulate_returns(series, &signals.buy)?;

    // 4. Performance analyzer
    let report = AnalyticsEngine::new().calculate(&returns, series.len());

    tracing::info!(
        annualized_return = report.annualized_return,
        annualized_volatility = report.annualized_volatility,
        sharpe_ratio = report.sharpe_ratio,
        buys = signals.buy_count(),
        sells = signals.sell_count(),
        "Evaluation finished."
    );

    let trace = build_trace(series, &signals);

    Ok(Evaluation {
        report,
        indicators,
        signals,
        returns,
        trace,
    })
}
