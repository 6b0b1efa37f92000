// In crates/strategies/src/signals.rs

use crate::types::{IndicatorOutput, SignalPair};
use core_types::IndicatorSeries;

/// RSI strictly below this value is a buy.
pub const RSI_OVERSOLD: f64 = 30.0;
/// RSI strictly above this value is a sell.
pub const RSI_OVERBOUGHT: f64 = 70.0;

/// Maps indicator output to buy/sell series of the same length.
///
/// Every rule uses strict inequalities, and an undefined operand makes both
/// signals `false` for that index.
pub fn generate_signals(output: &IndicatorOutput) -> SignalPair {
    let pair = match output {
        IndicatorOutput::Crossover { short, long } => crossover(short, long),
        IndicatorOutput::Oscillator { rsi } => thresholds(rsi),
        IndicatorOutput::Macd { macd, signal } => crossover(macd, signal),
    };

    tracing::debug!(
        buys = pair.buy_count(),
        sells = pair.sell_count(),
        "Signals generated."
    );

    pair
}

/// `buy = fast > slow`, `sell = fast < slow`.
fn crossover(fast: &IndicatorSeries, slow: &IndicatorSeries) -> SignalPair {
    let (buy, sell) = fast
        .iter()
        .zip(slow)
        .map(|pair| match pair {
            (Some(f), Some(s)) => (f > s, f < s),
            _ => (false, false),
        })
        .unzip();
    SignalPair { buy, sell }
}

fn thresholds(rsi: &IndicatorSeries) -> SignalPair {
    let (buy, sell) = rsi
        .iter()
        .map(|value| match value {
            Some(v) => (*v < RSI_OVERSOLD, *v > RSI_OVERBOUGHT),
            None => (false, false),
        })
        .unzip();
    SignalPair { buy, sell }
}
