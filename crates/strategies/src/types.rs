// In crates/strategies/src/types.rs

use core_types::{IndicatorSeries, SignalSeries};

/// The indicator series one strategy kind produces, index-aligned with the
/// price series.
#[derive(Debug, Clone, PartialEq)]
pub enum IndicatorOutput {
    /// SMA or EMA short/long moving averages.
    Crossover {
        short: IndicatorSeries,
        long: IndicatorSeries,
    },
    /// Relative Strength Index.
    Oscillator { rsi: IndicatorSeries },
    /// MACD line and its signal line.
    Macd {
        macd: IndicatorSeries,
        signal: IndicatorSeries,
    },
}

impl IndicatorOutput {
    pub fn len(&self) -> usize {
        match self {
            IndicatorOutput::Crossover { short, .. } => short.len(),
            IndicatorOutput::Oscillator { rsi } => rsi.len(),
            IndicatorOutput::Macd { macd, .. } => macd.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of leading entries where at least one series is undefined.
    pub fn warm_up(&self) -> usize {
        let defined_from = |series: &IndicatorSeries| {
            series
                .iter()
                .position(Option::is_some)
                .unwrap_or(series.len())
        };
        match self {
            IndicatorOutput::Crossover { short, long } => {
                defined_from(short).max(defined_from(long))
            }
            IndicatorOutput::Oscillator { rsi } => defined_from(rsi),
            IndicatorOutput::Macd { macd, signal } => defined_from(macd).max(defined_from(signal)),
        }
    }
}

/// Buy and sell series. They are not complements: both can be `false`, never
/// both `true`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignalPair {
    pub buy: SignalSeries,
    pub sell: SignalSeries,
}

impl SignalPair {
    pub fn len(&self) -> usize {
        self.buy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buy.is_empty()
    }

    pub fn buy_count(&self) -> usize {
        self.buy.iter().filter(|&&b| b).count()
    }

    pub fn sell_count(&self) -> usize {
        self.sell.iter().filter(|&&s| s).count()
    }
}
