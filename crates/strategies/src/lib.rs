// In crates/strategies/src/lib.rs

//! Indicator computation and buy/sell signal derivation.
//!
//! Both stages are pure: a `PriceSeries` and `StrategyParams` go in, aligned
//! series come out. The strategy kind is resolved with an exhaustive `match`
//! in [`indicators::compute_indicators`].

pub mod indicators;
pub mod signals;
pub mod types;

pub use indicators::{compute_indicators, Indicator};
pub use signals::{generate_signals, RSI_OVERBOUGHT, RSI_OVERSOLD};
pub use types::{IndicatorOutput, SignalPair};
