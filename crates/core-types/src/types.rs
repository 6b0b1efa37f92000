// In crates/core-types/src/types.rs

use crate::error::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A derived series aligned 1:1 with a `PriceSeries`. `None` marks the warm-up
/// span where the indicator is not yet computable.
pub type IndicatorSeries = Vec<Option<f64>>;

/// A boolean buy or sell series aligned 1:1 with a `PriceSeries`.
pub type SignalSeries = Vec<bool>;

/// A return series aligned 1:1 with a `PriceSeries`; index 0 is always `None`.
pub type ReturnSeries = Vec<Option<f64>>;

/// A single daily closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// An immutable, validated daily close history.
///
/// Guarantees at least one point, strictly increasing dates and finite,
/// positive closes. The only way to obtain one is through [`PriceSeries::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Validates and wraps an ordered list of price points.
    pub fn new(points: Vec<PricePoint>) -> Result<Self> {
        if points.is_empty() {
            return Err(Error::InsufficientData {
                required: 1,
                available: 0,
            });
        }

        for (i, point) in points.iter().enumerate() {
            if !point.close.is_finite() || point.close <= 0.0 {
                return Err(Error::InvalidPriceSeries(format!(
                    "close on {} must be a positive number, got {}",
                    point.date, point.close
                )));
            }
            if i > 0 && point.date <= points[i - 1].date {
                return Err(Error::InvalidPriceSeries(format!(
                    "dates must be strictly increasing: {} follows {}",
                    point.date,
                    points[i - 1].date
                )));
            }
        }

        Ok(Self { points })
    }

    /// Builds a series of consecutive calendar days starting at `start`.
    pub fn from_closes(start: NaiveDate, closes: &[f64]) -> Result<Self> {
        let points = closes
            .iter()
            .zip(start.iter_days())
            .map(|(&close, date)| PricePoint::new(date, close))
            .collect();
        Self::new(points)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn first(&self) -> &PricePoint {
        &self.points[0]
    }

    pub fn last(&self) -> &PricePoint {
        &self.points[self.points.len() - 1]
    }
}

/// The rule family a strategy evaluation uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StrategyKind {
    /// Short/long simple moving average crossover.
    Sma,
    /// Short/long exponential moving average crossover.
    Ema,
    /// Oversold/overbought Relative Strength Index.
    Rsi,
    /// MACD line against its signal line (fixed 12/26/9).
    Macd,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Sma => "SMA",
            StrategyKind::Ema => "EMA",
            StrategyKind::Rsi => "RSI",
            StrategyKind::Macd => "MACD",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SMA" => Ok(StrategyKind::Sma),
            "EMA" => Ok(StrategyKind::Ema),
            "RSI" => Ok(StrategyKind::Rsi),
            "MACD" => Ok(StrategyKind::Macd),
            "" => Err(Error::InvalidParameter("strategy kind is missing".into())),
            other => Err(Error::InvalidParameter(format!(
                "unknown strategy kind '{}', expected one of SMA, EMA, RSI, MACD",
                other
            ))),
        }
    }
}

/// All inputs of a single evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyParams {
    pub kind: StrategyKind,
    /// Short moving-average window, or the RSI period.
    pub short_window: i64,
    /// Long moving-average window. Unused by RSI and MACD.
    pub long_window: i64,
    /// Accepted for request compatibility. No stop-loss logic consumes it.
    #[serde(default)]
    pub stop_loss_pct: Option<f64>,
}

impl StrategyParams {
    pub fn new(kind: StrategyKind, short_window: i64, long_window: i64) -> Self {
        Self {
            kind,
            short_window,
            long_window,
            stop_loss_pct: None,
        }
    }

    pub fn with_stop_loss(mut self, stop_loss_pct: f64) -> Self {
        self.stop_loss_pct = Some(stop_loss_pct);
        self
    }
}

/// One row of the aligned (date, close, buy, sell) trace handed to charting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalPoint {
    pub date: NaiveDate,
    pub close: f64,
    pub buy_signal: bool,
    pub sell_signal: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, d).unwrap()
    }

    #[test]
    fn rejects_empty_series() {
        let err = PriceSeries::new(vec![]).unwrap_err();
        assert_eq!(
            err,
            Error::InsufficientData {
                required: 1,
                available: 0
            }
        );
    }

    #[test]
    fn rejects_duplicate_and_unordered_dates() {
        let dup = vec![PricePoint::new(day(2), 10.0), PricePoint::new(day(2), 11.0)];
        assert!(matches!(
            PriceSeries::new(dup),
            Err(Error::InvalidPriceSeries(_))
        ));

        let backwards = vec![PricePoint::new(day(3), 10.0), PricePoint::new(day(2), 11.0)];
        assert!(matches!(
            PriceSeries::new(backwards),
            Err(Error::InvalidPriceSeries(_))
        ));
    }

    #[test]
    fn rejects_non_positive_or_nan_closes() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let points = vec![PricePoint::new(day(2), 10.0), PricePoint::new(day(3), bad)];
            assert!(matches!(
                PriceSeries::new(points),
                Err(Error::InvalidPriceSeries(_))
            ));
        }
    }

    #[test]
    fn from_closes_uses_consecutive_days() {
        let series = PriceSeries::from_closes(day(1), &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.first().date, day(1));
        assert_eq!(series.last().date, day(3));
        assert_eq!(series.closes(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn strategy_kind_parses_case_insensitively() {
        assert_eq!("sma".parse::<StrategyKind>().unwrap(), StrategyKind::Sma);
        assert_eq!(" MACD ".parse::<StrategyKind>().unwrap(), StrategyKind::Macd);
        assert!(matches!(
            "bollinger".parse::<StrategyKind>(),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            "".parse::<StrategyKind>(),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn strategy_kind_uses_wire_names() {
        let json = serde_json::to_string(&StrategyKind::Rsi).unwrap();
        assert_eq!(json, "\"RSI\"");
        assert_eq!(StrategyKind::Ema.to_string(), "EMA");
    }
}
