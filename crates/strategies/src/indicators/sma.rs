// In crates/strategies/src/indicators/sma.rs

//! Simple Moving Average over the trailing `period` closes.
//! Lookback: period - 1.

use super::Indicator;
use core_types::{Error, IndicatorSeries, Result};
use ta::indicators::SimpleMovingAverage;
use ta::Next;

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    inner: SimpleMovingAverage,
}

impl Sma {
    pub fn new(period: usize) -> Result<Self> {
        let inner = SimpleMovingAverage::new(period)
            .map_err(|e| Error::InvalidParameter(format!("SMA period {period}: {e:?}")))?;
        Ok(Self { period, inner })
    }
}

impl Indicator for Sma {
    fn name(&self) -> String {
        format!("sma_{}", self.period)
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, closes: &[f64]) -> IndicatorSeries {
        // `ta` averages over whatever it has seen so far; mask those partial windows.
        let mut sma = self.inner.clone();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                let value = sma.next(close);
                (i >= self.lookback()).then_some(value)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::assert_approx;

    #[test]
    fn sma_rolling_mean() {
        let sma = Sma::new(3).unwrap();
        let out = sma.compute(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(out[0], None);
        assert_eq!(out[1], None);
        assert_approx(out[2].unwrap(), 2.0, 1e-12);
        assert_approx(out[3].unwrap(), 3.0, 1e-12);
        assert_approx(out[4].unwrap(), 4.0, 1e-12);
    }

    #[test]
    fn sma_period_one_is_the_close() {
        let sma = Sma::new(1).unwrap();
        assert_eq!(sma.compute(&[4.0, 8.0]), vec![Some(4.0), Some(8.0)]);
    }

    #[test]
    fn sma_rejects_zero_period() {
        assert!(matches!(Sma::new(0), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn sma_name_and_lookback() {
        let sma = Sma::new(20).unwrap();
        assert_eq!(sma.name(), "sma_20");
        assert_eq!(sma.lookback(), 19);
    }
}
