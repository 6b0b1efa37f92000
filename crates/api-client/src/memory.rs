// In crates/api-client/src/memory.rs

use crate::{Error, PriceSource, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use core_types::{PricePoint, PriceSeries};
use std::collections::HashMap;

/// A fixed set of price histories keyed by symbol. Used by tests and demos.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPriceSource {
    histories: HashMap<String, Vec<PricePoint>>,
}

impl InMemoryPriceSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(mut self, symbol: impl Into<String>, points: Vec<PricePoint>) -> Self {
        self.histories.insert(symbol.into(), points);
        self
    }
}

#[async_trait]
impl PriceSource for InMemoryPriceSource {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn daily_closes(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<PriceSeries> {
        let history = self
            .histories
            .get(symbol)
            .ok_or_else(|| Error::SymbolNotFound(symbol.to_string()))?;

        let points: Vec<PricePoint> = history
            .iter()
            .filter(|p| p.date >= start && p.date < end)
            .copied()
            .collect();
        if points.is_empty() {
            return Err(Error::EmptyHistory {
                symbol: symbol.to_string(),
                start,
                end,
            });
        }

        Ok(PriceSeries::new(points)?)
    }
}
