// In crates/api-client/src/lib.rs

//! Daily price history providers.
//!
//! The evaluation core only needs an ordered `(date, close)` sequence; every
//! provider here yields a validated [`PriceSeries`].

use async_trait::async_trait;
use chrono::NaiveDate;
use core_types::PriceSeries;

pub mod csv_source;
pub mod error;
pub mod memory;
pub mod types;
pub mod yahoo;

// Re-export public types
pub use csv_source::CsvPriceSource;
pub use error::{Error, Result};
pub use memory::InMemoryPriceSource;
pub use yahoo::YahooClient;

/// The universal interface for a price history provider.
///
/// `start` is inclusive and `end` is exclusive.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// The name of the provider, for logs.
    fn name(&self) -> &'static str;

    async fn daily_closes(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<PriceSeries>;
}
