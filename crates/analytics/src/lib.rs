// In crates/analytics/src/lib.rs

//! Return accumulation and performance metrics for a signal-driven strategy.

pub mod engine;
pub mod returns;
pub mod types;

pub use engine::{AnalyticsEngine, TRADING_DAYS_PER_YEAR};
pub use returns::accumulate_returns;
pub use types::{PerformanceReport, ReturnCurves, StrategySummary};
