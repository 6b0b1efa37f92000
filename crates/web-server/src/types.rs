// In crates/web-server/src/types.rs

use analytics::StrategySummary;
use chrono::NaiveDate;
use core_types::{Error, SignalPoint, StrategyKind, StrategyParams};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The body of `POST /strategy` and `POST /strategy/signals`.
///
/// Numeric fields accept numbers or numeric strings, as form-posting clients
/// often send strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StrategyRequest {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(default)]
    pub short_window: Option<Value>,
    #[serde(default)]
    pub long_window: Option<Value>,
    /// Accepted for compatibility; no stop-loss logic consumes it.
    #[serde(default)]
    pub stop_loss_pct: Option<Value>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl StrategyRequest {
    pub fn symbol(&self) -> core_types::Result<String> {
        match self.symbol.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => Ok(s.to_uppercase()),
            _ => Err(Error::InvalidParameter("symbol is missing".into())),
        }
    }

    pub fn to_params(&self) -> core_types::Result<StrategyParams> {
        let kind: StrategyKind = self.strategy.as_deref().unwrap_or_default().parse()?;
        let short_window = integer_field("short_window", self.short_window.as_ref())?;
        let long_window = integer_field("long_window", self.long_window.as_ref())?;

        let mut params = StrategyParams::new(kind, short_window, long_window);
        if let Some(value) = self.stop_loss_pct.as_ref().filter(|v| !v.is_null()) {
            params = params.with_stop_loss(real_field("stop_loss_pct", value)?);
        }
        Ok(params)
    }
}

fn integer_field(name: &str, value: Option<&Value>) -> core_types::Result<i64> {
    let invalid = || Error::InvalidParameter(format!("{name} must be an integer"));
    match value {
        None | Some(Value::Null) => Err(Error::InvalidParameter(format!("{name} is missing"))),
        Some(Value::Number(n)) => n.as_i64().ok_or_else(invalid),
        Some(Value::String(s)) => s.trim().parse().map_err(|_| invalid()),
        Some(_) => Err(invalid()),
    }
}

fn real_field(name: &str, value: &Value) -> core_types::Result<f64> {
    let invalid = || Error::InvalidParameter(format!("{name} must be a number"));
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(invalid),
        Value::String(s) => s.trim().parse().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

/// The body of `POST /strategy/signals`: the summary plus the chart trace.
#[derive(Debug, Serialize, Deserialize)]
pub struct SignalsResponse {
    pub symbol: String,
    pub strategy: StrategyKind,
    pub summary: StrategySummary,
    pub points: Vec<SignalPoint>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
