// In crates/backtester/src/trace.rs

use core_types::{PriceSeries, SignalPoint};
use std::io::Write;
use strategies::SignalPair;

/// Zips prices with their buy/sell flags for the chart collaborator.
pub fn build_trace(series: &PriceSeries, signals: &SignalPair) -> Vec<SignalPoint> {
    series
        .points()
        .iter()
        .zip(signals.buy.iter().zip(&signals.sell))
        .map(|(point, (&buy_signal, &sell_signal))| SignalPoint {
            date: point.date,
            close: point.close,
            buy_signal,
            sell_signal,
        })
        .collect()
}

/// Writes the trace as CSV with a `date,close,buy_signal,sell_signal` header.
pub fn write_trace_csv<W: Write>(trace: &[SignalPoint], writer: W) -> csv::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for point in trace {
        csv_writer.serialize(point)?;
    }
    csv_writer.flush()?;
    Ok(())
}
