// In crates/api-client/src/csv_source.rs

use crate::{Error, PriceSource, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use core_types::{PricePoint, PriceSeries};
use std::path::PathBuf;

/// Reads daily closes from a CSV file with `Date` and `Close` columns, such
/// as a Yahoo Finance export. Other columns are ignored.
#[derive(Debug, Clone)]
pub struct CsvPriceSource {
    path: PathBuf,
}

impl CsvPriceSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PriceSource for CsvPriceSource {
    fn name(&self) -> &'static str {
        "csv"
    }

    async fn daily_closes(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<PriceSeries> {
        tracing::info!(symbol, path = %self.path.display(), "Loading price history from CSV.");
        let content = tokio::fs::read_to_string(&self.path).await?;

        let points = parse_csv(&content, start, end)?;
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

/// Parses `Date`/`Close` rows (case-insensitive headers) within `[start, end)`.
pub fn parse_csv(content: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<PricePoint>> {
    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let headers = reader.headers()?.clone();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::MalformedData(format!("missing '{name}' column")))
    };
    let date_col = column("date")?;
    let close_col = column("close")?;

    let mut points = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let raw_date = record.get(date_col).unwrap_or_default().trim();
        let raw_close = record.get(close_col).unwrap_or_default().trim();

        // Accept "2023-01-03" as well as "2023-01-03 00:00:00-05:00".
        let date = raw_date
            .get(..10)
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .ok_or_else(|| Error::MalformedData(format!("row {}: bad date '{raw_date}'", line + 1)))?;
        if date < start || date >= end {
            continue;
        }
        // Blank or "null" closes mark missing bars.
        if raw_close.is_empty() || raw_close.eq_ignore_ascii_case("null") {
            continue;
        }
        let close: f64 = raw_close
            .parse()
            .map_err(|_| Error::MalformedData(format!("row {}: bad close '{raw_close}'", line + 1)))?;

        points.push(PricePoint::new(date, close));
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    const EXPORT: &str = "\
Date,Open,High,Low,Close,Adj Close,Volume
2022-12-30,128.41,129.95,127.43,129.93,129.2,77034200
2023-01-03,130.28,130.90,124.17,125.07,124.2,112117500
2023-01-04,126.89,128.66,125.08,126.36,125.5,89113600
2023-01-05,127.13,127.77,124.76,,,80962700
2023-01-06,126.01,130.29,124.89,129.62,128.7,87754700
";

    #[test]
    fn filters_range_and_skips_blank_closes() {
        let points = parse_csv(EXPORT, d(2023, 1, 1), d(2023, 1, 6)).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0], PricePoint::new(d(2023, 1, 3), 125.07));
        assert_eq!(points[1], PricePoint::new(d(2023, 1, 4), 126.36));
    }

    #[test]
    fn headers_are_case_insensitive_and_timestamps_accepted() {
        let content = "date,close\n2023-02-01 00:00:00-05:00,10.5\n2023-02-02 00:00:00-05:00,11\n";
        let points = parse_csv(content, d(2023, 1, 1), d(2024, 1, 1)).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].close, 11.0);
    }

    #[test]
    fn missing_column_is_reported() {
        let err = parse_csv("Date,Open\n2023-01-03,1\n", d(2023, 1, 1), d(2024, 1, 1)).unwrap_err();
        assert!(matches!(err, Error::MalformedData(msg) if msg.contains("close")));
    }

    #[test]
    fn bad_close_is_reported() {
        let err = parse_csv("Date,Close\n2023-01-03,abc\n", d(2023, 1, 1), d(2024, 1, 1)).unwrap_err();
        assert!(matches!(err, Error::MalformedData(_)));
    }

    #[tokio::test]
    async fn loads_series_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(EXPORT.as_bytes()).unwrap();

        let source = CsvPriceSource::new(file.path());
        let series = source.daily_closes("AAPL", d(2023, 1, 1), d(2024, 1, 1)).await.unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.last().close, 129.62);
    }

    #[tokio::test]
    async fn empty_range_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(EXPORT.as_bytes()).unwrap();

        let source = CsvPriceSource::new(file.path());
        let err = source.daily_closes("AAPL", d(2020, 1, 1), d(2020, 2, 1)).await.unwrap_err();
        assert!(matches!(err, Error::EmptyHistory { .. }));
    }
}
