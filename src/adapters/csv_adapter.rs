//! CSV file data adapter.
//!
//! Loads `timestamp,open,high,low,close,volume` files as produced by the
//! candle collector (headers matched case-insensitively, `date` accepted
//! for the time column) and lists the `.csv` files visible in the
//! configured data directories.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use std::fs;
use std::path::PathBuf;

use crate::domain::candle::{Candle, CandleTable};
use crate::domain::error::CandlerunError;
use crate::ports::data_port::{DataPort, DataSourceInfo};

/// Directories scanned for data files when none are given explicitly.
pub const DEFAULT_DATA_DIRS: [&str; 2] = ["data", "."];

pub struct CsvDataAdapter {
    search_dirs: Vec<PathBuf>,
}

impl CsvDataAdapter {
    pub fn new(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }

    pub fn with_default_dirs() -> Self {
        Self::new(DEFAULT_DATA_DIRS.iter().map(PathBuf::from).collect())
    }

    /// Accepted timestamp forms, normalized to UTC: RFC 3339, the
    /// `YYYY-MM-DD HH:MM:SS+00:00` form tabular writers emit, the same
    /// without an offset (taken as UTC), and a bare date at midnight.
    fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%:z") {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
            return Some(naive.and_utc());
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date.and_time(NaiveTime::MIN).and_utc());
        }
        None
    }
}

fn column(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| names.contains(&h.trim().to_lowercase().as_str()))
}

fn field(
    record: &csv::StringRecord,
    index: usize,
    row: usize,
    name: &'static str,
) -> Result<f64, CandlerunError> {
    let raw = record.get(index).ok_or(CandlerunError::InvalidField {
        row,
        field: name,
        reason: "missing value".into(),
    })?;
    raw.trim()
        .parse()
        .map_err(|e| CandlerunError::InvalidField {
            row,
            field: name,
            reason: format!("'{raw}': {e}"),
        })
}

impl DataPort for CsvDataAdapter {
    fn load(&self, source: &str) -> Result<CandleTable, CandlerunError> {
        let mut reader = csv::Reader::from_path(source).map_err(|e| CandlerunError::Data {
            reason: format!("failed to open {source}: {e}"),
        })?;

        let headers = reader
            .headers()
            .map_err(|e| CandlerunError::Data {
                reason: format!("failed to read headers of {source}: {e}"),
            })?
            .clone();

        let ts_col = column(&headers, &["timestamp", "date"])
            .ok_or_else(|| CandlerunError::MissingColumn {
                name: "timestamp".into(),
            })?;
        let mut price_cols = [0usize; 5];
        for (i, name) in ["open", "high", "low", "close", "volume"].into_iter().enumerate() {
            price_cols[i] = column(&headers, &[name]).ok_or_else(|| {
                CandlerunError::MissingColumn {
                    name: name.to_string(),
                }
            })?;
        }

        let mut candles = Vec::new();
        for (row, result) in reader.records().enumerate() {
            let record = result.map_err(|e| CandlerunError::Data {
                reason: format!("CSV parse error in {source} at row {row}: {e}"),
            })?;

            let raw_ts = record.get(ts_col).unwrap_or_default();
            let timestamp =
                Self::parse_timestamp(raw_ts.trim()).ok_or(CandlerunError::InvalidField {
                    row,
                    field: "timestamp",
                    reason: format!("unrecognized timestamp '{raw_ts}'"),
                })?;

            candles.push(Candle {
                timestamp,
                open: field(&record, price_cols[0], row, "open")?,
                high: field(&record, price_cols[1], row, "high")?,
                low: field(&record, price_cols[2], row, "low")?,
                close: field(&record, price_cols[3], row, "close")?,
                volume: field(&record, price_cols[4], row, "volume")?,
            });
        }

        CandleTable::new(candles)
    }

    fn list_sources(&self) -> Result<Vec<DataSourceInfo>, CandlerunError> {
        let mut sources = Vec::new();

        for dir in &self.search_dirs {
            let Ok(entries) = fs::read_dir(dir) else {
                continue;
            };
            for entry in entries {
                let entry = entry.map_err(|e| CandlerunError::Data {
                    reason: format!("directory entry error in {}: {}", dir.display(), e),
                })?;
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "csv") {
                    let size_bytes = entry
                        .metadata()
                        .map(|m| m.len())
                        .unwrap_or_default();
                    sources.push(DataSourceInfo { path, size_bytes });
                }
            }
        }

        sources.sort_by(|a, b| a.path.cmp(&b.path));
        sources.dedup_by(|a, b| a.path == b.path);
        Ok(sources)
    }
}
