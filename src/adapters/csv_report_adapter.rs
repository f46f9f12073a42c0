//! CSV export of the equity curve and trade log.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::error::CandlerunError;
use crate::domain::metrics::Report;

pub struct CsvExportAdapter {
    out_dir: PathBuf,
}

impl CsvExportAdapter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Write `equity_curve.csv` and `trades.csv` into the output directory,
    /// creating it if needed. Returns both paths.
    pub fn export(&self, report: &Report) -> Result<(PathBuf, PathBuf), CandlerunError> {
        fs::create_dir_all(&self.out_dir)?;

        let equity_path = self.out_dir.join("equity_curve.csv");
        self.write_equity(report, &equity_path)?;

        let trades_path = self.out_dir.join("trades.csv");
        self.write_trades(report, &trades_path)?;

        Ok((equity_path, trades_path))
    }

    fn write_equity(&self, report: &Report, path: &Path) -> Result<(), CandlerunError> {
        let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
        writer
            .write_record(["timestamp", "equity"])
            .map_err(csv_error)?;
        for point in &report.equity_curve {
            writer
                .write_record([point.timestamp.to_rfc3339(), point.equity.to_string()])
                .map_err(csv_error)?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_trades(&self, report: &Report, path: &Path) -> Result<(), CandlerunError> {
        let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
        writer
            .write_record([
                "entry_time",
                "exit_time",
                "side",
                "entry_price",
                "exit_price",
                "pnl",
                "pnl_pct",
                "capital_after",
            ])
            .map_err(csv_error)?;
        for trade in &report.trades {
            writer
                .write_record([
                    trade.entry_time.to_rfc3339(),
                    trade.exit_time.to_rfc3339(),
                    trade.side.to_string(),
                    trade.entry_price.to_string(),
                    trade.exit_price.to_string(),
                    trade.pnl.to_string(),
                    trade.pnl_pct.to_string(),
                    trade.capital_after.to_string(),
                ])
                .map_err(csv_error)?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn csv_error(err: csv::Error) -> CandlerunError {
    CandlerunError::Data {
        reason: format!("CSV write error: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ledger::EquityPoint;
    use crate::domain::position::{Side, Trade};
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn sample_report() -> Report {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2024, 1, 1, 1, 0, 0).unwrap();
        Report {
            initial_capital: 10_000.0,
            final_value: 10_500.0,
            total_return_pct: 5.0,
            max_drawdown_pct: 0.0,
            total_trades: 1,
            winning_trades: 1,
            losing_trades: 0,
            win_rate_pct: 100.0,
            avg_win: 500.0,
            avg_loss: 0.0,
            equity_curve: vec![
                EquityPoint {
                    timestamp: t0,
                    equity: 10_000.0,
                },
                EquityPoint {
                    timestamp: t1,
                    equity: 10_500.0,
                },
            ],
            trades: vec![Trade {
                side: Side::Short,
                entry_time: t0,
                entry_price: 100.0,
                exit_time: t1,
                exit_price: 95.0,
                pnl: 500.0,
                pnl_pct: 5.0,
                capital_after: 10_500.0,
            }],
        }
    }

    #[test]
    fn export_writes_both_files() {
        let dir = TempDir::new().unwrap();
        let adapter = CsvExportAdapter::new(dir.path());
        let (equity_path, trades_path) = adapter.export(&sample_report()).unwrap();

        assert!(equity_path.exists());
        assert!(trades_path.exists());
    }

    #[test]
    fn equity_csv_round_trips() {
        let dir = TempDir::new().unwrap();
        let adapter = CsvExportAdapter::new(dir.path());
        let (equity_path, _) = adapter.export(&sample_report()).unwrap();

        let content = fs::read_to_string(equity_path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("timestamp,equity"));
        let first = lines.next().unwrap();
        assert!(first.starts_with("2024-01-01T00:00:00"));
        assert!(first.ends_with("10000"));
        assert_eq!(lines.count(), 1);
    }

    #[test]
    fn trades_csv_carries_side_and_pnl() {
        let dir = TempDir::new().unwrap();
        let adapter = CsvExportAdapter::new(dir.path());
        let (_, trades_path) = adapter.export(&sample_report()).unwrap();

        let content = fs::read_to_string(trades_path).unwrap();
        assert!(content.starts_with(
            "entry_time,exit_time,side,entry_price,exit_price,pnl,pnl_pct,capital_after"
        ));
        assert!(content.contains("SHORT"));
        assert!(content.contains(",95,"));
    }

    #[test]
    fn export_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("out").join("run1");
        let adapter = CsvExportAdapter::new(&nested);
        adapter.export(&sample_report()).unwrap();
        assert!(nested.join("equity_curve.csv").exists());
    }

    #[test]
    fn empty_report_still_writes_headers() {
        let dir = TempDir::new().unwrap();
        let mut report = sample_report();
        report.equity_curve.clear();
        report.trades.clear();

        let adapter = CsvExportAdapter::new(dir.path());
        let (equity_path, trades_path) = adapter.export(&report).unwrap();

        assert_eq!(
            fs::read_to_string(equity_path).unwrap().trim(),
            "timestamp,equity"
        );
        assert!(fs::read_to_string(trades_path)
            .unwrap()
            .starts_with("entry_time,"));
    }
}
