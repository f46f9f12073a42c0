#![allow(dead_code)]

use candlerun::domain::candle::{Candle, CandleTable};
use candlerun::domain::indicator::IndicatorSnapshot;
use candlerun::domain::strategy::{Signal, Strategy};
use chrono::{DateTime, TimeZone, Utc};

pub fn ts(i: usize) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::hours(i as i64)
}

pub fn make_candle(i: usize, close: f64) -> Candle {
    Candle {
        timestamp: ts(i),
        open: close,
        high: close + 1.0,
        low: (close - 1.0).max(0.0),
        close,
        volume: 1000.0,
    }
}

pub fn make_table(closes: &[f64]) -> CandleTable {
    let candles = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| make_candle(i, close))
        .collect();
    CandleTable::new(candles).unwrap()
}

/// CSV file body for the given closes, in the collector's column layout.
pub fn csv_from_closes(closes: &[f64]) -> String {
    let mut out = String::from("timestamp,open,high,low,close,volume\n");
    for (i, close) in closes.iter().enumerate() {
        out.push_str(&format!(
            "{},{},{},{},{},1000.0\n",
            ts(i).format("%Y-%m-%d %H:%M:%S+00:00"),
            close,
            close + 1.0,
            (close - 1.0).max(0.0),
            close,
        ));
    }
    out
}

/// Never trades.
#[derive(Debug)]
pub struct FlatStrategy;

impl Strategy for FlatStrategy {
    fn name(&self) -> &str {
        "flat"
    }

    fn decide(&mut self, _candle: &Candle, _indicators: &IndicatorSnapshot) -> Option<Signal> {
        None
    }
}

/// Emits a fixed signal per candle, in order.
#[derive(Debug)]
pub struct ScriptedStrategy {
    signals: Vec<Option<Signal>>,
    next: usize,
}

impl ScriptedStrategy {
    pub fn new(signals: Vec<Option<Signal>>) -> Self {
        Self { signals, next: 0 }
    }
}

impl Strategy for ScriptedStrategy {
    fn name(&self) -> &str {
        "scripted"
    }

    fn decide(&mut self, _candle: &Candle, _indicators: &IndicatorSnapshot) -> Option<Signal> {
        let signal = self.signals.get(self.next).copied().flatten();
        self.next += 1;
        signal
    }
}
