//! OHLCV candle representation and the validated candle table.

use chrono::{DateTime, Utc};

use super::error::CandlerunError;

/// One OHLCV sample for a fixed time interval. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    fn check_fields(&self, row: usize) -> Result<(), CandlerunError> {
        let fields: [(&'static str, f64); 5] = [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
            ("volume", self.volume),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(CandlerunError::InvalidField {
                    row,
                    field,
                    reason: format!("non-finite value {value}"),
                });
            }
            if value < 0.0 {
                return Err(CandlerunError::InvalidField {
                    row,
                    field,
                    reason: format!("negative value {value}"),
                });
            }
        }
        Ok(())
    }
}

/// Time-ordered candle sequence with strictly increasing, unique timestamps.
///
/// Construction is the single validation point: a table that exists is safe
/// to replay. Read-only for the duration of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct CandleTable {
    candles: Vec<Candle>,
}

impl CandleTable {
    pub fn new(candles: Vec<Candle>) -> Result<Self, CandlerunError> {
        if candles.is_empty() {
            return Err(CandlerunError::EmptyTable);
        }

        for (row, candle) in candles.iter().enumerate() {
            candle.check_fields(row)?;
            if row > 0 {
                let prev = candles[row - 1].timestamp;
                if candle.timestamp == prev {
                    return Err(CandlerunError::DuplicateTimestamp {
                        row,
                        timestamp: candle.timestamp,
                    });
                }
                if candle.timestamp < prev {
                    return Err(CandlerunError::OutOfOrder {
                        row,
                        timestamp: candle.timestamp,
                    });
                }
            }
        }

        Ok(CandleTable { candles })
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn first(&self) -> &Candle {
        &self.candles[0]
    }

    pub fn last(&self) -> &Candle {
        &self.candles[self.candles.len() - 1]
    }
}
