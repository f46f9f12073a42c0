//! Position side, open-position state and completed trades.

use chrono::{DateTime, Utc};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Long,
    Short,
}

impl Side {
    /// Fractional return of a move from `entry_price` to `exit_price`,
    /// signed so a favorable move is positive for either side.
    ///
    /// A zero entry price yields 0 rather than a division fault.
    pub fn signed_return(&self, entry_price: f64, exit_price: f64) -> f64 {
        if entry_price == 0.0 {
            return 0.0;
        }
        match self {
            Side::Long => (exit_price - entry_price) / entry_price,
            Side::Short => (entry_price - exit_price) / entry_price,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Long => write!(f, "LONG"),
            Side::Short => write!(f, "SHORT"),
        }
    }
}

/// The single position a ledger may hold. Pending until closed.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenPosition {
    pub side: Side,
    pub entry_price: f64,
    pub entry_time: DateTime<Utc>,
}

impl OpenPosition {
    pub fn unrealized_return(&self, price: f64) -> f64 {
        self.side.signed_return(self.entry_price, price)
    }
}

/// A completed round trip. Created on close, immutable once recorded.
///
/// `pnl_pct` is expressed in percent (a 10% favorable move is `10.0`);
/// `pnl` is the currency amount realized against the capital at risk.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub side: Side,
    pub entry_time: DateTime<Utc>,
    pub entry_price: f64,
    pub exit_time: DateTime<Utc>,
    pub exit_price: f64,
    pub pnl: f64,
    pub pnl_pct: f64,
    pub capital_after: f64,
}
