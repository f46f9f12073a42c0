//! Run ledger: capital, the open position, trade log and equity curve.

use chrono::{DateTime, Utc};

use super::candle::Candle;
use super::position::{OpenPosition, Side, Trade};
use super::strategy::Signal;

#[derive(Debug, Clone, PartialEq)]
pub struct EquityPoint {
    pub timestamp: DateTime<Utc>,
    pub equity: f64,
}

/// Mutable state of one backtest run, owned exclusively by that run.
///
/// `position == None` is FLAT; the `Option` is what makes "at most one open
/// position" structural rather than a convention. Created at run start,
/// mutated once per candle, read-only once the loop ends.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    pub initial_capital: f64,
    pub capital: f64,
    pub position: Option<OpenPosition>,
    pub trades: Vec<Trade>,
    pub equity_curve: Vec<EquityPoint>,
}

impl Ledger {
    pub fn new(initial_capital: f64) -> Self {
        Ledger {
            initial_capital,
            capital: initial_capital,
            position: None,
            trades: Vec::new(),
            equity_curve: Vec::new(),
        }
    }

    /// Apply one strategy signal at the given candle.
    ///
    /// Transitions:
    /// - flat + buy/sell opens a position at the candle close;
    /// - open + close realizes the trade at the candle close;
    /// - open + buy/sell is ignored (no pyramiding, no reversal);
    /// - everything else is a no-op.
    pub fn apply_signal(&mut self, signal: Option<Signal>, candle: &Candle) {
        match signal {
            Some(Signal::Buy) if self.position.is_none() => self.open(Side::Long, candle),
            Some(Signal::Sell) if self.position.is_none() => self.open(Side::Short, candle),
            Some(Signal::Close) if self.position.is_some() => self.close(candle),
            _ => {}
        }
    }

    fn open(&mut self, side: Side, candle: &Candle) {
        self.position = Some(OpenPosition {
            side,
            entry_price: candle.close,
            entry_time: candle.timestamp,
        });
    }

    fn close(&mut self, candle: &Candle) {
        let Some(position) = self.position.take() else {
            return;
        };

        let fraction = position.side.signed_return(position.entry_price, candle.close);
        let pnl = self.capital * fraction;
        self.capital += pnl;

        self.trades.push(Trade {
            side: position.side,
            entry_time: position.entry_time,
            entry_price: position.entry_price,
            exit_time: candle.timestamp,
            exit_price: candle.close,
            pnl,
            pnl_pct: fraction * 100.0,
            capital_after: self.capital,
        });
    }

    /// Current equity at the given price: capital when flat, capital scaled
    /// by the unrealized return of the open position otherwise.
    pub fn mark_to_market(&self, price: f64) -> f64 {
        match &self.position {
            None => self.capital,
            Some(position) => self.capital * (1.0 + position.unrealized_return(price)),
        }
    }

    pub fn record_equity(&mut self, timestamp: DateTime<Utc>, equity: f64) {
        self.equity_curve.push(EquityPoint { timestamp, equity });
    }

    pub fn is_flat(&self) -> bool {
        self.position.is_none()
    }
}
