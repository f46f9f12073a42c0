//! RSI reversal strategy with percentage take-profit and stop-loss.
//!
//! Goes long when RSI crosses above `buy_above`, short when RSI drops below
//! `sell_below`, and closes the open position once the move from entry
//! reaches `take_profit_pct` or `-stop_loss_pct`. Tracks its own entry
//! price across calls: entries it emits while flat are always honored, so
//! the shadow never diverges from the ledger.

use crate::domain::candle::Candle;
use crate::domain::indicator::IndicatorSnapshot;
use crate::domain::position::Side;
use crate::domain::strategy::{Signal, Strategy};
use crate::ports::config_port::ConfigPort;

const NEUTRAL_RSI: f64 = 50.0;

#[derive(Debug, Clone)]
pub struct RsiReversal {
    buy_above: f64,
    sell_below: f64,
    take_profit_pct: f64,
    stop_loss_pct: f64,
    open: Option<(Side, f64)>,
}

impl RsiReversal {
    pub fn new(
        buy_above: f64,
        sell_below: f64,
        take_profit_pct: f64,
        stop_loss_pct: f64,
    ) -> Self {
        RsiReversal {
            buy_above,
            sell_below,
            take_profit_pct,
            stop_loss_pct,
            open: None,
        }
    }

    pub fn from_config(config: &dyn ConfigPort) -> Self {
        RsiReversal::new(
            config.get_double("strategy", "buy_above", 80.0),
            config.get_double("strategy", "sell_below", 20.0),
            config.get_double("strategy", "take_profit_pct", 0.7),
            config.get_double("strategy", "stop_loss_pct", 0.3),
        )
    }
}

impl Strategy for RsiReversal {
    fn name(&self) -> &str {
        "rsi-reversal"
    }

    fn decide(&mut self, candle: &Candle, indicators: &IndicatorSnapshot) -> Option<Signal> {
        if let Some((side, entry_price)) = self.open {
            let move_pct = side.signed_return(entry_price, candle.close) * 100.0;
            if move_pct >= self.take_profit_pct || move_pct <= -self.stop_loss_pct {
                self.open = None;
                return Some(Signal::Close);
            }
            return None;
        }

        let rsi = indicators.get_or("rsi", NEUTRAL_RSI);
        if rsi > self.buy_above {
            self.open = Some((Side::Long, candle.close));
            Some(Signal::Buy)
        } else if rsi < self.sell_below {
            self.open = Some((Side::Short, candle.close));
            Some(Signal::Sell)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn candle(close: f64) -> Candle {
        Candle {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1000.0,
        }
    }

    fn snapshot(rsi: f64) -> IndicatorSnapshot {
        let mut s = IndicatorSnapshot::new();
        s.insert("rsi", rsi);
        s
    }

    fn strategy() -> RsiReversal {
        RsiReversal::new(80.0, 20.0, 0.7, 0.3)
    }

    #[test]
    fn buys_when_rsi_above_threshold() {
        let mut s = strategy();
        assert_eq!(s.decide(&candle(100.0), &snapshot(85.0)), Some(Signal::Buy));
    }

    #[test]
    fn sells_when_rsi_below_threshold() {
        let mut s = strategy();
        assert_eq!(s.decide(&candle(100.0), &snapshot(15.0)), Some(Signal::Sell));
    }

    #[test]
    fn holds_in_neutral_band() {
        let mut s = strategy();
        assert_eq!(s.decide(&candle(100.0), &snapshot(50.0)), None);
        assert_eq!(s.decide(&candle(100.0), &snapshot(80.0)), None, "threshold itself is not a cross");
        assert_eq!(s.decide(&candle(100.0), &snapshot(20.0)), None);
    }

    #[test]
    fn missing_rsi_defaults_to_neutral() {
        let mut s = strategy();
        assert_eq!(s.decide(&candle(100.0), &IndicatorSnapshot::new()), None);
    }

    #[test]
    fn take_profit_closes_long() {
        let mut s = strategy();
        s.decide(&candle(100.0), &snapshot(85.0));
        // +0.7% hit exactly
        assert_eq!(s.decide(&candle(100.7), &snapshot(85.0)), Some(Signal::Close));
    }

    #[test]
    fn stop_loss_closes_long() {
        let mut s = strategy();
        s.decide(&candle(100.0), &snapshot(85.0));
        assert_eq!(s.decide(&candle(99.7), &snapshot(85.0)), Some(Signal::Close));
    }

    #[test]
    fn take_profit_closes_short_on_down_move() {
        let mut s = strategy();
        s.decide(&candle(100.0), &snapshot(15.0));
        assert_eq!(s.decide(&candle(99.3), &snapshot(15.0)), Some(Signal::Close));
    }

    #[test]
    fn stop_loss_closes_short_on_up_move() {
        let mut s = strategy();
        s.decide(&candle(100.0), &snapshot(15.0));
        assert_eq!(s.decide(&candle(100.3), &snapshot(15.0)), Some(Signal::Close));
    }

    #[test]
    fn holds_open_position_inside_bands() {
        let mut s = strategy();
        s.decide(&candle(100.0), &snapshot(85.0));
        // within (-0.3%, +0.7%): no exit, and no re-entry despite high RSI
        assert_eq!(s.decide(&candle(100.2), &snapshot(95.0)), None);
        assert_eq!(s.decide(&candle(99.9), &snapshot(95.0)), None);
    }

    #[test]
    fn can_reenter_after_close() {
        let mut s = strategy();
        s.decide(&candle(100.0), &snapshot(85.0));
        assert_eq!(s.decide(&candle(101.0), &snapshot(85.0)), Some(Signal::Close));
        assert_eq!(s.decide(&candle(101.0), &snapshot(85.0)), Some(Signal::Buy));
    }

    #[test]
    fn config_defaults() {
        use crate::adapters::file_config_adapter::FileConfigAdapter;
        let s = RsiReversal::from_config(&FileConfigAdapter::empty());
        assert!((s.buy_above - 80.0).abs() < f64::EPSILON);
        assert!((s.sell_below - 20.0).abs() < f64::EPSILON);
        assert!((s.take_profit_pct - 0.7).abs() < f64::EPSILON);
        assert!((s.stop_loss_pct - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn config_overrides() {
        use crate::adapters::file_config_adapter::FileConfigAdapter;
        let ini = "[strategy]\nbuy_above = 70\nsell_below = 30\ntake_profit_pct = 2.0\nstop_loss_pct = 1.0\n";
        let adapter = FileConfigAdapter::from_string(ini).unwrap();
        let mut s = RsiReversal::from_config(&adapter);
        assert_eq!(s.decide(&candle(100.0), &snapshot(75.0)), Some(Signal::Buy));
    }
}
