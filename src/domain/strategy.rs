//! Strategy capability contract.

use super::candle::Candle;
use super::indicator::IndicatorSnapshot;

/// Per-candle decision output, consumed by the position state machine.
///
/// "No action" is expressed as `None` at the `decide` call site; the enum
/// itself only carries real actions, so an out-of-contract signal value
/// cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Buy,
    Sell,
    Close,
}

/// A trading strategy: one decision operation over the current candle and
/// its indicator snapshot.
///
/// Implementations may hold internal state across calls (entry-price shadow
/// for stop logic, previous indicator values) and own their configuration,
/// but only ever see the candle passed in, never anything ahead of it.
pub trait Strategy: std::fmt::Debug {
    fn name(&self) -> &str;

    fn decide(&mut self, candle: &Candle, indicators: &IndicatorSnapshot) -> Option<Signal>;
}
