//! Simple Moving Average over a trailing window.

use crate::domain::candle::Candle;

/// Mean of the last `period` closes; `None` when the window is shorter.
pub fn value(history: &[Candle], period: usize) -> Option<f64> {
    if period == 0 || history.len() < period {
        return None;
    }
    let sum: f64 = history[history.len() - period..]
        .iter()
        .map(|c| c.close)
        .sum();
    Some(sum / period as f64)
}
