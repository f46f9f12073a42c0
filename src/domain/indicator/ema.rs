//! Exponential Moving Average over a trailing window.
//!
//! k = 2/(n+1), seeded with the SMA of the window's first n closes, then
//! EMA = close*k + prev*(1-k) across the rest of the window.

use crate::domain::candle::Candle;

pub fn value(history: &[Candle], period: usize) -> Option<f64> {
    if period == 0 || history.len() < period {
        return None;
    }

    let k = 2.0 / (period as f64 + 1.0);
    let seed: f64 = history[..period].iter().map(|c| c.close).sum::<f64>() / period as f64;

    let ema = history[period..]
        .iter()
        .fold(seed, |prev, c| c.close * k + prev * (1.0 - k));
    Some(ema)
}
