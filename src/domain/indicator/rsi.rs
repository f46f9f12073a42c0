//! Relative Strength Index over a trailing window.
//!
//! Wilder's smoothing: the first average gain/loss is a simple mean over the
//! first `period` price changes of the window, then
//! `avg = (prev_avg * (n-1) + current) / n` for the remainder.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss); if avg_loss == 0, RSI = 100.
//!
//! Needs `period + 1` candles (`period` price changes); returns `None` below
//! that so the caller's fallback policy applies.

use crate::domain::candle::Candle;

pub fn value(history: &[Candle], period: usize) -> Option<f64> {
    if period == 0 || history.len() < period + 1 {
        return None;
    }

    let changes: Vec<f64> = history
        .windows(2)
        .map(|w| w[1].close - w[0].close)
        .collect();

    let mut avg_gain = changes[..period]
        .iter()
        .map(|&c| if c > 0.0 { c } else { 0.0 })
        .sum::<f64>()
        / period as f64;
    let mut avg_loss = changes[..period]
        .iter()
        .map(|&c| if c < 0.0 { -c } else { 0.0 })
        .sum::<f64>()
        / period as f64;

    for &change in &changes[period..] {
        let gain = if change > 0.0 { change } else { 0.0 };
        let loss = if change < 0.0 { -change } else { 0.0 };
        avg_gain = (avg_gain * (period - 1) as f64 + gain) / period as f64;
        avg_loss = (avg_loss * (period - 1) as f64 + loss) / period as f64;
    }

    if avg_loss == 0.0 {
        Some(100.0)
    } else {
        Some(100.0 - 100.0 / (1.0 + avg_gain / avg_loss))
    }
}
