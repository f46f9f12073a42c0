//! Performance report computed from a finalized ledger.

use super::ledger::{EquityPoint, Ledger};
use super::position::Trade;

/// Aggregate result of one backtest run. Immutable value object; the
/// equity curve and trade log ride along for presentation and export.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub initial_capital: f64,
    pub final_value: f64,
    pub total_return_pct: f64,
    pub max_drawdown_pct: f64,
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub win_rate_pct: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
    pub equity_curve: Vec<EquityPoint>,
    pub trades: Vec<Trade>,
}

impl Report {
    /// Pure function of the finalized ledger. Every ratio defines 0 under
    /// an empty denominator; nothing here can divide-fault.
    pub fn from_ledger(ledger: &Ledger) -> Self {
        let initial_capital = ledger.initial_capital;
        let final_value = ledger
            .equity_curve
            .last()
            .map(|p| p.equity)
            .unwrap_or(initial_capital);

        let total_return_pct = if initial_capital > 0.0 {
            (final_value - initial_capital) / initial_capital * 100.0
        } else {
            0.0
        };

        let max_drawdown_pct = max_drawdown_pct(&ledger.equity_curve);

        let winners: Vec<&Trade> = ledger.trades.iter().filter(|t| t.pnl > 0.0).collect();
        let losers: Vec<&Trade> = ledger.trades.iter().filter(|t| t.pnl < 0.0).collect();
        let total_trades = ledger.trades.len();

        let win_rate_pct = if total_trades > 0 {
            winners.len() as f64 / total_trades as f64 * 100.0
        } else {
            0.0
        };

        let avg_win = if winners.is_empty() {
            0.0
        } else {
            winners.iter().map(|t| t.pnl).sum::<f64>() / winners.len() as f64
        };

        // mean pnl of the losers, so a negative number when any exist
        let avg_loss = if losers.is_empty() {
            0.0
        } else {
            losers.iter().map(|t| t.pnl).sum::<f64>() / losers.len() as f64
        };

        Report {
            initial_capital,
            final_value,
            total_return_pct,
            max_drawdown_pct,
            total_trades,
            winning_trades: winners.len(),
            losing_trades: losers.len(),
            win_rate_pct,
            avg_win,
            avg_loss,
            equity_curve: ledger.equity_curve.clone(),
            trades: ledger.trades.clone(),
        }
    }
}

/// Largest decline from a running peak, as a positive percentage.
fn max_drawdown_pct(equity_curve: &[EquityPoint]) -> f64 {
    let mut peak = f64::MIN;
    let mut max_dd = 0.0_f64;

    for point in equity_curve {
        if point.equity > peak {
            peak = point.equity;
        } else if peak > 0.0 {
            let dd = (peak - point.equity) / peak * 100.0;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }

    max_dd
}
