//! Plain-text report adapter: the fixed-width results table the CLI prints.

use std::io::Write;

use crate::domain::error::CandlerunError;
use crate::domain::metrics::Report;
use crate::ports::report_port::ReportPort;

const RULE: &str = "==================================================";

pub struct TextReportAdapter {
    pub show_trades: bool,
    pub max_trades: usize,
}

impl TextReportAdapter {
    pub fn new(show_trades: bool, max_trades: usize) -> Self {
        Self {
            show_trades,
            max_trades,
        }
    }
}

impl ReportPort for TextReportAdapter {
    fn write(
        &self,
        report: &Report,
        strategy_name: &str,
        out: &mut dyn Write,
    ) -> Result<(), CandlerunError> {
        writeln!(out, "{RULE}")?;
        writeln!(out, "BACKTEST RESULTS")?;
        writeln!(out, "{RULE}")?;
        writeln!(out, "Strategy:         {strategy_name}")?;
        writeln!(out, "Initial Capital:  ${:.2}", report.initial_capital)?;
        writeln!(out, "Final Value:      ${:.2}", report.final_value)?;
        writeln!(out, "Total Return:     {:.2}%", report.total_return_pct)?;
        writeln!(out, "Max Drawdown:     {:.2}%", report.max_drawdown_pct)?;
        writeln!(out, "Total Trades:     {}", report.total_trades)?;
        writeln!(out, "Winning Trades:   {}", report.winning_trades)?;
        writeln!(out, "Losing Trades:    {}", report.losing_trades)?;
        writeln!(out, "Win Rate:         {:.2}%", report.win_rate_pct)?;
        writeln!(out, "Average Win:      ${:.2}", report.avg_win)?;
        writeln!(out, "Average Loss:     ${:.2}", report.avg_loss)?;
        writeln!(out, "{RULE}")?;

        if self.show_trades && !report.trades.is_empty() {
            let shown = report.trades.len().min(self.max_trades);
            writeln!(out)?;
            writeln!(out, "Trades (showing {} of {}):", shown, report.trades.len())?;
            for trade in report.trades.iter().take(self.max_trades) {
                writeln!(
                    out,
                    "  {:<5} {} -> {}  {:.2} -> {:.2}  pnl {:+.2} ({:+.2}%)",
                    trade.side.to_string(),
                    trade.entry_time.format("%Y-%m-%d %H:%M"),
                    trade.exit_time.format("%Y-%m-%d %H:%M"),
                    trade.entry_price,
                    trade.exit_price,
                    trade.pnl,
                    trade.pnl_pct,
                )?;
            }
        }

        Ok(())
    }
}
