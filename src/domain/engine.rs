//! Per-candle execution loop.
//!
//! For each candle, strictly in order: build the indicator snapshot from
//! history up to and including the index, ask the strategy for a signal,
//! apply it to the ledger, then sample mark-to-market equity. One candle is
//! fully processed before the next begins; this ordering carries the
//! no-lookahead guarantee and makes runs reproducible.

use super::candle::CandleTable;
use super::indicator::IndicatorEngine;
use super::ledger::Ledger;
use super::strategy::Strategy;

pub fn run(
    table: &CandleTable,
    strategy: &mut dyn Strategy,
    indicators: &IndicatorEngine,
    ledger: &mut Ledger,
) {
    for (index, candle) in table.candles().iter().enumerate() {
        let snapshot = indicators.compute(table, index);
        let signal = strategy.decide(candle, &snapshot);
        ledger.apply_signal(signal, candle);
        let equity = ledger.mark_to_market(candle.close);
        ledger.record_equity(candle.timestamp, equity);
    }
}
