//! Backtest orchestration: wires table, indicators, strategy and ledger
//! into one sequential run and returns the report.

use super::candle::CandleTable;
use super::engine;
use super::indicator::{IndicatorEngine, IndicatorSpec, DEFAULT_LOOKBACK};
use super::ledger::Ledger;
use super::metrics::Report;
use super::strategy::Strategy;

#[derive(Debug, Clone)]
pub struct BacktestConfig {
    pub initial_capital: f64,
    pub lookback: usize,
    pub indicators: Vec<IndicatorSpec>,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        BacktestConfig {
            initial_capital: 10_000.0,
            lookback: DEFAULT_LOOKBACK,
            indicators: IndicatorSpec::default_set(),
        }
    }
}

/// Run one backtest over a validated table.
///
/// The ledger lives and dies inside this call, so concurrent runs (strategy
/// comparisons) share nothing. A position still open when the table ends is
/// left open: it is reflected in the final equity point at the last close
/// but produces no completed trade.
pub fn run_backtest(
    table: &CandleTable,
    strategy: &mut dyn Strategy,
    config: &BacktestConfig,
) -> Report {
    let indicators = IndicatorEngine::new(config.indicators.clone(), config.lookback);
    let mut ledger = Ledger::new(config.initial_capital);
    engine::run(table, strategy, &indicators, &mut ledger);
    Report::from_ledger(&ledger)
}
