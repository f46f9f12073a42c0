//! Configuration validation.
//!
//! Validates config fields up front so a run never starts on bad numbers.

use crate::domain::error::CandlerunError;
use crate::ports::config_port::ConfigPort;

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), CandlerunError> {
    validate_initial_capital(config)?;
    validate_lookback(config)?;
    Ok(())
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), CandlerunError> {
    validate_rsi_thresholds(config)?;
    validate_exit_percents(config)?;
    Ok(())
}

fn validate_initial_capital(config: &dyn ConfigPort) -> Result<(), CandlerunError> {
    let value = config.get_double("backtest", "initial_capital", 10_000.0);
    if value <= 0.0 {
        return Err(CandlerunError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "initial_capital".to_string(),
            reason: "initial_capital must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_lookback(config: &dyn ConfigPort) -> Result<(), CandlerunError> {
    let value = config.get_int("backtest", "lookback", 50);
    if value < 1 {
        return Err(CandlerunError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "lookback".to_string(),
            reason: "lookback must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_rsi_thresholds(config: &dyn ConfigPort) -> Result<(), CandlerunError> {
    for key in ["buy_above", "sell_below"] {
        let value = config.get_double("strategy", key, 50.0);
        if !(0.0..=100.0).contains(&value) {
            return Err(CandlerunError::ConfigInvalid {
                section: "strategy".to_string(),
                key: key.to_string(),
                reason: format!("{key} must be between 0 and 100"),
            });
        }
    }
    Ok(())
}

fn validate_exit_percents(config: &dyn ConfigPort) -> Result<(), CandlerunError> {
    for key in ["take_profit_pct", "stop_loss_pct"] {
        let value = config.get_double("strategy", key, 0.0);
        if value < 0.0 {
            return Err(CandlerunError::ConfigInvalid {
                section: "strategy".to_string(),
                key: key.to_string(),
                reason: format!("{key} must be non-negative"),
            });
        }
    }
    Ok(())
}
