//! Built-in strategies and the name registry the CLI consumes.

pub mod rsi_reversal;
pub mod sma_cross;

use super::error::CandlerunError;
use super::strategy::Strategy;
use crate::ports::config_port::ConfigPort;

use rsi_reversal::RsiReversal;
use sma_cross::SmaCross;

/// Registered strategy names, in listing order.
pub fn available() -> &'static [&'static str] {
    &["rsi-reversal", "sma-cross"]
}

/// Construct a strategy by name, with parameters drawn from the
/// `[strategy]` config section (defaults apply for missing keys).
pub fn build(
    name: &str,
    config: &dyn ConfigPort,
) -> Result<Box<dyn Strategy>, CandlerunError> {
    match name {
        "rsi-reversal" => Ok(Box::new(RsiReversal::from_config(config))),
        "sma-cross" => Ok(Box::new(SmaCross::from_config(config))),
        _ => Err(CandlerunError::UnknownStrategy {
            name: name.to_string(),
        }),
    }
}
