//! Close-versus-SMA crossover, long only.
//!
//! Opens when the close rises above the configured moving average, closes
//! when it falls back below. Does nothing until the average exists in the
//! snapshot, so the warmup span never trades.

use crate::domain::candle::Candle;
use crate::domain::indicator::IndicatorSnapshot;
use crate::domain::strategy::{Signal, Strategy};
use crate::ports::config_port::ConfigPort;

#[derive(Debug, Clone)]
pub struct SmaCross {
    indicator: String,
    open: bool,
}

impl SmaCross {
    pub fn new(indicator: impl Into<String>) -> Self {
        SmaCross {
            indicator: indicator.into(),
            open: false,
        }
    }

    pub fn from_config(config: &dyn ConfigPort) -> Self {
        let indicator = config
            .get_string("strategy", "indicator")
            .unwrap_or_else(|| "sma_20".to_string());
        SmaCross::new(indicator)
    }
}

impl Strategy for SmaCross {
    fn name(&self) -> &str {
        "sma-cross"
    }

    fn decide(&mut self, candle: &Candle, indicators: &IndicatorSnapshot) -> Option<Signal> {
        let sma = indicators.get(&self.indicator)?;

        if !self.open && candle.close > sma {
            self.open = true;
            Some(Signal::Buy)
        } else if self.open && candle.close < sma {
            self.open = false;
            Some(Signal::Close)
        } else {
            None
        }
    }
}
