//! Technical indicators computed over a trailing window.
//!
//! The engine only ever hands an indicator the history slice ending at the
//! current index, so reading future candles is impossible by construction.
//! Which indicators run, with what period and what insufficient-history
//! fallback, is run configuration; nothing here is hardcoded at call sites.

pub mod ema;
pub mod rsi;
pub mod sma;

use std::collections::BTreeMap;
use std::fmt;

use super::candle::{Candle, CandleTable};
use super::error::CandlerunError;

/// Trailing window length (in candles, including the current one) handed to
/// indicator functions when the run configuration does not override it.
pub const DEFAULT_LOOKBACK: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorKind {
    Rsi,
    Sma,
    Ema,
}

impl IndicatorKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "rsi" => Some(IndicatorKind::Rsi),
            "sma" => Some(IndicatorKind::Sma),
            "ema" => Some(IndicatorKind::Ema),
            _ => None,
        }
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorKind::Rsi => write!(f, "rsi"),
            IndicatorKind::Sma => write!(f, "sma"),
            IndicatorKind::Ema => write!(f, "ema"),
        }
    }
}

/// What a snapshot reports when an indicator lacks history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorFallback {
    /// Leave the name out of the snapshot.
    Omit,
    /// Report a fixed neutral value (50.0 for a momentum oscillator).
    Neutral(f64),
    /// Report the current candle's close.
    LastClose,
}

/// One configured indicator: a snapshot name bound to a kind, period and
/// insufficient-history fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSpec {
    pub name: String,
    pub kind: IndicatorKind,
    pub period: usize,
    pub fallback: IndicatorFallback,
}

impl IndicatorSpec {
    /// Parse a config-file spec string: `kind(period)` or
    /// `kind(period, default)`, e.g. `rsi(14)` or `rsi(14, 50.0)`.
    ///
    /// Without an explicit default, RSI falls back to neutral 50 and the
    /// moving averages are omitted from the snapshot.
    pub fn parse(name: &str, spec: &str) -> Result<Self, CandlerunError> {
        let spec = spec.trim();
        let err = |reason: &str| CandlerunError::IndicatorSpec {
            spec: spec.to_string(),
            reason: reason.to_string(),
        };

        let open = spec.find('(').ok_or_else(|| err("expected kind(period)"))?;
        if !spec.ends_with(')') {
            return Err(err("missing closing parenthesis"));
        }

        let kind_str = spec[..open].trim();
        let kind = IndicatorKind::from_name(kind_str)
            .ok_or_else(|| err(&format!("unknown indicator kind '{kind_str}'")))?;

        let args: Vec<&str> = spec[open + 1..spec.len() - 1]
            .split(',')
            .map(str::trim)
            .collect();
        if args.is_empty() || args.len() > 2 {
            return Err(err("expected 1 or 2 arguments"));
        }

        let period: usize = args[0]
            .parse()
            .map_err(|_| err(&format!("invalid period '{}'", args[0])))?;
        if period == 0 {
            return Err(err("period must be at least 1"));
        }

        let fallback = match args.get(1) {
            Some(raw) => {
                let value: f64 = raw
                    .parse()
                    .map_err(|_| err(&format!("invalid default '{raw}'")))?;
                IndicatorFallback::Neutral(value)
            }
            None => match kind {
                IndicatorKind::Rsi => IndicatorFallback::Neutral(50.0),
                IndicatorKind::Sma | IndicatorKind::Ema => IndicatorFallback::Omit,
            },
        };

        Ok(IndicatorSpec {
            name: name.to_string(),
            kind,
            period,
            fallback,
        })
    }

    /// The standard set when no `[indicators]` config is given: RSI(14)
    /// with a neutral 50 fallback and a 20-period SMA that is simply absent
    /// until enough history exists.
    pub fn default_set() -> Vec<IndicatorSpec> {
        vec![
            IndicatorSpec {
                name: "rsi".into(),
                kind: IndicatorKind::Rsi,
                period: 14,
                fallback: IndicatorFallback::Neutral(50.0),
            },
            IndicatorSpec {
                name: "sma_20".into(),
                kind: IndicatorKind::Sma,
                period: 20,
                fallback: IndicatorFallback::Omit,
            },
        ]
    }
}

/// Named indicator values for one candle index. Built fresh per index,
/// never persisted across indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorSnapshot {
    values: BTreeMap<String, f64>,
}

impl IndicatorSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, value: f64) {
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn get_or(&self, name: &str, default: f64) -> f64 {
        self.get(name).unwrap_or(default)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Computes the configured indicator set at a candle index from trailing
/// history only.
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    specs: Vec<IndicatorSpec>,
    lookback: usize,
}

impl IndicatorEngine {
    pub fn new(specs: Vec<IndicatorSpec>, lookback: usize) -> Self {
        IndicatorEngine {
            specs,
            lookback: lookback.max(1),
        }
    }

    /// Snapshot at `index`, computed from at most `lookback` candles ending
    /// at and including `index`. Candles after `index` are never touched.
    pub fn compute(&self, table: &CandleTable, index: usize) -> IndicatorSnapshot {
        let candles = table.candles();
        let end = index + 1;
        let start = end.saturating_sub(self.lookback);
        let history = &candles[start..end];

        let mut snapshot = IndicatorSnapshot::new();
        for spec in &self.specs {
            let value = match spec.kind {
                IndicatorKind::Rsi => rsi::value(history, spec.period),
                IndicatorKind::Sma => sma::value(history, spec.period),
                IndicatorKind::Ema => ema::value(history, spec.period),
            };
            match value {
                Some(v) => snapshot.insert(&spec.name, v),
                None => match spec.fallback {
                    IndicatorFallback::Omit => {}
                    IndicatorFallback::Neutral(d) => snapshot.insert(&spec.name, d),
                    IndicatorFallback::LastClose => {
                        snapshot.insert(&spec.name, candles[index].close)
                    }
                },
            }
        }
        snapshot
    }
}
