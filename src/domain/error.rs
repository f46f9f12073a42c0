//! Domain error types.

use chrono::{DateTime, Utc};

/// Top-level error type for candlerun.
#[derive(Debug, thiserror::Error)]
pub enum CandlerunError {
    #[error("candle table is empty")]
    EmptyTable,

    #[error("candle timestamps not ascending at row {row} ({timestamp})")]
    OutOfOrder {
        row: usize,
        timestamp: DateTime<Utc>,
    },

    #[error("duplicate candle timestamp at row {row} ({timestamp})")]
    DuplicateTimestamp {
        row: usize,
        timestamp: DateTime<Utc>,
    },

    #[error("invalid {field} at row {row}: {reason}")]
    InvalidField {
        row: usize,
        field: &'static str,
        reason: String,
    },

    #[error("missing column: {name}")]
    MissingColumn { name: String },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("unknown strategy: {name}")]
    UnknownStrategy { name: String },

    #[error("invalid indicator spec '{spec}': {reason}")]
    IndicatorSpec { spec: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&CandlerunError> for std::process::ExitCode {
    fn from(err: &CandlerunError) -> Self {
        let code: u8 = match err {
            CandlerunError::Io(_) => 1,
            CandlerunError::ConfigParse { .. }
            | CandlerunError::ConfigMissing { .. }
            | CandlerunError::ConfigInvalid { .. } => 2,
            CandlerunError::Data { .. } | CandlerunError::MissingColumn { .. } => 3,
            CandlerunError::UnknownStrategy { .. } | CandlerunError::IndicatorSpec { .. } => 4,
            CandlerunError::EmptyTable
            | CandlerunError::OutOfOrder { .. }
            | CandlerunError::DuplicateTimestamp { .. }
            | CandlerunError::InvalidField { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
