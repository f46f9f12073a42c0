//! Report rendering port trait.

use std::io::Write;

use crate::domain::error::CandlerunError;
use crate::domain::metrics::Report;

/// Port for rendering a finished backtest report.
pub trait ReportPort {
    fn write(
        &self,
        report: &Report,
        strategy_name: &str,
        out: &mut dyn Write,
    ) -> Result<(), CandlerunError>;
}
