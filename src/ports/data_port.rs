//! Candle data access port trait.

use std::path::PathBuf;

use crate::domain::candle::CandleTable;
use crate::domain::error::CandlerunError;

/// A data source the adapter can load, with enough metadata to list it.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSourceInfo {
    pub path: PathBuf,
    pub size_bytes: u64,
}

pub trait DataPort {
    /// Load and validate one candle table from a named source.
    fn load(&self, source: &str) -> Result<CandleTable, CandlerunError>;

    /// Enumerate the sources this adapter can see.
    fn list_sources(&self) -> Result<Vec<DataSourceInfo>, CandlerunError>;
}
