//! Error types for extraction runs.

use crate::config::ConfigError;
use tally_output::{ExportError, ReportError};
use tally_sheet::SheetError;
use thiserror::Error;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors that stop a filing, an export or a run.
///
/// Missing sheets, empty tables and unresolved fields are not errors; they
/// surface as absent records or `None` values.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Workbook could not be opened or read
    #[error(transparent)]
    Sheet(#[from] SheetError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Export error
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Report error
    #[error(transparent)]
    Report(#[from] ReportError),

    /// Table kind name not recognised
    #[error("Unknown table kind: {0}")]
    UnknownTable(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
