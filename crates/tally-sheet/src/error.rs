//! Error types for workbook and sheet operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for sheet operations.
pub type Result<T> = std::result::Result<T, SheetError>;

/// Errors that can occur while reading a workbook.
///
/// Only conditions that make a sheet unreadable are errors. An empty sheet,
/// a sheet without a detectable table or a cell that does not parse are
/// reported as `None` by the functions that encounter them.
#[derive(Debug, Error)]
pub enum SheetError {
    /// The workbook could not be opened at all
    #[error("Failed to open workbook {path}: {reason}")]
    Open {
        /// Path of the workbook
        path: PathBuf,
        /// Reason reported by the reader
        reason: String,
    },

    /// Sheet name does not exist in the workbook
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// The sheet exists but its cell data could not be decoded
    #[error("Failed to read sheet '{sheet}': {reason}")]
    Read {
        /// Sheet name
        sheet: String,
        /// Reason reported by the reader
        reason: String,
    },

    /// Merge region metadata could not be decoded
    #[error("Failed to read merged regions of '{sheet}': {reason}")]
    MergedRegions {
        /// Sheet name
        sheet: String,
        /// Reason reported by the reader
        reason: String,
    },

    /// A merge region does not fit inside the sheet
    #[error("Invalid merge region {region} in sheet '{sheet}'")]
    InvalidMerge {
        /// Sheet name
        sheet: String,
        /// Region in A1-style notation
        region: String,
    },
}
