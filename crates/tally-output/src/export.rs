//! Export of statement tables.
//!
//! Every export has one row per filing with the columns `date`,
//! `source_file`, then the statement's canonical fields in dictionary order.
//! Missing values are empty in CSV and `null` in JSON.

use crate::table::StatementTable;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use tally_fields::ExtractedRecord;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Output was not valid UTF-8.
    #[error("Invalid UTF-8 in output: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Comma-separated values format.
    #[default]
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "pretty-json" | "pretty_json" | "pretty" => Ok(Self::PrettyJson),
            other => Err(ExportError::InvalidFormat(other.to_string())),
        }
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        debug!(path = %path.display(), bytes = content.len(), "wrote export");
        Ok(())
    }
}

impl Exporter for StatementTable {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(vec![]);
                let header = ["date", "source_file"].into_iter().chain(self.columns().iter().copied());
                wtr.write_record(header)?;
                for record in self.records() {
                    let date = record.filing_date().map(|d| d.to_string()).unwrap_or_default();
                    let values = self
                        .columns()
                        .iter()
                        .map(|c| record.get(c).map(|v| v.to_string()).unwrap_or_default());
                    let row: Vec<String> =
                        [date, record.source_file().to_string()].into_iter().chain(values).collect();
                    wtr.write_record(&row)?;
                }
                let data = String::from_utf8(wtr.into_inner().map_err(|e| e.into_error())?)?;
                Ok(data)
            }
            ExportFormat::Json => Ok(serde_json::to_string(&JsonRows(self))?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(&JsonRows(self))?),
        }
    }
}

/// JSON view of a table: an array of objects keeping the column order.
struct JsonRows<'a>(&'a StatementTable);

struct JsonRow<'a> {
    columns: &'a [&'static str],
    record: &'a ExtractedRecord,
}

impl Serialize for JsonRows<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for record in self.0.records() {
            seq.serialize_element(&JsonRow { columns: self.0.columns(), record })?;
        }
        seq.end()
    }
}

impl Serialize for JsonRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len() + 2))?;
        map.serialize_entry("date", &self.record.filing_date())?;
        map.serialize_entry("source_file", self.record.source_file())?;
        for column in self.columns {
            map.serialize_entry(column, &self.record.get(column))?;
        }
        map.end()
    }
}
