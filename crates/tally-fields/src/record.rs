//! Extracted records and the filing metadata they carry.

use crate::resolver::FieldValues;
use crate::statement::StatementKind;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What a filing's file name says about it.
///
/// Every piece is optional; a name that follows no convention still yields
/// a value with only `filename` and `path` set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilingMetadata {
    /// File name including extension
    pub filename: String,
    /// Path the filing was read from
    pub path: PathBuf,
    /// Filing date
    pub filing_date: Option<NaiveDate>,
    /// Form code, e.g. `10-Q`
    pub form_code: Option<String>,
    /// Ticker symbol
    pub ticker: Option<String>,
    /// Company name
    pub company: Option<String>,
    /// Document type, e.g. `Quarterly Report`
    pub document_type: Option<String>,
}

/// Canonical values of one statement in one filing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    /// Statement kind
    pub kind: StatementKind,
    /// Sheet the values were read from
    pub sheet: String,
    /// Filing the sheet belongs to
    pub metadata: FilingMetadata,
    /// Value per canonical field; `None` when the field was not found
    pub values: FieldValues,
}

impl ExtractedRecord {
    /// Filing date, when the file name carries one.
    pub const fn filing_date(&self) -> Option<NaiveDate> {
        self.metadata.filing_date
    }

    /// File name of the source workbook.
    pub fn source_file(&self) -> &str {
        &self.metadata.filename
    }

    /// Value of one field.
    pub fn get(&self, field: &str) -> Option<f64> {
        self.values.get(field).copied().flatten()
    }

    /// Number of fields with a value.
    pub fn resolved_count(&self) -> usize {
        self.values.values().filter(|v| v.is_some()).count()
    }
}
