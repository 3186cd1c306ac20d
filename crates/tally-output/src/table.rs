//! Records of one statement kind gathered across filings.

use crate::export::ExportFormat;
use tally_fields::{ExtractedRecord, StatementKind, dictionary_for};

/// Records of one statement kind, ordered by filing date.
///
/// Records without a date sort after all dated ones and keep their
/// insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementTable {
    kind: StatementKind,
    columns: Vec<&'static str>,
    records: Vec<ExtractedRecord>,
}

impl StatementTable {
    /// Creates an empty table with the statement's output columns.
    pub fn new(kind: StatementKind) -> Self {
        Self { kind, columns: dictionary_for(kind).column_names(), records: Vec::new() }
    }

    /// Builds a table from records, keeping only those of `kind`.
    pub fn from_records(kind: StatementKind, records: impl IntoIterator<Item = ExtractedRecord>) -> Self {
        let mut table = Self::new(kind);
        for record in records {
            table.push(record);
        }
        table
    }

    /// Adds a record, ignoring records of another statement kind.
    pub fn push(&mut self, record: ExtractedRecord) {
        if record.kind != self.kind {
            return;
        }
        // Insert after every record that sorts before or equal, keeping ties stable.
        let key = sort_key(&record);
        let at = self.records.partition_point(|r| sort_key(r) <= key);
        self.records.insert(at, record);
    }

    /// Statement kind.
    pub const fn kind(&self) -> StatementKind {
        self.kind
    }

    /// Field columns after `date` and `source_file`.
    pub fn columns(&self) -> &[&'static str] {
        &self.columns
    }

    /// Records in output order.
    pub fn records(&self) -> &[ExtractedRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Default file name, e.g. `balance_sheet.csv`.
    pub fn file_name(&self, format: ExportFormat) -> String {
        format!("{}.{}", self.kind.as_str(), format.extension())
    }
}

fn sort_key(record: &ExtractedRecord) -> (bool, Option<chrono::NaiveDate>) {
    (record.filing_date().is_none(), record.filing_date())
}
