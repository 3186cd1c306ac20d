//! Run reports for batch extraction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use tally_fields::{ExtractedRecord, StatementKind, dictionary_for};
use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A file that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFailure {
    /// File path as given
    pub file: String,
    /// Error message
    pub error: String,
}

/// How well one statement kind was covered across filings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatementCoverage {
    /// Filings that produced a record
    pub records: usize,
    /// Filings in which each field had a value, in column order
    pub fields: Vec<(String, usize)>,
}

/// Summary of one extraction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Report generation timestamp.
    pub timestamp: DateTime<Utc>,

    /// Files handed to the run.
    pub files_total: usize,

    /// Files that could not be opened or read.
    pub failures: Vec<FileFailure>,

    /// Coverage per statement kind.
    pub statements: BTreeMap<StatementKind, StatementCoverage>,
}

impl RunReport {
    /// Files processed without a file-level failure.
    pub fn files_succeeded(&self) -> usize {
        self.files_total.saturating_sub(self.failures.len())
    }

    /// Whether any file failed.
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Convert report to JSON string.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the JSON report to a file.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ReportError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Render the report as a fixed-width text table.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("\nExtraction Run: {}\n", self.timestamp.format("%Y-%m-%d %H:%M:%S UTC")));
        output.push_str(&format!(
            "Files: {} processed, {} failed\n",
            self.files_succeeded(),
            self.failures.len()
        ));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        for (kind, coverage) in &self.statements {
            output.push_str(&format!("{:<40} {:>8} filings\n", kind.title(), coverage.records));
            output.push_str(&"-".repeat(60));
            output.push('\n');
            for (field, count) in &coverage.fields {
                let pct = if coverage.records == 0 { 0.0 } else { *count as f64 / coverage.records as f64 * 100.0 };
                output.push_str(&format!("  {:<36} {:>8} {:>9.1}%\n", field, count, pct));
            }
            output.push('\n');
        }

        if self.has_failures() {
            output.push_str("Failures:\n");
            for failure in &self.failures {
                output.push_str(&format!("  {}: {}\n", failure.file, failure.error));
            }
        }
        output
    }

    /// Render the report as Markdown.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("# Extraction Run: {}\n\n", self.timestamp.format("%Y-%m-%d %H:%M:%S UTC")));
        output.push_str(&format!("- **Files processed:** {}\n", self.files_succeeded()));
        output.push_str(&format!("- **Files failed:** {}\n\n", self.failures.len()));

        for (kind, coverage) in &self.statements {
            output.push_str(&format!("## {} ({} filings)\n\n", kind.title(), coverage.records));
            output.push_str("| Field | Filings | Coverage |\n");
            output.push_str("|-------|---------|----------|\n");
            for (field, count) in &coverage.fields {
                let pct = if coverage.records == 0 { 0.0 } else { *count as f64 / coverage.records as f64 * 100.0 };
                output.push_str(&format!("| {} | {} | {:.1}% |\n", field, count, pct));
            }
            output.push('\n');
        }

        if self.has_failures() {
            output.push_str("## Failures\n\n");
            for failure in &self.failures {
                output.push_str(&format!("- `{}`: {}\n", failure.file, failure.error));
            }
        }
        output
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ascii_table())
    }
}

/// Builder for creating run reports.
#[derive(Debug, Default)]
pub struct RunReportBuilder {
    files_total: usize,
    failures: Vec<FileFailure>,
    statements: BTreeMap<StatementKind, StatementCoverage>,
}

impl RunReportBuilder {
    /// Create a new report builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of files handed to the run.
    pub const fn files_total(mut self, files: usize) -> Self {
        self.files_total = files;
        self
    }

    /// Record a file-level failure.
    pub fn failure(mut self, file: impl Into<String>, error: impl ToString) -> Self {
        self.failures.push(FileFailure { file: file.into(), error: error.to_string() });
        self
    }

    /// Count an extracted record towards its statement's coverage.
    pub fn record(mut self, record: &ExtractedRecord) -> Self {
        let coverage = self.statements.entry(record.kind).or_insert_with(|| StatementCoverage {
            records: 0,
            fields: dictionary_for(record.kind).column_names().into_iter().map(|c| (c.to_string(), 0)).collect(),
        });
        coverage.records += 1;
        for (field, count) in &mut coverage.fields {
            if record.get(field).is_some() {
                *count += 1;
            }
        }
        self
    }

    /// Build the report.
    pub fn build(self) -> RunReport {
        RunReport {
            timestamp: Utc::now(),
            files_total: self.files_total,
            failures: self.failures,
            statements: self.statements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_fields::FilingMetadata;

    fn record(kind: StatementKind, values: &[(&str, f64)]) -> ExtractedRecord {
        ExtractedRecord {
            kind,
            sheet: "Sheet1".to_string(),
            metadata: FilingMetadata::default(),
            values: values.iter().map(|(k, v)| ((*k).to_string(), Some(*v))).collect(),
        }
    }

    #[test]
    fn test_report_builder() {
        let report = RunReportBuilder::new()
            .files_total(3)
            .record(&record(StatementKind::BalanceSheet, &[("total_assets", 1.0), ("cash", 2.0)]))
            .record(&record(StatementKind::BalanceSheet, &[("total_assets", 3.0)]))
            .failure("broken.xlsx", "Failed to open workbook")
            .build();

        assert_eq!(report.files_succeeded(), 2);
        assert!(report.has_failures());

        let coverage = &report.statements[&StatementKind::BalanceSheet];
        assert_eq!(coverage.records, 2);
        assert_eq!(coverage.fields[0], ("total_assets".to_string(), 2));
        let cash = coverage.fields.iter().find(|(f, _)| f == "cash").unwrap();
        assert_eq!(cash.1, 1);
    }

    #[test]
    fn test_report_rendering() {
        let report = RunReportBuilder::new()
            .files_total(1)
            .record(&record(StatementKind::CashFlow, &[("operating_cf", 5.0)]))
            .build();

        let text = report.to_ascii_table();
        assert!(text.contains("Cash Flow Statement"));
        assert!(text.contains("operating_cf"));
        assert!(text.contains("100.0%"));
        assert!(!text.contains("Failures"));

        let json = report.to_json().unwrap();
        assert!(json.contains("\"files_total\": 1"));
    }

    #[test]
    fn test_write_json() {
        let dir = tempfile::TempDir::new().unwrap();
        let report = RunReportBuilder::new().files_total(1).build();

        let path = dir.path().join("report.json");
        report.write_json(&path).unwrap();
        let parsed: RunReport = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.files_total, 1);

        let err = report.write_json(dir.path().join("missing").join("report.json")).unwrap_err();
        assert!(matches!(err, ReportError::Io(_)));
    }

    #[test]
    fn test_report_markdown() {
        let report = RunReportBuilder::new()
            .files_total(2)
            .record(&record(StatementKind::IncomeStatement, &[("revenue", 10.0)]))
            .failure("bad.xlsx", "not a zip archive")
            .build();

        let md = report.to_markdown();
        assert!(md.contains("## Income Statement (1 filings)"));
        assert!(md.contains("| revenue | 1 | 100.0% |"));
        assert!(md.contains("- `bad.xlsx`: not a zip archive"));
        assert_eq!(report.to_string(), report.to_ascii_table());
    }
}
