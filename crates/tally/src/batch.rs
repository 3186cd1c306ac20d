//! Extracting statements from many filings.
//!
//! Files are processed one after another. A file that cannot be opened is
//! recorded as a [`FilingError`] and the run moves on to the next one.

use crate::config::ExtractionConfig;
use crate::error::{ExtractError, Result};
use crate::extractor::StatementExtractor;
use crate::metadata::parse_metadata;
use std::path::{Path, PathBuf};
use tally_fields::{ExtractedRecord, FilingMetadata, StatementKind};
use tally_output::{ExportFormat, Exporter, RunReport, RunReportBuilder, StatementTable};
use tally_sheet::{Workbook, XlsxWorkbook};
use tracing::{info, warn};

/// Statements extracted from one filing.
#[derive(Debug, Clone, PartialEq)]
pub struct FilingExtraction {
    /// Metadata parsed from the file name
    pub metadata: FilingMetadata,
    /// One record per statement found, in config order
    pub records: Vec<ExtractedRecord>,
}

impl FilingExtraction {
    /// Record for a statement, if the filing had one.
    pub fn record(&self, kind: StatementKind) -> Option<&ExtractedRecord> {
        self.records.iter().find(|r| r.kind == kind)
    }
}

/// A filing that could not be processed.
#[derive(Debug)]
pub struct FilingError {
    /// Path of the filing
    pub path: PathBuf,
    /// What went wrong
    pub error: ExtractError,
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchResult {
    /// Filings that were read, in input order
    pub filings: Vec<FilingExtraction>,
    /// Filings that failed, in input order
    pub failures: Vec<FilingError>,
}

impl BatchResult {
    /// Adds the outcome for one file.
    pub fn record(&mut self, path: impl Into<PathBuf>, outcome: Result<FilingExtraction>) {
        match outcome {
            Ok(filing) => self.filings.push(filing),
            Err(error) => self.failures.push(FilingError { path: path.into(), error }),
        }
    }

    /// Number of files handed to the run.
    pub fn files_total(&self) -> usize {
        self.filings.len() + self.failures.len()
    }

    /// Whether any file failed.
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// All records of one statement, sorted by filing date.
    pub fn table(&self, kind: StatementKind) -> StatementTable {
        StatementTable::from_records(
            kind,
            self.filings.iter().flat_map(|f| f.records.iter()).filter(|r| r.kind == kind).cloned(),
        )
    }

    /// One table per statement kind that has at least one record.
    pub fn tables(&self) -> Vec<StatementTable> {
        StatementKind::ALL.iter().map(|kind| self.table(*kind)).filter(|t| !t.is_empty()).collect()
    }

    /// Summary of the run.
    pub fn report(&self) -> RunReport {
        let mut builder = RunReportBuilder::new().files_total(self.files_total());
        for failure in &self.failures {
            builder = builder.failure(failure.path.display().to_string(), &failure.error);
        }
        for record in self.filings.iter().flat_map(|f| &f.records) {
            builder = builder.record(record);
        }
        builder.build()
    }

    /// Writes one file per non-empty statement table into `dir`.
    ///
    /// Returns the paths written.
    pub fn export(&self, dir: impl AsRef<Path>, format: ExportFormat) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let mut written = Vec::new();
        for table in self.tables() {
            let path = dir.join(table.file_name(format));
            table.export_to_file(&path, format)?;
            info!(path = %path.display(), records = table.len(), "exported {}", table.kind());
            written.push(path);
        }
        Ok(written)
    }

    /// Writes the run report as JSON.
    pub fn write_report(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.report().write_json(path)?;
        info!(path = %path.display(), "wrote run report");
        Ok(())
    }
}

/// Extracts every enabled statement from an open workbook.
pub fn extract_workbook<W: Workbook + ?Sized>(
    workbook: &mut W,
    metadata: FilingMetadata,
    config: &ExtractionConfig,
) -> FilingExtraction {
    let records = StatementExtractor::new(config, &metadata).extract_all(workbook, &metadata);
    FilingExtraction { metadata, records }
}

/// Opens one filing and extracts every enabled statement.
pub fn extract_filing(path: impl AsRef<Path>, config: &ExtractionConfig) -> Result<FilingExtraction> {
    let path = path.as_ref();
    let metadata = parse_metadata(path);
    let mut workbook = XlsxWorkbook::open(path)?;
    let filing = extract_workbook(&mut workbook, metadata, config);
    info!(
        file = %filing.metadata.filename,
        date = ?filing.metadata.filing_date,
        statements = filing.records.len(),
        "extracted filing"
    );
    Ok(filing)
}

/// Extracts a set of filings, continuing past files that fail.
pub fn extract_batch<I, P>(paths: I, config: &ExtractionConfig) -> BatchResult
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    extract_batch_with_progress(paths, config, |_, _| {})
}

/// Like [`extract_batch`], calling `on_file` after each file with its path
/// and whether it was read.
pub fn extract_batch_with_progress<I, P, F>(paths: I, config: &ExtractionConfig, mut on_file: F) -> BatchResult
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
    F: FnMut(&Path, bool),
{
    let mut batch = BatchResult::default();
    for path in paths {
        let path = path.as_ref();
        let outcome = extract_filing(path, config);
        if let Err(e) = &outcome {
            warn!(file = %path.display(), error = %e, "failed to extract filing");
        }
        on_file(path, outcome.is_ok());
        batch.record(path, outcome);
    }
    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tally_sheet::{MemorySheet, MemoryWorkbook};

    fn filing(date: Option<NaiveDate>, assets: &str) -> FilingExtraction {
        let mut workbook = MemoryWorkbook::new().with_sheet(MemorySheet::from_strings(
            "Balance Sheets",
            &[&["Line Item", "Current"], &["Total assets", assets]],
        ));
        let metadata = FilingMetadata { filename: format!("{assets}.xlsx"), filing_date: date, ..Default::default() };
        extract_workbook(&mut workbook, metadata, &ExtractionConfig::default())
    }

    #[test]
    fn test_table_sorted_by_date() {
        let mut batch = BatchResult::default();
        batch.record("b.xlsx", Ok(filing(NaiveDate::from_ymd_opt(2024, 6, 30), "200")));
        batch.record("n.xlsx", Ok(filing(None, "300")));
        batch.record("a.xlsx", Ok(filing(NaiveDate::from_ymd_opt(2024, 3, 31), "100")));

        let table = batch.table(StatementKind::BalanceSheet);
        let assets: Vec<_> = table.records().iter().map(|r| r.get("total_assets")).collect();
        assert_eq!(assets, vec![Some(100.0), Some(200.0), Some(300.0)]);
        assert_eq!(batch.tables().len(), 1);
    }

    #[test]
    fn test_failures_are_kept_apart() {
        let mut batch = BatchResult::default();
        batch.record("ok.xlsx", Ok(filing(None, "1")));
        batch.record("bad.xlsx", Err(ExtractError::Io(std::io::Error::other("boom"))));

        assert_eq!(batch.files_total(), 2);
        assert!(batch.has_failures());
        assert_eq!(batch.failures[0].path, PathBuf::from("bad.xlsx"));

        let report = batch.report();
        assert_eq!(report.files_succeeded(), 1);
        assert_eq!(report.statements[&StatementKind::BalanceSheet].records, 1);
    }

    #[test]
    fn test_missing_file_is_failure() {
        let paths = ["/nonexistent/ACME (Acme) 10-Q (10-Q) 2024-01-01.xlsx"];
        let batch = extract_batch(paths, &ExtractionConfig::default());
        assert!(batch.filings.is_empty());
        assert!(matches!(batch.failures[0].error, ExtractError::Sheet(_)));
    }

    #[test]
    fn test_progress_sees_every_file() {
        let paths = ["/nonexistent/a.xlsx", "/nonexistent/b.xlsx"];
        let mut seen = Vec::new();
        let batch = extract_batch_with_progress(paths, &ExtractionConfig::default(), |path, ok| {
            seen.push((path.to_path_buf(), ok));
        });
        assert_eq!(batch.failures.len(), 2);
        assert_eq!(seen, vec![(PathBuf::from(paths[0]), false), (PathBuf::from(paths[1]), false)]);
    }

    #[test]
    fn test_write_report() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut batch = BatchResult::default();
        batch.record("ok.xlsx", Ok(filing(None, "1")));

        let path = dir.path().join("report.json");
        batch.write_report(&path).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("\"files_total\": 1"));

        let err = batch.write_report(dir.path().join("missing").join("report.json")).unwrap_err();
        assert!(matches!(err, ExtractError::Report(_)));
    }

    #[test]
    fn test_filing_record_lookup() {
        let f = filing(None, "5");
        assert!(f.record(StatementKind::BalanceSheet).is_some());
        assert!(f.record(StatementKind::CashFlow).is_none());
    }
}
