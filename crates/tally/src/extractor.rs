//! Statement extraction from an open workbook.

use crate::config::ExtractionConfig;
use crate::selector::{FilingProfile, selector_for};
use tally_fields::{ExtractedRecord, FilingMetadata, StatementKind, dictionary_for, resolve_all};
use tally_sheet::{ResolvedTable, Workbook, extract_table};
use tracing::{debug, warn};

/// Extracts statements from one workbook.
#[derive(Debug, Clone, Copy)]
pub struct StatementExtractor<'a> {
    config: &'a ExtractionConfig,
    profile: FilingProfile,
}

impl<'a> StatementExtractor<'a> {
    /// Creates an extractor for a filing, detecting its profile unless the
    /// config fixes one.
    pub fn new(config: &'a ExtractionConfig, metadata: &FilingMetadata) -> Self {
        let profile = config.profile.unwrap_or_else(|| FilingProfile::detect(metadata));
        Self { config, profile }
    }

    /// Profile used for sheet selection.
    pub const fn profile(&self) -> FilingProfile {
        self.profile
    }

    /// Finds the sheet and table for a statement.
    ///
    /// Candidates are tried in order and the first one yielding a table wins.
    /// A candidate that cannot be read is logged and skipped.
    pub fn locate<W: Workbook + ?Sized>(
        &self,
        workbook: &mut W,
        kind: StatementKind,
    ) -> Option<(String, ResolvedTable)> {
        let candidates = selector_for(kind, self.profile).candidates(&workbook.sheet_names());
        if candidates.is_empty() {
            debug!(statement = %kind, "no sheet matched");
            return None;
        }

        let options = self.config.table_options(kind);
        for sheet in candidates {
            let grid = match workbook.read_sheet(&sheet) {
                Ok(grid) => grid,
                Err(e) => {
                    warn!(statement = %kind, sheet = %sheet, error = %e, "skipping unreadable sheet");
                    continue;
                }
            };
            match extract_table(&grid, &options) {
                Some(table) => {
                    debug!(statement = %kind, sheet = %sheet, rows = table.len(), "selected sheet");
                    return Some((sheet, table));
                }
                None => debug!(statement = %kind, sheet = %sheet, "no table on sheet"),
            }
        }
        None
    }

    /// Extracts one statement, or `None` when no sheet holds a table for it.
    pub fn extract<W: Workbook + ?Sized>(
        &self,
        workbook: &mut W,
        kind: StatementKind,
        metadata: &FilingMetadata,
    ) -> Option<ExtractedRecord> {
        let (sheet, table) = self.locate(workbook, kind)?;
        let values = resolve_all(&table, &dictionary_for(kind), self.config.scale_for(kind));
        Some(ExtractedRecord { kind, sheet, metadata: metadata.clone(), values })
    }

    /// Extracts every enabled statement, in config order.
    pub fn extract_all<W: Workbook + ?Sized>(
        &self,
        workbook: &mut W,
        metadata: &FilingMetadata,
    ) -> Vec<ExtractedRecord> {
        self.config.statements.iter().filter_map(|kind| self.extract(workbook, *kind, metadata)).collect()
    }
}
