//! From a raw sheet grid to a clean rectangular table.

use crate::bounds::{DEFAULT_MIN_NON_NULL, TableBounds, detect_bounds};
use crate::cell::Cell;
use crate::grid::RawGrid;
use crate::header::{HeaderJoin, HeaderRows, resolve_header};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Options controlling table extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableOptions {
    /// Minimum non-empty cells for a row or column to be part of the table
    pub min_non_null: usize,
    /// Header row count or detection
    pub header_rows: HeaderRows,
    /// Separator between parts of multi-row headers
    pub join: HeaderJoin,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self { min_non_null: DEFAULT_MIN_NON_NULL, header_rows: HeaderRows::default(), join: HeaderJoin::default() }
    }
}

impl TableOptions {
    /// Uses a fixed number of header rows.
    #[must_use]
    pub const fn with_header_rows(mut self, header_rows: HeaderRows) -> Self {
        self.header_rows = header_rows;
        self
    }

    /// Changes the non-empty threshold.
    #[must_use]
    pub const fn with_min_non_null(mut self, min_non_null: usize) -> Self {
        self.min_non_null = min_non_null;
        self
    }

    /// Changes the header separator.
    #[must_use]
    pub const fn with_join(mut self, join: HeaderJoin) -> Self {
        self.join = join;
        self
    }
}

/// A table with one header row of unique names and at least one data row.
///
/// The first column holds row labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedTable {
    header: Vec<String>,
    rows: Vec<Vec<Cell>>,
    bounds: TableBounds,
    header_rows: usize,
}

impl ResolvedTable {
    /// Column names, left to right.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Data rows, top to bottom, each as wide as the header.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Where the table sits in its sheet.
    pub const fn bounds(&self) -> TableBounds {
        self.bounds
    }

    /// How many sheet rows were used for the header.
    pub const fn header_rows(&self) -> usize {
        self.header_rows
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    /// Row label: the first column rendered as text.
    pub fn label(&self, row: usize) -> Option<String> {
        self.rows.get(row).and_then(|r| r.first()).map(Cell::display_value)
    }
}

/// Detects the table in `grid`, resolves its header and drops empty rows.
///
/// Returns `None` when no table is found or nothing remains below the header.
pub fn extract_table(grid: &RawGrid, options: &TableOptions) -> Option<ResolvedTable> {
    let Some(bounds) = detect_bounds(grid, options.min_non_null) else {
        debug!(min_non_null = options.min_non_null, "no table bounds detected");
        return None;
    };

    let slices: Vec<&[Cell]> = (bounds.first_row..=bounds.last_row)
        .filter_map(|r| grid.row(r))
        .map(|row| &row[bounds.first_col..=bounds.last_col])
        .collect();

    let header_rows = options.header_rows.count(&slices);
    if slices.len() <= header_rows {
        debug!(rows = slices.len(), header_rows, "table has no rows below its header");
        return None;
    }

    let header = resolve_header(&slices, bounds.first_col, header_rows, options.join);
    let rows: Vec<Vec<Cell>> = slices[header_rows..]
        .iter()
        .filter(|row| row.iter().any(|c| !c.is_empty()))
        .map(|row| row.to_vec())
        .collect();
    if rows.is_empty() {
        return None;
    }

    debug!(?bounds, header_rows, data_rows = rows.len(), "extracted table");
    Some(ResolvedTable { header, rows, bounds, header_rows })
}
