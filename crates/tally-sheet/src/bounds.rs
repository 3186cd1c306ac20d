//! Locating the table inside a sheet.

use crate::grid::RawGrid;
use serde::{Deserialize, Serialize};

/// Minimum non-empty cells a row or column needs to count as part of a table.
pub const DEFAULT_MIN_NON_NULL: usize = 2;

/// Inclusive rectangle of a detected table, in sheet coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableBounds {
    /// First table row
    pub first_row: usize,
    /// Last table row, inclusive
    pub last_row: usize,
    /// First table column
    pub first_col: usize,
    /// Last table column, inclusive
    pub last_col: usize,
}

impl TableBounds {
    /// Number of rows covered.
    pub const fn rows(&self) -> usize {
        self.last_row - self.first_row + 1
    }

    /// Number of columns covered.
    pub const fn columns(&self) -> usize {
        self.last_col - self.first_col + 1
    }
}

/// Finds the rectangle spanned by rows and columns with at least
/// `min_non_null` non-empty cells.
///
/// Rows between the first and last qualifying row are kept even when sparse.
/// Returns `None` when no row or no column qualifies, or when either axis
/// collapses to a single line.
pub fn detect_bounds(grid: &RawGrid, min_non_null: usize) -> Option<TableBounds> {
    let rows = (0..grid.height()).filter(|&r| grid.row_count(r) >= min_non_null);
    let (first_row, last_row) = min_max(rows)?;
    let cols = (0..grid.width()).filter(|&c| grid.column_count(c) >= min_non_null);
    let (first_col, last_col) = min_max(cols)?;

    if first_row >= last_row || first_col >= last_col {
        return None;
    }
    Some(TableBounds { first_row, last_row, first_col, last_col })
}

fn min_max(mut indices: impl Iterator<Item = usize>) -> Option<(usize, usize)> {
    let first = indices.next()?;
    let last = indices.last().unwrap_or(first);
    Some((first, last))
}
