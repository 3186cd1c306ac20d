//! Rectangular cell grids with merge regions already resolved.

use crate::cell::Cell;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An inclusive rectangular merge region, in absolute sheet coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MergeRegion {
    /// First row (0-based)
    pub first_row: usize,
    /// First column (0-based)
    pub first_col: usize,
    /// Last row, inclusive
    pub last_row: usize,
    /// Last column, inclusive
    pub last_col: usize,
}

impl MergeRegion {
    /// Creates a merge region from inclusive corners.
    pub const fn new(first_row: usize, first_col: usize, last_row: usize, last_col: usize) -> Self {
        Self { first_row, first_col, last_row, last_col }
    }

    /// The top-left cell whose value every cell in the region carries.
    pub const fn anchor(&self) -> (usize, usize) {
        (self.first_row, self.first_col)
    }

    /// Whether `(row, col)` lies inside the region.
    pub const fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.first_row && row <= self.last_row && col >= self.first_col && col <= self.last_col
    }

    pub(crate) const fn is_well_formed(&self) -> bool {
        self.first_row <= self.last_row && self.first_col <= self.last_col
    }
}

impl fmt::Display for MergeRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}:{}{}",
            column_letters(self.first_col),
            self.first_row + 1,
            column_letters(self.last_col),
            self.last_row + 1
        )
    }
}

/// Spreadsheet column letters for a 0-based index (`0 -> A`, `26 -> AA`).
pub(crate) fn column_letters(mut col: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (col % 26) as u8);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

/// A row-major grid of cells with a fixed width.
///
/// Rows are padded with [`Cell::Empty`] to the widest row. Coordinates are
/// absolute sheet coordinates, so row 0 is the sheet's first row even when
/// the used range starts further down. The grid is immutable once built.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawGrid {
    rows: Vec<Vec<Cell>>,
    width: usize,
}

impl RawGrid {
    /// Builds a grid from rows, padding ragged rows to a common width.
    pub fn new(mut rows: Vec<Vec<Cell>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, Cell::Empty);
        }
        Self { rows, width }
    }

    /// Builds a grid and fills every merge region with its anchor value.
    ///
    /// Regions reaching past the data extend the grid so that every covered
    /// cell exists. Malformed regions (last before first) are skipped; the
    /// workbook readers reject them before building a grid.
    pub fn with_merges(rows: Vec<Vec<Cell>>, merges: &[MergeRegion]) -> Self {
        let mut grid = Self::new(rows);
        for region in merges.iter().filter(|m| m.is_well_formed()) {
            grid.ensure_size(region.last_row + 1, region.last_col + 1);
            let (ar, ac) = region.anchor();
            let anchor = grid.rows[ar][ac].clone();
            for r in region.first_row..=region.last_row {
                for c in region.first_col..=region.last_col {
                    grid.rows[r][c] = anchor.clone();
                }
            }
        }
        grid
    }

    fn ensure_size(&mut self, height: usize, width: usize) {
        if width > self.width {
            self.width = width;
            for row in &mut self.rows {
                row.resize(width, Cell::Empty);
            }
        }
        while self.rows.len() < height {
            self.rows.push(vec![Cell::Empty; self.width]);
        }
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Whether the grid has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.width == 0
    }

    /// The cell at `(row, col)`, or `None` when out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// A whole row.
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    /// Iterates over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Count of non-empty cells in a row.
    pub fn row_count(&self, row: usize) -> usize {
        self.row(row).map_or(0, |cells| cells.iter().filter(|c| !c.is_empty()).count())
    }

    /// Count of non-empty cells in a column.
    pub fn column_count(&self, col: usize) -> usize {
        self.rows.iter().filter(|r| r.get(col).is_some_and(|c| !c.is_empty())).count()
    }
}
