//! Workbook readers.
//!
//! A [`Workbook`] hands out sheets as [`RawGrid`]s with merge regions already
//! resolved. [`XlsxWorkbook`] reads `.xlsx` files through `calamine`;
//! [`MemoryWorkbook`] holds sheets built in memory and goes through the same
//! merge resolution.

use crate::cell::Cell;
use crate::error::{Result, SheetError};
use crate::grid::{MergeRegion, RawGrid};
use calamine::{Data, Dimensions, Reader, Xlsx, open_workbook};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Summary of one sheet's used area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetInfo {
    /// Sheet name
    pub name: String,
    /// Number of rows up to the last used row
    pub rows: usize,
    /// Number of columns up to the last used column
    pub columns: usize,
}

/// A source of named sheets.
pub trait Workbook {
    /// Sheet names in workbook order.
    fn sheet_names(&self) -> Vec<String>;

    /// Reads one sheet with every merge region filled from its anchor cell.
    ///
    /// Fails with [`SheetError::SheetNotFound`] for an unknown name.
    fn read_sheet(&mut self, name: &str) -> Result<RawGrid>;

    /// Name and used dimensions of every sheet.
    fn sheet_info(&mut self) -> Result<Vec<SheetInfo>> {
        self.sheet_names()
            .into_iter()
            .map(|name| {
                let grid = self.read_sheet(&name)?;
                Ok(SheetInfo { rows: grid.height(), columns: grid.width(), name })
            })
            .collect()
    }
}

/// An `.xlsx` workbook read through `calamine`.
pub struct XlsxWorkbook {
    path: PathBuf,
    inner: Xlsx<BufReader<File>>,
}

impl std::fmt::Debug for XlsxWorkbook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XlsxWorkbook").field("path", &self.path).finish_non_exhaustive()
    }
}

impl XlsxWorkbook {
    /// Opens a workbook from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut inner = open_workbook::<Xlsx<_>, _>(&path)
            .map_err(|e| SheetError::Open { path: path.clone(), reason: e.to_string() })?;
        inner
            .load_merged_regions()
            .map_err(|e| SheetError::Open { path: path.clone(), reason: e.to_string() })?;
        debug!(path = %path.display(), sheets = inner.sheet_names().len(), "opened workbook");
        Ok(Self { path, inner })
    }

    /// Path the workbook was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn merge_regions(&mut self, name: &str) -> Result<Vec<MergeRegion>> {
        let dimensions = match self.inner.worksheet_merge_cells(name) {
            Some(Ok(dims)) => dims,
            Some(Err(e)) => {
                return Err(SheetError::MergedRegions { sheet: name.to_string(), reason: e.to_string() });
            }
            None => Vec::new(),
        };
        Ok(dimensions.iter().map(to_merge_region).collect())
    }
}

impl Workbook for XlsxWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.inner.sheet_names()
    }

    fn read_sheet(&mut self, name: &str) -> Result<RawGrid> {
        if !self.inner.sheet_names().iter().any(|n| n == name) {
            return Err(SheetError::SheetNotFound(name.to_string()));
        }
        let range = self
            .inner
            .worksheet_range(name)
            .map_err(|e| SheetError::Read { sheet: name.to_string(), reason: e.to_string() })?;

        // Range rows are relative to the used range; shift them to sheet coordinates.
        let (start_row, start_col) = range.start().map_or((0, 0), |(r, c)| (r as usize, c as usize));
        let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); if range.is_empty() { 0 } else { start_row }];
        for row in range.rows() {
            let mut cells = vec![Cell::Empty; start_col];
            cells.extend(row.iter().map(to_cell));
            rows.push(cells);
        }

        let merges = self.merge_regions(name)?;
        debug!(sheet = name, rows = rows.len(), merges = merges.len(), "read sheet");
        resolve_merges(name, rows, &merges)
    }
}

const fn to_merge_region(dims: &Dimensions) -> MergeRegion {
    MergeRegion::new(dims.start.0 as usize, dims.start.1 as usize, dims.end.0 as usize, dims.end.1 as usize)
}

/// Largest sheet an `.xlsx` file can describe.
const MAX_ROWS: usize = 1_048_576;
const MAX_COLS: usize = 16_384;

/// Builds the grid for one sheet, rejecting merge regions that are inverted
/// or reach past the largest possible sheet.
fn resolve_merges(sheet: &str, rows: Vec<Vec<Cell>>, merges: &[MergeRegion]) -> Result<RawGrid> {
    if let Some(bad) = merges
        .iter()
        .find(|m| !m.is_well_formed() || m.last_row >= MAX_ROWS || m.last_col >= MAX_COLS)
    {
        return Err(SheetError::InvalidMerge { sheet: sheet.to_string(), region: bad.to_string() });
    }
    Ok(RawGrid::with_merges(rows, merges))
}

/// Maps a `calamine` value onto [`Cell`] without further coercion.
fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) if s.is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(v) => Cell::Number(*v),
        Data::Int(v) => Cell::Number(*v as f64),
        Data::Bool(b) => Cell::text(if *b { "TRUE" } else { "FALSE" }),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ts) if ts.time() == chrono::NaiveTime::MIN => {
                Cell::DateLike(ts.date().format("%Y-%m-%d").to_string())
            }
            Some(ts) => Cell::DateLike(ts.format("%Y-%m-%dT%H:%M:%S").to_string()),
            None => Cell::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => Cell::DateLike(s.clone()),
        Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

/// One in-memory sheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySheet {
    /// Sheet name
    pub name: String,
    /// Rows of cells, starting at sheet row 0
    pub rows: Vec<Vec<Cell>>,
    /// Merge regions, with the anchor value stored in `rows`
    pub merges: Vec<MergeRegion>,
}

impl MemorySheet {
    /// Creates a sheet from rows.
    pub fn new(name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { name: name.into(), rows, merges: Vec::new() }
    }

    /// Creates a sheet from rows of strings; empty strings become empty cells.
    pub fn from_strings(name: impl Into<String>, rows: &[&[&str]]) -> Self {
        let rows = rows.iter().map(|r| r.iter().map(|s| Cell::from(*s)).collect()).collect();
        Self::new(name, rows)
    }

    /// Adds a merge region.
    #[must_use]
    pub fn with_merge(mut self, region: MergeRegion) -> Self {
        self.merges.push(region);
        self
    }
}

/// A workbook whose sheets live in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryWorkbook {
    sheets: Vec<MemorySheet>,
}

impl MemoryWorkbook {
    /// Creates an empty workbook.
    pub const fn new() -> Self {
        Self { sheets: Vec::new() }
    }

    /// Appends a sheet.
    #[must_use]
    pub fn with_sheet(mut self, sheet: MemorySheet) -> Self {
        self.sheets.push(sheet);
        self
    }
}

impl Workbook for MemoryWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    fn read_sheet(&mut self, name: &str) -> Result<RawGrid> {
        let sheet = self
            .sheets
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| SheetError::SheetNotFound(name.to_string()))?;
        resolve_merges(&sheet.name, sheet.rows.clone(), &sheet.merges)
    }
}
