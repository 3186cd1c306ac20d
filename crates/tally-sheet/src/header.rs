//! Collapsing header rows into one row of unique column names.

use crate::cell::Cell;
use crate::normalize::{is_year_like, normalize_number};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// How many leading table rows form the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderRows {
    /// Exactly this many rows (at least one)
    Fixed(usize),
    /// Detect from content, using at most `max` rows
    Auto {
        /// Upper limit on detected header rows
        max: usize,
    },
}

impl Default for HeaderRows {
    fn default() -> Self {
        Self::Auto { max: 3 }
    }
}

impl HeaderRows {
    /// Resolves to a concrete row count for the given table rows.
    pub fn count(self, rows: &[&[Cell]]) -> usize {
        match self {
            Self::Fixed(n) => n.max(1),
            Self::Auto { max } => count_header_rows(rows, max),
        }
    }
}

/// Separator placed between the parts of a multi-row header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderJoin {
    /// `"Total Revenue"`
    #[default]
    Space,
    /// `"Three Months Ended - 2024"`
    Dash,
}

impl HeaderJoin {
    /// The separator string.
    pub const fn separator(self) -> &'static str {
        match self {
            Self::Space => " ",
            Self::Dash => " - ",
        }
    }
}

/// Counts leading rows that read as header rows.
///
/// A header row has content past the label column and no number other than
/// a year. At least one row is always counted, and never more than `max`.
pub fn count_header_rows(rows: &[&[Cell]], max: usize) -> usize {
    let detected = rows.iter().take(max.max(1)).take_while(|row| looks_like_header(row)).count();
    detected.max(1)
}

fn looks_like_header(row: &[Cell]) -> bool {
    let values = row.get(1..).unwrap_or_default();
    let has_content = values.iter().any(|c| !c.is_empty());
    let has_data = row.iter().filter_map(normalize_number).any(|v| !is_year_like(v));
    has_content && !has_data
}

/// Builds column names from the first `header_rows` rows.
///
/// `first_col` is the sheet index of the first column and is used for
/// positional names (`column_<index>`) when a column has no header text.
/// Repeated names get `_dup1`, `_dup2`, ... in left-to-right order.
pub fn resolve_header(rows: &[&[Cell]], first_col: usize, header_rows: usize, join: HeaderJoin) -> Vec<String> {
    let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
    let header = &rows[..header_rows.min(rows.len())];

    let names = (0..width).map(|col| {
        let name = if header.len() == 1 {
            header[0].get(col).map(Cell::display_value).unwrap_or_default()
        } else {
            header
                .iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.display_value().trim().to_string())
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(join.separator())
        };
        if name.trim().is_empty() { format!("column_{}", first_col + col) } else { name }
    });
    dedupe(names)
}

fn dedupe(names: impl Iterator<Item = String>) -> Vec<String> {
    let mut emitted: HashSet<String> = HashSet::new();
    let mut suffixes: HashMap<String, usize> = HashMap::new();
    names
        .map(|name| {
            let unique = if emitted.contains(&name) {
                let next = suffixes.entry(name.clone()).or_insert(0);
                // A generated name may already exist as a literal header.
                loop {
                    *next += 1;
                    let candidate = format!("{name}_dup{next}");
                    if !emitted.contains(&candidate) {
                        break candidate;
                    }
                }
            } else {
                name
            };
            emitted.insert(unique.clone());
            unique
        })
        .collect()
}
