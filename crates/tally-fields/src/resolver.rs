//! Finding canonical fields in a resolved table.
//!
//! For each synonym in priority order, rows are scanned top to bottom. A row
//! matches when its normalized label contains the normalized synonym. The
//! row's value columns are then read right to left (most recent period
//! first) and the first cell that normalizes to a non-year number wins. A
//! matching row without such a value falls through to the next row.

use crate::dictionary::{FieldDictionary, FieldSpec};
use serde::Serialize;
use std::collections::BTreeMap;
use tally_sheet::{Cell, ResolvedTable, Scale, is_year_like, normalize_number};
use tracing::debug;

/// Resolved values of one record, keyed by canonical field name.
pub type FieldValues = BTreeMap<String, Option<f64>>;

/// Quote and apostrophe variants removed from labels before matching.
const QUOTES: &[char] = &['\u{2019}', '\u{2018}', '\u{201C}', '\u{201D}', '\'', '"'];

/// Where a field's value came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    /// Canonical field name
    pub field: &'static str,
    /// Synonym that matched
    pub synonym: &'static str,
    /// Data row index in the table
    pub row: usize,
    /// Header name of the column the value was read from
    pub column: String,
    /// Cell as it appeared in the sheet
    pub raw: Cell,
    /// Normalized value, before sign convention and scale
    pub value: f64,
}

/// Lower-cases a label and strips quotes so that `Stockholders’ Equity`
/// and `stockholders equity` compare equal.
pub fn normalize_label(label: &str) -> String {
    label.to_lowercase().chars().filter(|c| !QUOTES.contains(c)).collect()
}

/// Finds `spec` in `table`, returning the value with its provenance.
pub fn resolve(table: &ResolvedTable, spec: &FieldSpec) -> Option<Resolution> {
    let labels: Vec<String> =
        (0..table.len()).map(|r| normalize_label(&table.label(r).unwrap_or_default())).collect();

    for synonym in spec.synonyms {
        let needle = normalize_label(synonym);
        for (row_idx, row) in table.rows().iter().enumerate() {
            if !labels[row_idx].contains(&needle) {
                continue;
            }
            let found = (1..row.len())
                .rev()
                .find_map(|col| normalize_number(&row[col]).filter(|v| !is_year_like(*v)).map(|v| (col, v)));
            if let Some((col, value)) = found {
                return Some(Resolution {
                    field: spec.name,
                    synonym,
                    row: row_idx,
                    column: table.header()[col].clone(),
                    raw: row[col].clone(),
                    value,
                });
            }
        }
    }
    None
}

/// Finds `spec` in `table` and applies its sign convention and `scale`.
pub fn resolve_value(table: &ResolvedTable, spec: &FieldSpec, scale: Scale) -> Option<f64> {
    resolve(table, spec).map(|r| finish(spec, scale, r.value))
}

fn finish(spec: &FieldSpec, scale: Scale, value: f64) -> f64 {
    let signed = spec.sign.apply(value);
    if spec.kind.is_scaled() { scale.apply(signed) } else { signed }
}

/// Resolves every field of a dictionary, then fills its derived fields.
///
/// Every resolved field of the dictionary is present in the result; absent
/// ones map to `None`.
pub fn resolve_all(table: &ResolvedTable, dictionary: &FieldDictionary, scale: Scale) -> FieldValues {
    let mut values = FieldValues::new();
    for spec in dictionary.fields {
        let value = resolve(table, spec).map(|r| {
            debug!(
                statement = %dictionary.kind,
                field = r.field,
                synonym = r.synonym,
                row = r.row,
                column = %r.column,
                raw = %r.raw,
                "resolved field"
            );
            finish(spec, scale, r.value)
        });
        values.insert(spec.name.to_string(), value);
    }
    dictionary.apply_derived(&mut values);
    values
}
