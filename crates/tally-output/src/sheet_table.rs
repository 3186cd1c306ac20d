//! Tables exported the way they appear in a filing.
//!
//! Unlike [`StatementTable`](crate::StatementTable), a [`SheetTable`] keeps
//! the sheet's own header. Cells are cleaned on the way out: text that reads
//! as a financial number is written as that number, other text is trimmed.

use crate::export::{ExportError, ExportFormat, Exporter};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use tally_fields::FilingMetadata;
use tally_sheet::{Cell, ResolvedTable, normalize_number};

/// One table lifted from one sheet of one filing.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetTable {
    name: String,
    sheet: String,
    metadata: FilingMetadata,
    table: ResolvedTable,
}

impl SheetTable {
    /// Wraps a resolved table. `name` is the snake-case table kind.
    pub fn new(
        name: impl Into<String>,
        sheet: impl Into<String>,
        metadata: FilingMetadata,
        table: ResolvedTable,
    ) -> Self {
        Self { name: name.into(), sheet: sheet.into(), metadata, table }
    }

    /// Table kind, e.g. `executive_compensation`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sheet the table was read from.
    pub fn sheet(&self) -> &str {
        &self.sheet
    }

    /// Metadata of the source filing.
    pub const fn metadata(&self) -> &FilingMetadata {
        &self.metadata
    }

    /// The table itself.
    pub const fn table(&self) -> &ResolvedTable {
        &self.table
    }

    /// Default file name: kind and compact filing date, e.g.
    /// `executive_compensation_20240331.csv`.
    pub fn file_name(&self, format: ExportFormat) -> String {
        let date = self.metadata.filing_date.map_or_else(|| "undated".to_string(), |d| d.format("%Y%m%d").to_string());
        format!("{}_{}.{}", self.name, date, format.extension())
    }
}

enum Clean<'a> {
    Missing,
    Number(f64),
    Text(&'a str),
}

fn clean(cell: &Cell) -> Clean<'_> {
    if cell.is_empty() {
        return Clean::Missing;
    }
    if let Some(v) = normalize_number(cell) {
        return Clean::Number(v);
    }
    match cell.as_str() {
        Some(s) => Clean::Text(s.trim()),
        None => Clean::Missing,
    }
}

impl Serialize for Clean<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Missing => serializer.serialize_none(),
            Self::Number(v) => serializer.serialize_f64(*v),
            Self::Text(s) => serializer.serialize_str(s),
        }
    }
}

fn csv_value(cell: &Cell) -> String {
    match clean(cell) {
        Clean::Missing => String::new(),
        Clean::Number(v) => Cell::Number(v).display_value(),
        Clean::Text(s) => s.to_string(),
    }
}

impl Exporter for SheetTable {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(vec![]);
                wtr.write_record(self.table.header())?;
                for row in self.table.rows() {
                    wtr.write_record(row.iter().map(csv_value))?;
                }
                let data = String::from_utf8(wtr.into_inner().map_err(|e| e.into_error())?)?;
                Ok(data)
            }
            ExportFormat::Json => Ok(serde_json::to_string(&JsonDocument(self))?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(&JsonDocument(self))?),
        }
    }
}

/// JSON view: filing details, then rows as objects keyed by header name.
struct JsonDocument<'a>(&'a SheetTable);

struct JsonRows<'a> {
    header: &'a [String],
    rows: &'a [Vec<Cell>],
}

struct JsonRow<'a> {
    header: &'a [String],
    row: &'a [Cell],
}

impl Serialize for JsonDocument<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let table = self.0;
        let mut map = serializer.serialize_map(Some(6))?;
        map.serialize_entry("table", table.name())?;
        map.serialize_entry("source_file", &table.metadata.filename)?;
        map.serialize_entry("date", &table.metadata.filing_date)?;
        map.serialize_entry("sheet", table.sheet())?;
        map.serialize_entry("columns", table.table.header())?;
        map.serialize_entry("rows", &JsonRows { header: table.table.header(), rows: table.table.rows() })?;
        map.end()
    }
}

impl Serialize for JsonRows<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in self.rows {
            seq.serialize_element(&JsonRow { header: self.header, row })?;
        }
        seq.end()
    }
}

impl Serialize for JsonRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.header.len()))?;
        for (name, cell) in self.header.iter().zip(self.row) {
            map.serialize_entry(name, &clean(cell))?;
        }
        map.end()
    }
}
