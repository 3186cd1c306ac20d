//! Reads real `.xlsx` files written with `rust_xlsxwriter`.

use rust_xlsxwriter::{Format, Workbook as XlsxWriter};
use std::path::{Path, PathBuf};
use tally_sheet::{
    Cell, HeaderRows, SheetError, TableOptions, Workbook, XlsxWorkbook, extract_table, normalize_number,
};
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn write_filing(dir: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = dir.join("ACME (Acme Corp) Quarterly Report (10-Q) 2024-03-31.xlsx");
    let mut writer = XlsxWriter::new();

    let cover = writer.add_worksheet();
    cover.set_name("Cover")?;
    cover.write_string(0, 0, "Document and Entity Information")?;

    let sheet = writer.add_worksheet();
    sheet.set_name("Consolidated Balance Sheets")?;
    // Table starts at C3 to exercise absolute coordinates.
    sheet.merge_range(2, 2, 2, 4, "Consolidated Balance Sheets (USD $)", &Format::new())?;
    sheet.write_string(3, 2, "Line Item")?;
    sheet.write_number(3, 3, 2022)?;
    sheet.write_number(3, 4, 2023)?;
    sheet.write_string(4, 2, "Total assets")?;
    sheet.write_string(4, 4, "1,500,000")?;
    sheet.write_string(5, 2, "Total liabilities")?;
    sheet.write_string(5, 4, "(600,000)")?;
    sheet.write_string(6, 2, "Total stockholders' equity")?;
    sheet.write_number(6, 4, 900_000)?;
    sheet.write_boolean(7, 2, true)?;

    writer.save(&path)?;
    Ok(path)
}

#[test]
fn test_sheet_names_in_workbook_order() -> TestResult {
    let dir = TempDir::new()?;
    let workbook = XlsxWorkbook::open(write_filing(dir.path())?)?;
    assert_eq!(workbook.sheet_names(), vec!["Cover", "Consolidated Balance Sheets"]);
    Ok(())
}

#[test]
fn test_merged_cells_carry_anchor_value() -> TestResult {
    let dir = TempDir::new()?;
    let mut workbook = XlsxWorkbook::open(write_filing(dir.path())?)?;
    let grid = workbook.read_sheet("Consolidated Balance Sheets")?;

    let title = Cell::text("Consolidated Balance Sheets (USD $)");
    for col in 2..=4 {
        assert_eq!(grid.get(2, col), Some(&title));
    }
    Ok(())
}

#[test]
fn test_coordinates_are_absolute() -> TestResult {
    let dir = TempDir::new()?;
    let mut workbook = XlsxWorkbook::open(write_filing(dir.path())?)?;
    let grid = workbook.read_sheet("Consolidated Balance Sheets")?;

    assert_eq!(grid.get(0, 0), Some(&Cell::Empty));
    assert_eq!(grid.get(3, 2), Some(&Cell::text("Line Item")));
    assert_eq!(grid.get(3, 3), Some(&Cell::Number(2022.0)));
    assert_eq!(grid.get(7, 2), Some(&Cell::text("TRUE")));
    Ok(())
}

#[test]
fn test_table_from_real_workbook() -> TestResult {
    let dir = TempDir::new()?;
    let mut workbook = XlsxWorkbook::open(write_filing(dir.path())?)?;
    let grid = workbook.read_sheet("Consolidated Balance Sheets")?;

    let table = extract_table(&grid, &TableOptions::default()).ok_or("no table")?;
    // The merged title row is a header row too: it has text past the label column.
    assert_eq!(table.header_rows(), 2);
    assert_eq!(table.header()[0], "Consolidated Balance Sheets (USD $) Line Item");
    assert_eq!(table.header()[2], "Consolidated Balance Sheets (USD $) 2023");
    assert_eq!(table.len(), 3);
    assert_eq!(normalize_number(&table.rows()[1][2]), Some(-600_000.0));

    let fixed = TableOptions::default().with_header_rows(HeaderRows::Fixed(1));
    let table = extract_table(&grid, &fixed).ok_or("no table")?;
    assert_eq!(table.len(), 4);
    Ok(())
}

#[test]
fn test_sheet_info() -> TestResult {
    let dir = TempDir::new()?;
    let mut workbook = XlsxWorkbook::open(write_filing(dir.path())?)?;
    let info = workbook.sheet_info()?;
    assert_eq!(info.len(), 2);
    assert_eq!(info[1].name, "Consolidated Balance Sheets");
    assert_eq!((info[1].rows, info[1].columns), (8, 5));
    Ok(())
}

#[test]
fn test_unknown_sheet() -> TestResult {
    let dir = TempDir::new()?;
    let mut workbook = XlsxWorkbook::open(write_filing(dir.path())?)?;
    assert!(matches!(workbook.read_sheet("Cash Flows"), Err(SheetError::SheetNotFound(_))));
    Ok(())
}

#[test]
fn test_open_missing_file() {
    let err = XlsxWorkbook::open("/nonexistent/filing.xlsx").unwrap_err();
    assert!(matches!(err, SheetError::Open { .. }));
}
