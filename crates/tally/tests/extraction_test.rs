//! End-to-end extraction from `.xlsx` filings written with `rust_xlsxwriter`.

use approx::assert_relative_eq;
use rust_xlsxwriter::{Format, Workbook as XlsxWriter};
use std::path::{Path, PathBuf};
use tally::output::{ExportFormat, Exporter};
use tally::{
    ExtractError, ExtractionConfig, StatementKind, TableKind, extract_batch, extract_filing, extract_table_batch,
};
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn write_filing(dir: &Path, date: &str, assets: f64) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = dir.join(format!("ACME (Acme Corp) Quarterly Report (10-Q) {date}.xlsx"));
    let mut writer = XlsxWriter::new();

    let cover = writer.add_worksheet();
    cover.set_name("Cover")?;
    cover.write_string(0, 0, "Document and Entity Information")?;
    cover.write_string(1, 0, "Entity Registrant Name")?;
    cover.write_string(1, 1, "Acme Corp")?;

    let balance = writer.add_worksheet();
    balance.set_name("Consolidated Balance Sheets")?;
    balance.merge_range(0, 0, 0, 2, "Consolidated Balance Sheets (USD $)", &Format::new())?;
    balance.write_string(1, 0, "Line Item")?;
    balance.write_number(1, 1, 2023)?;
    balance.write_number(1, 2, 2024)?;
    balance.write_string(2, 0, "Total assets")?;
    balance.write_number(2, 2, assets)?;
    balance.write_string(3, 0, "Total liabilities")?;
    balance.write_string(3, 2, "(600,000)")?;
    balance.write_string(4, 0, "Total stockholders' equity")?;
    balance.write_string(4, 2, "900,000")?;

    let income = writer.add_worksheet();
    income.set_name("Statements of Operations")?;
    income.write_string(0, 0, "Line Item")?;
    income.write_string(0, 1, "3 Months Ended Mar. 31, 2024")?;
    income.write_string(1, 0, "Revenue")?;
    income.write_number(1, 1, 1000)?;
    income.write_string(2, 0, "Cost of revenue")?;
    income.write_string(2, 1, "(400)")?;
    income.write_string(3, 0, "Net income")?;
    income.write_number(3, 1, 120)?;

    let cash = writer.add_worksheet();
    cash.set_name("Statements of Cash Flows")?;
    cash.write_string(0, 0, "Line Item")?;
    cash.write_string(0, 1, "3 Months Ended")?;
    cash.write_string(1, 0, "Net cash provided by operating activities")?;
    cash.write_number(1, 1, 300)?;
    cash.write_string(2, 0, "Purchases of property and equipment")?;
    cash.write_number(2, 1, -50)?;

    writer.save(&path)?;
    Ok(path)
}

#[test]
fn test_balance_sheet_end_to_end() -> TestResult {
    let dir = TempDir::new()?;
    let path = write_filing(dir.path(), "2024-03-31", 1_500_000.0)?;

    let filing = extract_filing(&path, &ExtractionConfig::default())?;
    assert_eq!(filing.metadata.ticker.as_deref(), Some("ACME"));
    assert_eq!(filing.metadata.form_code.as_deref(), Some("10-Q"));

    let balance = filing.record(StatementKind::BalanceSheet).ok_or("no balance sheet")?;
    assert_eq!(balance.sheet, "Consolidated Balance Sheets");
    assert_eq!(balance.get("total_assets"), Some(1_500_000.0));
    assert_eq!(balance.get("total_liabilities"), Some(600_000.0));
    assert_eq!(balance.get("stockholders_equity"), Some(900_000.0));
    assert_eq!(balance.get("cash"), None);
    Ok(())
}

#[test]
fn test_income_and_cash_flow_derived_fields() -> TestResult {
    let dir = TempDir::new()?;
    let path = write_filing(dir.path(), "2024-03-31", 1.0)?;

    let filing = extract_filing(&path, &ExtractionConfig::default())?;
    let income = filing.record(StatementKind::IncomeStatement).ok_or("no income statement")?;
    assert_relative_eq!(income.get("revenue").ok_or("no revenue")?, 1000.0);
    assert_relative_eq!(income.get("gross_profit").ok_or("no gross profit")?, 600.0);
    assert_relative_eq!(income.get("net_income").ok_or("no net income")?, 120.0);

    let cash = filing.record(StatementKind::CashFlow).ok_or("no cash flow")?;
    assert_relative_eq!(cash.get("free_cash_flow").ok_or("no free cash flow")?, 250.0);

    assert!(filing.record(StatementKind::EarningsPerShare).is_none());
    Ok(())
}

#[test]
fn test_thousands_scale() -> TestResult {
    let dir = TempDir::new()?;
    let path = write_filing(dir.path(), "2024-03-31", 1_500.0)?;

    let config = ExtractionConfig { reported_in_thousands: true, ..Default::default() };
    let filing = extract_filing(&path, &config)?;
    let balance = filing.record(StatementKind::BalanceSheet).ok_or("no balance sheet")?;
    assert_eq!(balance.get("total_assets"), Some(1_500_000.0));
    Ok(())
}

#[test]
fn test_batch_continues_past_corrupt_file() -> TestResult {
    let dir = TempDir::new()?;
    let june = write_filing(dir.path(), "2024-06-30", 2_500.0)?;
    let corrupt = dir.path().join("BROKEN (Broken Inc) Quarterly Report (10-Q) 2024-05-31.xlsx");
    std::fs::write(&corrupt, b"not a zip archive")?;
    let march = write_filing(dir.path(), "2024-03-31", 1_000.0)?;

    let batch = extract_batch([&june, &corrupt, &march], &ExtractionConfig::default());
    assert_eq!(batch.filings.len(), 2);
    assert_eq!(batch.failures.len(), 1);
    assert_eq!(batch.failures[0].path, corrupt);
    assert!(matches!(batch.failures[0].error, ExtractError::Sheet(_)));

    let table = batch.table(StatementKind::BalanceSheet);
    let dates: Vec<String> =
        table.records().iter().filter_map(|r| r.filing_date()).map(|d| d.to_string()).collect();
    assert_eq!(dates, vec!["2024-03-31", "2024-06-30"]);

    let report = batch.report();
    assert_eq!(report.files_total, 3);
    assert_eq!(report.files_succeeded(), 2);
    Ok(())
}

#[test]
fn test_export_writes_one_file_per_statement() -> TestResult {
    let dir = TempDir::new()?;
    let path = write_filing(dir.path(), "2024-03-31", 1_500_000.0)?;
    let out = dir.path().join("out");

    let config = ExtractionConfig::default().with_statements([StatementKind::BalanceSheet, StatementKind::CashFlow]);
    let batch = extract_batch([&path], &config);
    let written = batch.export(&out, ExportFormat::Csv)?;
    assert_eq!(written, vec![out.join("balance_sheet.csv"), out.join("cash_flow.csv")]);

    let csv = std::fs::read_to_string(out.join("balance_sheet.csv"))?;
    let mut lines = csv.lines();
    assert!(lines.next().ok_or("empty csv")?.starts_with("date,source_file,total_assets"));
    let row = lines.next().ok_or("no data row")?;
    assert!(row.starts_with("2024-03-31,ACME (Acme Corp) Quarterly Report (10-Q) 2024-03-31.xlsx,1500000"));

    let json = batch.table(StatementKind::BalanceSheet).export_to_string(ExportFormat::Json)?;
    let parsed: serde_json::Value = serde_json::from_str(&json)?;
    assert_eq!(parsed[0]["total_liabilities"], 600_000.0);
    Ok(())
}

#[test]
fn test_proxy_tables_export() -> TestResult {
    let dir = TempDir::new()?;
    let path = dir.path().join("ACME (Acme Corp) Proxy Statement (DEF 14A) 2024-04-15.xlsx");
    let mut writer = XlsxWriter::new();

    let comp = writer.add_worksheet();
    comp.set_name("Summary Compensation Table")?;
    comp.write_string(0, 0, "Name and Principal Position")?;
    comp.write_string(0, 1, "Year")?;
    comp.write_string(0, 2, "Salary ($)")?;
    comp.write_string(1, 0, "Jane Doe, CEO")?;
    comp.write_number(1, 1, 2023)?;
    comp.write_string(1, 2, "$450,000")?;
    comp.write_string(2, 0, "John Roe, CFO")?;
    comp.write_number(2, 1, 2023)?;
    comp.write_number(2, 2, 300_000)?;

    let owners = writer.add_worksheet();
    owners.set_name("Security Ownership")?;
    owners.write_string(0, 0, "Beneficial Owner")?;
    owners.write_string(0, 1, "Shares")?;
    owners.write_string(1, 0, "Jane Doe")?;
    owners.write_string(1, 1, "1,000,000")?;
    writer.save(&path)?;

    let kinds = [TableKind::ExecutiveCompensation, TableKind::BeneficialOwnership, TableKind::AuditFees];
    let batch = extract_table_batch([&path], &kinds, &ExtractionConfig::default());
    assert!(batch.failures.is_empty());
    assert_eq!(batch.tables.len(), 2);

    let out = dir.path().join("tables");
    let written = batch.export(&out, ExportFormat::Csv)?;
    assert_eq!(
        written,
        vec![out.join("executive_compensation_20240415.csv"), out.join("beneficial_ownership_20240415.csv")]
    );

    let csv = std::fs::read_to_string(&written[0])?;
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "Name and Principal Position,Year,Salary ($)");
    assert_eq!(lines[1], "\"Jane Doe, CEO\",2023,450000");
    assert_eq!(lines[2], "\"John Roe, CFO\",2023,300000");

    let csv = std::fs::read_to_string(&written[1])?;
    assert_eq!(csv.lines().collect::<Vec<_>>(), ["Beneficial Owner,Shares", "Jane Doe,1000000"]);
    Ok(())
}
