//! Integration tests for statement tables, exports and run reports.

use chrono::NaiveDate;
use rstest::rstest;
use std::path::PathBuf;
use tally_fields::{ExtractedRecord, FilingMetadata, StatementKind};
use tally_output::{ExportFormat, Exporter, RunReportBuilder, StatementTable};
use tempfile::TempDir;

fn record(kind: StatementKind, file: &str, date: Option<(i32, u32, u32)>, values: &[(&str, f64)]) -> ExtractedRecord {
    ExtractedRecord {
        kind,
        sheet: "Sheet1".to_string(),
        metadata: FilingMetadata {
            filename: file.to_string(),
            path: PathBuf::from(file),
            filing_date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            ..Default::default()
        },
        values: values.iter().map(|(k, v)| ((*k).to_string(), Some(*v))).collect(),
    }
}

fn cash_flow_table() -> StatementTable {
    StatementTable::from_records(
        StatementKind::CashFlow,
        vec![
            record(StatementKind::CashFlow, "q2.xlsx", Some((2024, 6, 30)), &[("operating_cf", 20.0)]),
            record(StatementKind::CashFlow, "undated.xlsx", None, &[("operating_cf", 30.0)]),
            record(StatementKind::CashFlow, "q1.xlsx", Some((2024, 3, 31)), &[("operating_cf", 10.0), ("capex", 4.0)]),
            record(StatementKind::BalanceSheet, "other.xlsx", Some((2024, 1, 1)), &[("total_assets", 1.0)]),
        ],
    )
}

#[test]
fn test_full_export_workflow() {
    let table = cash_flow_table();
    assert_eq!(table.len(), 3);

    let csv = table.export_to_string(ExportFormat::Csv).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("date,source_file,operating_cf,investing_cf,financing_cf,capex"));
    assert!(lines[0].ends_with("free_cash_flow"));
    assert!(lines[1].starts_with("2024-03-31,q1.xlsx,10,,,4"));
    assert!(lines[2].starts_with("2024-06-30,q2.xlsx,20"));
    assert!(lines[3].starts_with(",undated.xlsx,30"));

    let report = table
        .records()
        .iter()
        .fold(RunReportBuilder::new().files_total(4), |b, r| b.record(r))
        .failure("broken.xlsx", "Failed to open workbook")
        .build();
    assert_eq!(report.files_succeeded(), 3);

    let ascii = report.to_ascii_table();
    assert!(ascii.contains("Cash Flow Statement"));
    assert!(ascii.contains("broken.xlsx"));

    let markdown = report.to_markdown();
    assert!(markdown.contains("| capex | 1 | 33.3% |"));
}

#[rstest]
#[case(ExportFormat::Csv, "cash_flow.csv")]
#[case(ExportFormat::Json, "cash_flow.json")]
#[case(ExportFormat::PrettyJson, "cash_flow.json")]
fn test_export_to_file(#[case] format: ExportFormat, #[case] name: &str) {
    let dir = TempDir::new().unwrap();
    let table = cash_flow_table();
    let path = dir.path().join(table.file_name(format));
    assert!(path.ends_with(name));

    table.export_to_file(&path, format).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, table.export_to_string(format).unwrap());
}

#[test]
fn test_json_rows_have_nulls_for_missing_fields() {
    let json = cash_flow_table().export_to_string(ExportFormat::Json).unwrap();
    let rows: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(rows[0]["date"], "2024-03-31");
    assert_eq!(rows[0]["capex"], 4.0);
    assert!(rows[1]["capex"].is_null());
    assert!(rows[2]["date"].is_null());
}
