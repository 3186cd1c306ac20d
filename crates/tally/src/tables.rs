//! Sheet tables picked by keyword and kept as they appear in the filing.
//!
//! Proxy statements, annual reports, insider filings, current reports and
//! registration statements carry tables that have no canonical field
//! dictionary: executive pay, ownership, employees, offering terms. Each
//! [`TableKind`] names one of them and the sheet keywords that find it.

use crate::batch::FilingError;
use crate::config::ExtractionConfig;
use crate::error::{ExtractError, Result};
use crate::metadata::parse_metadata;
use crate::selector::SheetSelector;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tally_fields::FilingMetadata;
use tally_output::{ExportFormat, Exporter, SheetTable};
use tally_sheet::{HeaderRows, TableOptions, Workbook, XlsxWorkbook, extract_table};
use tracing::{debug, info, warn};

/// A kind of table exported with its own header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    /// Summary compensation of named executives (DEF 14A, 10-K)
    ExecutiveCompensation,
    /// Director compensation (DEF 14A)
    DirectorCompensation,
    /// Security ownership of beneficial owners and management
    BeneficialOwnership,
    /// Fees paid to the auditor (DEF 14A)
    AuditFees,
    /// Stock and option awards (DEF 14A)
    StockAwards,
    /// Headcount (10-K)
    Employees,
    /// Properties held or leased (10-K)
    Properties,
    /// Non-derivative securities acquired or disposed of (Form 4, Table I)
    NonDerivativeTransactions,
    /// Derivative securities acquired or disposed of (Form 4, Table II)
    DerivativeTransactions,
    /// Debt payment schedules (8-K)
    PaymentSchedule,
    /// Offering terms (S-1 and other registration statements)
    OfferingInformation,
    /// Use of proceeds (registration statements)
    UseOfProceeds,
}

impl TableKind {
    /// Every kind, in output order.
    pub const ALL: [Self; 12] = [
        Self::ExecutiveCompensation,
        Self::DirectorCompensation,
        Self::BeneficialOwnership,
        Self::AuditFees,
        Self::StockAwards,
        Self::Employees,
        Self::Properties,
        Self::NonDerivativeTransactions,
        Self::DerivativeTransactions,
        Self::PaymentSchedule,
        Self::OfferingInformation,
        Self::UseOfProceeds,
    ];

    /// Snake-case identifier, also the prefix of exported file names.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExecutiveCompensation => "executive_compensation",
            Self::DirectorCompensation => "director_compensation",
            Self::BeneficialOwnership => "beneficial_ownership",
            Self::AuditFees => "audit_fees",
            Self::StockAwards => "stock_awards",
            Self::Employees => "employees",
            Self::Properties => "properties",
            Self::NonDerivativeTransactions => "non_derivative_transactions",
            Self::DerivativeTransactions => "derivative_transactions",
            Self::PaymentSchedule => "payment_schedule",
            Self::OfferingInformation => "offering_information",
            Self::UseOfProceeds => "use_of_proceeds",
        }
    }

    /// Sheet keywords for this table.
    pub const fn selector(self) -> SheetSelector {
        match self {
            Self::ExecutiveCompensation => SheetSelector {
                groups: &[&["summary compensation"], &["executive compensation", "compensation"]],
                require_any: &[],
                exclude: &["director"],
            },
            Self::DirectorCompensation => SheetSelector {
                groups: &[&["director compensation"], &["director"]],
                require_any: &[],
                exclude: &[],
            },
            Self::BeneficialOwnership => SheetSelector {
                groups: &[&["beneficial ownership", "security ownership", "ownership table"], &["ownership"]],
                require_any: &[],
                exclude: &["compensation"],
            },
            Self::AuditFees => SheetSelector { groups: &[&["audit fees"], &["audit", "fees"]], require_any: &[], exclude: &[] },
            Self::StockAwards => SheetSelector {
                groups: &[&["option grants", "stock awards", "option awards"]],
                require_any: &[],
                exclude: &[],
            },
            Self::Employees => SheetSelector { groups: &[&["employees", "employee"]], require_any: &[], exclude: &[] },
            Self::Properties => SheetSelector {
                groups: &[&["item 2 properties", "properties"], &["property"]],
                require_any: &[],
                exclude: &["equipment"],
            },
            Self::NonDerivativeTransactions => SheetSelector {
                groups: &[&["non-derivative", "nonderivative"]],
                require_any: &[],
                exclude: &[],
            },
            Self::DerivativeTransactions => SheetSelector {
                groups: &[&["derivative"]],
                require_any: &[],
                exclude: &["non-derivative", "nonderivative"],
            },
            Self::PaymentSchedule => SheetSelector {
                groups: &[&["installment", "payment schedule"], &["payment", "schedule", "principal"]],
                require_any: &[],
                exclude: &[],
            },
            Self::OfferingInformation => {
                SheetSelector { groups: &[&["offering", "prospectus"]], require_any: &[], exclude: &["proceeds"] }
            }
            Self::UseOfProceeds => {
                SheetSelector { groups: &[&["use of proceeds", "proceeds"]], require_any: &[], exclude: &[] }
            }
        }
    }

    /// Header rows of the table. Form 4 tables number their columns in a
    /// second header row.
    pub const fn header_rows(self) -> HeaderRows {
        match self {
            Self::NonDerivativeTransactions | Self::DerivativeTransactions => HeaderRows::Fixed(2),
            _ => HeaderRows::Fixed(1),
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableKind {
    type Err = ExtractError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match key.as_str() {
            "executive_compensation" | "compensation" => Ok(Self::ExecutiveCompensation),
            "director_compensation" => Ok(Self::DirectorCompensation),
            "beneficial_ownership" | "ownership" => Ok(Self::BeneficialOwnership),
            "audit_fees" => Ok(Self::AuditFees),
            "stock_awards" | "option_grants" => Ok(Self::StockAwards),
            "employees" => Ok(Self::Employees),
            "properties" => Ok(Self::Properties),
            "non_derivative_transactions" | "nonderivative_transactions" => Ok(Self::NonDerivativeTransactions),
            "derivative_transactions" => Ok(Self::DerivativeTransactions),
            "payment_schedule" => Ok(Self::PaymentSchedule),
            "offering_information" | "offering" => Ok(Self::OfferingInformation),
            "use_of_proceeds" | "proceeds" => Ok(Self::UseOfProceeds),
            _ => Err(ExtractError::UnknownTable(s.to_string())),
        }
    }
}

/// Finds and extracts each requested table kind from an open workbook.
///
/// Candidates are tried in selector order and the first sheet yielding a
/// table wins. Kinds with no matching sheet are left out.
pub fn extract_sheet_tables<W: Workbook + ?Sized>(
    workbook: &mut W,
    metadata: &FilingMetadata,
    kinds: &[TableKind],
    config: &ExtractionConfig,
) -> Vec<SheetTable> {
    let names = workbook.sheet_names();
    let mut tables = Vec::new();
    for kind in kinds {
        let options = TableOptions::default()
            .with_min_non_null(config.min_non_null)
            .with_header_rows(kind.header_rows())
            .with_join(config.header_join);
        let found = kind.selector().candidates(&names).into_iter().find_map(|sheet| {
            let grid = match workbook.read_sheet(&sheet) {
                Ok(grid) => grid,
                Err(e) => {
                    warn!(table = %kind, sheet = %sheet, error = %e, "skipping unreadable sheet");
                    return None;
                }
            };
            extract_table(&grid, &options).map(|table| (sheet, table))
        });
        match found {
            Some((sheet, table)) => {
                debug!(table = %kind, sheet = %sheet, rows = table.len(), "selected sheet");
                tables.push(SheetTable::new(kind.as_str(), sheet, metadata.clone(), table));
            }
            None => debug!(table = %kind, "no sheet holds this table"),
        }
    }
    tables
}

/// Opens one filing and extracts the requested tables.
pub fn extract_filing_tables(
    path: impl AsRef<Path>,
    kinds: &[TableKind],
    config: &ExtractionConfig,
) -> Result<Vec<SheetTable>> {
    let path = path.as_ref();
    let metadata = parse_metadata(path);
    let mut workbook = XlsxWorkbook::open(path)?;
    let tables = extract_sheet_tables(&mut workbook, &metadata, kinds, config);
    info!(file = %metadata.filename, tables = tables.len(), "extracted sheet tables");
    Ok(tables)
}

/// Outcome of extracting sheet tables from many filings.
#[derive(Debug, Default)]
pub struct TableBatch {
    /// Tables found, in input order
    pub tables: Vec<SheetTable>,
    /// Filings that failed, in input order
    pub failures: Vec<FilingError>,
}

impl TableBatch {
    /// Writes one file per table into `dir` and returns the paths written.
    ///
    /// Two tables that would share a name, such as the same kind from two
    /// filings of one day, get `_2`, `_3` and so on before the extension.
    pub fn export(&self, dir: impl AsRef<Path>, format: ExportFormat) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let mut used = HashSet::new();
        let mut written = Vec::new();
        for table in &self.tables {
            let name = unique_name(&table.file_name(format), format, &mut used);
            let path = dir.join(name);
            table.export_to_file(&path, format)?;
            info!(path = %path.display(), rows = table.table().len(), "exported {}", table.name());
            written.push(path);
        }
        Ok(written)
    }
}

fn unique_name(name: &str, format: ExportFormat, used: &mut HashSet<String>) -> String {
    let stem = name.strip_suffix(&format!(".{}", format.extension())).unwrap_or(name);
    let mut candidate = name.to_string();
    let mut n = 1;
    while !used.insert(candidate.clone()) {
        n += 1;
        candidate = format!("{stem}_{n}.{}", format.extension());
    }
    candidate
}

/// Extracts sheet tables from a set of filings, continuing past files that
/// fail.
pub fn extract_table_batch<I, P>(paths: I, kinds: &[TableKind], config: &ExtractionConfig) -> TableBatch
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut batch = TableBatch::default();
    for path in paths {
        let path = path.as_ref();
        match extract_filing_tables(path, kinds, config) {
            Ok(tables) => batch.tables.extend(tables),
            Err(error) => {
                warn!(file = %path.display(), error = %error, "failed to extract filing");
                batch.failures.push(FilingError { path: path.to_path_buf(), error });
            }
        }
    }
    batch
}
