#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/tally-rs/tally/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod report;
pub mod sheet_table;
pub mod table;

pub use export::{ExportError, ExportFormat, Exporter};
pub use report::{FileFailure, ReportError, RunReport, RunReportBuilder, StatementCoverage};
pub use sheet_table::SheetTable;
pub use table::StatementTable;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
