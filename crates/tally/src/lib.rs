#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/tally-rs/tally/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod batch;
pub mod config;
pub mod error;
pub mod extractor;
pub mod metadata;
pub mod selector;
pub mod tables;

// Re-export main types from sub-crates
pub use tally_fields as fields;
pub use tally_output as output;
pub use tally_sheet as sheet;

pub use batch::{
    BatchResult, FilingError, FilingExtraction, extract_batch, extract_batch_with_progress, extract_filing,
    extract_workbook,
};
pub use config::{ConfigError, ExtractionConfig};
pub use error::{ExtractError, Result};
pub use extractor::StatementExtractor;
pub use metadata::parse_metadata;
pub use selector::{FilingProfile, SheetSelector, selector_for};
pub use tables::{TableBatch, TableKind, extract_filing_tables, extract_sheet_tables, extract_table_batch};
pub use tally_fields::{ExtractedRecord, FilingMetadata, StatementKind};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
