#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/tally-rs/tally/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod bounds;
pub mod cell;
pub mod error;
pub mod grid;
pub mod header;
pub mod normalize;
pub mod table;
pub mod workbook;

pub use bounds::{DEFAULT_MIN_NON_NULL, TableBounds, detect_bounds};
pub use cell::Cell;
pub use error::{Result, SheetError};
pub use grid::{MergeRegion, RawGrid};
pub use header::{HeaderJoin, HeaderRows, resolve_header};
pub use normalize::{Scale, is_year_like, normalize_date, normalize_number};
pub use table::{ResolvedTable, TableOptions, extract_table};
pub use workbook::{MemorySheet, MemoryWorkbook, SheetInfo, Workbook, XlsxWorkbook};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
