#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/tally-rs/tally/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod dictionary;
pub mod error;
pub mod record;
pub mod registry;
pub mod resolver;
pub mod statement;
pub mod statements;

pub use dictionary::{DerivedField, DerivedRule, FieldDictionary, FieldSpec, SignConvention, ValueKind};
pub use error::{FieldError, Result};
pub use record::{ExtractedRecord, FilingMetadata};
pub use registry::{
    available_dictionaries, count_by_kind, dictionary_for, field_map, get_field_spec, list_field_names,
};
pub use resolver::{FieldValues, Resolution, normalize_label, resolve, resolve_all, resolve_value};
pub use statement::StatementKind;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
