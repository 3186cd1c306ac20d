//! Extraction configuration.

use crate::selector::FilingProfile;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tally_fields::StatementKind;
use tally_sheet::{DEFAULT_MIN_NON_NULL, HeaderJoin, HeaderRows, Scale, TableOptions};
use thiserror::Error;

/// Errors loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read config {path}: {source}")]
    Io {
        /// Config path
        path: String,
        /// Underlying error
        source: std::io::Error,
    },

    /// The file is not valid configuration JSON
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A value is out of range
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Configuration for extraction runs.
///
/// Every field has a default, so a config file only needs the keys it
/// changes:
///
/// ```json
/// { "reported_in_thousands": true,
///   "thousands_overrides": { "earnings_per_share": false },
///   "header_rows": { "balance_sheet": { "fixed": 2 } } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Minimum non-empty cells for a row or column to belong to a table
    pub min_non_null: usize,
    /// Header rows used when a statement has no override
    pub header_rows: HeaderRows,
    /// Per-statement header row overrides
    pub header_overrides: BTreeMap<StatementKind, HeaderRows>,
    /// Separator for multi-row headers
    pub header_join: HeaderJoin,
    /// Scale amounts by 1,000
    pub reported_in_thousands: bool,
    /// Per-statement overrides of `reported_in_thousands`
    pub thousands_overrides: BTreeMap<StatementKind, bool>,
    /// Statements to extract, in output order
    pub statements: Vec<StatementKind>,
    /// Keyword profile; detected from the file name when unset
    pub profile: Option<FilingProfile>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_non_null: DEFAULT_MIN_NON_NULL,
            header_rows: HeaderRows::default(),
            header_overrides: BTreeMap::new(),
            header_join: HeaderJoin::default(),
            reported_in_thousands: false,
            thousands_overrides: BTreeMap::new(),
            statements: StatementKind::ALL.to_vec(),
            profile: None,
        }
    }
}

impl ExtractionConfig {
    /// Loads and validates a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.display().to_string(), source })?;
        Self::from_json(&content)
    }

    /// Loads a config file, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> crate::Result<Self> {
        match path {
            Some(path) => Ok(Self::from_file(path)?),
            None => Ok(Self::default()),
        }
    }

    /// Parses and validates a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_non_null == 0 {
            return Err(ConfigError::Invalid("min_non_null must be at least 1".into()));
        }
        let all_rows = std::iter::once(&self.header_rows).chain(self.header_overrides.values());
        for rows in all_rows {
            if matches!(rows, HeaderRows::Fixed(0) | HeaderRows::Auto { max: 0 }) {
                return Err(ConfigError::Invalid("header rows must be at least 1".into()));
            }
        }
        Ok(())
    }

    /// Restricts extraction to the given statements.
    #[must_use]
    pub fn with_statements(mut self, statements: impl IntoIterator<Item = StatementKind>) -> Self {
        self.statements = statements.into_iter().collect();
        self
    }

    /// Whether a statement is extracted.
    pub fn is_enabled(&self, kind: StatementKind) -> bool {
        self.statements.contains(&kind)
    }

    /// Unit scale applied to amounts of statements without an override.
    pub const fn scale(&self) -> Scale {
        if self.reported_in_thousands { Scale::Thousands } else { Scale::Units }
    }

    /// Unit scale applied to amounts of one statement.
    pub fn scale_for(&self, kind: StatementKind) -> Scale {
        match self.thousands_overrides.get(&kind) {
            Some(true) => Scale::Thousands,
            Some(false) => Scale::Units,
            None => self.scale(),
        }
    }

    /// Marks one statement as reported in thousands, or not.
    #[must_use]
    pub fn with_thousands(mut self, kind: StatementKind, thousands: bool) -> Self {
        self.thousands_overrides.insert(kind, thousands);
        self
    }

    /// Table options for one statement.
    pub fn table_options(&self, kind: StatementKind) -> TableOptions {
        let header_rows = self.header_overrides.get(&kind).copied().unwrap_or(self.header_rows);
        TableOptions::default()
            .with_min_non_null(self.min_non_null)
            .with_header_rows(header_rows)
            .with_join(self.header_join)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExtractionConfig::default();
        assert_eq!(config.min_non_null, 2);
        assert_eq!(config.scale(), Scale::Units);
        assert_eq!(config.statements.len(), 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = ExtractionConfig::from_json(
            r#"{ "reported_in_thousands": true,
                 "statements": ["balance_sheet", "cash_flow"],
                 "header_overrides": { "balance_sheet": { "fixed": 2 } } }"#,
        )
        .unwrap();
        assert_eq!(config.scale(), Scale::Thousands);
        assert!(config.is_enabled(StatementKind::CashFlow));
        assert!(!config.is_enabled(StatementKind::IncomeStatement));
        assert_eq!(config.table_options(StatementKind::BalanceSheet).header_rows, HeaderRows::Fixed(2));
        assert_eq!(config.table_options(StatementKind::CashFlow).header_rows, HeaderRows::Auto { max: 3 });
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(ExtractionConfig::from_json(r#"{"min_non_null": 0}"#), Err(ConfigError::Invalid(_))));
        assert!(matches!(
            ExtractionConfig::from_json(r#"{"header_rows": {"fixed": 0}}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(ExtractionConfig::from_json("{"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = ExtractionConfig::from_file("/nonexistent/tally.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));

        let err = ExtractionConfig::load(Some(Path::new("/nonexistent/tally.json"))).unwrap_err();
        assert!(matches!(err, crate::ExtractError::Config(ConfigError::Io { .. })));
        assert_eq!(ExtractionConfig::load(None).unwrap(), ExtractionConfig::default());
    }

    #[test]
    fn test_per_statement_thousands() {
        let config = ExtractionConfig::from_json(
            r#"{ "reported_in_thousands": true,
                 "thousands_overrides": { "earnings_per_share": false } }"#,
        )
        .unwrap();
        assert_eq!(config.scale_for(StatementKind::BalanceSheet), Scale::Thousands);
        assert_eq!(config.scale_for(StatementKind::EarningsPerShare), Scale::Units);

        let config = ExtractionConfig::default().with_thousands(StatementKind::CashFlow, true);
        assert_eq!(config.scale_for(StatementKind::CashFlow), Scale::Thousands);
        assert_eq!(config.scale_for(StatementKind::IncomeStatement), Scale::Units);
    }

    #[test]
    fn test_round_trip() {
        let config = ExtractionConfig::default().with_statements([StatementKind::EarningsPerShare]);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(ExtractionConfig::from_json(&json).unwrap(), config);
    }
}
