//! Field Registry
//!
//! Central registry of the field dictionaries. Allows lookup of a statement's
//! dictionary or a single field by name.

use crate::dictionary::{FieldDictionary, FieldSpec};
use crate::error::{FieldError, Result};
use crate::statement::StatementKind;
use crate::statements;
use std::collections::HashMap;

/// Get every dictionary, in statement output order
pub fn available_dictionaries() -> Vec<FieldDictionary> {
    StatementKind::ALL.into_iter().map(dictionary_for).collect()
}

/// Get the dictionary for a statement kind
pub const fn dictionary_for(kind: StatementKind) -> FieldDictionary {
    match kind {
        StatementKind::BalanceSheet => statements::balance_sheet::dictionary(),
        StatementKind::IncomeStatement => statements::income_statement::dictionary(),
        StatementKind::CashFlow => statements::cash_flow::dictionary(),
        StatementKind::RevenueBreakdown => statements::revenue_breakdown::dictionary(),
        StatementKind::StockholdersEquity => statements::stockholders_equity::dictionary(),
        StatementKind::EarningsPerShare => statements::earnings_per_share::dictionary(),
    }
}

/// Get a field spec by statement and name
///
/// Derived fields are not specs and report [`FieldError::UnknownField`].
pub fn get_field_spec(kind: StatementKind, name: &str) -> Result<FieldSpec> {
    dictionary_for(kind)
        .field(name)
        .copied()
        .ok_or_else(|| FieldError::UnknownField { statement: kind.to_string(), field: name.to_string() })
}

/// Get a map of a statement's fields indexed by name
pub fn field_map(kind: StatementKind) -> HashMap<&'static str, FieldSpec> {
    dictionary_for(kind).fields.iter().map(|f| (f.name, *f)).collect()
}

/// List the output column names of a statement
pub fn list_field_names(kind: StatementKind) -> Vec<&'static str> {
    dictionary_for(kind).column_names()
}

/// Count resolved fields per statement
pub fn count_by_kind() -> HashMap<StatementKind, usize> {
    available_dictionaries().into_iter().map(|d| (d.kind, d.fields.len())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::SignConvention;
    use std::collections::HashSet;

    #[test]
    fn test_available_dictionaries() {
        let dictionaries = available_dictionaries();
        assert_eq!(dictionaries.len(), 6);
        for (dictionary, kind) in dictionaries.iter().zip(StatementKind::ALL) {
            assert_eq!(dictionary.kind, kind);
        }
    }

    #[test]
    fn test_count_by_kind() {
        let counts = count_by_kind();
        assert_eq!(counts.get(&StatementKind::BalanceSheet), Some(&8));
        assert_eq!(counts.get(&StatementKind::IncomeStatement), Some(&11));
        assert_eq!(counts.get(&StatementKind::CashFlow), Some(&5));
        assert_eq!(counts.get(&StatementKind::RevenueBreakdown), Some(&2));
        assert_eq!(counts.get(&StatementKind::StockholdersEquity), Some(&5));
        assert_eq!(counts.get(&StatementKind::EarningsPerShare), Some(&5));
    }

    #[test]
    fn test_get_field_spec() {
        let equity = get_field_spec(StatementKind::BalanceSheet, "stockholders_equity").unwrap();
        assert_eq!(equity.synonyms[0], "total stockholders' equity");
        assert_eq!(equity.sign, SignConvention::AsReported);

        let liabilities = get_field_spec(StatementKind::BalanceSheet, "total_liabilities").unwrap();
        assert_eq!(liabilities.sign, SignConvention::Magnitude);

        assert_eq!(
            get_field_spec(StatementKind::BalanceSheet, "revenue"),
            Err(FieldError::UnknownField { statement: "balance_sheet".into(), field: "revenue".into() })
        );
        assert!(get_field_spec(StatementKind::CashFlow, "free_cash_flow").is_err());
    }

    #[test]
    fn test_field_map() {
        let map = field_map(StatementKind::CashFlow);
        assert_eq!(map.len(), 5);
        assert!(map.contains_key("capex"));
        assert!(!map.contains_key("free_cash_flow"));
    }

    #[test]
    fn test_derived_fields_are_listed_once() {
        let income = list_field_names(StatementKind::IncomeStatement);
        assert_eq!(income.iter().filter(|n| **n == "gross_profit").count(), 1);

        let cash = list_field_names(StatementKind::CashFlow);
        assert_eq!(cash.last(), Some(&"free_cash_flow"));
    }

    #[test]
    fn test_names_and_synonyms_are_well_formed() {
        for dictionary in available_dictionaries() {
            let mut names = HashSet::new();
            for field in dictionary.fields {
                assert!(names.insert(field.name), "{} repeats field {}", dictionary.kind, field.name);
                assert!(!field.synonyms.is_empty(), "{} has no synonyms", field.name);
                for synonym in field.synonyms {
                    assert_eq!(*synonym, synonym.to_lowercase(), "synonym '{synonym}' is not lower-case");
                    assert_eq!(*synonym, synonym.trim(), "synonym '{synonym}' has padding");
                }
            }
        }
    }
}
