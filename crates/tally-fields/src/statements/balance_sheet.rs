//! Balance sheet fields.
//!
//! Asset and liability totals are magnitudes: some filings wrap them in
//! parentheses for presentation. Equity keeps its sign, since a deficit is
//! a real negative value.

use crate::dictionary::{FieldDictionary, FieldSpec};
use crate::statement::StatementKind;

/// Balance sheet fields in output order.
pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::magnitude("total_assets", &["total assets"], "Total assets"),
    FieldSpec::magnitude(
        "current_assets",
        &["total current assets", "current assets"],
        "Total current assets",
    ),
    FieldSpec::magnitude("total_liabilities", &["total liabilities"], "Total liabilities"),
    FieldSpec::magnitude(
        "current_liabilities",
        &["total current liabilities", "current liabilities"],
        "Total current liabilities",
    ),
    FieldSpec::amount(
        "stockholders_equity",
        &[
            "total stockholders' equity",
            "total controlling stockholders' equity",
            "total stockholders equity",
            "stockholders equity",
            "shareholders equity",
            "total equity",
        ],
        "Total stockholders' equity",
    ),
    FieldSpec::magnitude("cash", &["cash and cash equivalents", "cash"], "Cash and cash equivalents"),
    FieldSpec::magnitude("inventory", &["inventory", "inventories"], "Inventory"),
    FieldSpec::magnitude(
        "accounts_receivable",
        &["accounts receivable", "trade receivables"],
        "Accounts receivable",
    ),
];

/// The balance sheet dictionary.
pub const fn dictionary() -> FieldDictionary {
    FieldDictionary { kind: StatementKind::BalanceSheet, fields: FIELDS, derived: &[] }
}
