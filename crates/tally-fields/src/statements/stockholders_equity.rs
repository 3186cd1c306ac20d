//! Statement of stockholders' equity fields.

use crate::dictionary::{FieldDictionary, FieldSpec};
use crate::statement::StatementKind;

/// Equity statement fields in output order.
pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::amount("common_stock", &["common stock"], "Common stock at par"),
    FieldSpec::amount(
        "additional_paid_in_capital",
        &["additional paid-in capital", "additional paid in capital", "paid-in capital"],
        "Additional paid-in capital",
    ),
    FieldSpec::amount(
        "accumulated_deficit",
        &["accumulated deficit", "retained earnings", "accumulated earnings"],
        "Accumulated deficit or retained earnings",
    ),
    FieldSpec::amount(
        "stock_based_compensation",
        &["stock-based compensation", "stock based compensation", "share-based compensation"],
        "Stock-based compensation",
    ),
    FieldSpec::amount(
        "total_stockholders_equity",
        &[
            "total stockholders' equity",
            "total stockholders equity",
            "total shareholders equity",
            "total equity",
        ],
        "Total stockholders' equity",
    ),
];

/// The stockholders' equity dictionary.
pub const fn dictionary() -> FieldDictionary {
    FieldDictionary { kind: StatementKind::StockholdersEquity, fields: FIELDS, derived: &[] }
}
