//! Earnings per share note fields.

use crate::dictionary::{FieldDictionary, FieldSpec};
use crate::statement::StatementKind;

/// EPS note fields in output order.
pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::amount(
        "net_income",
        &["net loss attributable to common stockholders", "net income", "net loss"],
        "Net income (loss) used for EPS",
    ),
    FieldSpec::count(
        "weighted_shares_basic",
        &[
            "weighted average shares outstanding, basic",
            "weighted average common shares outstanding, basic",
            "weighted-average shares outstanding",
            "weighted average shares",
        ],
        "Weighted average shares, basic",
    ),
    FieldSpec::count(
        "weighted_shares_diluted",
        &[
            "weighted average shares outstanding, diluted",
            "weighted average common shares outstanding, diluted",
            "diluted weighted average shares",
        ],
        "Weighted average shares, diluted",
    ),
    FieldSpec::per_share(
        "eps_basic",
        &["basic and diluted net loss per share", "basic earnings per share", "basic eps", "basic"],
        "Basic earnings per share",
    ),
    FieldSpec::per_share(
        "eps_diluted",
        &["basic and diluted net loss per share", "diluted earnings per share", "diluted eps", "diluted"],
        "Diluted earnings per share",
    ),
];

/// The earnings per share dictionary.
pub const fn dictionary() -> FieldDictionary {
    FieldDictionary { kind: StatementKind::EarningsPerShare, fields: FIELDS, derived: &[] }
}
