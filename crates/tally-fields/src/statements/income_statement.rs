//! Income statement fields.
//!
//! Loss-oriented labels come first so that early-stage filers, whose
//! statements read "loss from operations", resolve before generic matches.

use crate::dictionary::{DerivedField, DerivedRule, FieldDictionary, FieldSpec};
use crate::statement::StatementKind;

/// Income statement fields in output order.
pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::amount(
        "revenue",
        &["revenue, net", "revenue", "total revenue", "net revenue", "sales"],
        "Total revenue",
    ),
    FieldSpec::amount(
        "cogs",
        &["cost of revenue, net", "cost of revenue", "cost of goods sold", "cost of sales", "cogs"],
        "Cost of revenue",
    ),
    FieldSpec::amount("gross_profit", &["gross profit", "gross income"], "Gross profit"),
    FieldSpec::amount(
        "operating_expenses",
        &["total operating expenses", "operating expenses"],
        "Total operating expenses",
    ),
    FieldSpec::amount(
        "operating_income",
        &["loss from operations", "income from operations", "operating income", "operating profit"],
        "Operating income (loss)",
    ),
    FieldSpec::amount(
        "interest_expense",
        &["interest expense, net", "interest expense", "interest cost"],
        "Interest expense",
    ),
    FieldSpec::amount(
        "net_income",
        &[
            "net loss attributable to common stockholders",
            "consolidated net loss",
            "net loss attributable to the company",
            "net income",
            "net loss",
            "net profit",
        ],
        "Net income (loss)",
    ),
    FieldSpec::amount(
        "ebit",
        &[
            "loss before income tax expense",
            "loss before income tax",
            "income before income taxes",
            "earnings before tax",
        ],
        "Income (loss) before income taxes",
    ),
    FieldSpec::per_share(
        "eps_basic",
        &["basic and diluted net loss per share", "basic earnings per share", "basic eps"],
        "Basic earnings per share",
    ),
    FieldSpec::per_share(
        "eps_diluted",
        &["basic and diluted net loss per share", "diluted earnings per share", "diluted eps"],
        "Diluted earnings per share",
    ),
    FieldSpec::amount("depreciation", &["depreciation and amortization"], "Depreciation and amortization"),
];

/// Fields computed when the sheet does not state them.
pub const DERIVED: &[DerivedField] = &[DerivedField {
    name: "gross_profit",
    rule: DerivedRule::NetOfMagnitude { base: "revenue", deduction: "cogs" },
    description: "Revenue less cost of revenue",
}];

/// The income statement dictionary.
pub const fn dictionary() -> FieldDictionary {
    FieldDictionary { kind: StatementKind::IncomeStatement, fields: FIELDS, derived: DERIVED }
}
