//! Cash flow statement fields.

use crate::dictionary::{DerivedField, DerivedRule, FieldDictionary, FieldSpec};
use crate::statement::StatementKind;

/// Cash flow fields in output order.
pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::amount(
        "operating_cf",
        &[
            "net cash provided by operating activities",
            "net cash used in operating activities",
            "cash from operations",
            "operating cash flow",
        ],
        "Net cash from operating activities",
    ),
    FieldSpec::amount(
        "investing_cf",
        &[
            "net cash used in investing activities",
            "net cash provided by investing activities",
            "cash from investing",
            "investing cash flow",
        ],
        "Net cash from investing activities",
    ),
    FieldSpec::amount(
        "financing_cf",
        &[
            "net cash provided by financing activities",
            "net cash used in financing activities",
            "cash from financing",
            "financing cash flow",
        ],
        "Net cash from financing activities",
    ),
    FieldSpec::magnitude(
        "capex",
        &[
            "purchase of equipment",
            "capital expenditures",
            "purchase of property",
            "purchases of property and equipment",
            "capex",
            "purchases of equipment",
        ],
        "Capital expenditures",
    ),
    FieldSpec::amount(
        "depreciation",
        &["depreciation and amortization", "depreciation"],
        "Depreciation and amortization",
    ),
];

/// Fields computed from the resolved ones.
pub const DERIVED: &[DerivedField] = &[DerivedField {
    name: "free_cash_flow",
    rule: DerivedRule::NetOfMagnitudeOrBase { base: "operating_cf", deduction: "capex" },
    description: "Operating cash flow less capital expenditures",
}];

/// The cash flow dictionary.
pub const fn dictionary() -> FieldDictionary {
    FieldDictionary { kind: StatementKind::CashFlow, fields: FIELDS, derived: DERIVED }
}
