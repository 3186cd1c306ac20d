//! Revenue disaggregation fields.

use crate::dictionary::{FieldDictionary, FieldSpec};
use crate::statement::StatementKind;

/// Revenue breakdown fields in output order.
pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::amount("product_revenue", &["product", "products", "product sale"], "Product revenue"),
    FieldSpec::amount("service_revenue", &["service", "services", "service revenue"], "Service revenue"),
];

/// The revenue breakdown dictionary.
pub const fn dictionary() -> FieldDictionary {
    FieldDictionary { kind: StatementKind::RevenueBreakdown, fields: FIELDS, derived: &[] }
}
