//! Field specifications and per-statement dictionaries.
//!
//! Dictionaries are static data. The order of `synonyms` inside a
//! [`FieldSpec`] is part of its meaning: earlier synonyms are more specific
//! and win over later ones.

use crate::resolver::FieldValues;
use crate::statement::StatementKind;
use serde::Serialize;

/// What kind of quantity a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Currency amount
    Amount,
    /// Per-share figure such as EPS
    PerShare,
    /// Ratio or percentage
    Ratio,
    /// Count such as shares outstanding
    Count,
}

impl ValueKind {
    /// Whether a statement-level unit scale (e.g. "in thousands") applies.
    pub const fn is_scaled(self) -> bool {
        matches!(self, Self::Amount | Self::Count)
    }
}

/// How the sign of a resolved value is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignConvention {
    /// Keep the sign the filing shows
    #[default]
    AsReported,
    /// Quantities that are non-negative by nature; parentheses are
    /// presentation only, so the absolute value is kept
    Magnitude,
}

impl SignConvention {
    /// Applies the convention to a value.
    pub const fn apply(self, value: f64) -> f64 {
        match self {
            Self::AsReported => value,
            Self::Magnitude => value.abs(),
        }
    }
}

/// A canonical field and the labels it may appear under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Canonical name (unique within a statement)
    pub name: &'static str,
    /// Label synonyms, most specific first
    pub synonyms: &'static [&'static str],
    /// Kind of quantity
    pub kind: ValueKind,
    /// Sign treatment
    pub sign: SignConvention,
    /// Brief description
    pub description: &'static str,
}

impl FieldSpec {
    /// A signed currency amount.
    pub const fn amount(name: &'static str, synonyms: &'static [&'static str], description: &'static str) -> Self {
        Self { name, synonyms, kind: ValueKind::Amount, sign: SignConvention::AsReported, description }
    }

    /// A currency amount stored as its magnitude.
    pub const fn magnitude(
        name: &'static str,
        synonyms: &'static [&'static str],
        description: &'static str,
    ) -> Self {
        Self { name, synonyms, kind: ValueKind::Amount, sign: SignConvention::Magnitude, description }
    }

    /// A per-share figure, never scaled.
    pub const fn per_share(
        name: &'static str,
        synonyms: &'static [&'static str],
        description: &'static str,
    ) -> Self {
        Self { name, synonyms, kind: ValueKind::PerShare, sign: SignConvention::AsReported, description }
    }

    /// A count, stored as its magnitude.
    pub const fn count(name: &'static str, synonyms: &'static [&'static str], description: &'static str) -> Self {
        Self { name, synonyms, kind: ValueKind::Count, sign: SignConvention::Magnitude, description }
    }
}

/// Formula for a field computed from other fields of the same record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivedRule {
    /// `base - |deduction|`, only when both are present
    NetOfMagnitude {
        /// Field the deduction is taken from
        base: &'static str,
        /// Field whose magnitude is deducted
        deduction: &'static str,
    },
    /// `base - |deduction|`, or `base` alone when the deduction is missing
    NetOfMagnitudeOrBase {
        /// Field the deduction is taken from
        base: &'static str,
        /// Field whose magnitude is deducted
        deduction: &'static str,
    },
}

impl DerivedRule {
    /// Computes the value from already resolved fields.
    pub fn compute(&self, values: &FieldValues) -> Option<f64> {
        let get = |name: &str| values.get(name).copied().flatten();
        match *self {
            Self::NetOfMagnitude { base, deduction } => Some(get(base)? - get(deduction)?.abs()),
            Self::NetOfMagnitudeOrBase { base, deduction } => {
                let base = get(base)?;
                Some(get(deduction).map_or(base, |d| base - d.abs()))
            }
        }
    }
}

/// A field filled in after resolution when the sheet did not provide it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DerivedField {
    /// Canonical name
    pub name: &'static str,
    /// How it is computed
    pub rule: DerivedRule,
    /// Brief description
    pub description: &'static str,
}

/// All fields of one statement kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDictionary {
    /// Statement this dictionary belongs to
    pub kind: StatementKind,
    /// Resolved fields, in output order
    pub fields: &'static [FieldSpec],
    /// Fields computed from others
    pub derived: &'static [DerivedField],
}

impl FieldDictionary {
    /// Looks up a resolved field by name.
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Output column names: resolved fields, then derived fields that are
    /// not already resolved fields.
    pub fn column_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.fields.iter().map(|f| f.name).collect();
        for derived in self.derived {
            if !names.contains(&derived.name) {
                names.push(derived.name);
            }
        }
        names
    }

    /// Fills derived fields that are still missing.
    pub fn apply_derived(&self, values: &mut FieldValues) {
        for derived in self.derived {
            if values.get(derived.name).copied().flatten().is_some() {
                continue;
            }
            let computed = derived.rule.compute(values);
            values.insert(derived.name.to_string(), computed);
        }
    }
}
