//! Turning cell content into numbers and dates.
//!
//! Normalization never fails: content that cannot be read as the requested
//! type yields `None`.

mod date;
mod number;

pub use date::{normalize_date, parse_date};
pub use number::{normalize_number, parse_number};

use serde::{Deserialize, Serialize};

/// Lowest value treated as a calendar year.
pub const YEAR_LIKE_MIN: f64 = 2000.0;
/// Highest value treated as a calendar year.
pub const YEAR_LIKE_MAX: f64 = 2100.0;

/// Whether a number looks like a column-header year rather than a data value.
///
/// Genuine amounts in this range are misclassified as years; resolvers that
/// rely on this accept that loss.
pub fn is_year_like(value: f64) -> bool {
    (YEAR_LIKE_MIN..=YEAR_LIKE_MAX).contains(&value)
}

/// Unit scale a statement's amounts are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scale {
    /// Values are stated as-is
    #[default]
    Units,
    /// Values are stated in thousands
    Thousands,
}

impl Scale {
    /// Multiplier converting a reported value into units.
    pub const fn factor(self) -> f64 {
        match self {
            Self::Units => 1.0,
            Self::Thousands => 1_000.0,
        }
    }

    /// Applies the scale to a reported value.
    pub fn apply(self, value: f64) -> f64 {
        value * self.factor()
    }
}
