//! The tagged cell value produced by the grid reader.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single spreadsheet cell.
///
/// Readers map their native types into one of these four variants and do no
/// further coercion. Turning text such as `"(1,234)"` into a number is the
/// normalizer's job.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Cell {
    /// No value
    #[default]
    Empty,
    /// Text as stored in the workbook
    Text(String),
    /// Native numeric value
    Number(f64),
    /// Native date or datetime, rendered in ISO form
    DateLike(String),
}

impl Cell {
    /// Creates a text cell.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Returns `true` when the cell carries no usable content.
    ///
    /// Text consisting only of whitespace counts as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) | Self::DateLike(s) => s.trim().is_empty(),
            Self::Number(_) => false,
        }
    }

    /// Returns the text content of a text or date cell.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::DateLike(s) => Some(s),
            _ => None,
        }
    }

    /// Renders the cell the way it appears in a header or label.
    ///
    /// Whole numbers print without a fractional part, so a year stored as
    /// `2023.0` renders as `2023`.
    pub fn display_value(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(s) | Self::DateLike(s) => s.clone(),
            Self::Number(v) => format_number(*v),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_value())
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        if value.is_empty() { Self::Empty } else { Self::Text(value.to_string()) }
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        if value.is_empty() { Self::Empty } else { Self::Text(value) }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl<T: Into<Self>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

/// Formats a number for display, dropping `.0` on whole values.
pub(crate) fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
