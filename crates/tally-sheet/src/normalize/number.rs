use crate::cell::Cell;

/// Tokens that mean "no value", compared case-insensitively.
const MISSING_TOKENS: &[&str] = &["-", "—", "n/a", "na", "none", "nil", "not applicable"];

/// Characters removed before parsing.
const STRIPPED: &[char] = &['$', '€', '£', '¥', ','];

/// Reads a cell as a number.
///
/// Native numbers pass through unchanged (non-finite values are dropped);
/// text goes through [`parse_number`]; dates are never numbers.
pub fn normalize_number(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Empty | Cell::DateLike(_) => None,
        Cell::Number(v) => v.is_finite().then_some(*v),
        Cell::Text(s) => parse_number(s),
    }
}

/// Parses financial text such as `$1,234`, `(1,234.50)` or `45%`.
///
/// Parenthesized values are negative and a trailing `%` divides by 100.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() || MISSING_TOKENS.iter().any(|t| trimmed.eq_ignore_ascii_case(t)) {
        return None;
    }
    if let Some(inner) = parenthesized(trimmed) {
        return parse_number(inner).map(|v| -v);
    }

    let cleaned: String = trimmed.chars().filter(|c| !STRIPPED.contains(c) && !c.is_whitespace()).collect();
    // "$ (1,234)" only shows its parentheses once the currency is gone.
    if let Some(inner) = parenthesized(&cleaned) {
        return parse_number(inner).map(|v| -v);
    }

    let (digits, divisor) = match cleaned.strip_suffix('%') {
        Some(rest) => (rest, 100.0),
        None => (cleaned.as_str(), 1.0),
    };
    let value: f64 = digits.parse().ok()?;
    value.is_finite().then_some(value / divisor)
}

fn parenthesized(s: &str) -> Option<&str> {
    s.strip_prefix('(').and_then(|rest| rest.strip_suffix(')'))
}
