use crate::cell::Cell;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

/// Formats tried in order before the permissive fallback.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y", "%d/%m/%Y", "%B %d, %Y", "%b %d, %Y", "%Y/%m/%d", "%d-%m-%Y", "%Y%m%d",
];

const FALLBACK_FORMATS: &[&str] = &["%B %d %Y", "%b %d %Y", "%d %B %Y", "%d %b %Y", "%d-%b-%Y", "%m-%d-%Y"];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%m/%d/%Y %H:%M:%S"];

/// chrono's `%Y` also accepts one to three digits, so parsed years are
/// checked against this range.
const PLAUSIBLE_YEARS: std::ops::RangeInclusive<i32> = 1900..=2100;

static ORDINAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{1,2})(st|nd|rd|th)\b").expect("valid ordinal regex"));

static SEPT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bsept\b").expect("valid month regex"));

static MONTH_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z]+)\s+(\d{4})$").expect("valid month-year regex"));

/// Reads a cell as a calendar date.
///
/// Native date cells convert directly; text goes through [`parse_date`].
pub fn normalize_date(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::DateLike(s) => s
            .get(..10)
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .or_else(|| parse_date(s)),
        Cell::Text(s) => parse_date(s),
        Cell::Empty | Cell::Number(_) => None,
    }
}

/// Parses a date written in one of the common filing formats.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let s = text.trim();
    if s.is_empty() {
        return None;
    }
    parse_with(s, DATE_FORMATS).or_else(|| parse_permissive(s))
}

fn parse_with(s: &str, formats: &[&str]) -> Option<NaiveDate> {
    formats.iter().find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok().filter(is_plausible))
}

fn is_plausible(date: &NaiveDate) -> bool {
    PLAUSIBLE_YEARS.contains(&date.year())
}

fn parse_permissive(s: &str) -> Option<NaiveDate> {
    if let Some(date) = DateTime::parse_from_rfc3339(s).ok().map(|ts| ts.date_naive()).filter(is_plausible) {
        return Some(date);
    }
    let datetime = DATETIME_FORMATS.iter().find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok());
    if let Some(date) = datetime.map(|ts| ts.date()).filter(is_plausible) {
        return Some(date);
    }

    let cleaned = ORDINAL_RE.replace_all(s, "$1");
    let cleaned = SEPT_RE.replace_all(&cleaned, "Sep");
    let cleaned = cleaned.replace('.', "");
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    // Month and year first: `%B %d %Y` would read `March 2024` as day 20 of year 24.
    parse_with(&cleaned, DATE_FORMATS)
        .or_else(|| month_and_year(&cleaned))
        .or_else(|| parse_with(&cleaned, FALLBACK_FORMATS))
}

/// `March 2024` reads as the first day of the month.
fn month_and_year(s: &str) -> Option<NaiveDate> {
    let caps = MONTH_YEAR_RE.captures(s)?;
    let candidate = format!("{} 1 {}", &caps[1], &caps[2]);
    parse_with(&candidate, &["%B %d %Y", "%b %d %Y"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case("2024-03-31", ymd(2024, 3, 31))]
    #[case("03/31/2024", ymd(2024, 3, 31))]
    #[case("31/03/2024", ymd(2024, 3, 31))]
    #[case("March 31, 2024", ymd(2024, 3, 31))]
    #[case("Mar 31, 2024", ymd(2024, 3, 31))]
    #[case("2024/03/31", ymd(2024, 3, 31))]
    #[case("31-03-2024", ymd(2024, 3, 31))]
    #[case("20240331", ymd(2024, 3, 31))]
    #[case("2024-03-31T10:15:00Z", ymd(2024, 3, 31))]
    #[case("2024-03-31 00:00:00", ymd(2024, 3, 31))]
    #[case("March 31st, 2024", ymd(2024, 3, 31))]
    #[case("Sept. 30, 2023", ymd(2023, 9, 30))]
    #[case("31 March 2024", ymd(2024, 3, 31))]
    #[case("March 2024", ymd(2024, 3, 1))]
    #[case("Dec 2023", ymd(2023, 12, 1))]
    #[case("03/31/24", ymd(2024, 3, 31))]
    #[case("12/31/99", ymd(1999, 12, 31))]
    fn test_parse_date(#[case] text: &str, #[case] expected: NaiveDate) {
        assert_eq!(parse_date(text), Some(expected));
    }

    #[rstest]
    #[case("")]
    #[case("Total assets")]
    #[case("2024-13-45")]
    #[case("12345")]
    #[case("01/01/0024")]
    #[case("March 0024")]
    fn test_parse_date_none(#[case] text: &str) {
        assert_eq!(parse_date(text), None);
    }

    #[test]
    fn test_native_date_cell() {
        assert_eq!(normalize_date(&Cell::DateLike("2023-12-31".into())), Some(ymd(2023, 12, 31)));
        assert_eq!(normalize_date(&Cell::DateLike("2023-12-31T08:30:00".into())), Some(ymd(2023, 12, 31)));
        assert_eq!(normalize_date(&Cell::Number(45_000.0)), None);
    }
}
