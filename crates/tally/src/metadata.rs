//! Filing metadata from file names.
//!
//! Filings follow `<TICKER> (<COMPANY>) <DOCUMENT TYPE> (<FORM CODE>) <YYYY-MM-DD>.xlsx`,
//! with `YYYYMMDD` accepted for the date.
//! Parsing is best effort: pieces that are missing are left as `None`.

use chrono::NaiveDate;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tally_fields::FilingMetadata;

static ISO_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4}-\d{2}-\d{2})").expect("valid ISO date regex"));

// Whole digit runs, so a compact date is never cut out of a longer number.
static DIGIT_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid digit run regex"));

static FORM_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(([^)]+)\)\s+(?:\d{4}-\d{2}-\d{2}|\d{8})").expect("valid form code regex")
});

static TICKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]+)\s+\(([^)]+)\)").expect("valid ticker regex"));

static DOCUMENT_TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]+\s+\([^)]+\)\s+(.+?)\s+\([^)]+\)\s+(?:\d{4}-\d{2}-\d{2}|\d{8})")
        .expect("valid document type regex")
});

/// Parses filing metadata from a path's file name. Never fails.
pub fn parse_metadata(path: impl AsRef<Path>) -> FilingMetadata {
    let path = path.as_ref();
    let filename = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();

    let ticker = TICKER_RE.captures(&stem);
    FilingMetadata {
        filing_date: filing_date(&stem),
        form_code: FORM_CODE_RE.captures(&stem).map(|c| c[1].trim().to_string()),
        ticker: ticker.as_ref().map(|c| c[1].to_string()),
        company: ticker.as_ref().map(|c| c[2].trim().to_string()),
        document_type: DOCUMENT_TYPE_RE.captures(&stem).map(|c| c[1].trim().to_string()),
        filename,
        path: path.to_path_buf(),
    }
}

/// The ISO date when present, else a valid compact `YYYYMMDD` date.
fn filing_date(stem: &str) -> Option<NaiveDate> {
    let iso = ISO_DATE_RE
        .captures_iter(stem)
        .find_map(|c| NaiveDate::parse_from_str(&c[1], "%Y-%m-%d").ok());
    iso.or_else(|| {
        DIGIT_RUN_RE
            .find_iter(stem)
            .filter(|m| m.len() == 8)
            .find_map(|m| NaiveDate::parse_from_str(m.as_str(), "%Y%m%d").ok())
    })
}
