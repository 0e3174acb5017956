//! Shared helpers for dates and identifier validation.

use chrono::{Months, NaiveDate, Utc};

/// Returns today's date in UTC.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Formats a date the way the catalog expects its date parameters (`YYYY-MM-DD`).
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Returns the `(start, end)` date pair covering the given number of months
/// back from today, both formatted for catalog parameters.
pub fn month_range_back(months: u32) -> (String, String) {
    let end = today();
    let start = end.checked_sub_months(Months::new(months)).unwrap_or(end);
    (format_date(start), format_date(end))
}

/// Checks whether a string is a valid 13-digit ISBN.
///
/// The catalog only understands ISBN-13 identifiers, so this is a plain
/// digit-count check rather than a checksum validation.
pub fn is_isbn13(value: &str) -> bool {
    value.len() == 13 && value.bytes().all(|b| b.is_ascii_digit())
}

/// Normalizes an author query: trims, strips inner spaces, lowercases.
///
/// Author names arrive in inconsistent spacing ("J. K. Rowling", "j.k.rowling");
/// the catalog matches best on the collapsed form.
pub fn normalize_author(query: &str) -> String {
    query.trim().replace(' ', "").to_lowercase()
}
