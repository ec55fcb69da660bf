//! Free-text date normalization.
//!
//! Accepted inputs are tried against a fixed, ordered format list and the
//! first successful parse wins. Day-first `DD/MM/YYYY` is listed before
//! month-first `MM/DD/YYYY`, so `03/04/2024` is the 3rd of April.

use chrono::{Datelike, NaiveDate};

/// Accepted input formats, in priority order.
pub const INPUT_FORMATS: [&str; 5] = ["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y", "%Y/%m/%d"];

/// Rendering of every normalized date.
pub const OUTPUT_FORMAT: &str = "%d-%m-%Y";

/// Parses `value` with the first matching entry of [`INPUT_FORMATS`].
///
/// Years outside `1000..=9999` are rejected so that short forms such as
/// `01-02-03` never turn into year 1.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    INPUT_FORMATS.iter().find_map(|format| {
        NaiveDate::parse_from_str(trimmed, format)
            .ok()
            .filter(|date| (1000..=9999).contains(&date.year()))
    })
}

/// Normalizes free-text date input to `DD-MM-YYYY`.
///
/// Returns `None` when no accepted format matches; callers omit the property.
pub fn normalize_date(value: &str) -> Option<String> {
    parse_date(value).map(|date| date.format(OUTPUT_FORMAT).to_string())
}
