//! Issue-date parsing and local date-range filtering.
//!
//! The fiscal-year datasets store `issue_date` as a Socrata floating
//! timestamp, while the open parking dataset stores it as `MM/DD/YYYY` text
//! that cannot be range-filtered upstream. Filtering locally after
//! normalization covers both.

use chrono::{NaiveDate, NaiveDateTime};
use nyc_violations_violation_models::NormalizedViolation;

/// Parses an upstream issue date in any of the formats the violation
/// datasets use.
#[must_use]
pub fn parse_issue_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(s, "%m/%d/%Y")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .ok()
}

/// Keeps records whose issue date falls within `[from, to]` (both
/// inclusive, either optional), preserving order.
///
/// With no bounds the input is returned unchanged. With a bound, records
/// whose issue date is empty or unparseable are dropped.
#[must_use]
pub fn filter_by_issue_date(
    records: Vec<NormalizedViolation>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<NormalizedViolation> {
    if from.is_none() && to.is_none() {
        return records;
    }

    records
        .into_iter()
        .filter(|record| {
            parse_issue_date(&record.issue_date).is_some_and(|date| {
                from.is_none_or(|from| date >= from) && to.is_none_or(|to| date <= to)
            })
        })
        .collect()
}
