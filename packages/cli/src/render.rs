//! Plain-text table rendering for search results.
//!
//! Violation times are formatted here, at render time, and never stored back
//! into the records.

use std::fmt::Write as _;

use nyc_violations_source::{SearchResults, format_violation_time};
use nyc_violations_violation_models::{NormalizedViolation, borough_for_county_code};

/// Column headers and the record attribute each column shows.
const COLUMNS: [(&str, &str); 7] = [
    ("TICKET #", "summons_number"),
    ("PLATE", "plate_id"),
    ("ISSUED", "issue_date"),
    ("TIME", "violation_time"),
    ("BOROUGH", "violation_county"),
    ("VIOLATION", "violation_description"),
    ("DUE", "amount_due"),
];

/// Longest violation description shown before truncation.
const MAX_DESCRIPTION_CHARS: usize = 40;

/// Renders `results` as an aligned text table followed by a count line.
#[must_use]
pub fn render_table(results: &SearchResults) -> String {
    if results.violations.is_empty() {
        return "No violations found.\n".to_string();
    }

    let rows: Vec<[String; 7]> = results.violations.iter().map(row).collect();
    let headers = COLUMNS.map(|(header, _)| header.to_string());

    let mut widths = COLUMNS.map(|(header, _)| header.len());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    write_line(&mut out, &headers, &widths);
    write_line(&mut out, &widths.map(|w| "-".repeat(w)), &widths);
    for row in &rows {
        write_line(&mut out, row, &widths);
    }
    writeln!(out, "\n{} violation(s)", results.count).unwrap();
    out
}

fn row(violation: &NormalizedViolation) -> [String; 7] {
    COLUMNS.map(|(_, field)| cell(violation, field))
}

fn cell(violation: &NormalizedViolation, field: &str) -> String {
    let raw = violation.get(field).unwrap_or_default();
    match field {
        "violation_time" => format_violation_time(raw),
        "violation_county" => {
            borough_for_county_code(raw).map_or_else(|| raw.to_string(), |b| b.to_string())
        }
        "violation_description" => truncate(raw, MAX_DESCRIPTION_CHARS),
        _ => raw.to_string(),
    }
}

fn write_line(out: &mut String, cells: &[String; 7], widths: &[usize; 7]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    writeln!(out, "{}", line.join("  ").trim_end()).unwrap();
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut truncated: String = s.chars().take(max - 1).collect();
    truncated.push('…');
    truncated
}
