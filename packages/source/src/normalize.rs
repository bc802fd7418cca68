//! Raw record normalization.
//!
//! Upstream rows are loosely typed: a column may be missing, `null`, an
//! empty string, a number where a string is expected, or spelled differently
//! depending on which dataset produced it. [`normalize`] maps any such row
//! onto a fully populated [`NormalizedViolation`] using the alias lists in
//! [`nyc_violations_violation_models::FIELD_ALIASES`].

use nyc_violations_violation_models::NormalizedViolation;
use serde_json::Value;

/// Normalizes one raw upstream record.
///
/// Each attribute takes the first present alias, in order. An alias is
/// absent when the key is missing, `null`, or an empty string. Attributes
/// with no present alias become `""`. Non-object input yields a record of
/// empty strings.
#[must_use]
pub fn normalize(raw: &Value) -> NormalizedViolation {
    NormalizedViolation::from_aliases(|aliases| resolve_aliases(raw, aliases))
}

/// Normalizes every record in `raw`, preserving order.
#[must_use]
pub fn normalize_all(raw: &[Value]) -> Vec<NormalizedViolation> {
    raw.iter().map(normalize).collect()
}

fn resolve_aliases(raw: &Value, aliases: &[&str]) -> String {
    aliases
        .iter()
        .filter_map(|alias| raw.get(alias))
        .find_map(value_to_string)
        .unwrap_or_default()
}

/// Converts a JSON value to its display string, or `None` when the value
/// counts as absent.
fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}
