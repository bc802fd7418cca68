//! Violation search parameters and their translation to `SoQL`.
//!
//! Only the plate, state and issue-date bounds are sent upstream. The
//! borough is always applied locally after normalization because the county
//! codes it resolves to are not consistent across datasets.

use std::fmt::Write as _;

use chrono::NaiveDate;

use crate::dataset::DatasetColumns;

/// Default number of records requested when the caller does not set a limit.
pub const DEFAULT_LIMIT: u32 = 100;

/// Errors produced while validating a [`SearchQuery`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The plate parameter was missing or blank.
    #[error("a license plate is required")]
    MissingPlate,

    /// The plate contains characters that never appear on a plate.
    #[error("invalid license plate {plate:?}: only letters, digits, '-' and spaces are allowed")]
    InvalidPlate {
        /// The rejected plate.
        plate: String,
    },

    /// The registration state is not a two-letter code.
    #[error("invalid registration state {state:?}: expected a two-letter code")]
    InvalidState {
        /// The rejected state.
        state: String,
    },

    /// `issued_from` is after `issued_to`.
    #[error("invalid date range: {from} is after {to}")]
    InvertedDateRange {
        /// Lower bound.
        from: NaiveDate,
        /// Upper bound.
        to: NaiveDate,
    },

    /// The limit was zero.
    #[error("limit must be greater than zero")]
    ZeroLimit,
}

/// A violation search as submitted by the search form or API caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// License plate to look up.
    pub plate: String,
    /// Optional two-letter registration state.
    pub state: Option<String>,
    /// Optional borough name, applied locally.
    pub borough: Option<String>,
    /// Earliest issue date (inclusive).
    pub issued_from: Option<NaiveDate>,
    /// Latest issue date (inclusive).
    pub issued_to: Option<NaiveDate>,
    /// Maximum number of upstream records to request.
    pub limit: Option<u32>,
}

impl SearchQuery {
    /// Creates a query for `plate` with no other filters.
    #[must_use]
    pub fn new(plate: impl Into<String>) -> Self {
        Self {
            plate: plate.into(),
            ..Self::default()
        }
    }

    /// Validates the query and returns it in canonical form: plate and state
    /// trimmed and uppercased, blank optional strings collapsed to `None`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] if the plate is missing or malformed, the state
    /// is not a two-letter code, the date range is inverted, or the limit is
    /// zero.
    pub fn validate(self) -> Result<Self, QueryError> {
        let plate = self.plate.trim().to_uppercase();
        if plate.is_empty() {
            return Err(QueryError::MissingPlate);
        }
        if !plate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == ' ')
        {
            return Err(QueryError::InvalidPlate { plate });
        }

        let state = match non_blank(self.state) {
            Some(state) => {
                let state = state.to_uppercase();
                if state.len() != 2 || !state.chars().all(|c| c.is_ascii_alphabetic()) {
                    return Err(QueryError::InvalidState { state });
                }
                Some(state)
            }
            None => None,
        };

        if let (Some(from), Some(to)) = (self.issued_from, self.issued_to)
            && from > to
        {
            return Err(QueryError::InvertedDateRange { from, to });
        }

        if self.limit == Some(0) {
            return Err(QueryError::ZeroLimit);
        }

        Ok(Self {
            plate,
            state,
            borough: non_blank(self.borough),
            issued_from: self.issued_from,
            issued_to: self.issued_to,
            limit: self.limit,
        })
    }

    /// Returns the requested limit, capped at `max`.
    #[must_use]
    pub fn effective_limit(&self, max: u32) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT).min(max)
    }

    /// Builds the `SoQL` `$where` clause for this query against a dataset
    /// with the given column names.
    ///
    /// Date bounds are only included when the dataset has a filterable
    /// `issue_date` column.
    #[must_use]
    pub fn to_soql_where(&self, columns: &DatasetColumns) -> String {
        let mut clause = format!("{}={}", columns.plate, soql_string(&self.plate));

        if let Some(state) = &self.state {
            write!(clause, " AND {}={}", columns.state, soql_string(state)).unwrap();
        }

        if let Some(date_column) = &columns.issue_date {
            if let Some(from) = self.issued_from {
                write!(
                    clause,
                    " AND {date_column} >= '{}T00:00:00'",
                    from.format("%Y-%m-%d")
                )
                .unwrap();
            }
            if let Some(to) = self.issued_to {
                write!(
                    clause,
                    " AND {date_column} <= '{}T23:59:59'",
                    to.format("%Y-%m-%d")
                )
                .unwrap();
            }
        }

        clause
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Quotes a `SoQL` string literal, doubling embedded single quotes.
fn soql_string(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(issue_date: Option<&str>) -> DatasetColumns {
        DatasetColumns {
            plate: "plate_id".to_string(),
            state: "registration_state".to_string(),
            issue_date: issue_date.map(String::from),
            order: "issue_date DESC".to_string(),
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn validate_canonicalizes_fields() {
        let query = SearchQuery {
            plate: "  abc1234 ".to_string(),
            state: Some(" ny".to_string()),
            borough: Some("   ".to_string()),
            ..SearchQuery::default()
        }
        .validate()
        .unwrap();
        assert_eq!(query.plate, "ABC1234");
        assert_eq!(query.state.as_deref(), Some("NY"));
        assert_eq!(query.borough, None);
    }

    #[test]
    fn validate_rejects_missing_plate() {
        assert_eq!(
            SearchQuery::new("  ").validate(),
            Err(QueryError::MissingPlate)
        );
    }

    #[test]
    fn validate_rejects_injection_in_plate() {
        let err = SearchQuery::new("A' OR '1'='1").validate().unwrap_err();
        assert!(matches!(err, QueryError::InvalidPlate { .. }));
    }

    #[test]
    fn validate_rejects_bad_state() {
        let mut query = SearchQuery::new("ABC");
        query.state = Some("NEW YORK".to_string());
        assert!(matches!(
            query.validate(),
            Err(QueryError::InvalidState { .. })
        ));
    }

    #[test]
    fn validate_rejects_inverted_range_and_zero_limit() {
        let mut query = SearchQuery::new("ABC");
        query.issued_from = Some(date("2024-02-01"));
        query.issued_to = Some(date("2024-01-01"));
        assert!(matches!(
            query.validate(),
            Err(QueryError::InvertedDateRange { .. })
        ));

        let mut query = SearchQuery::new("ABC");
        query.limit = Some(0);
        assert_eq!(query.validate(), Err(QueryError::ZeroLimit));
    }

    #[test]
    fn effective_limit_defaults_and_caps() {
        let mut query = SearchQuery::new("ABC");
        assert_eq!(query.effective_limit(1000), DEFAULT_LIMIT);
        query.limit = Some(5000);
        assert_eq!(query.effective_limit(1000), 1000);
    }

    #[test]
    fn builds_plate_and_state_clause() {
        let mut query = SearchQuery::new("ABC1234");
        query.state = Some("NY".to_string());
        assert_eq!(
            query.to_soql_where(&columns(None)),
            "plate_id='ABC1234' AND registration_state='NY'"
        );
    }

    #[test]
    fn includes_date_bounds_only_when_column_exists() {
        let mut query = SearchQuery::new("ABC1234");
        query.issued_from = Some(date("2024-01-01"));
        query.issued_to = Some(date("2024-01-31"));
        assert_eq!(
            query.to_soql_where(&columns(Some("issue_date"))),
            "plate_id='ABC1234' AND issue_date >= '2024-01-01T00:00:00' \
             AND issue_date <= '2024-01-31T23:59:59'"
        );
        assert_eq!(query.to_soql_where(&columns(None)), "plate_id='ABC1234'");
    }

    #[test]
    fn escapes_single_quotes() {
        assert_eq!(soql_string("O'NEIL"), "'O''NEIL'");
    }
}
