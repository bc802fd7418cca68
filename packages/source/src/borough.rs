//! Borough filtering over normalized violations.
//!
//! The borough name arrives verbatim from a query parameter, so it is
//! trimmed and uppercased here before being resolved against the county code
//! table on [`Borough`].

use nyc_violations_violation_models::{ALL_BOROUGHS, Borough, NormalizedViolation};

/// A parsed borough filter parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoroughSelection {
    /// No filtering: the parameter was absent, blank, or `ALL BOROUGHS`.
    All,
    /// Keep only records whose county code belongs to this borough.
    Borough(Borough),
    /// An unknown borough name (uppercased). Matches nothing.
    Unrecognized(String),
}

impl BoroughSelection {
    /// Parses a raw borough parameter. Never fails: unknown names become
    /// [`Self::Unrecognized`].
    #[must_use]
    pub fn parse(borough: Option<&str>) -> Self {
        let Some(name) = borough.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::All;
        };

        let name = name.to_uppercase();
        if name == ALL_BOROUGHS {
            return Self::All;
        }

        name.parse::<Borough>()
            .map_or(Self::Unrecognized(name), Self::Borough)
    }

    /// Returns `true` if `record` passes this selection.
    #[must_use]
    pub fn matches(&self, record: &NormalizedViolation) -> bool {
        match self {
            Self::All => true,
            Self::Borough(borough) => borough.has_county_code(&record.violation_county),
            Self::Unrecognized(_) => false,
        }
    }
}

/// Keeps only the records located in `borough`, preserving order.
///
/// An absent, blank or `ALL BOROUGHS` selection returns `records` unchanged.
/// An unrecognized borough name returns an empty list rather than an error,
/// and records with an empty county code never match a borough.
#[must_use]
pub fn filter_by_borough(
    records: Vec<NormalizedViolation>,
    borough: Option<&str>,
) -> Vec<NormalizedViolation> {
    match BoroughSelection::parse(borough) {
        BoroughSelection::All => records,
        BoroughSelection::Unrecognized(name) => {
            log::debug!(
                "Unrecognized borough {name:?}, dropping all {} records",
                records.len()
            );
            Vec::new()
        }
        selection @ BoroughSelection::Borough(_) => {
            let total = records.len();
            let kept: Vec<NormalizedViolation> = records
                .into_iter()
                .filter(|record| selection.matches(record))
                .collect();
            log::debug!("Borough filter {selection:?} kept {}/{total}", kept.len());
            kept
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_county(county: &str) -> NormalizedViolation {
        NormalizedViolation {
            violation_county: county.to_string(),
            ..NormalizedViolation::default()
        }
    }

    fn counties(records: &[NormalizedViolation]) -> Vec<&str> {
        records
            .iter()
            .map(|r| r.violation_county.as_str())
            .collect()
    }

    #[test]
    fn parses_selection_variants() {
        assert_eq!(BoroughSelection::parse(None), BoroughSelection::All);
        assert_eq!(BoroughSelection::parse(Some("")), BoroughSelection::All);
        assert_eq!(BoroughSelection::parse(Some("   ")), BoroughSelection::All);
        assert_eq!(
            BoroughSelection::parse(Some("All Boroughs")),
            BoroughSelection::All
        );
        assert_eq!(
            BoroughSelection::parse(Some(" staten island ")),
            BoroughSelection::Borough(Borough::StatenIsland)
        );
        assert_eq!(
            BoroughSelection::parse(Some("Atlantis")),
            BoroughSelection::Unrecognized("ATLANTIS".to_string())
        );
    }

    #[test]
    fn no_filter_returns_input_unchanged() {
        let input = vec![with_county("K"), with_county(""), with_county("QN")];
        for borough in [
            None,
            Some(""),
            Some("all boroughs"),
            Some("ALL BOROUGHS"),
            Some("aLl BoRoUgHs"),
        ] {
            assert_eq!(filter_by_borough(input.clone(), borough), input);
        }
    }

    #[test]
    fn queens_keeps_all_queens_codes() {
        let input = vec![
            with_county("Q"),
            with_county("qn"),
            with_county("Queens"),
            with_county("BX"),
        ];
        let kept = filter_by_borough(input, Some("QUEENS"));
        assert_eq!(counties(&kept), ["Q", "qn", "Queens"]);
    }

    #[test]
    fn unrecognized_borough_matches_nothing() {
        let input: Vec<NormalizedViolation> =
            ["NY", "K", "Q", "BX", "R"].into_iter().map(with_county).collect();
        assert!(filter_by_borough(input, Some("ATLANTIS")).is_empty());
    }

    #[test]
    fn empty_county_never_matches() {
        for borough in Borough::all() {
            let kept = filter_by_borough(vec![with_county("")], Some(borough.as_ref()));
            assert!(kept.is_empty(), "{borough} matched an empty county");
        }
    }

    #[test]
    fn preserves_order_without_duplicates() {
        let input = vec![
            with_county("K"),
            with_county("NY"),
            with_county("BK"),
            with_county("Q"),
            with_county("KINGS"),
        ];
        let kept = filter_by_borough(input, Some("brooklyn"));
        assert_eq!(counties(&kept), ["K", "BK", "KINGS"]);
    }
}
