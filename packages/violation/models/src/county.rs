//! NYC boroughs and the county codes that identify them upstream.
//!
//! The violation datasets never agree on a single county spelling: the same
//! borough shows up as `K`, `BK` or `KINGS`. The table below is the only
//! mapping from those codes back to a [`Borough`] and is fixed at compile
//! time.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Sentinel borough selection meaning "do not filter".
pub const ALL_BOROUGHS: &str = "ALL BOROUGHS";

/// One of the five NYC boroughs.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Borough {
    /// New York County
    Manhattan,
    /// Kings County
    Brooklyn,
    /// Queens County
    Queens,
    /// Bronx County
    Bronx,
    /// Richmond County
    #[serde(rename = "STATEN ISLAND")]
    #[strum(serialize = "STATEN ISLAND")]
    StatenIsland,
}

impl Borough {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Manhattan,
            Self::Brooklyn,
            Self::Queens,
            Self::Bronx,
            Self::StatenIsland,
        ]
    }

    /// Returns the upstream county codes (uppercase) that denote this
    /// borough. No code belongs to more than one borough.
    #[must_use]
    pub const fn county_codes(self) -> &'static [&'static str] {
        match self {
            Self::Manhattan => &["NY", "MN", "MAN"],
            Self::Brooklyn => &["K", "BK", "KINGS"],
            Self::Queens => &["Q", "QN", "QNS", "QUEENS"],
            Self::Bronx => &["BX", "BRONX"],
            Self::StatenIsland => &["R", "ST", "RICH"],
        }
    }

    /// Returns `true` if `code` (any letter case) is one of this borough's
    /// county codes.
    #[must_use]
    pub fn has_county_code(self, code: &str) -> bool {
        let code = code.to_uppercase();
        self.county_codes().iter().any(|known| *known == code)
    }
}

/// Resolves an upstream county code (any letter case) to its borough.
///
/// Returns `None` for empty or unknown codes.
#[must_use]
pub fn borough_for_county_code(code: &str) -> Option<Borough> {
    Borough::all()
        .iter()
        .copied()
        .find(|borough| borough.has_county_code(code))
}
