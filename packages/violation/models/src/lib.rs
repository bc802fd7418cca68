#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Normalized parking violation record and the NYC borough taxonomy.
//!
//! NYC publishes parking summonses through two families of Socrata datasets
//! ("Parking Violations Issued" per fiscal year, and "Open Parking and Camera
//! Violations") whose column names disagree for the same attribute. Every
//! upstream row is mapped onto the single fixed-shape [`NormalizedViolation`]
//! using the ordered alias lists in [`FIELD_ALIASES`].

pub mod county;

pub use county::{ALL_BOROUGHS, Borough, borough_for_county_code};

use serde::{Deserialize, Serialize};

/// The ordered list of upstream column names that can supply one
/// [`NormalizedViolation`] attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldAliases {
    /// Attribute name on [`NormalizedViolation`]. Always equal to the primary
    /// alias, so a serialized record can be normalized again unchanged.
    pub field: &'static str,
    /// Upstream column names, tried in order. The first one is the primary
    /// alias.
    pub aliases: &'static [&'static str],
}

/// Declares [`NormalizedViolation`] and [`FIELD_ALIASES`] from one table so
/// the struct shape and the alias lists can never drift apart.
macro_rules! violation_fields {
    ($( $(#[$doc:meta])* $field:ident => [$($alias:literal),+ $(,)?] ),+ $(,)?) => {
        /// A parking violation with every attribute present as a string.
        ///
        /// An empty string stands for "unknown or absent". Attributes are
        /// serialized under their primary alias.
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        pub struct NormalizedViolation {
            $(
                $(#[$doc])*
                #[serde(default)]
                pub $field: String,
            )+
        }

        /// Alias lists for every [`NormalizedViolation`] attribute, in
        /// declaration order.
        pub const FIELD_ALIASES: &[FieldAliases] = &[
            $(
                FieldAliases {
                    field: stringify!($field),
                    aliases: &[$($alias),+],
                },
            )+
        ];

        impl NormalizedViolation {
            /// Builds a record by asking `resolve` for the value of every
            /// attribute, given that attribute's ordered alias list.
            #[must_use]
            pub fn from_aliases<F>(mut resolve: F) -> Self
            where
                F: FnMut(&'static [&'static str]) -> String,
            {
                Self {
                    $( $field: resolve(&[$($alias),+]), )+
                }
            }

            /// Looks up an attribute by its name (the primary alias).
            #[must_use]
            pub fn get(&self, field: &str) -> Option<&str> {
                match field {
                    $( stringify!($field) => Some(self.$field.as_str()), )+
                    _ => None,
                }
            }
        }
    };
}

violation_fields! {
    /// Summons (ticket) number. Unique per violation.
    summons_number => ["summons_number"],
    /// License plate.
    plate_id => ["plate_id", "plate"],
    /// Two-letter registration state.
    registration_state => ["registration_state", "state"],
    /// Plate type (e.g. `PAS`, `COM`).
    plate_type => ["plate_type", "license_type"],
    /// Date the summons was issued.
    issue_date => ["issue_date"],
    /// Numeric violation code.
    violation_code => ["violation_code"],
    /// Human-readable violation description.
    violation_description => ["violation_description", "violation"],
    /// Raw `HHMM` time token, optionally suffixed with `A`/`P`.
    violation_time => ["violation_time"],
    time_first_observed => ["time_first_observed"],
    /// County code as reported upstream (e.g. `NY`, `K`, `QN`).
    violation_county => ["violation_county", "county"],
    violation_precinct => ["violation_precinct", "precinct"],
    violation_location => ["violation_location"],
    violation_in_front_of_or_opposite => ["violation_in_front_of_or_opposite"],
    house_number => ["house_number"],
    street_name => ["street_name"],
    intersecting_street => ["intersecting_street"],
    street_code1 => ["street_code1"],
    street_code2 => ["street_code2"],
    street_code3 => ["street_code3"],
    issuing_agency => ["issuing_agency"],
    issuer_precinct => ["issuer_precinct"],
    issuer_code => ["issuer_code"],
    issuer_command => ["issuer_command"],
    issuer_squad => ["issuer_squad"],
    vehicle_body_type => ["vehicle_body_type"],
    vehicle_make => ["vehicle_make"],
    vehicle_color => ["vehicle_color"],
    vehicle_year => ["vehicle_year"],
    vehicle_expiration_date => ["vehicle_expiration_date"],
    unregistered_vehicle => ["unregistered_vehicle"],
    date_first_observed => ["date_first_observed"],
    law_section => ["law_section"],
    sub_division => ["sub_division"],
    violation_legal_code => ["violation_legal_code"],
    days_parking_in_effect => ["days_parking_in_effect"],
    from_hours_in_effect => ["from_hours_in_effect"],
    to_hours_in_effect => ["to_hours_in_effect"],
    meter_number => ["meter_number"],
    feet_from_curb => ["feet_from_curb"],
    violation_post_code => ["violation_post_code"],
    /// Fine amount in dollars.
    fine_amount => ["fine_amount"],
    penalty_amount => ["penalty_amount"],
    interest_amount => ["interest_amount"],
    reduction_amount => ["reduction_amount"],
    payment_amount => ["payment_amount"],
    /// Outstanding balance in dollars.
    amount_due => ["amount_due"],
    /// Hearing/payment status (e.g. `HEARING HELD-GUILTY`).
    violation_status => ["violation_status"],
    judgment_entry_date => ["judgment_entry_date"],
}
