#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the violation search server.
//!
//! Envelope types are camelCase. Violation records keep their primary-alias
//! attribute names so a response body can be fed back through the
//! normalizer unchanged.

use chrono::NaiveDate;
use nyc_violations_source::dataset::DatasetDefinition;
use nyc_violations_source::{SearchQuery, SearchResults};
use nyc_violations_violation_models::{Borough, NormalizedViolation};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Always `true` when the server is answering.
    pub healthy: bool,
    /// Server crate version.
    pub version: String,
}

/// Error body returned with every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Human-readable message.
    pub error: String,
}

impl ApiError {
    /// Creates an error body from anything displayable.
    #[must_use]
    pub fn new(message: impl std::fmt::Display) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

/// Query parameters for the violations search endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationSearchParams {
    /// License plate (required; validated by the search pipeline).
    pub plate: Option<String>,
    /// Two-letter registration state.
    pub state: Option<String>,
    /// Borough name, or `All Boroughs`.
    pub borough: Option<String>,
    /// Earliest issue date, `YYYY-MM-DD`.
    pub from: Option<NaiveDate>,
    /// Latest issue date, `YYYY-MM-DD`.
    pub to: Option<NaiveDate>,
    /// Maximum number of upstream records.
    pub limit: Option<u32>,
    /// Dataset id; the server default when absent.
    pub dataset: Option<String>,
}

impl From<ViolationSearchParams> for SearchQuery {
    fn from(params: ViolationSearchParams) -> Self {
        Self {
            plate: params.plate.unwrap_or_default(),
            state: params.state,
            borough: params.borough,
            issued_from: params.from,
            issued_to: params.to,
            limit: params.limit,
        }
    }
}

/// Response body of the violations search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSearchResponse {
    /// Dataset the search ran against.
    pub dataset: String,
    /// Number of violations returned.
    pub count: usize,
    /// Normalized violations, keyed by primary alias.
    pub violations: Vec<NormalizedViolation>,
}

impl ApiSearchResponse {
    /// Wraps pipeline results for `dataset`.
    #[must_use]
    pub fn new(dataset: impl Into<String>, results: SearchResults) -> Self {
        Self {
            dataset: dataset.into(),
            count: results.count,
            violations: results.violations,
        }
    }
}

/// A borough and the county codes that resolve to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiBorough {
    /// Canonical borough name.
    pub name: Borough,
    /// Upstream county codes.
    pub county_codes: Vec<String>,
}

impl From<Borough> for ApiBorough {
    fn from(borough: Borough) -> Self {
        Self {
            name: borough,
            county_codes: borough
                .county_codes()
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// A searchable upstream dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDataset {
    /// Dataset id, usable as the `dataset` search parameter.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Portal page for the dataset.
    pub portal_url: Option<String>,
    /// Whether searches without a `dataset` parameter use this dataset.
    pub is_default: bool,
}

impl ApiDataset {
    /// Describes `definition`, flagging it as the default when its id is
    /// `default_id`.
    #[must_use]
    pub fn new(definition: &DatasetDefinition, default_id: &str) -> Self {
        Self {
            id: definition.id.clone(),
            name: definition.name.clone(),
            portal_url: definition.portal_url(),
            is_default: definition.id == default_id,
        }
    }
}
