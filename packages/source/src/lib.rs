#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Violation search pipeline.
//!
//! A search validates a [`SearchQuery`], fetches the matching raw records
//! from a [`ViolationSource`] (normally a Socrata dataset), normalizes every
//! record once, filters by borough once, and returns the result with its
//! count. Times are formatted for display separately, at render time, with
//! [`format_violation_time`].

pub mod borough;
pub mod dataset;
pub mod dates;
pub mod normalize;
pub mod query;
pub mod registry;
pub mod retry;
pub mod socrata;
pub mod time;

use async_trait::async_trait;
use nyc_violations_violation_models::NormalizedViolation;
use serde::Serialize;

pub use borough::{BoroughSelection, filter_by_borough};
pub use normalize::{normalize, normalize_all};
pub use query::{QueryError, SearchQuery};
pub use time::format_violation_time;

/// Errors that can occur while talking to an upstream data source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Upstream answered with a non-success status.
    #[error("upstream returned HTTP {status} for {url}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Request URL.
        url: String,
    },

    /// Upstream answered with valid JSON that cannot be turned into records.
    #[error("Normalization error: {message}")]
    Normalization {
        /// Description of what went wrong.
        message: String,
    },
}

/// Errors that can occur during a search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The search parameters were invalid.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// The upstream fetch failed.
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// A provider of raw violation records.
///
/// Implemented by [`socrata::SocrataSource`] for live datasets; tests and
/// callers may supply their own.
#[async_trait]
pub trait ViolationSource: Send + Sync {
    /// Returns a unique identifier for this source (e.g.,
    /// `"open_parking_camera"`).
    fn id(&self) -> &str;

    /// Returns the human-readable name of this source.
    fn name(&self) -> &str;

    /// Fetches the raw records matching `query`. The query has already been
    /// validated.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the upstream call fails or returns
    /// something other than a JSON array.
    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<serde_json::Value>, SourceError>;
}

/// The outcome of a search: the kept records and how many there are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    /// Number of records in `violations`.
    pub count: usize,
    /// Normalized, filtered records in upstream order.
    pub violations: Vec<NormalizedViolation>,
}

impl From<Vec<NormalizedViolation>> for SearchResults {
    fn from(violations: Vec<NormalizedViolation>) -> Self {
        Self {
            count: violations.len(),
            violations,
        }
    }
}

/// Normalizes `raw` once, then filters by `borough` once.
#[must_use]
pub fn process_records(
    raw: &[serde_json::Value],
    borough: Option<&str>,
) -> Vec<NormalizedViolation> {
    filter_by_borough(normalize_all(raw), borough)
}

/// Runs a full search against `source`.
///
/// # Errors
///
/// Returns [`SearchError::Query`] if `query` fails validation and
/// [`SearchError::Source`] if the upstream fetch fails.
pub async fn search(
    source: &dyn ViolationSource,
    query: SearchQuery,
) -> Result<SearchResults, SearchError> {
    let query = query.validate()?;
    let raw = source.fetch(&query).await?;
    let raw_count = raw.len();

    let violations = process_records(&raw, query.borough.as_deref());
    let violations = dates::filter_by_issue_date(violations, query.issued_from, query.issued_to);

    log::info!(
        "Search on {} kept {} of {raw_count} raw records",
        source.id(),
        violations.len()
    );

    Ok(SearchResults::from(violations))
}
