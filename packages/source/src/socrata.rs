//! Socrata SODA API fetcher for NYC violation datasets.
//!
//! Translates a [`SearchQuery`] into `$where`, `$limit` and `$order` query
//! parameters against one [`DatasetDefinition`] and returns the raw JSON
//! array.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::dataset::DatasetDefinition;
use crate::query::SearchQuery;
use crate::{SourceError, ViolationSource, retry};

/// Per-request timeout for upstream calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Header carrying the optional Socrata application token.
const APP_TOKEN_HEADER: &str = "X-App-Token";

/// A [`ViolationSource`] backed by a Socrata dataset.
pub struct SocrataSource {
    definition: DatasetDefinition,
    client: reqwest::Client,
    app_token: Option<String>,
}

impl SocrataSource {
    /// Creates a source for `definition`, authenticating with `app_token`
    /// when one is given (unauthenticated requests are throttled harder).
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the HTTP client cannot be built.
    pub fn new(
        definition: DatasetDefinition,
        app_token: Option<String>,
    ) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            definition,
            client,
            app_token: app_token.filter(|t| !t.is_empty()),
        })
    }

    /// Builds the SODA query parameters for `query`.
    #[must_use]
    pub fn request_params(&self, query: &SearchQuery) -> Vec<(&'static str, String)> {
        vec![
            ("$where", query.to_soql_where(&self.definition.columns)),
            (
                "$limit",
                query
                    .effective_limit(self.definition.max_records)
                    .to_string(),
            ),
            ("$order", self.definition.columns.order.clone()),
        ]
    }
}

#[async_trait]
impl ViolationSource for SocrataSource {
    fn id(&self) -> &str {
        &self.definition.id
    }

    fn name(&self) -> &str {
        &self.definition.name
    }

    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<Value>, SourceError> {
        let params = self.request_params(query);
        log::info!(
            "Fetching {} violations for plate {}",
            self.definition.name,
            query.plate
        );

        let body = retry::send_json(|| {
            let request = self.client.get(&self.definition.api_url).query(&params);
            match &self.app_token {
                Some(token) => request.header(APP_TOKEN_HEADER, token),
                None => request,
            }
        })
        .await?;

        let records = into_records(&self.definition.id, body)?;
        log::info!(
            "Received {} raw records from {}",
            records.len(),
            self.definition.id
        );
        Ok(records)
    }
}

/// Unwraps a SODA response body, which must be a JSON array of rows.
fn into_records(dataset_id: &str, body: Value) -> Result<Vec<Value>, SourceError> {
    match body {
        Value::Array(records) => Ok(records),
        other => Err(SourceError::Normalization {
            message: format!(
                "{dataset_id} returned a JSON {} instead of an array",
                json_kind(&other)
            ),
        }),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
