//! Config-driven upstream dataset definition.
//!
//! [`DatasetDefinition`] captures everything that differs between the NYC
//! violation datasets (endpoint, column names, paging cap) so that a single
//! Socrata fetcher serves all of them.

use serde::Deserialize;

/// Upper bound on records requested per search when a dataset does not set
/// its own.
const DEFAULT_MAX_RECORDS: u32 = 1000;

/// A Socrata violation dataset, loaded from an embedded TOML file.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetDefinition {
    /// Unique identifier (e.g., `"open_parking_camera"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Socrata resource URL (e.g.,
    /// `"https://data.cityofnewyork.us/resource/nc67-mf8r.json"`).
    pub api_url: String,
    /// Upstream column names used to build the `$where` and `$order`
    /// parameters.
    pub columns: DatasetColumns,
    /// Maximum number of records a single search may request.
    #[serde(default = "default_max_records")]
    pub max_records: u32,
    /// Optional URL to the human-readable portal page. Derived from
    /// `api_url` when not set.
    #[serde(default)]
    pub portal_url: Option<String>,
}

/// Upstream column names for the searchable attributes of a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatasetColumns {
    /// Plate column (`plate_id` or `plate`).
    pub plate: String,
    /// Registration state column (`registration_state` or `state`).
    pub state: String,
    /// Issue date column, when it holds a range-filterable timestamp.
    /// `None` for datasets that store the date as text.
    #[serde(default)]
    pub issue_date: Option<String>,
    /// `$order` expression.
    pub order: String,
}

const fn default_max_records() -> u32 {
    DEFAULT_MAX_RECORDS
}

impl DatasetDefinition {
    /// Returns the portal URL for this dataset.
    ///
    /// If `portal_url` is set in the TOML, that value is returned. Otherwise
    /// the Socrata `/resource/{id}.json` URL is rewritten to `/d/{id}`.
    #[must_use]
    pub fn portal_url(&self) -> Option<String> {
        if let Some(ref url) = self.portal_url {
            return Some(url.clone());
        }
        self.api_url.find("/resource/").map(|idx| {
            let base = &self.api_url[..idx];
            let rest = &self.api_url[idx + "/resource/".len()..];
            let dataset_id = rest.strip_suffix(".json").unwrap_or(rest);
            format!("{base}/d/{dataset_id}")
        })
    }
}

/// Parses a [`DatasetDefinition`] from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or missing required fields.
pub fn parse_dataset_toml(toml_str: &str) -> Result<DatasetDefinition, String> {
    toml::de::from_str(toml_str).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
id = "test"
name = "Test Dataset"
api_url = "https://data.cityofnewyork.us/resource/abcd-1234.json"

[columns]
plate = "plate"
state = "state"
order = "summons_number DESC"
"#;

    #[test]
    fn parses_minimal_toml_with_defaults() {
        let def = parse_dataset_toml(MINIMAL).unwrap();
        assert_eq!(def.id, "test");
        assert_eq!(def.max_records, DEFAULT_MAX_RECORDS);
        assert_eq!(def.columns.issue_date, None);
        assert_eq!(def.portal_url, None);
    }

    #[test]
    fn derives_portal_url_from_socrata_resource() {
        let def = parse_dataset_toml(MINIMAL).unwrap();
        assert_eq!(
            def.portal_url().as_deref(),
            Some("https://data.cityofnewyork.us/d/abcd-1234")
        );
    }

    #[test]
    fn explicit_portal_url_wins() {
        let toml_str = format!("portal_url = \"https://example.org/p\"\n{MINIMAL}");
        let def = parse_dataset_toml(&toml_str).unwrap();
        assert_eq!(def.portal_url().as_deref(), Some("https://example.org/p"));
    }

    #[test]
    fn rejects_missing_columns() {
        let err = parse_dataset_toml("id = \"x\"\nname = \"x\"\napi_url = \"x\"\n");
        assert!(err.is_err());
    }
}
