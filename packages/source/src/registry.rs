//! Dataset registry: loads every dataset definition from the embedded TOML configs.
//!
//! Each `.toml` file in `packages/source/datasets/` is baked into the binary
//! at compile time via [`include_str!`].

use crate::dataset::{DatasetDefinition, parse_dataset_toml};

/// Dataset searched when the caller does not pick one.
pub const DEFAULT_DATASET_ID: &str = "open_parking_camera";

/// TOML configs embedded at compile time.
const DATASET_TOMLS: &[(&str, &str)] = &[
    (
        "open_parking_camera",
        include_str!("../datasets/open_parking_camera.toml"),
    ),
    (
        "parking_violations_fy2024",
        include_str!("../datasets/parking_violations_fy2024.toml"),
    ),
];

/// Returns all configured dataset definitions, parsed from embedded TOML.
///
/// # Panics
///
/// Panics if any TOML config is malformed (the configs are embedded, so this
/// is caught by the registry tests).
#[must_use]
pub fn all_datasets() -> Vec<DatasetDefinition> {
    DATASET_TOMLS
        .iter()
        .map(|(name, toml)| {
            parse_dataset_toml(toml).unwrap_or_else(|e| panic!("Failed to parse {name}.toml: {e}"))
        })
        .collect()
}

/// Looks up a dataset definition by id.
#[must_use]
pub fn find_dataset(id: &str) -> Option<DatasetDefinition> {
    all_datasets().into_iter().find(|d| d.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_all_datasets() {
        assert_eq!(all_datasets().len(), DATASET_TOMLS.len());
    }

    #[test]
    fn dataset_ids_are_unique_and_match_file_names() {
        let datasets = all_datasets();
        for ((name, _), dataset) in DATASET_TOMLS.iter().zip(&datasets) {
            assert_eq!(*name, dataset.id);
        }
        let mut ids: Vec<&str> = datasets.iter().map(|d| d.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), DATASET_TOMLS.len());
    }

    #[test]
    fn default_dataset_exists() {
        assert!(find_dataset(DEFAULT_DATASET_ID).is_some());
        assert!(find_dataset("nope").is_none());
    }

    #[test]
    fn all_datasets_have_required_fields() {
        for dataset in &all_datasets() {
            assert!(!dataset.name.is_empty(), "{}: name is empty", dataset.id);
            assert!(
                dataset.api_url.ends_with(".json"),
                "{}: api_url is not a Socrata resource",
                dataset.id
            );
            assert!(dataset.max_records > 0, "{}: max_records is 0", dataset.id);
            assert!(dataset.portal_url().is_some(), "{}: no portal url", dataset.id);
        }
    }
}
