//! Environment-driven server configuration.

use nyc_violations_source::registry::DEFAULT_DATASET_ID;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

/// Runtime configuration for [`crate::run_server`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind (`BIND_ADDR`).
    pub bind_addr: String,
    /// Port to bind (`PORT`).
    pub port: u16,
    /// Socrata application token (`SOCRATA_APP_TOKEN`).
    pub app_token: Option<String>,
    /// Dataset used when a search names none (`NYC_VIOLATIONS_DATASET`).
    pub default_dataset: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
            app_token: None,
            default_dataset: DEFAULT_DATASET_ID.to_string(),
        }
    }
}

impl ServerConfig {
    /// Reads the configuration from the process environment, falling back
    /// to defaults for unset or unparseable values.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                log::warn!("Invalid PORT {raw:?} ({e}), using {DEFAULT_PORT}");
                DEFAULT_PORT
            }),
            None => defaults.port,
        };

        Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            port,
            app_token: lookup("SOCRATA_APP_TOKEN").filter(|t| !t.is_empty()),
            default_dataset: lookup("NYC_VIOLATIONS_DATASET")
                .filter(|d| !d.is_empty())
                .unwrap_or(defaults.default_dataset),
        }
    }
}
