#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for NYC parking violation search.
//!
//! Accepts the search form's query parameters, forwards the plate/state/date
//! part to the configured Socrata dataset, and returns the normalized,
//! borough-filtered violations as JSON.

mod config;
mod handlers;

use std::collections::BTreeMap;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use nyc_violations_source::dataset::DatasetDefinition;
use nyc_violations_source::registry::all_datasets;
use nyc_violations_source::socrata::SocrataSource;
use nyc_violations_source::{SourceError, ViolationSource};

pub use config::ServerConfig;

/// Errors that prevent the server from starting.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The configured default dataset is not in the registry.
    #[error("unknown default dataset {0:?}")]
    UnknownDataset(String),

    /// A dataset source could not be constructed.
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Shared application state.
pub struct AppState {
    /// Violation sources keyed by dataset id.
    pub sources: BTreeMap<String, Arc<dyn ViolationSource>>,
    /// Dataset definitions, for the `/api/datasets` listing.
    pub datasets: Vec<DatasetDefinition>,
    /// Dataset used when a search names none.
    pub default_dataset: String,
}

impl AppState {
    /// Builds a Socrata-backed source for every registered dataset.
    ///
    /// # Errors
    ///
    /// Returns [`StartupError`] if the default dataset is unknown or an HTTP
    /// client cannot be created.
    pub fn from_config(config: &ServerConfig) -> Result<Self, StartupError> {
        let datasets = all_datasets();
        if !datasets.iter().any(|d| d.id == config.default_dataset) {
            return Err(StartupError::UnknownDataset(config.default_dataset.clone()));
        }

        let mut sources: BTreeMap<String, Arc<dyn ViolationSource>> = BTreeMap::new();
        for definition in &datasets {
            let source = SocrataSource::new(definition.clone(), config.app_token.clone())?;
            sources.insert(definition.id.clone(), Arc::new(source));
        }

        Ok(Self {
            sources,
            datasets,
            default_dataset: config.default_dataset.clone(),
        })
    }

    /// Returns the source for `dataset`, or the default source when it is
    /// `None` or blank.
    #[must_use]
    pub fn source(&self, dataset: Option<&str>) -> Option<&Arc<dyn ViolationSource>> {
        let id = dataset
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(self.default_dataset.as_str());
        self.sources.get(id)
    }
}

/// Registers the `/api` routes.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/boroughs", web::get().to(handlers::boroughs))
            .route("/datasets", web::get().to(handlers::datasets))
            .route("/violations", web::get().to(handlers::violations)),
    );
}

/// Starts the violation search API server.
///
/// Builds the dataset sources from `config` and runs the Actix-Web HTTP
/// server until shutdown. The caller initialises logging and provides the
/// async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the sources cannot be built, the
/// server fails to bind, or it encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let state = AppState::from_config(&config).map_err(std::io::Error::other)?;
    log::info!(
        "Serving {} datasets (default: {})",
        state.sources.len(),
        state.default_dataset
    );
    let state = web::Data::new(state);

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure_api)
    })
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await
}
