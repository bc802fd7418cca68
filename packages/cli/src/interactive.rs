//! Interactive mode.
//!
//! Guides the user through a violation search or server startup with
//! terminal prompts.

use dialoguer::{Confirm, Input, Select};
use nyc_violations_server::ServerConfig;
use nyc_violations_source::SearchQuery;
use nyc_violations_source::registry::{DEFAULT_DATASET_ID, all_datasets};
use nyc_violations_violation_models::{ALL_BOROUGHS, Borough};

enum Action {
    Search,
    Serve,
}

impl Action {
    const ALL: &[Self] = &[Self::Search, Self::Serve];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Search => "Search violations",
            Self::Serve => "Start server",
        }
    }
}

/// Prompts for an action and runs it.
///
/// # Errors
///
/// Returns an error if a prompt fails, the search fails, or the server
/// cannot start.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("NYC Parking Violations");
    println!();

    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    match Action::ALL[idx] {
        Action::Search => search_form().await,
        Action::Serve => serve_form().await,
    }
}

async fn search_form() -> Result<(), Box<dyn std::error::Error>> {
    let plate: String = Input::new().with_prompt("License plate").interact_text()?;

    let state: String = Input::new()
        .with_prompt("Registration state (blank for any)")
        .allow_empty(true)
        .interact_text()?;

    let mut borough_labels = vec![ALL_BOROUGHS.to_string()];
    borough_labels.extend(Borough::all().iter().map(ToString::to_string));
    let borough_idx = Select::new()
        .with_prompt("Borough")
        .items(&borough_labels)
        .default(0)
        .interact()?;

    let datasets = all_datasets();
    let dataset_labels: Vec<String> = datasets
        .iter()
        .map(|d| format!("{} ({})", d.name, d.id))
        .collect();
    let default_idx = datasets
        .iter()
        .position(|d| d.id == DEFAULT_DATASET_ID)
        .unwrap_or(0);
    let dataset_idx = Select::new()
        .with_prompt("Dataset")
        .items(&dataset_labels)
        .default(default_idx)
        .interact()?;

    let query = SearchQuery {
        state: Some(state),
        borough: Some(borough_labels.swap_remove(borough_idx)),
        ..SearchQuery::new(plate)
    };

    println!();
    crate::run_search(query, Some(&datasets[dataset_idx].id), false).await
}

async fn serve_form() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ServerConfig::from_env();

    config.bind_addr = Input::new()
        .with_prompt("Bind address")
        .default(config.bind_addr)
        .interact_text()?;

    config.port = Input::new()
        .with_prompt("Port")
        .default(config.port)
        .interact_text()?;

    if !Confirm::new()
        .with_prompt(format!("Start server on {}:{}?", config.bind_addr, config.port))
        .default(true)
        .interact()?
    {
        println!("Cancelled.");
        return Ok(());
    }

    crate::serve(config).await
}
