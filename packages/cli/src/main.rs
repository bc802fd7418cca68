#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for NYC parking violation search.
//!
//! Runs a one-off search against a Socrata dataset, lists the known datasets
//! and boroughs, or starts the API server. With no subcommand it falls back
//! to an interactive form.

mod interactive;
mod render;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use nyc_violations_server::{ServerConfig, run_server};
use nyc_violations_server_models::{ApiBorough, ApiDataset, ApiSearchResponse};
use nyc_violations_source::registry::{DEFAULT_DATASET_ID, all_datasets, find_dataset};
use nyc_violations_source::socrata::SocrataSource;
use nyc_violations_source::{SearchQuery, ViolationSource, search};
use nyc_violations_violation_models::Borough;

#[derive(Parser)]
#[command(name = "nyc_violations", about = "NYC parking violation search")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a dataset for violations issued to a plate
    Search {
        /// License plate to search for
        #[arg(long)]
        plate: String,
        /// Two-letter registration state
        #[arg(long)]
        state: Option<String>,
        /// Borough to keep (e.g. "Brooklyn"); all boroughs when omitted
        #[arg(long)]
        borough: Option<String>,
        /// Earliest issue date, `YYYY-MM-DD`
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Latest issue date, `YYYY-MM-DD`
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Maximum number of upstream records
        #[arg(long)]
        limit: Option<u32>,
        /// Dataset id (see `datasets`)
        #[arg(long)]
        dataset: Option<String>,
        /// Print the JSON response instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List the searchable datasets
    Datasets {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List the boroughs and their county codes
    Boroughs,
    /// Start the API server
    Serve {
        /// Address to bind (overrides `BIND_ADDR`)
        #[arg(long)]
        bind_addr: Option<String>,
        /// Port to bind (overrides `PORT`)
        #[arg(long)]
        port: Option<u16>,
    },
}

/// Runs `query` against `dataset` (or the default dataset) and prints the
/// result as a table or as JSON.
///
/// # Errors
///
/// Returns an error if the dataset is unknown, the query is invalid, or the
/// upstream fetch fails.
async fn run_search(
    query: SearchQuery,
    dataset: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let dataset_id = dataset.unwrap_or(DEFAULT_DATASET_ID);
    let definition =
        find_dataset(dataset_id).ok_or_else(|| format!("unknown dataset {dataset_id:?}"))?;

    let app_token = std::env::var("SOCRATA_APP_TOKEN").ok();
    let source = SocrataSource::new(definition, app_token)?;
    log::info!("Searching {} for plate {:?}", source.name(), query.plate);

    let results = search(&source, query).await?;

    if json {
        let response = ApiSearchResponse::new(source.id(), results);
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print!("{}", render::render_table(&results));
    }

    Ok(())
}

fn print_datasets(json: bool) -> Result<(), serde_json::Error> {
    let datasets: Vec<ApiDataset> = all_datasets()
        .iter()
        .map(|d| ApiDataset::new(d, DEFAULT_DATASET_ID))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&datasets)?);
        return Ok(());
    }

    for dataset in &datasets {
        let marker = if dataset.is_default { " (default)" } else { "" };
        println!("{:<28} {}{marker}", dataset.id, dataset.name);
        if let Some(url) = &dataset.portal_url {
            println!("{:<28} {url}", "");
        }
    }
    Ok(())
}

fn print_boroughs() {
    for borough in Borough::all().iter().copied().map(ApiBorough::from) {
        println!("{:<14} {}", borough.name, borough.county_codes.join(", "));
    }
}

/// Runs the API server on a dedicated actix system.
///
/// The server uses actix-web's runtime, so it runs in a blocking task to
/// avoid nesting tokio runtimes.
async fn serve(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    tokio::task::spawn_blocking(move || actix_web::rt::System::new().block_on(run_server(config)))
        .await??;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Search {
            plate,
            state,
            borough,
            from,
            to,
            limit,
            dataset,
            json,
        }) => {
            let query = SearchQuery {
                plate,
                state,
                borough,
                issued_from: from,
                issued_to: to,
                limit,
            };
            run_search(query, dataset.as_deref(), json).await?;
        }
        Some(Commands::Datasets { json }) => print_datasets(json)?,
        Some(Commands::Boroughs) => print_boroughs(),
        Some(Commands::Serve { bind_addr, port }) => {
            let mut config = ServerConfig::from_env();
            if let Some(bind_addr) = bind_addr {
                config.bind_addr = bind_addr;
            }
            if let Some(port) = port {
                config.port = port;
            }
            serve(config).await?;
        }
        None => interactive::run().await?,
    }

    Ok(())
}
