//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod delete;
pub mod edit;
pub mod geocode;
pub mod list;

use crate::config::Config;
use crate::error::Result;
use crate::form::LocationForm;
use crate::geo::{get_geocoder, Geocoder};
use crate::map::get_picker;
use crate::notify::{Level, Notifications};
use crate::page::LocationPage;
use crate::store::HttpLocationStore;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Manage named locations
#[derive(Parser)]
#[command(name = "loc-admin")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Map picker: mapbox, google or openlayers
    #[arg(long, global = true)]
    pub map: Option<String>,

    /// Geocoder: nominatim or google
    #[arg(long, global = true)]
    pub geocoder: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the location table
    List(list::ListArgs),

    /// Create a location
    Add(edit::AddArgs),

    /// Edit a location
    Edit(edit::EditArgs),

    /// Delete a location
    Delete(delete::DeleteArgs),

    /// Search addresses
    Search(geocode::SearchArgs),

    /// Look up the address at a coordinate
    Reverse(geocode::ReverseArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Providers picked on the command line
#[derive(Debug, Clone, Default)]
pub struct Providers {
    pub map: Option<String>,
    pub geocoder: Option<String>,
}

/// Run the CLI
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let providers = Providers {
        map: cli.map,
        geocoder: cli.geocoder,
    };

    match cli.command {
        Commands::List(args) => list::run(args, &providers).await,
        Commands::Add(args) => edit::run_add(args, &providers).await,
        Commands::Edit(args) => edit::run_edit(args, &providers).await,
        Commands::Delete(args) => delete::run(args, &providers).await,
        Commands::Search(args) => geocode::run_search(args, &providers).await,
        Commands::Reverse(args) => geocode::run_reverse(args, &providers).await,
        Commands::Config(args) => config::run(args),
    }
}

/// Log to stderr, `RUST_LOG` overrides the default level
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Compose the page from config and command-line providers
pub fn build_page(
    config: &Config,
    providers: &Providers,
) -> Result<LocationPage<HttpLocationStore, Geocoder>> {
    let geocoder = get_geocoder(providers.geocoder.as_deref(), config)?;
    let picker = get_picker(
        providers.map.as_deref().unwrap_or(&config.map.provider),
        config,
    );

    Ok(LocationPage::new(
        HttpLocationStore::from_config(config),
        LocationForm::new(geocoder, picker),
    ))
}

/// Print and clear pending notices
pub fn print_notices(notices: &mut Notifications) {
    for notice in notices.drain() {
        let tag = match notice.level {
            Level::Info => "info",
            Level::Success => "ok",
            Level::Warning => "warning",
            Level::Error => "error",
        };
        eprintln!("[{}] {} {}", tag, notice.title, notice.message);
    }
}
