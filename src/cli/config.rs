//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Config;
use crate::error::Result;
use clap::Args;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "map.provider")
    pub key: Option<String>,

    /// Value to set (if not provided, shows current value)
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Reset config to defaults
    #[arg(long)]
    pub reset: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    if args.path {
        let path = Config::config_path()?;
        println!("{}", path.display());
        return Ok(());
    }

    if args.reset {
        Config::default().save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load()?;

    match (&args.key, &args.value) {
        (None, None) => {
            show_all_config(&config);
        }

        (Some(key), None) => {
            if let Some(value) = config.get(key) {
                println!("{}", value);
            } else {
                eprintln!("Unknown config key: {}", key);
                eprintln!("\nAvailable keys:");
                for k in Config::available_keys() {
                    eprintln!("  {}", k);
                }
                std::process::exit(1);
            }
        }

        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save()?;
            println!("{} = {}", key, value);
        }

        (None, Some(_)) => {
            eprintln!("Error: Must specify a key to set a value");
            std::process::exit(1);
        }
    }

    Ok(())
}

fn masked(secret: &str) -> &'static str {
    if secret.is_empty() {
        "\"\" # not configured"
    } else {
        "\"***\" # configured"
    }
}

/// Display all configuration values
fn show_all_config(config: &Config) {
    println!("[store]");
    println!("base_url = \"{}\"", config.store.base_url);
    println!();

    println!("[geocoder]");
    println!("provider = \"{}\"", config.geocoder.provider);
    println!("nominatim_url = \"{}\"", config.geocoder.nominatim_url);
    println!("search_limit = {}", config.geocoder.search_limit);
    println!();

    println!("[map]");
    println!("provider = \"{}\"", config.map.provider);
    println!();

    println!("[api_keys]");
    println!("google = {}", masked(&config.api_keys.google));
    println!("mapbox = {}", masked(&config.api_keys.mapbox));
}
