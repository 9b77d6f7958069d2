//! Search and reverse command handlers
//!
//! Direct geocoder calls, useful for checking a provider setup.

use crate::cli::Providers;
use crate::config::Config;
use crate::error::Result;
use crate::geo::{get_geocoder, GeoBackend};
use clap::Args;

/// Search command arguments
#[derive(Args)]
pub struct SearchArgs {
    /// Address text
    pub text: String,
}

/// Reverse command arguments
#[derive(Args)]
pub struct ReverseArgs {
    /// Latitude
    #[arg(allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude
    #[arg(allow_negative_numbers = true)]
    pub lng: f64,
}

/// Run the search command
pub async fn run_search(args: SearchArgs, providers: &Providers) -> Result<()> {
    let config = Config::load()?;
    let geocoder = get_geocoder(providers.geocoder.as_deref(), &config)?;

    let candidates = geocoder.search_address(&args.text).await?;
    if candidates.is_empty() {
        println!("No addresses found.");
        return Ok(());
    }

    for (i, candidate) in candidates.iter().enumerate() {
        println!(
            "{:>2}. {}\n    ({:.6}, {:.6})",
            i + 1,
            candidate.display_name,
            candidate.lat,
            candidate.lng
        );
    }
    Ok(())
}

/// Run the reverse command
pub async fn run_reverse(args: ReverseArgs, providers: &Providers) -> Result<()> {
    let config = Config::load()?;
    let geocoder = get_geocoder(providers.geocoder.as_deref(), &config)?;

    crate::location::Coordinates::new(args.lat, args.lng).validate()?;

    match geocoder.reverse_geocode(args.lat, args.lng).await? {
        Some(found) => println!("{}", found.display_name),
        None => {
            eprintln!("No address found for ({}, {})", args.lat, args.lng);
            std::process::exit(1);
        }
    }
    Ok(())
}
