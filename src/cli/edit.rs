//! Add and edit command handlers
//!
//! Drive the location form the way a user would: type the fields, pick an
//! address candidate or a map point, then submit.

use crate::cli::{build_page, print_notices, Providers};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::form::SubmitOutcome;
use crate::geo::Geocoder;
use crate::location::Coordinates;
use crate::map::MapEvent;
use crate::page::LocationPage;
use crate::store::HttpLocationStore;
use clap::Args;

/// Form fields shared by add and edit
#[derive(Args, Debug, Clone)]
pub struct FormArgs {
    /// Nick name
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Address text (searched as you would type it)
    #[arg(long, short = 'a')]
    pub address: Option<String>,

    /// Use address candidate N from the search (1-based)
    #[arg(long, short = 's', requires = "address")]
    pub select: Option<usize>,

    /// Pick a map point and look up its address
    #[arg(long, value_name = "LAT,LNG", allow_hyphen_values = true)]
    pub at: Option<Coordinates>,

    /// Show the draft without saving
    #[arg(long)]
    pub dry_run: bool,
}

/// Add command arguments
#[derive(Args)]
pub struct AddArgs {
    #[command(flatten)]
    pub form: FormArgs,
}

/// Edit command arguments
#[derive(Args)]
pub struct EditArgs {
    /// Location ID (a unique prefix is enough)
    pub id: String,

    #[command(flatten)]
    pub form: FormArgs,
}

/// Run the add command
pub async fn run_add(args: AddArgs, providers: &Providers) -> Result<()> {
    let config = Config::load()?;
    let mut page = build_page(&config, providers)?;

    page.add_new();
    fill_and_submit(&mut page, &args.form).await
}

/// Run the edit command
pub async fn run_edit(args: EditArgs, providers: &Providers) -> Result<()> {
    let config = Config::load()?;
    let mut page = build_page(&config, providers)?;

    page.mount().await;
    if let Some(error) = page.last_error() {
        return Err(Error::Store(error.to_string()));
    }

    let matches: Vec<String> = page
        .locations()
        .iter()
        .filter(|l| l.id.starts_with(&args.id))
        .map(|l| l.id.clone())
        .collect();

    let id = match matches.as_slice() {
        [id] => id.clone(),
        [] => return Err(Error::NotFound(args.id)),
        _ => {
            return Err(Error::Config(format!(
                "Ambiguous id prefix {} ({} matches)",
                args.id,
                matches.len()
            )))
        }
    };

    page.edit(&id);
    fill_and_submit(&mut page, &args.form).await
}

async fn fill_and_submit(
    page: &mut LocationPage<HttpLocationStore, Geocoder>,
    args: &FormArgs,
) -> Result<()> {
    {
        let (form, notices) = page.form_mut();

        if let Some(name) = &args.name {
            form.set_nick_name(name);
        }

        if let Some(address) = &args.address {
            form.change_address(address, notices).await;

            if args.select.is_none() && !form.candidates().is_empty() {
                println!("Address candidates (use --select N):");
                for (i, candidate) in form.candidates().iter().enumerate() {
                    println!("  {:>2}. {}", i + 1, candidate.display_name);
                }
                println!();
            }

            if let Some(n) = args.select {
                if n == 0 || !form.select_candidate(n - 1) {
                    return Err(Error::Config(format!(
                        "No address candidate {} ({} found)",
                        n,
                        form.candidates().len()
                    )));
                }
            }
        }

        if let Some(at) = args.at {
            form.pick_and_resolve(MapEvent::Click(at), notices).await;
        }

        let draft = form.draft();
        println!(
            "{} location",
            if form.is_editing() { "Updating" } else { "Creating" }
        );
        println!("  Name:    {}", draft.nick_name);
        println!("  Address: {}", draft.address);
        println!("  Coords:  {}", draft.coordinates());
        println!(
            "  Map:     {} ({})",
            form.picker().view_url(),
            form.picker().name()
        );
    }

    if args.dry_run {
        print_notices(page.notices_mut());
        return Ok(());
    }

    let outcome = page.submit().await;

    if let SubmitOutcome::Invalid = outcome {
        let errors = page.form().errors();
        for message in [&errors.nick_name, &errors.address].into_iter().flatten() {
            eprintln!("  {}", message);
        }
    }
    print_notices(page.notices_mut());

    match outcome {
        SubmitOutcome::Saved(saved) => {
            match saved {
                Some(location) => println!("Saved location: {}", location.id),
                None => println!("Saved location"),
            }
            Ok(())
        }
        SubmitOutcome::Invalid | SubmitOutcome::Failed => std::process::exit(1),
    }
}
