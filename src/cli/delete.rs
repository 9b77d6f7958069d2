//! Delete command handler

use crate::cli::{build_page, print_notices, Providers};
use crate::config::Config;
use crate::error::Result;
use crate::table::{Confirm, DeleteOutcome};
use clap::Args;
use std::io::{self, BufRead, Write};

/// Delete command arguments
#[derive(Args)]
pub struct DeleteArgs {
    /// Location ID
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// y/N prompt on the terminal
struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, title: &str, text: &str) -> bool {
        eprint!("{} {} [y/N] ", title, text);
        let _ = io::stderr().flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

/// Run the delete command
pub async fn run(args: DeleteArgs, providers: &Providers) -> Result<()> {
    let config = Config::load()?;
    let mut page = build_page(&config, providers)?;

    let outcome = if args.yes {
        page.delete(&args.id, &|_: &str, _: &str| true).await
    } else {
        page.delete(&args.id, &TerminalConfirm).await
    };
    print_notices(page.notices_mut());

    match outcome {
        DeleteOutcome::Deleted => {
            println!("Deleted location: {}", args.id);
            if page.last_error().is_none() {
                println!("{} locations remain", page.locations().len());
            }
        }
        DeleteOutcome::Cancelled => {}
        DeleteOutcome::Failed => std::process::exit(1),
    }

    Ok(())
}
