//! List command handler
//!
//! Fetches the locations and prints one table page.

use crate::cli::{build_page, print_notices, Providers};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::table::render::render_text;
use crate::table::{default_columns, Column, ColumnSpec};
use clap::Args;

/// List command arguments
#[derive(Args)]
pub struct ListArgs {
    /// Filter rows by text in any field
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Page to show (5 rows per page)
    #[arg(long, short = 'p', default_value = "1")]
    pub page: usize,

    /// Also show coordinates and last update
    #[arg(long, short = 'w')]
    pub wide: bool,

    /// Print the page as JSON
    #[arg(long)]
    pub json: bool,
}

fn wide_columns() -> Vec<ColumnSpec> {
    let mut columns = default_columns();
    columns.extend([
        ColumnSpec::new("Latitude", Column::Latitude),
        ColumnSpec::new("Longitude", Column::Longitude),
        ColumnSpec::new("Updated At", Column::UpdatedAt),
    ]);
    columns
}

/// Run the list command
pub async fn run(args: ListArgs, providers: &Providers) -> Result<()> {
    let config = Config::load()?;
    let mut page = build_page(&config, providers)?;
    if args.wide {
        page = page.with_columns(wide_columns());
    }

    page.mount().await;
    if let Some(error) = page.last_error() {
        let error = error.to_string();
        print_notices(page.notices_mut());
        return Err(Error::Store(error));
    }

    if let Some(term) = &args.search {
        page.set_search(term);
    }
    page.go_to_page(args.page);

    let view = page.table_view();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render_text(&view));
    }

    Ok(())
}
