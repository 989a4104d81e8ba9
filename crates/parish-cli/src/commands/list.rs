//! List command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use parish_core::Collection;
use parish_table::{Browser, MonthFilter, MonthMatch, PageSize};

use super::browse::{ColumnArgs, load_records};
use crate::cli::StoreArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Collection name
    pub collection: Collection,

    /// Free-text search over every field
    #[arg(long, short)]
    pub query: Option<String>,

    /// Month filter: All, a month name, or 1-12
    #[arg(long)]
    pub month: Option<MonthFilter>,

    /// Compare against the picked month instead of the current one
    #[arg(long)]
    pub selected_month: bool,

    /// Page to show, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page: 10, 15 or 20
    #[arg(long, default_value = "10", value_parser = parse_page_size)]
    pub page_size: PageSize,

    #[command(flatten)]
    pub columns: ColumnArgs,

    /// Print the page's records as JSON lines instead of a table
    #[arg(long)]
    pub json: bool,
}

fn parse_page_size(s: &str) -> Result<PageSize, String> {
    let size: usize = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    PageSize::try_from(size).map_err(|e| e.to_string())
}

pub async fn run(args: ListArgs, store: StoreArgs) -> Result<()> {
    let session = session::require(&store).await?;
    let records = load_records(&session, args.collection).await?;
    let columns = args.columns.columns(&records);

    let mode = if args.selected_month {
        MonthMatch::Selected
    } else {
        MonthMatch::Current
    };
    let mut browser = Browser::new(records, columns)
        .title(args.collection.as_str())
        .month_match(mode);

    if let Some(query) = &args.query {
        browser.apply_query(query.as_str());
    }
    if let Some(month) = args.month {
        browser.select_month(month);
    }
    browser.set_page_size(args.page_size);
    browser.set_page(args.page);

    let view = browser.view();
    if view.rows.is_empty() {
        eprintln!("{}", "No records found.".dimmed());
        return Ok(());
    }

    if args.json {
        for record in &view.rows {
            output::json(record).context("Failed to print record")?;
        }
    } else {
        let rows: Vec<Vec<String>> = view.rows.iter().map(|r| browser.render_row(r)).collect();
        output::table(&browser.headers(), &rows);
    }

    eprintln!();
    eprintln!(
        "{} {} of {} ({} matching, {} total, {} per page)",
        "Page".dimmed(),
        view.page,
        view.page_count,
        view.matched,
        view.total,
        view.page_size
    );

    Ok(())
}
