//! Search command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use parish_core::{Collection, CollectionHandle};

use super::input::parse_value;
use crate::cli::StoreArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Collection name
    pub collection: Collection,

    /// Field to compare
    pub field: String,

    /// Value the field must equal (JSON, or a plain string)
    pub value: String,
}

pub async fn run(args: SearchArgs, store: StoreArgs) -> Result<()> {
    let session = session::require(&store).await?;

    let handle = CollectionHandle::new(session.store().clone(), args.collection);
    let records = handle
        .search_by_field(&args.field, &parse_value(&args.value))
        .await
        .context("Failed to search records")?;

    if records.is_empty() {
        eprintln!("{}", "No records found.".dimmed());
        return Ok(());
    }

    for record in &records {
        output::json(record)?;
    }

    Ok(())
}
