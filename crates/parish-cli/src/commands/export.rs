//! Export command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use parish_core::Collection;
use parish_table::Browser;

use super::browse::{ColumnArgs, load_records};
use crate::cli::StoreArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Collection name
    pub collection: Collection,

    /// Directory to write the CSV file into
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    /// File name stem (default: the collection name)
    #[arg(long)]
    pub title: Option<String>,

    #[command(flatten)]
    pub columns: ColumnArgs,
}

pub async fn run(args: ExportArgs, store: StoreArgs) -> Result<()> {
    let session = session::require(&store).await?;
    let records = load_records(&session, args.collection).await?;
    let columns = args.columns.columns(&records);
    let title = args
        .title
        .unwrap_or_else(|| args.collection.as_str().to_string());

    let browser = Browser::new(records, columns).title(title);
    let path = browser
        .export_csv(&args.out)
        .context("Failed to export CSV")?;

    println!("{}", path.display());
    output::success(&format!(
        "Exported {} records to {}",
        browser.records().len(),
        path.display()
    ));

    Ok(())
}
