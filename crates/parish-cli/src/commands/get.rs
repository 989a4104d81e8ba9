//! Get command implementation.

use anyhow::{Context, Result};
use clap::Args;

use parish_core::{Collection, CollectionHandle, RecordId};

use crate::cli::StoreArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Collection name
    pub collection: Collection,

    /// Record key
    pub id: RecordId,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: GetArgs, store: StoreArgs) -> Result<()> {
    let session = session::require(&store).await?;

    let handle = CollectionHandle::new(session.store().clone(), args.collection);
    let record = handle
        .fetch(&args.id)
        .await
        .context("Failed to fetch record")?
        .with_context(|| format!("Record not found: {}/{}", args.collection, args.id))?;

    if args.pretty {
        output::json_pretty(&record)?;
    } else {
        output::json(&record)?;
    }

    Ok(())
}
