//! Patch command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;

use parish_core::{Collection, CollectionHandle, RecordId};

use super::input::DataArgs;
use crate::cli::StoreArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct PatchArgs {
    /// Collection name
    pub collection: Collection,

    /// Record key
    pub id: RecordId,

    #[command(flatten)]
    pub data: DataArgs,
}

pub async fn run(args: PatchArgs, store: StoreArgs) -> Result<()> {
    let changes = args.data.document()?;
    if changes.is_empty() {
        bail!("Nothing to change. Pass --set key=value or --json.");
    }

    let session = session::require(&store).await?;
    let handle = CollectionHandle::new(session.store().clone(), args.collection);
    handle
        .patch(&args.id, changes)
        .await
        .context("Failed to patch record")?;

    output::success(&format!("Updated {}/{}", args.collection, args.id));
    Ok(())
}
