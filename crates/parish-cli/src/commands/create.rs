//! Create command implementation.

use anyhow::{Context, Result};
use clap::Args;

use parish_core::{Collection, CollectionHandle};

use super::input::DataArgs;
use crate::cli::StoreArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Collection name (e.g. baptismAppointment)
    pub collection: Collection,

    #[command(flatten)]
    pub data: DataArgs,
}

pub async fn run(args: CreateArgs, store: StoreArgs) -> Result<()> {
    let session = session::require(&store).await?;
    let data = args.data.document()?;

    let handle = CollectionHandle::new(session.store().clone(), args.collection);
    let id = handle.create(data).await.context("Failed to create record")?;

    println!("{}", id);
    output::success(&format!("Created {}/{}", args.collection, id));

    Ok(())
}
