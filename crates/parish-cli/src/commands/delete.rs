//! Delete command implementation.

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;
use serde_json::Value;

use parish_core::{Collection, CollectionHandle, RecordId};
use parish_table::Browser;

use crate::cli::StoreArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Collection name
    pub collection: Collection,

    /// Keys of the records to delete
    #[arg(required = true)]
    pub ids: Vec<RecordId>,

    /// Confirm the deletion
    #[arg(long)]
    pub yes: bool,
}

pub async fn run(args: DeleteArgs, store: StoreArgs) -> Result<()> {
    let session = session::require(&store).await?;
    let handle = CollectionHandle::new(session.store().clone(), args.collection);

    let records: Vec<Value> = handle
        .fetch_all()
        .await
        .context("Failed to list records")?
        .into_iter()
        .map(Value::from)
        .collect();

    let requested = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&requested);
    let mut browser = Browser::new(records, Vec::new()).on_delete_records(move |chosen| {
        if let Ok(mut requested) = sink.lock() {
            requested.extend(chosen);
        }
    });

    for id in &args.ids {
        let index = browser
            .records()
            .iter()
            .position(|r| r.get("id").and_then(Value::as_str) == Some(id.as_str()));
        match index {
            Some(index) => {
                browser.select(index);
            }
            None => eprintln!("{} {}/{}", "Not found:".yellow(), args.collection, id),
        }
    }

    if browser.selected_count() == 0 {
        bail!("No matching records to delete");
    }
    if !args.yes {
        bail!(
            "{} in {}. Re-run with --yes to confirm.",
            browser.delete_label(),
            args.collection
        );
    }

    browser.request_delete();
    let chosen = std::mem::take(
        &mut *requested
            .lock()
            .map_err(|_| anyhow::anyhow!("Delete request lock poisoned"))?,
    );

    for record in &chosen {
        let Some(id) = record.get("id").and_then(Value::as_str) else {
            continue;
        };
        let id = RecordId::new(id).context("Invalid record key")?;
        handle.remove(&id).await.context("Failed to delete record")?;
        output::success(&format!("Deleted {}/{}", args.collection, id));
    }

    Ok(())
}
