//! Status workflow commands.

use anyhow::{Context, Result};
use clap::Args;

use parish_core::workflow::Transition;
use parish_core::{Collection, RecordId, Workflow};

use crate::cli::StoreArgs;
use crate::output;
use crate::session::{self, CliSession, CliStore};

#[derive(Args, Debug)]
pub struct RecordArgs {
    /// Collection name
    pub collection: Collection,

    /// Record key
    pub id: RecordId,
}

#[derive(Args, Debug)]
pub struct ReleaseArgs {
    #[command(flatten)]
    pub record: RecordArgs,

    /// Who received the certificate
    #[arg(long = "to")]
    pub released_to: String,
}

#[derive(Args, Debug)]
pub struct AssignPriestArgs {
    #[command(flatten)]
    pub record: RecordArgs,

    /// Key of the priest record
    #[arg(long)]
    pub priest: RecordId,

    /// Ask the priest to confirm instead of confirming outright
    #[arg(long)]
    pub request: bool,
}

async fn open(store: &StoreArgs) -> Result<(CliSession, Workflow<CliStore>)> {
    let session = session::require(store).await?;
    let workflow = Workflow::new(session.store().clone());
    Ok((session, workflow))
}

fn report(transition: &Transition, what: &str) {
    output::success(&format!("{} {}", what, transition.path));
    if let Some(notification) = &transition.notification {
        output::field("Notification", notification.as_str());
    }
}

pub async fn approve(args: RecordArgs, store: StoreArgs) -> Result<()> {
    let (session, workflow) = open(&store).await?;
    let transition = workflow
        .approve(session.user(), args.collection, &args.id)
        .await
        .context("Failed to approve")?;
    report(&transition, "Approved");
    Ok(())
}

pub async fn reject(args: RecordArgs, store: StoreArgs) -> Result<()> {
    let (session, workflow) = open(&store).await?;
    let transition = workflow
        .reject(session.user(), args.collection, &args.id)
        .await
        .context("Failed to reject")?;
    report(&transition, "Rejected");
    Ok(())
}

pub async fn ready(args: RecordArgs, store: StoreArgs) -> Result<()> {
    let (session, workflow) = open(&store).await?;
    let transition = workflow
        .mark_ready(session.user(), args.collection, &args.id)
        .await
        .context("Failed to mark ready")?;
    report(&transition, "Ready for release:");
    Ok(())
}

pub async fn release(args: ReleaseArgs, store: StoreArgs) -> Result<()> {
    let (session, workflow) = open(&store).await?;
    let transition = workflow
        .release(
            session.user(),
            args.record.collection,
            &args.record.id,
            &args.released_to,
        )
        .await
        .context("Failed to release")?;
    report(&transition, "Released");
    Ok(())
}

pub async fn assign_priest(args: AssignPriestArgs, store: StoreArgs) -> Result<()> {
    let (session, workflow) = open(&store).await?;
    let transition = workflow
        .assign_priest(
            session.user(),
            args.record.collection,
            &args.record.id,
            &args.priest,
            args.request,
        )
        .await
        .context("Failed to assign priest")?;
    let what = if args.request {
        "Requested priest for"
    } else {
        "Assigned priest to"
    };
    report(&transition, what);
    Ok(())
}

pub async fn confirm_priest(args: RecordArgs, store: StoreArgs) -> Result<()> {
    let (session, workflow) = open(&store).await?;
    let transition = workflow
        .confirm_priest(session.user(), args.collection, &args.id)
        .await
        .context("Failed to confirm assignment")?;
    report(&transition, "Confirmed");
    Ok(())
}

pub async fn decline_priest(args: RecordArgs, store: StoreArgs) -> Result<()> {
    let (session, workflow) = open(&store).await?;
    let transition = workflow
        .decline_priest(session.user(), args.collection, &args.id)
        .await
        .context("Failed to decline assignment")?;
    report(&transition, "Declined");
    Ok(())
}
