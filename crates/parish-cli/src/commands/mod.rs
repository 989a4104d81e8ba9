//! Subcommand implementations.

mod browse;
mod create;
mod delete;
mod export;
mod get;
mod input;
mod list;
mod login;
mod logout;
mod patch;
mod search;
mod whoami;
mod workflow;

use anyhow::Result;
use clap::Subcommand;

use crate::cli::StoreArgs;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in to a store and save the session
    Login(login::LoginArgs),

    /// Display the active session
    Whoami(whoami::WhoamiArgs),

    /// Forget the saved session
    Logout(logout::LogoutArgs),

    /// Create a record in a collection
    Create(create::CreateArgs),

    /// Fetch a single record
    Get(get::GetArgs),

    /// Merge fields into a record
    Patch(patch::PatchArgs),

    /// Delete records
    Delete(delete::DeleteArgs),

    /// Browse a collection: search, month filter and paging
    List(list::ListArgs),

    /// Find records whose field equals a value
    Search(search::SearchArgs),

    /// Export a whole collection to CSV
    Export(export::ExportArgs),

    /// Approve a pending appointment
    Approve(workflow::RecordArgs),

    /// Reject a pending appointment
    Reject(workflow::RecordArgs),

    /// Mark a request form's certificate ready for release
    Ready(workflow::RecordArgs),

    /// Record that a ready certificate was handed over
    Release(workflow::ReleaseArgs),

    /// Assign a priest to an appointment
    AssignPriest(workflow::AssignPriestArgs),

    /// Accept an assignment as the assigned priest
    ConfirmPriest(workflow::RecordArgs),

    /// Turn down an assignment as the assigned priest
    DeclinePriest(workflow::RecordArgs),
}

pub async fn handle(cmd: Command, store: StoreArgs) -> Result<()> {
    match cmd {
        Command::Login(args) => login::run(args, store).await,
        Command::Whoami(args) => whoami::run(args).await,
        Command::Logout(args) => logout::run(args).await,
        Command::Create(args) => create::run(args, store).await,
        Command::Get(args) => get::run(args, store).await,
        Command::Patch(args) => patch::run(args, store).await,
        Command::Delete(args) => delete::run(args, store).await,
        Command::List(args) => list::run(args, store).await,
        Command::Search(args) => search::run(args, store).await,
        Command::Export(args) => export::run(args, store).await,
        Command::Approve(args) => workflow::approve(args, store).await,
        Command::Reject(args) => workflow::reject(args, store).await,
        Command::Ready(args) => workflow::ready(args, store).await,
        Command::Release(args) => workflow::release(args, store).await,
        Command::AssignPriest(args) => workflow::assign_priest(args, store).await,
        Command::ConfirmPriest(args) => workflow::confirm_priest(args, store).await,
        Command::DeclinePriest(args) => workflow::decline_priest(args, store).await,
    }
}
