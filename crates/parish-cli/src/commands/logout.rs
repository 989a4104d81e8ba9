//! Logout command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs) -> Result<()> {
    let removed = storage::clear_session()
        .await
        .context("Failed to clear session")?;

    if removed {
        output::success("Logged out");
    } else {
        eprintln!("{}", "No active session.".dimmed());
    }
    Ok(())
}
