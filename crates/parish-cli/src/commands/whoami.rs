//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

pub async fn run(_args: WhoamiArgs) -> Result<()> {
    let session = storage::load_session()
        .await
        .context("Failed to load session")?
        .context("No active session. Run 'parish login' first.")?;

    let user = session.user();
    output::field("User", &user.id);
    if !user.name.is_empty() {
        output::field("Name", &user.name);
    }
    output::field("Role", if user.is_super_admin { "super admin" } else { "member" });
    output::field("Store", session.url().as_str());

    Ok(())
}
