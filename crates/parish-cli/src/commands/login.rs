//! Login command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;

use parish_core::traits::Store;
use parish_core::workflow::priest_id_for;
use parish_core::{Collection, StoreUrl, User};

use crate::cli::StoreArgs;
use crate::output;
use crate::session::CliSession;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account id from the identity provider
    #[arg(long)]
    pub user_id: String,

    /// Display name
    #[arg(long, default_value = "")]
    pub name: String,

    /// Sign in with parish-wide administration rights
    #[arg(long)]
    pub super_admin: bool,
}

pub async fn run(args: LoginArgs, store: StoreArgs) -> Result<()> {
    let Some(url) = store.store else {
        bail!("No store given. Pass --store or set PARISH_STORE.");
    };
    let url = StoreUrl::new(&url).context("Invalid store URL")?;

    let mut user = User::new(args.user_id, args.name);
    if args.super_admin {
        user = user.super_admin();
    }

    eprintln!("{}", "Logging in...".dimmed());

    let session = CliSession::new(user, url, store.token)?;

    // One read proves the store is reachable and accepts the token.
    session
        .store()
        .list(Collection::Priests)
        .await
        .context("Failed to reach store")?;

    let priest_id = if session.user().is_super_admin {
        None
    } else {
        priest_id_for(session.store(), session.user())
            .await
            .context("Failed to look up priest record")?
    };

    storage::save_session(&session)
        .await
        .context("Failed to save session")?;

    output::success("Logged in successfully");
    println!();
    output::field("User", &session.user().id);
    output::field("Store", session.url().as_str());
    if let Some(priest_id) = priest_id {
        output::field("Priest", priest_id.as_str());
    }

    Ok(())
}
