//! CLI argument definitions.

use clap::{Args, Parser};

use crate::commands::Command;

/// Parish records CLI.
#[derive(Parser, Debug)]
#[command(name = "parish")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub store: StoreArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Where records live. Both fall back to the saved session.
#[derive(Args, Debug, Clone, Default)]
pub struct StoreArgs {
    /// Store URL (https://... or file:///...)
    #[arg(long, global = true, env = "PARISH_STORE")]
    pub store: Option<String>,

    /// Access token sent to a hosted store
    #[arg(long, global = true, env = "PARISH_STORE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}
