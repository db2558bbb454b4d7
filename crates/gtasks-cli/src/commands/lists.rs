//! Lists command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct ListsArgs {
    /// Account identifier
    #[arg(long, default_value = "default")]
    pub account: String,

    /// Path to the OAuth2 credentials file
    #[arg(long)]
    pub credentials: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub fn run(args: ListsArgs) -> Result<()> {
    let client = context::restore_client(&args.account, args.credentials)?;

    let lists = client
        .list_task_lists()
        .context("Failed to list task lists")?;

    if args.pretty {
        output::json_pretty(&lists)?;
    } else {
        output::json(&lists)?;
    }

    Ok(())
}
