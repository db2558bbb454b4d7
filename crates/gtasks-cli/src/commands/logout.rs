//! Logout command implementation.

use anyhow::{Context, Result};
use clap::Args;
use gtasks::{KeyringStore, SecretStore};

use crate::output;

#[derive(Args, Debug)]
pub struct LogoutArgs {
    /// Account identifier
    #[arg(long, default_value = "default")]
    pub account: String,
}

pub fn run(args: LogoutArgs) -> Result<()> {
    let store = KeyringStore::new();
    store
        .delete(&args.account)
        .context("Failed to remove the stored authorization")?;

    output::success(&format!(
        "Removed stored authorization for account '{}'",
        args.account
    ));

    Ok(())
}
