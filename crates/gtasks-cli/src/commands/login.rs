//! Login command implementation.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use gtasks::KeyringStore;

use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account identifier to store the authorization under
    #[arg(long, default_value = "default")]
    pub account: String,

    /// Path to the OAuth2 credentials file
    #[arg(long)]
    pub credentials: Option<PathBuf>,

    /// Do not open the authorization URL in a browser
    #[arg(long)]
    pub no_browser: bool,
}

pub fn run(args: LoginArgs) -> Result<()> {
    let manager = context::session_manager(args.credentials)?.with_browser(!args.no_browser);
    let store = KeyringStore::new();

    let session = manager
        .authenticate(&args.account, &store, |prompt| {
            eprintln!("{}", prompt.instructions());
            eprint!("> ");
            io::stderr().flush()?;

            let mut code = String::new();
            io::stdin().lock().read_line(&mut code)?;
            Ok(code)
        })
        .context("Failed to authorize")?;

    output::success("Logged in successfully");
    println!();
    output::field("Account", session.account());

    Ok(())
}
