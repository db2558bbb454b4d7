//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::{lists, login, logout, tasks};

/// Google Tasks from the command line.
#[derive(Parser, Debug)]
#[command(name = "gtasks")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authorize an account interactively and store its refresh token
    Login(login::LoginArgs),

    /// Fetch tasks from a task list
    Tasks(tasks::TasksArgs),

    /// List the available task lists
    Lists(lists::ListsArgs),

    /// Delete the stored refresh token for an account
    Logout(logout::LogoutArgs),
}
