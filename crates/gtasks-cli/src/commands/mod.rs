//! Subcommand implementations.

pub mod lists;
pub mod login;
pub mod logout;
pub mod tasks;
