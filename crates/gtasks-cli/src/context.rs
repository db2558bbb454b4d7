//! Shared session establishment for commands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use gtasks::{Credentials, Gtasks, KeyringStore, SecretStore, SessionManager};

/// Resolve the credentials file path: an explicit override, or
/// `credentials.json` in the user config directory.
pub fn credentials_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }

    let dirs =
        ProjectDirs::from("", "", "gtasks").context("Could not determine config directory")?;

    Ok(dirs.config_dir().join("credentials.json"))
}

/// Load the application credentials and build a session manager.
pub fn session_manager(credentials: Option<PathBuf>) -> Result<SessionManager> {
    let path = credentials_path(credentials)?;
    tracing::debug!(path = %path.display(), "Loading application credentials");
    let credentials = Credentials::load(&path)
        .with_context(|| format!("Failed to load credentials from {}", path.display()))?;

    Ok(SessionManager::new(credentials))
}

/// Restore a session from the keychain and wrap it in a task client.
///
/// A missing or rejected stored token is an error pointing at `gtasks login`;
/// the interactive flow is never started from here.
pub fn restore_client(account: &str, credentials: Option<PathBuf>) -> Result<Gtasks> {
    let manager = session_manager(credentials)?;
    let store = KeyringStore::new();

    let token = store
        .get(account)
        .context("Failed to read the keychain")?
        .with_context(|| {
            format!("No stored authorization for account '{account}'. Run 'gtasks login' first.")
        })?;

    let session = manager.restore(account, &token).with_context(|| {
        format!("Stored authorization for '{account}' was rejected. Run 'gtasks login' again.")
    })?;

    Ok(Gtasks::new(session))
}
