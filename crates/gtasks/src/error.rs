//! Error types for the gtasks library.
//!
//! This module provides a unified error type with explicit variants for
//! configuration, authentication, transport, and secret storage errors.

use std::fmt;
use thiserror::Error;

/// The unified error type for gtasks operations.
///
/// This error type covers all possible failure modes in the library,
/// with explicit variants to allow callers to handle specific cases.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration errors (bad or missing credentials file).
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Authentication errors (token exchange or refresh rejected).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Network transport errors (connection, timeout, HTTP status).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Secret storage errors (OS keychain access).
    #[error("secret storage error: {0}")]
    Secret(#[from] SecretError),
}

/// Configuration errors from loading the OAuth2 credentials file.
///
/// These are fatal: without a valid client identity no flow can proceed.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The credentials file could not be read.
    #[error("cannot read credentials file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The credentials file is not valid JSON.
    #[error("credentials file '{path}' is not valid JSON: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The credentials file lacks the top-level `installed` section.
    #[error("credentials file '{path}' has no 'installed' section")]
    MissingSection { path: String },

    /// A required field is missing from the `installed` section.
    #[error("credentials file '{path}' is missing field '{field}'")]
    MissingField { path: String, field: &'static str },

    /// The `redirect_uris` array is empty.
    #[error("credentials file '{path}' has an empty 'redirect_uris' array")]
    NoRedirectUris { path: String },

    /// An endpoint URL is not a valid absolute URL.
    #[error("invalid endpoint URL '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
}

/// Authentication-related errors.
///
/// None of these are retried locally; the caller decides whether to fall
/// back to the full interactive flow.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The server rejected the refresh token (expired or revoked).
    #[error("refresh token rejected: {message}")]
    RefreshRejected { message: String },

    /// The authorization code exchange failed.
    #[error("authorization code exchange failed: {message}")]
    CodeExchangeFailed { message: String },

    /// The user supplied an empty authorization code.
    #[error("no authorization code provided")]
    MissingAuthorizationCode,

    /// The token response did not include a refresh token.
    #[error("token response did not include a refresh token")]
    MissingRefreshToken,

    /// Reading the authorization code from the caller failed.
    #[error("failed to read authorization code: {0}")]
    Prompt(#[from] std::io::Error),
}

/// Transport-level errors from task API requests.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },

    /// The server returned a non-success status.
    #[error("{0}")]
    Status(StatusError),

    /// The response body could not be decoded.
    #[error("failed to decode response: {message}")]
    Decode { message: String },
}

/// A non-success HTTP status from the task API.
#[derive(Debug)]
pub struct StatusError {
    /// HTTP status code.
    pub status: u16,
    /// Error message from the server's error body (if present).
    pub message: Option<String>,
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl StatusError {
    /// Create a new status error.
    pub fn new(status: u16, message: Option<String>) -> Self {
        Self { status, message }
    }

    /// Check if this is an authentication failure.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else if err.is_decode() {
            TransportError::Decode {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// Secret storage errors from the OS keychain backend.
#[derive(Debug, Error)]
pub enum SecretError {
    /// The keychain backend failed.
    #[error("keychain error: {0}")]
    Keyring(#[from] keyring::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_includes_server_message() {
        let err = StatusError::new(403, Some("Insufficient Permission".to_string()));
        assert_eq!(err.to_string(), "HTTP 403: Insufficient Permission");

        let bare = StatusError::new(500, None);
        assert_eq!(bare.to_string(), "HTTP 500");
    }

    #[test]
    fn status_error_identifies_auth_failures() {
        assert!(StatusError::new(401, None).is_auth_error());
        assert!(!StatusError::new(500, None).is_auth_error());
    }
}
