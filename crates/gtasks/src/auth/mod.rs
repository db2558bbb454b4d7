//! Authentication types and session management.
//!
//! This module provides OAuth2 credential loading, refresh-token persistence,
//! and the session lifecycle. All authenticated operations require a
//! [`Session`] object.

mod credentials;
mod secrets;
mod session;
mod tokens;

pub use credentials::Credentials;
pub use secrets::{KeyringStore, MemoryStore, SecretStore};
pub use session::{AuthorizationPrompt, Session, SessionManager};
pub use tokens::{AccessToken, RefreshToken};
