//! gtasks - Google Tasks Client Library
//!
//! This library provides a small, synchronous client for the Google Tasks
//! REST API with a session-centric design. All authenticated operations flow
//! through a [`Session`] obtained from a [`SessionManager`].
//!
//! # Example
//!
//! ```no_run
//! use gtasks::{Credentials, Gtasks, KeyringStore, SecretStore, SessionManager, TaskFilters};
//!
//! # fn example() -> Result<(), gtasks::Error> {
//! let credentials = Credentials::load("credentials.json")?;
//! let manager = SessionManager::new(credentials);
//!
//! let store = KeyringStore::new();
//! let token = store.get("default")?.expect("run interactive login first");
//! let session = manager.restore("default", &token)?;
//!
//! let client = Gtasks::new(session);
//! let filters = TaskFilters {
//!     show_completed: false,
//!     ..TaskFilters::default()
//! };
//!
//! for task in client.fetch_tasks("@default", &filters)? {
//!     println!("{}: {}", task.id, task.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod error;
pub mod rest;
pub mod tasks;

// Re-export primary types at crate root for convenience
pub use auth::{
    AuthorizationPrompt, Credentials, KeyringStore, MemoryStore, RefreshToken, SecretStore,
    Session, SessionManager,
};
pub use error::Error;
pub use rest::Endpoints;
pub use tasks::{ClientHandle, Gtasks, Task, TaskFilters, TaskStatus};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
