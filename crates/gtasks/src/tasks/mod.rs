//! Task fetching and the typed task model.

mod client;
mod types;

pub use client::Gtasks;
pub use types::{ClientHandle, Task, TaskFilters, TaskStatus};
