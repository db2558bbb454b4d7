//! REST client implementation.
//!
//! This module provides the HTTP client for Google Tasks API communication
//! plus the endpoint constants and wire types.

mod client;
mod endpoints;

pub(crate) use client::RestClient;
pub(crate) use endpoints::{TaskResource, TasksPage, TasksQuery, SCOPE_TASKS, SCOPE_TASKS_READONLY};

pub use endpoints::Endpoints;
