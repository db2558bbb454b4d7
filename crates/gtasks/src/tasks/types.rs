//! Task model and fetch filters.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::rest::TaskResource;

/// Completion state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    NeedsAction,
    Completed,
}

impl TaskStatus {
    fn from_wire(status: Option<&str>) -> Self {
        match status {
            Some("completed") => TaskStatus::Completed,
            _ => TaskStatus::NeedsAction,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::NeedsAction => write!(f, "needsAction"),
            TaskStatus::Completed => write!(f, "completed"),
        }
    }
}

/// A weak back-reference from a task to the client that fetched it.
///
/// This is an identifier (the session's account identifier), not a parent
/// pointer: it supports later lookup without coupling task lifetimes to the
/// client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientHandle(String);

impl ClientHandle {
    pub(crate) fn new(account: impl Into<String>) -> Self {
        Self(account.into())
    }

    /// The account identifier of the owning client.
    pub fn account(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One remote task item, mapped to explicit typed fields.
#[derive(Debug, Clone, Serialize)]
pub struct Task {
    /// Server-assigned task identifier.
    pub id: String,

    /// Task title.
    pub title: String,

    /// Completion state.
    pub status: TaskStatus,

    /// Free-form notes.
    pub notes: Option<String>,

    /// Due date.
    pub due: Option<DateTime<Utc>>,

    /// Completion timestamp, present only for completed tasks.
    pub completed: Option<DateTime<Utc>>,

    /// Last modification timestamp.
    pub updated: Option<DateTime<Utc>>,

    /// Opaque sort position within the list.
    pub position: Option<String>,

    /// Identifier of the parent task, for subtasks.
    pub parent: Option<String>,

    /// Canonical URL of this task.
    pub self_link: Option<String>,

    /// Entity tag for optimistic concurrency.
    pub etag: Option<String>,

    /// Whether the task has been deleted.
    pub deleted: bool,

    /// Whether the task is hidden.
    pub hidden: bool,

    /// Back-reference to the client that fetched this task.
    #[serde(skip)]
    pub origin: ClientHandle,
}

impl Task {
    pub(crate) fn from_resource(resource: TaskResource, origin: ClientHandle) -> Self {
        Self {
            id: resource.id,
            title: resource.title,
            status: TaskStatus::from_wire(resource.status.as_deref()),
            notes: resource.notes,
            due: resource.due,
            completed: resource.completed,
            updated: resource.updated,
            position: resource.position,
            parent: resource.parent,
            self_link: resource.self_link,
            etag: resource.etag,
            deleted: resource.deleted,
            hidden: resource.hidden,
            origin,
        }
    }
}

/// Filters for [`Gtasks::fetch_tasks`](crate::Gtasks::fetch_tasks).
///
/// Defaults match the server's: completed tasks shown, deleted and hidden
/// tasks not, no date bounds, unbounded result count.
#[derive(Debug, Clone)]
pub struct TaskFilters {
    /// Include completed tasks (default: true).
    pub show_completed: bool,

    /// Include deleted tasks (default: false).
    pub show_deleted: bool,

    /// Include hidden tasks (default: false).
    pub show_hidden: bool,

    /// Lower bound on the due date.
    pub due_min: Option<DateTime<Utc>>,

    /// Upper bound on the due date.
    pub due_max: Option<DateTime<Utc>>,

    /// Lower bound on the completion date.
    pub completed_min: Option<DateTime<Utc>>,

    /// Upper bound on the completion date.
    pub completed_max: Option<DateTime<Utc>>,

    /// Maximum number of tasks to return across all pages.
    /// `None` fetches everything the server has.
    pub max_results: Option<u32>,
}

impl Default for TaskFilters {
    fn default() -> Self {
        Self {
            show_completed: true,
            show_deleted: false,
            show_hidden: false,
            due_min: None,
            due_max: None,
            completed_min: None,
            completed_max: None,
            max_results: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_maps_from_wire_values() {
        assert_eq!(
            TaskStatus::from_wire(Some("completed")),
            TaskStatus::Completed
        );
        assert_eq!(
            TaskStatus::from_wire(Some("needsAction")),
            TaskStatus::NeedsAction
        );
        // Unknown or absent status degrades to the default state
        assert_eq!(TaskStatus::from_wire(None), TaskStatus::NeedsAction);
    }

    #[test]
    fn task_carries_its_origin() {
        let resource: TaskResource = serde_json::from_value(json!({
            "id": "t1",
            "title": "Water plants",
            "status": "completed",
            "completed": "2026-08-25T09:00:00.000Z"
        }))
        .unwrap();

        let task = Task::from_resource(resource, ClientHandle::new("default"));
        assert_eq!(task.origin.account(), "default");
        assert_eq!(task.status, TaskStatus::Completed);
        assert!(task.completed.is_some());
    }

    #[test]
    fn filters_default_to_server_defaults() {
        let filters = TaskFilters::default();
        assert!(filters.show_completed);
        assert!(!filters.show_deleted);
        assert!(!filters.show_hidden);
        assert!(filters.max_results.is_none());
    }
}
