//! Endpoint definitions and request/response wire types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Google Endpoints
// ============================================================================

/// OAuth2 authorization endpoint (browser redirect flow).
pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/auth";

/// OAuth2 token endpoint (code exchange and refresh-token exchange).
pub const GOOGLE_TOKEN_URL: &str = "https://accounts.google.com/o/oauth2/token";

/// Base URL of the Tasks REST API.
pub const GOOGLE_API_BASE: &str = "https://www.googleapis.com/tasks/v1";

/// Task read/write scope.
pub const SCOPE_TASKS: &str = "https://www.googleapis.com/auth/tasks";

/// Task read-only scope.
pub const SCOPE_TASKS_READONLY: &str = "https://www.googleapis.com/auth/tasks.readonly";

/// The set of URLs a session talks to.
///
/// Defaults to the Google endpoints; overridable for tests against a local
/// mock server.
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// OAuth2 authorization URL.
    pub auth_url: String,
    /// OAuth2 token URL.
    pub token_url: String,
    /// Task API base URL.
    pub api_base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            auth_url: GOOGLE_AUTH_URL.to_string(),
            token_url: GOOGLE_TOKEN_URL.to_string(),
            api_base: GOOGLE_API_BASE.to_string(),
        }
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for `GET lists/{taskListId}/tasks`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TasksQuery<'a> {
    pub show_completed: bool,
    pub show_deleted: bool,
    pub show_hidden: bool,
    /// Page size; the server caps this at 100.
    pub max_results: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_min: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_max: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_min: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_max: Option<DateTime<Utc>>,
}

/// One page of task results.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TasksPage {
    /// The task records in this page. Absent when a page is empty.
    #[serde(default)]
    pub items: Vec<TaskResource>,

    /// Opaque cursor for the next page, omitted on the last one.
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// A task record as the server sends it.
///
/// `id` and `title` are required; decoding fails with an error naming the
/// missing field. Everything else defaults when absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResource {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub due: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub self_link: Option<String>,
    #[serde(default)]
    pub etag: Option<String>,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub hidden: bool,
}

/// Google's error body format.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

/// The inner error object of [`ApiErrorBody`].
#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn task_resource_decodes_full_record() {
        let resource: TaskResource = serde_json::from_value(json!({
            "id": "task-1",
            "title": "Buy milk",
            "status": "needsAction",
            "due": "2026-09-01T00:00:00.000Z",
            "updated": "2026-08-20T12:30:00.000Z",
            "position": "00000000000000000001",
            "selfLink": "https://www.googleapis.com/tasks/v1/lists/@default/tasks/task-1",
            "etag": "\"etag-value\""
        }))
        .unwrap();

        assert_eq!(resource.id, "task-1");
        assert_eq!(resource.title, "Buy milk");
        assert_eq!(resource.status.as_deref(), Some("needsAction"));
        assert!(resource.due.is_some());
        assert!(resource.self_link.is_some());
        assert!(!resource.deleted);
        assert!(!resource.hidden);
    }

    #[test]
    fn task_resource_missing_id_names_the_field() {
        let err = serde_json::from_value::<TaskResource>(json!({
            "title": "No id here"
        }))
        .unwrap_err();

        assert!(err.to_string().contains("id"));
    }

    #[test]
    fn tasks_page_defaults_when_items_absent() {
        let page: TasksPage = serde_json::from_value(json!({})).unwrap();
        assert!(page.items.is_empty());
        assert!(page.next_page_token.is_none());
    }

    #[test]
    fn tasks_query_skips_unset_parameters() {
        let query = TasksQuery {
            show_completed: true,
            show_deleted: false,
            show_hidden: false,
            max_results: 100,
            page_token: None,
            due_min: None,
            due_max: None,
            completed_min: None,
            completed_max: None,
        };

        let encoded = serde_urlencoded_like(&query);
        assert!(encoded.contains("showCompleted=true"));
        assert!(encoded.contains("maxResults=100"));
        assert!(!encoded.contains("pageToken"));
        assert!(!encoded.contains("dueMin"));
    }

    // Query strings are built by reqwest via serde; JSON is close enough to
    // verify which keys are present.
    fn serde_urlencoded_like(query: &TasksQuery<'_>) -> String {
        let value = serde_json::to_value(query).unwrap();
        value
            .as_object()
            .unwrap()
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}
