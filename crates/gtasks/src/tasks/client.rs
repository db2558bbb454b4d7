//! The task-fetching client.

use tracing::{debug, instrument};

use crate::auth::Session;
use crate::error::Error;
use crate::rest::{TasksPage, TasksQuery};

use super::types::{ClientHandle, Task, TaskFilters};

/// Client for the Google Tasks API.
///
/// Constructed from an authenticated [`Session`], so a task operation can
/// never run without one. One instance per session; reuse it for all calls.
///
/// # Example
///
/// ```no_run
/// use gtasks::{Gtasks, TaskFilters};
///
/// # fn example(session: gtasks::Session) -> Result<(), gtasks::Error> {
/// let client = Gtasks::new(session);
/// let tasks = client.fetch_tasks("@default", &TaskFilters::default())?;
/// for task in tasks {
///     println!("{} [{}]", task.title, task.status);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Gtasks {
    session: Session,
    handle: ClientHandle,
}

impl Gtasks {
    /// Create a client over an authenticated session.
    pub fn new(session: Session) -> Self {
        let handle = ClientHandle::new(session.account());
        Self { session, handle }
    }

    /// Returns the underlying session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns a mutable reference to the session, for in-place token
    /// refresh.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Fetch tasks from a list, following pagination.
    ///
    /// Pages are requested with a size of `min(remaining, 100)` where
    /// `remaining` counts down from `filters.max_results` (100 throughout
    /// when unbounded). The loop stops when the server omits a next-page
    /// token or the accumulated count reaches `max_results`, whichever comes
    /// first. All pages are fetched before returning; the result is a single
    /// ordered sequence in server order.
    ///
    /// # Errors
    ///
    /// Any page request that fails propagates as a transport error. Nothing
    /// is retried and no partial results are returned.
    #[instrument(skip(self, filters), fields(account = %self.handle))]
    pub fn fetch_tasks(&self, list_id: &str, filters: &TaskFilters) -> Result<Vec<Task>, Error> {
        let path = format!("lists/{}/tasks", list_id);

        let mut tasks: Vec<Task> = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page_size = match filters.max_results {
                Some(max) => max.saturating_sub(tasks.len() as u32).min(100),
                None => 100,
            };

            let query = TasksQuery {
                show_completed: filters.show_completed,
                show_deleted: filters.show_deleted,
                show_hidden: filters.show_hidden,
                max_results: page_size,
                page_token: page_token.as_deref(),
                due_min: filters.due_min,
                due_max: filters.due_max,
                completed_min: filters.completed_min,
                completed_max: filters.completed_max,
            };

            let page: TasksPage = self.session.get(&path, &query)?;

            debug!(items = page.items.len(), "Fetched page");

            tasks.extend(
                page.items
                    .into_iter()
                    .map(|resource| Task::from_resource(resource, self.handle.clone())),
            );

            match page.next_page_token {
                Some(token)
                    if filters
                        .max_results
                        .map_or(true, |max| (tasks.len() as u32) < max) =>
                {
                    page_token = Some(token);
                }
                _ => break,
            }
        }

        debug!(total = tasks.len(), "Fetch complete");
        Ok(tasks)
    }

    /// List the user's task lists.
    ///
    /// Single GET to `users/@me/lists`; the decoded response is returned
    /// unmodified. Note this endpoint may itself paginate; only the first
    /// page is returned here.
    #[instrument(skip(self), fields(account = %self.handle))]
    pub fn list_task_lists(&self) -> Result<serde_json::Value, Error> {
        self.session.get_value("users/@me/lists")
    }
}
