//! Tasks command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use colored::Colorize;
use gtasks::{Task, TaskFilters, TaskStatus};

use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct TasksArgs {
    /// Task list to fetch from
    #[arg(long, default_value = "@default")]
    pub list: String,

    /// Account identifier
    #[arg(long, default_value = "default")]
    pub account: String,

    /// Path to the OAuth2 credentials file
    #[arg(long)]
    pub credentials: Option<PathBuf>,

    /// Exclude completed tasks
    #[arg(long)]
    pub hide_completed: bool,

    /// Include deleted tasks
    #[arg(long)]
    pub show_deleted: bool,

    /// Include hidden tasks
    #[arg(long)]
    pub show_hidden: bool,

    /// Maximum number of tasks to fetch
    #[arg(long)]
    pub max_results: Option<u32>,

    /// Lower bound on the due date (RFC 3339)
    #[arg(long)]
    pub due_min: Option<String>,

    /// Upper bound on the due date (RFC 3339)
    #[arg(long)]
    pub due_max: Option<String>,

    /// Lower bound on the completion date (RFC 3339)
    #[arg(long)]
    pub completed_min: Option<String>,

    /// Upper bound on the completion date (RFC 3339)
    #[arg(long)]
    pub completed_max: Option<String>,

    /// Output tasks as JSON
    #[arg(long)]
    pub json: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub fn run(args: TasksArgs) -> Result<()> {
    let filters = build_filters(&args)?;
    let client = context::restore_client(&args.account, args.credentials.clone())?;

    let tasks = client
        .fetch_tasks(&args.list, &filters)
        .context("Failed to fetch tasks")?;

    if tasks.is_empty() {
        eprintln!("{}", "No tasks found.".dimmed());
        return Ok(());
    }

    if args.json || args.pretty {
        if args.pretty {
            output::json_pretty(&tasks)?;
        } else {
            output::json(&tasks)?;
        }
    } else {
        for task in &tasks {
            print_task(task);
        }
    }

    Ok(())
}

fn print_task(task: &Task) {
    let marker = match task.status {
        TaskStatus::Completed => "[x]".green(),
        TaskStatus::NeedsAction => "[ ]".normal(),
    };

    let due = task
        .due
        .map(|d| format!(" (due {})", d.format("%Y-%m-%d")).dimmed().to_string())
        .unwrap_or_default();

    println!("{} {}{}", marker, task.title, due);
}

fn build_filters(args: &TasksArgs) -> Result<TaskFilters> {
    Ok(TaskFilters {
        show_completed: !args.hide_completed,
        show_deleted: args.show_deleted,
        show_hidden: args.show_hidden,
        due_min: parse_bound(args.due_min.as_deref(), "--due-min")?,
        due_max: parse_bound(args.due_max.as_deref(), "--due-max")?,
        completed_min: parse_bound(args.completed_min.as_deref(), "--completed-min")?,
        completed_max: parse_bound(args.completed_max.as_deref(), "--completed-max")?,
        max_results: args.max_results,
    })
}

fn parse_bound(value: Option<&str>, flag: &str) -> Result<Option<DateTime<Utc>>> {
    value
        .map(|v| {
            DateTime::parse_from_rfc3339(v)
                .map(|d| d.with_timezone(&Utc))
                .with_context(|| format!("{flag} must be an RFC 3339 timestamp, got '{v}'"))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> TasksArgs {
        TasksArgs {
            list: "@default".to_string(),
            account: "default".to_string(),
            credentials: None,
            hide_completed: false,
            show_deleted: false,
            show_hidden: false,
            max_results: None,
            due_min: None,
            due_max: None,
            completed_min: None,
            completed_max: None,
            json: false,
            pretty: false,
        }
    }

    #[test]
    fn filters_follow_flag_defaults() {
        let filters = build_filters(&args()).unwrap();
        assert!(filters.show_completed);
        assert!(!filters.show_deleted);
        assert!(filters.max_results.is_none());
    }

    #[test]
    fn hide_completed_flips_the_filter() {
        let mut a = args();
        a.hide_completed = true;
        let filters = build_filters(&a).unwrap();
        assert!(!filters.show_completed);
    }

    #[test]
    fn date_bounds_parse_rfc3339() {
        let mut a = args();
        a.due_min = Some("2026-08-01T00:00:00Z".to_string());
        let filters = build_filters(&a).unwrap();
        assert!(filters.due_min.is_some());

        a.due_min = Some("yesterday".to_string());
        assert!(build_filters(&a).is_err());
    }
}
