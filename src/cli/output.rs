use serde::Serialize;

use crate::model::task::{Filter, Stats, Task};
use crate::ops::task_ops;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskJson {
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub created_at: String,
    /// 1-based position in the full list
    pub position: usize,
}

#[derive(Serialize)]
pub struct TaskListJson {
    pub filter: Filter,
    pub tasks: Vec<TaskJson>,
    pub stats: Stats,
}

#[derive(Serialize)]
pub struct ClearedJson {
    pub cleared: Vec<TaskJson>,
    pub stats: Stats,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

/// `index` is the 0-based index in the full list
pub fn task_to_json(task: &Task, index: usize) -> TaskJson {
    TaskJson {
        id: task.id.clone(),
        text: task.text.clone(),
        completed: task.completed,
        created_at: task.created_at.to_rfc3339(),
        position: index + 1,
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

fn checkbox(task: &Task) -> char {
    if task.completed { 'x' } else { ' ' }
}

/// One list row: position, checkbox, text, id and creation date
pub fn format_task_line(task: &Task, index: usize) -> String {
    format!(
        "{:>3}. [{}] {}  ({}, created {})",
        index + 1,
        checkbox(task),
        task.text,
        task.id,
        task_ops::format_date(&task.created_at)
    )
}

/// Rows for the tasks matching `filter`, positions taken from the full list
pub fn format_listing(tasks: &[Task], filter: Filter) -> Vec<String> {
    let lines: Vec<String> = tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| filter.matches(t))
        .map(|(i, t)| format_task_line(t, i))
        .collect();
    if lines.is_empty() {
        vec![filter.empty_message().to_string()]
    } else {
        lines
    }
}

/// Listing footer; `stats` always describe the whole collection
pub fn format_footer(filter: Filter, stats: &Stats) -> String {
    format!("[{}] {}", filter, stats.summary())
}
