use std::fmt;

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::model::task::{Filter, Stats, Task};

/// Longest task text accepted from an input surface, in characters
pub const MAX_TEXT_LEN: usize = 200;

/// Error type for task operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("Please enter a task description")]
    EmptyText,
    #[error("Task description must be less than {max} characters")]
    TooLong { len: usize, max: usize },
    #[error("task not found: {0}")]
    NotFound(String),
    #[error("task reference '{0}' matches more than one task")]
    Ambiguous(String),
    #[error("invalid position: {0}")]
    InvalidPosition(String),
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check text coming from a form or the command line. Returns the trimmed text.
pub fn validate_task_text(text: &str) -> Result<&str, TaskError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TaskError::EmptyText);
    }
    let len = trimmed.chars().count();
    if len > MAX_TEXT_LEN {
        return Err(TaskError::TooLong {
            len,
            max: MAX_TEXT_LEN,
        });
    }
    Ok(trimmed)
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

pub fn position(tasks: &[Task], id: &str) -> Option<usize> {
    tasks.iter().position(|t| t.id == id)
}

pub fn find_task<'a>(tasks: &'a [Task], id: &str) -> Option<&'a Task> {
    tasks.iter().find(|t| t.id == id)
}

pub fn find_task_mut<'a>(tasks: &'a mut [Task], id: &str) -> Option<&'a mut Task> {
    tasks.iter_mut().find(|t| t.id == id)
}

/// Resolve a user-typed reference: an exact id, or a prefix shared by exactly one id.
pub fn resolve_ref<'a>(tasks: &'a [Task], reference: &str) -> Result<&'a Task, TaskError> {
    if let Some(task) = find_task(tasks, reference) {
        return Ok(task);
    }
    if reference.is_empty() {
        return Err(TaskError::NotFound(String::new()));
    }
    let mut matches = tasks.iter().filter(|t| t.id.starts_with(reference));
    match (matches.next(), matches.next()) {
        (Some(task), None) => Ok(task),
        (Some(_), Some(_)) => Err(TaskError::Ambiguous(reference.to_string())),
        (None, _) => Err(TaskError::NotFound(reference.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Collection edits
// ---------------------------------------------------------------------------

/// Remove the element at `source` and reinsert it at `dest`, shifting the
/// elements in between. Both indices address the full collection.
pub fn reorder(tasks: &mut Vec<Task>, source: usize, dest: usize) -> Result<(), TaskError> {
    let len = tasks.len();
    if source >= len {
        return Err(TaskError::InvalidPosition(format!(
            "source {} out of range (0..{})",
            source, len
        )));
    }
    if dest >= len {
        return Err(TaskError::InvalidPosition(format!(
            "destination {} out of range (0..{})",
            dest, len
        )));
    }
    let task = tasks.remove(source);
    tasks.insert(dest, task);
    Ok(())
}

/// Split off every completed task, keeping the relative order of both halves.
pub fn remove_completed(tasks: &mut Vec<Task>) -> Vec<Task> {
    let (done, kept): (Vec<Task>, Vec<Task>) = tasks.drain(..).partition(|t| t.completed);
    *tasks = kept;
    done
}

/// Append tasks whose ids are not already present. Returns how many were added.
pub fn append_missing(tasks: &mut Vec<Task>, restored: Vec<Task>) -> usize {
    let mut added = 0;
    for task in restored {
        if position(tasks, &task.id).is_none() {
            tasks.push(task);
            added += 1;
        }
    }
    added
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

pub fn filtered(tasks: &[Task], filter: Filter) -> Vec<&Task> {
    tasks.iter().filter(|t| filter.matches(t)).collect()
}

pub fn stats(tasks: &[Task]) -> Stats {
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.completed).count();
    Stats {
        total,
        completed,
        pending: total - completed,
    }
}

/// "Jan 5, 2026" in the local timezone
pub fn format_date(created_at: &DateTime<Utc>) -> String {
    format_date_in(created_at.with_timezone(&Local))
}

fn format_date_in<Tz>(date: DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    date.format("%b %-d, %Y").to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
