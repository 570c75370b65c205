//! The canonical task collection and active filter for a session.
//!
//! `TaskState` is built once at startup and handed by reference to every
//! consumer. It is the only place the collection is mutated; each change is
//! followed by a full rewrite of the affected slot in the [`Store`].

use std::collections::HashSet;

use crate::io::store::{FILTER_SLOT, Store, TASKS_SLOT, THEME_SLOT};
use crate::model::task::{Filter, Stats, Task, ThemeMode};
use crate::ops::id::IdGenerator;
use crate::ops::task_ops::{self, TaskError};

/// Result of a successful text edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    /// Trimmed text matched the current text; nothing was written
    Unchanged,
}

pub struct TaskState {
    tasks: Vec<Task>,
    filter: Filter,
    theme: ThemeMode,
    store: Store,
    ids: IdGenerator,
}

impl TaskState {
    /// Load every slot from `store`, falling back to defaults.
    pub fn load(store: Store) -> Self {
        let tasks = sanitize(store.read(TASKS_SLOT, Vec::new()));
        let filter = store.read(FILTER_SLOT, Filter::All);
        let theme = store.read(THEME_SLOT, ThemeMode::Dark);
        log::debug!("loaded {} tasks, filter={}", tasks.len(), filter);
        TaskState {
            tasks,
            filter,
            theme,
            store,
            ids: IdGenerator::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    pub fn find(&self, id: &str) -> Option<&Task> {
        task_ops::find_task(&self.tasks, id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        task_ops::position(&self.tasks, id)
    }

    /// Look up a task by full id or unique id prefix
    pub fn resolve(&self, reference: &str) -> Result<&Task, TaskError> {
        task_ops::resolve_ref(&self.tasks, reference)
    }

    /// Tasks visible under the active filter, in collection order
    pub fn filtered_tasks(&self) -> Vec<&Task> {
        task_ops::filtered(&self.tasks, self.filter)
    }

    pub fn stats(&self) -> Stats {
        task_ops::stats(&self.tasks)
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Append a new pending task. Blank text is rejected without any change;
    /// length limits are the caller's job (see `validate_task_text`).
    pub fn add_task(&mut self, text: &str) -> Result<&Task, TaskError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TaskError::EmptyText);
        }
        let task = Task::new(self.ids.next_id(), text.to_string());
        log::debug!("add {}", task.id);
        let idx = self.tasks.len();
        self.tasks.push(task);
        self.persist_tasks();
        Ok(&self.tasks[idx])
    }

    /// Flip `completed`. Returns the new value, or `None` if no task matched.
    pub fn toggle_task(&mut self, id: &str) -> Option<bool> {
        let task = task_ops::find_task_mut(&mut self.tasks, id)?;
        task.completed = !task.completed;
        let completed = task.completed;
        log::debug!("toggle {} -> {}", id, completed);
        self.persist_tasks();
        Some(completed)
    }

    /// Remove a task and hand it back so the caller can offer an undo.
    pub fn delete_task(&mut self, id: &str) -> Option<Task> {
        let idx = self.position(id)?;
        let removed = self.tasks.remove(idx);
        log::debug!("delete {}", id);
        self.persist_tasks();
        Some(removed)
    }

    /// Undo a delete or clear: append the tasks at the end, skipping ids that
    /// are live again. Returns how many came back.
    pub fn restore_tasks(&mut self, tasks: Vec<Task>) -> usize {
        let restored = task_ops::append_missing(&mut self.tasks, tasks);
        if restored > 0 {
            log::debug!("restored {} tasks", restored);
            self.persist_tasks();
        }
        restored
    }

    /// Replace a task's text in place, keeping id, completion, creation time
    /// and position.
    pub fn update_task(&mut self, id: &str, new_text: &str) -> Result<UpdateOutcome, TaskError> {
        let new_text = new_text.trim();
        if new_text.is_empty() {
            return Err(TaskError::EmptyText);
        }
        let task = task_ops::find_task_mut(&mut self.tasks, id)
            .ok_or_else(|| TaskError::NotFound(id.to_string()))?;
        if task.text == new_text {
            return Ok(UpdateOutcome::Unchanged);
        }
        task.text = new_text.to_string();
        log::debug!("update {}", id);
        self.persist_tasks();
        Ok(UpdateOutcome::Updated)
    }

    /// Move the task at `source` to `dest`. Both are positions in the full,
    /// unfiltered collection.
    pub fn reorder_task_list(&mut self, source: usize, dest: usize) -> Result<(), TaskError> {
        task_ops::reorder(&mut self.tasks, source, dest)?;
        if source != dest {
            log::debug!("reorder {} -> {}", source, dest);
            self.persist_tasks();
        }
        Ok(())
    }

    /// Remove every completed task in one step and return them for a bulk undo.
    pub fn clear_completed(&mut self) -> Vec<Task> {
        if !self.tasks.iter().any(|t| t.completed) {
            return Vec::new();
        }
        let removed = task_ops::remove_completed(&mut self.tasks);
        log::debug!("cleared {} completed tasks", removed.len());
        self.persist_tasks();
        removed
    }

    pub fn set_filter(&mut self, filter: Filter) {
        if self.filter == filter {
            return;
        }
        self.filter = filter;
        self.store.write(FILTER_SLOT, &self.filter);
    }

    pub fn set_theme(&mut self, theme: ThemeMode) {
        if self.theme == theme {
            return;
        }
        self.theme = theme;
        self.store.write(THEME_SLOT, &self.theme);
    }

    fn persist_tasks(&mut self) {
        self.store.write(TASKS_SLOT, &self.tasks);
    }
}

/// Drop stored entries that break the collection invariants (blank text,
/// repeated ids). Text is re-trimmed.
fn sanitize(tasks: Vec<Task>) -> Vec<Task> {
    let mut seen = HashSet::new();
    let before = tasks.len();
    let kept: Vec<Task> = tasks
        .into_iter()
        .filter_map(|mut task| {
            let trimmed = task.text.trim();
            if trimmed.is_empty() || !seen.insert(task.id.clone()) {
                return None;
            }
            if trimmed.len() != task.text.len() {
                task.text = trimmed.to_string();
            }
            Some(task)
        })
        .collect();
    if kept.len() != before {
        log::warn!(
            "dropped {} stored tasks with blank text or duplicate ids",
            before - kept.len()
        );
    }
    kept
}
