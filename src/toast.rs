//! Transient user feedback.
//!
//! Toasts are never authoritative: dropping one loses nothing but the offer
//! it carried. Confirmation and undo offers are plain data
//! ([`ToastAction`]); the UI resolves them by calling back into
//! [`TaskState`](crate::state::TaskState).

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::model::config::NotifyConfig;
use crate::model::task::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// Something the user can do from a toast
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToastAction {
    /// Put these tasks back at the end of the list
    Undo(Vec<Task>),
    ConfirmDelete { id: String },
    ConfirmClearCompleted,
}

impl ToastAction {
    pub fn is_confirm(&self) -> bool {
        matches!(
            self,
            ToastAction::ConfirmDelete { .. } | ToastAction::ConfirmClearCompleted
        )
    }

    pub fn key_hint(&self) -> &'static str {
        match self {
            ToastAction::Undo(_) => "u undo",
            ToastAction::ConfirmDelete { .. } | ToastAction::ConfirmClearCompleted => {
                "y yes  n cancel"
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub created: Instant,
    /// `None` stays up until dismissed
    pub auto_close: Option<Duration>,
    pub actions: Vec<ToastAction>,
}

impl Toast {
    pub fn is_expired(&self, now: Instant) -> bool {
        self.auto_close
            .is_some_and(|d| now.saturating_duration_since(self.created) >= d)
    }

    pub fn confirm_action(&self) -> Option<&ToastAction> {
        self.actions.iter().find(|a| a.is_confirm())
    }

    pub fn has_undo(&self) -> bool {
        self.actions.iter().any(|a| matches!(a, ToastAction::Undo(_)))
    }
}

/// Queue of live toasts, oldest first
#[derive(Debug)]
pub struct Toasts {
    queue: VecDeque<Toast>,
    next_id: u64,
    timing: NotifyConfig,
}

impl Toasts {
    pub fn new(timing: NotifyConfig) -> Self {
        Toasts {
            queue: VecDeque::new(),
            next_id: 1,
            timing,
        }
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        let d = self.timing.success();
        self.push(message, Severity::Success, Some(d))
    }

    pub fn info(&mut self, message: impl Into<String>) -> u64 {
        let d = self.timing.info();
        self.push(message, Severity::Info, Some(d))
    }

    pub fn warning(&mut self, message: impl Into<String>) -> u64 {
        let d = self.timing.warning();
        self.push(message, Severity::Warning, Some(d))
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        let d = self.timing.error();
        self.push(message, Severity::Error, Some(d))
    }

    pub fn push(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        auto_close: Option<Duration>,
    ) -> u64 {
        self.push_with_actions(message, severity, auto_close, Vec::new())
    }

    pub fn push_with_actions(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        auto_close: Option<Duration>,
        actions: Vec<ToastAction>,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.queue.push_back(Toast {
            id,
            message: message.into(),
            severity,
            created: Instant::now(),
            auto_close,
            actions,
        });
        self.enforce_limit();
        id
    }

    /// Ask a yes/no question. Only one question is open at a time; asking
    /// again replaces the previous one.
    pub fn confirm(&mut self, message: impl Into<String>, action: ToastAction) -> u64 {
        self.queue.retain(|t| t.confirm_action().is_none());
        self.push_with_actions(message, Severity::Warning, None, vec![action])
    }

    /// Report a removal and offer to put the tasks back.
    pub fn offer_undo(&mut self, message: impl Into<String>, removed: Vec<Task>) -> u64 {
        self.drop_undo();
        let d = self.timing.undo();
        self.push_with_actions(
            message,
            Severity::Success,
            Some(d),
            vec![ToastAction::Undo(removed)],
        )
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.queue.len();
        self.queue.retain(|t| t.id != id);
        self.queue.len() != before
    }

    pub fn dismiss_all(&mut self) {
        self.queue.clear();
    }

    /// Remove toasts whose display time has run out. Returns how many went.
    pub fn expire(&mut self, now: Instant) -> usize {
        let before = self.queue.len();
        self.queue.retain(|t| !t.is_expired(now));
        before - self.queue.len()
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.queue.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.queue.iter()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// The open question, if any
    pub fn pending_confirm(&self) -> Option<&Toast> {
        self.queue.iter().rev().find(|t| t.confirm_action().is_some())
    }

    /// Close the open question and return what it asked about.
    pub fn take_confirm(&mut self) -> Option<ToastAction> {
        let idx = self
            .queue
            .iter()
            .rposition(|t| t.confirm_action().is_some())?;
        let toast = self.queue.remove(idx)?;
        toast.actions.into_iter().find(|a| a.is_confirm())
    }

    /// Close the newest undo offer and return the tasks it would restore.
    pub fn take_undo(&mut self) -> Option<Vec<Task>> {
        let idx = self.queue.iter().rposition(|t| t.has_undo())?;
        let toast = self.queue.remove(idx)?;
        toast.actions.into_iter().find_map(|a| match a {
            ToastAction::Undo(tasks) => Some(tasks),
            _ => None,
        })
    }

    /// Withdraw every undo offer. Called on any later mutation.
    pub fn drop_undo(&mut self) {
        for toast in self.queue.iter_mut() {
            toast.actions.retain(|a| !matches!(a, ToastAction::Undo(_)));
        }
    }

    /// Drop the oldest toasts past the limit, sparing an open question.
    fn enforce_limit(&mut self) {
        let max = self.timing.max_toasts.max(1);
        while self.queue.len() > max {
            let idx = self
                .queue
                .iter()
                .position(|t| t.confirm_action().is_none())
                .unwrap_or(0);
            self.queue.remove(idx);
        }
    }
}
