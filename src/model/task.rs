use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single to-do item.
///
/// `id` and `created_at` are fixed at creation. Serialized with camelCase keys
/// so the stored slot reads `{"id", "text", "completed", "createdAt"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    /// Trimmed, never empty
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create a pending task stamped with the current time
    pub fn new(id: String, text: String) -> Self {
        Task {
            id,
            text,
            completed: false,
            created_at: Utc::now(),
        }
    }
}

/// View selector over the task collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Pending,
    Completed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Pending, Filter::Completed];

    pub fn as_str(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Pending => "pending",
            Filter::Completed => "completed",
        }
    }

    /// Display label for the filter bar
    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Pending => "Pending",
            Filter::Completed => "Completed",
        }
    }

    /// Whether a task belongs in this view
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Pending => !task.completed,
            Filter::Completed => task.completed,
        }
    }

    /// Feedback shown after switching to this filter
    pub fn showing_message(self) -> &'static str {
        match self {
            Filter::All => "Showing all tasks",
            Filter::Pending => "Showing pending tasks",
            Filter::Completed => "Showing completed tasks",
        }
    }

    /// Placeholder for an empty view
    pub fn empty_message(self) -> &'static str {
        match self {
            Filter::All => "No tasks yet",
            Filter::Pending => "No pending tasks",
            Filter::Completed => "No completed tasks",
        }
    }

    /// Next filter in bar order, wrapping around
    pub fn next(self) -> Filter {
        match self {
            Filter::All => Filter::Pending,
            Filter::Pending => Filter::Completed,
            Filter::Completed => Filter::All,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "pending" => Ok(Filter::Pending),
            "completed" | "done" => Ok(Filter::Completed),
            other => Err(format!(
                "unknown filter '{}' (expected all, pending, completed)",
                other
            )),
        }
    }
}

/// Counts over the whole collection, independent of the active filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl Stats {
    /// Count for the tab belonging to `filter`
    pub fn count_for(&self, filter: Filter) -> usize {
        match filter {
            Filter::All => self.total,
            Filter::Pending => self.pending,
            Filter::Completed => self.completed,
        }
    }

    /// "3 total tasks • 2 pending • 1 completed"
    pub fn summary(&self) -> String {
        format!(
            "{} total tasks \u{2022} {} pending \u{2022} {} completed",
            self.total, self.pending, self.completed
        )
    }
}

/// Color scheme selection, persisted like the filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> ThemeMode {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_serializes_with_camel_case_keys() {
        let task = Task {
            id: "abc".into(),
            text: "Buy milk".into(),
            completed: false,
            created_at: DateTime::parse_from_rfc3339("2025-05-14T09:30:00Z")
                .unwrap()
                .with_timezone(&Utc),
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["text"], "Buy milk");
        assert_eq!(json["completed"], false);
        assert_eq!(json["createdAt"], "2025-05-14T09:30:00Z");
    }

    #[test]
    fn task_reads_browser_style_iso_timestamps() {
        let task: Task = serde_json::from_str(
            r#"{"id":"x1","text":"Walk dog","completed":true,"createdAt":"2024-03-01T12:00:00.000Z"}"#,
        )
        .unwrap();
        assert!(task.completed);
        assert_eq!(task.created_at.to_rfc3339(), "2024-03-01T12:00:00+00:00");
    }

    #[test]
    fn filter_serde_is_lowercase_string() {
        assert_eq!(serde_json::to_string(&Filter::Pending).unwrap(), "\"pending\"");
        let f: Filter = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(f, Filter::Completed);
        assert!(serde_json::from_str::<Filter>("\"someday\"").is_err());
    }

    #[test]
    fn filter_from_str_accepts_case_and_alias() {
        assert_eq!("ALL".parse::<Filter>().unwrap(), Filter::All);
        assert_eq!("done".parse::<Filter>().unwrap(), Filter::Completed);
        assert!("later".parse::<Filter>().is_err());
    }

    #[test]
    fn filter_matches() {
        let mut task = Task::new("t".into(), "x".into());
        assert!(Filter::All.matches(&task));
        assert!(Filter::Pending.matches(&task));
        assert!(!Filter::Completed.matches(&task));
        task.completed = true;
        assert!(!Filter::Pending.matches(&task));
        assert!(Filter::Completed.matches(&task));
    }

    #[test]
    fn filter_next_cycles() {
        assert_eq!(Filter::All.next(), Filter::Pending);
        assert_eq!(Filter::Pending.next(), Filter::Completed);
        assert_eq!(Filter::Completed.next(), Filter::All);
    }

    #[test]
    fn stats_summary_and_counts() {
        let stats = Stats {
            total: 3,
            completed: 1,
            pending: 2,
        };
        assert_eq!(stats.summary(), "3 total tasks \u{2022} 2 pending \u{2022} 1 completed");
        assert_eq!(stats.count_for(Filter::All), 3);
        assert_eq!(stats.count_for(Filter::Pending), 2);
        assert_eq!(stats.count_for(Filter::Completed), 1);
    }

    #[test]
    fn filter_messages() {
        assert_eq!(Filter::Pending.showing_message(), "Showing pending tasks");
        assert_eq!(Filter::All.empty_message(), "No tasks yet");
        assert_eq!(Filter::Completed.empty_message(), "No completed tasks");
    }

    #[test]
    fn theme_toggle() {
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
        assert_eq!(ThemeMode::default().toggled().toggled(), ThemeMode::Dark);
    }
}
