use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Configuration from config.toml in the data directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub notify: NotifyConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Toast timing. Durations are in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    #[serde(default = "default_success_ms")]
    pub success_ms: u64,
    #[serde(default = "default_info_ms")]
    pub info_ms: u64,
    #[serde(default = "default_warning_ms")]
    pub warning_ms: u64,
    #[serde(default = "default_error_ms")]
    pub error_ms: u64,
    /// How long an undo offer stays up after a delete or clear
    #[serde(default = "default_undo_ms")]
    pub undo_ms: u64,
    /// Oldest toasts are dropped beyond this many
    #[serde(default = "default_max_toasts")]
    pub max_toasts: usize,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        NotifyConfig {
            success_ms: default_success_ms(),
            info_ms: default_info_ms(),
            warning_ms: default_warning_ms(),
            error_ms: default_error_ms(),
            undo_ms: default_undo_ms(),
            max_toasts: default_max_toasts(),
        }
    }
}

impl NotifyConfig {
    pub fn success(&self) -> Duration {
        Duration::from_millis(self.success_ms)
    }

    pub fn info(&self) -> Duration {
        Duration::from_millis(self.info_ms)
    }

    pub fn warning(&self) -> Duration {
        Duration::from_millis(self.warning_ms)
    }

    pub fn error(&self) -> Duration {
        Duration::from_millis(self.error_ms)
    }

    pub fn undo(&self) -> Duration {
        Duration::from_millis(self.undo_ms)
    }
}

fn default_success_ms() -> u64 {
    2000
}

fn default_info_ms() -> u64 {
    1500
}

fn default_warning_ms() -> u64 {
    3000
}

fn default_error_ms() -> u64 {
    2000
}

fn default_undo_ms() -> u64 {
    5000
}

fn default_max_toasts() -> usize {
    3
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Hex color overrides keyed by theme slot name (e.g. `highlight = "#FB4196"`)
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            colors: HashMap::new(),
        }
    }
}
