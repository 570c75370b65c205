use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;

/// Past this size the oldest entries are dropped on the next append (1 MB).
const MAX_LOG_SIZE: u64 = 1_048_576;

/// Self-documenting header written at the top of a new recovery log.
const FILE_HEADER: &str = "\
<!-- tasklist recovery log - append-only
     Slot contents that could not be saved, or that could not be read
     and were replaced by defaults, are kept here.
     Safe to delete if empty or stale. -->

---
";

/// Why an entry was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryCategory {
    /// Stored slot content was unreadable and got replaced by a default
    Parse,
    /// A slot write failed; the body holds what should have been written
    Write,
}

impl fmt::Display for RecoveryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryCategory::Parse => write!(f, "parse"),
            RecoveryCategory::Write => write!(f, "write"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecoveryEntry {
    pub timestamp: DateTime<Utc>,
    pub category: RecoveryCategory,
    pub slot: String,
    pub error: String,
    pub body: String,
}

impl RecoveryEntry {
    pub fn now(category: RecoveryCategory, slot: &str, error: String, body: String) -> Self {
        RecoveryEntry {
            timestamp: Utc::now(),
            category,
            slot: slot.to_string(),
            error,
            body,
        }
    }

    fn to_markdown(&self) -> String {
        let mut out = format!(
            "## {} - {}: {}\n\nError: {}\n",
            self.timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            self.category,
            self.slot,
            self.error,
        );
        if !self.body.is_empty() {
            out.push_str("\n```json\n");
            out.push_str(&self.body);
            if !self.body.ends_with('\n') {
                out.push('\n');
            }
            out.push_str("```\n");
        }
        out.push_str("\n---\n");
        out
    }
}

pub fn recovery_log_path(dir: &Path) -> PathBuf {
    dir.join(".recovery.log")
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Append an entry to the recovery log. Failures are only logged.
pub fn log_recovery(dir: &Path, entry: RecoveryEntry) {
    if let Err(e) = log_recovery_inner(dir, &entry) {
        log::warn!(
            "could not write recovery entry for slot '{}': {}",
            entry.slot,
            e
        );
    }
}

fn log_recovery_inner(dir: &Path, entry: &RecoveryEntry) -> io::Result<()> {
    std::fs::create_dir_all(dir)?;
    let path = recovery_log_path(dir);

    if let Ok(meta) = std::fs::metadata(&path)
        && meta.len() > MAX_LOG_SIZE
    {
        trim_oldest(&path)?;
    }

    let needs_header = std::fs::metadata(&path).map_or(true, |m| m.len() == 0);
    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    if needs_header {
        file.write_all(FILE_HEADER.as_bytes())?;
    }
    file.write_all(entry.to_markdown().as_bytes())?;
    Ok(())
}

/// Keep the header and the newer half of the entries.
fn trim_oldest(path: &Path) -> io::Result<()> {
    let content = std::fs::read_to_string(path)?;
    let body = content.strip_prefix(FILE_HEADER).unwrap_or(&content);
    let entries: Vec<&str> = body
        .split_inclusive("\n---\n")
        .filter(|e| !e.trim().is_empty())
        .collect();
    let keep = &entries[entries.len() / 2..];
    let mut trimmed = String::from(FILE_HEADER);
    for e in keep {
        trimmed.push_str(e);
    }
    atomic_write(path, trimmed.as_bytes())
}

/// Number of entries currently in the log
pub fn entry_count(dir: &Path) -> usize {
    std::fs::read_to_string(recovery_log_path(dir))
        .map(|c| c.lines().filter(|l| l.starts_with("## ")).count())
        .unwrap_or(0)
}
