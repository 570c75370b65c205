//! Key-value persistence for named slots.
//!
//! Each slot holds one JSON document. Reads fall back to a caller-supplied
//! default when the slot is missing or unreadable; writes replace the whole
//! slot. Neither direction ever fails the caller: problems are logged, and
//! data that would otherwise be lost goes to the recovery log.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};

/// Slot holding the ordered task collection
pub const TASKS_SLOT: &str = "tasks";
/// Slot holding the active filter
pub const FILTER_SLOT: &str = "filter";
/// Slot holding the color scheme
pub const THEME_SLOT: &str = "theme";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Io(#[from] io::Error),
    #[error("could not serialize slot '{key}': {source}")]
    Serialize {
        key: String,
        source: serde_json::Error,
    },
    #[error("could not parse slot '{key}': {source}")]
    Parse {
        key: String,
        source: serde_json::Error,
    },
}

/// The storage medium behind a [`Store`].
pub trait Backend {
    /// Raw slot content, or `None` if the slot was never written
    fn get(&self, key: &str) -> io::Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
    /// Slot content with undecodable bytes replaced, for the recovery log
    fn get_lossy(&self, key: &str) -> Option<String> {
        self.get(key).ok().flatten()
    }
    /// Directory for the recovery log, if the medium has one
    fn recovery_dir(&self) -> Option<&Path> {
        None
    }
}

// ---------------------------------------------------------------------------
// File backend
// ---------------------------------------------------------------------------

/// One `<key>.json` file per slot inside a data directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileBackend { dir: dir.into() }
    }

    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Backend for FileBackend {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read(self.slot_path(key)) {
            Ok(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn get_lossy(&self, key: &str) -> Option<String> {
        fs::read(self.slot_path(key))
            .ok()
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        recovery::atomic_write(&self.slot_path(key), value.as_bytes())
    }

    fn recovery_dir(&self) -> Option<&Path> {
        Some(&self.dir)
    }
}

// ---------------------------------------------------------------------------
// Memory backend
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct MemorySlots {
    slots: HashMap<String, String>,
    writes: usize,
    fail_writes: bool,
}

/// In-process backend. Clones share the same slots, so a clone handed to a
/// second `Store` sees everything the first one wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    inner: Rc<RefCell<MemorySlots>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        MemoryBackend::default()
    }

    /// Successful `set` calls so far
    pub fn writes(&self) -> usize {
        self.inner.borrow().writes
    }

    /// Make every following `set` fail with an I/O error
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.borrow_mut().fail_writes = fail;
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.borrow().slots.get(key).cloned()
    }

    /// Seed a slot without counting it as a write
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.inner
            .borrow_mut()
            .slots
            .insert(key.to_string(), value.to_string());
    }
}

impl Backend for MemoryBackend {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.raw(key))
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_writes {
            return Err(io::Error::other("memory backend write refused"));
        }
        inner.slots.insert(key.to_string(), value.to_string());
        inner.writes += 1;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

pub struct Store {
    backend: Box<dyn Backend>,
}

impl Store {
    pub fn new(backend: impl Backend + 'static) -> Self {
        Store {
            backend: Box::new(backend),
        }
    }

    /// File-backed store rooted at `dir`
    pub fn open_dir(dir: impl Into<PathBuf>) -> Self {
        Store::new(FileBackend::new(dir))
    }

    /// Parse the slot, surfacing every failure.
    pub fn try_read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let raw = match self.backend.get(key)? {
            Some(raw) => raw,
            None => return Ok(None),
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Parse {
                key: key.to_string(),
                source,
            })
    }

    /// Read the slot, or `default` if it is missing or unreadable.
    pub fn read<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.try_read(key) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(e) => {
                log::warn!("{}; using default", e);
                if let Some(dir) = self.backend.recovery_dir() {
                    // Keep the unreadable content before the next write replaces it
                    let raw = self.backend.get_lossy(key).unwrap_or_default();
                    recovery::log_recovery(
                        dir,
                        RecoveryEntry::now(RecoveryCategory::Parse, key, e.to_string(), raw),
                    );
                }
                default
            }
        }
    }

    /// Serialize and store, surfacing every failure.
    pub fn try_write<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(value).map_err(|source| {
            StoreError::Serialize {
                key: key.to_string(),
                source,
            }
        })?;
        self.set_raw(key, content)
    }

    /// Serialize and store; failures are logged and otherwise ignored.
    pub fn write<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        if let Err(e) = self.try_write(key, value) {
            log::warn!("{}", e);
        }
    }

    fn set_raw(&mut self, key: &str, content: String) -> Result<(), StoreError> {
        match self.backend.set(key, &content) {
            Ok(()) => {
                log::debug!("wrote slot '{}' ({} bytes)", key, content.len());
                Ok(())
            }
            Err(e) => {
                if let Some(dir) = self.backend.recovery_dir() {
                    recovery::log_recovery(
                        dir,
                        RecoveryEntry::now(RecoveryCategory::Write, key, e.to_string(), content),
                    );
                }
                Err(StoreError::Io(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Filter;
    use tempfile::TempDir;

    #[test]
    fn read_missing_slot_returns_default() {
        let store = Store::new(MemoryBackend::new());
        let tasks: Vec<String> = store.read(TASKS_SLOT, vec!["x".to_string()]);
        assert_eq!(tasks, vec!["x"]);
    }

    #[test]
    fn write_then_read_through_shared_backend() {
        let backend = MemoryBackend::new();
        let mut store = Store::new(backend.clone());
        store.write(FILTER_SLOT, &Filter::Completed);
        assert_eq!(backend.raw(FILTER_SLOT).as_deref(), Some("\"completed\""));

        let reopened = Store::new(backend.clone());
        assert_eq!(reopened.read(FILTER_SLOT, Filter::All), Filter::Completed);
        assert_eq!(backend.writes(), 1);
    }

    #[test]
    fn read_malformed_slot_returns_default() {
        let backend = MemoryBackend::new();
        backend.insert_raw(FILTER_SLOT, "not json {{{");
        let store = Store::new(backend);
        assert_eq!(store.read(FILTER_SLOT, Filter::All), Filter::All);
        assert!(matches!(
            store.try_read::<Filter>(FILTER_SLOT),
            Err(StoreError::Parse { .. })
        ));
    }

    #[test]
    fn read_wrong_shape_returns_default() {
        let backend = MemoryBackend::new();
        backend.insert_raw(FILTER_SLOT, "\"someday\"");
        let store = Store::new(backend);
        assert_eq!(store.read(FILTER_SLOT, Filter::Pending), Filter::Pending);
    }

    #[test]
    fn failed_write_is_swallowed() {
        let backend = MemoryBackend::new();
        backend.insert_raw(FILTER_SLOT, "\"all\"");
        backend.set_fail_writes(true);
        let mut store = Store::new(backend.clone());
        store.write(FILTER_SLOT, &Filter::Pending);
        assert!(store.try_write(FILTER_SLOT, &Filter::Pending).is_err());
        assert_eq!(backend.raw(FILTER_SLOT).as_deref(), Some("\"all\""));
        assert_eq!(backend.writes(), 0);
    }

    #[test]
    fn file_backend_round_trip() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("data");
        let mut store = Store::open_dir(&dir);
        store.write(TASKS_SLOT, &vec![1, 2, 3]);
        assert!(dir.join("tasks.json").exists());

        let reopened = Store::open_dir(&dir);
        let values: Vec<u32> = reopened.read(TASKS_SLOT, Vec::new());
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn file_backend_missing_dir_reads_default() {
        let tmp = TempDir::new().unwrap();
        let store = Store::open_dir(tmp.path().join("nowhere"));
        assert_eq!(store.read(FILTER_SLOT, Filter::All), Filter::All);
    }

    #[test]
    fn malformed_file_is_preserved_in_recovery_log() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("tasks.json"), "[{\"id\": broken").unwrap();
        let store = Store::open_dir(tmp.path());
        let tasks: Vec<crate::model::Task> = store.read(TASKS_SLOT, Vec::new());
        assert!(tasks.is_empty());

        let log = fs::read_to_string(recovery::recovery_log_path(tmp.path())).unwrap();
        assert!(log.contains("parse: tasks"));
        assert!(log.contains("[{\"id\": broken"));
    }

    #[test]
    fn undecodable_file_is_preserved_in_recovery_log() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tasks.json");
        let mut bytes = br#"[{"id":"a","text":"caf"#.to_vec();
        bytes.push(0xE9);
        bytes.extend_from_slice(br#"","completed":false,"createdAt":"2025-01-01T00:00:00Z"}]"#);
        fs::write(&path, &bytes).unwrap();

        let store = Store::open_dir(tmp.path());
        assert!(matches!(
            store.try_read::<Vec<crate::model::Task>>(TASKS_SLOT),
            Err(StoreError::Io(_))
        ));
        let tasks: Vec<crate::model::Task> = store.read(TASKS_SLOT, Vec::new());
        assert!(tasks.is_empty());

        let log = fs::read_to_string(recovery::recovery_log_path(tmp.path())).unwrap();
        assert!(log.contains("parse: tasks"));
        assert!(log.contains("\"text\":\"caf\u{FFFD}\""));
    }

    #[test]
    fn failed_file_write_goes_to_recovery_log() {
        let tmp = TempDir::new().unwrap();
        // A directory where the slot file should be makes the rename fail
        fs::create_dir_all(tmp.path().join("filter.json")).unwrap();
        let mut store = Store::open_dir(tmp.path());
        assert!(store.try_write(FILTER_SLOT, &Filter::Completed).is_err());

        let log = fs::read_to_string(recovery::recovery_log_path(tmp.path())).unwrap();
        assert!(log.contains("write: filter"));
        assert!(log.contains("\"completed\""));
    }
}
