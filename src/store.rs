//! Size-preference persistence.
//!
//! Widgets remember their chosen display size across restarts. The store is
//! a flat string map keyed per widget (`widget_size_{id}`), written through
//! on every accepted change so there is no save step to forget.
//!
//! Persistence is strictly best-effort: a missing, unreadable, or corrupt
//! backing file degrades to defaults and an unwritable file loses the
//! preference but never the running dashboard. Failures are logged and
//! swallowed.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Namespaced storage key for one widget's size preference.
pub fn storage_key(widget_id: &str) -> String {
    format!("widget_size_{widget_id}")
}

// =============================================================================
// SizeStore Trait
// =============================================================================

/// Keyed string persistence for widget size preferences.
///
/// `set` is infallible by contract: implementations absorb their own I/O
/// failures, because a lost preference must never take the dashboard down.
pub trait SizeStore {
    /// The stored size token for a widget, if any.
    fn get(
        &self,
        widget_id: &str,
    ) -> Option<String>;

    /// Persist a widget's size token, replacing any previous value.
    fn set(
        &self,
        widget_id: &str,
        size: &str,
    );
}

// =============================================================================
// MemoryStore
// =============================================================================

/// In-memory store for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SizeStore for MemoryStore {
    fn get(
        &self,
        widget_id: &str,
    ) -> Option<String> {
        self.entries.borrow().get(&storage_key(widget_id)).cloned()
    }

    fn set(
        &self,
        widget_id: &str,
        size: &str,
    ) {
        self.entries
            .borrow_mut()
            .insert(storage_key(widget_id), size.to_string());
    }
}

// =============================================================================
// JsonFileStore
// =============================================================================

/// File-backed store: one JSON object of `widget_size_*` keys.
///
/// The whole map lives in memory and is rewritten on every `set`. The
/// preference file is tiny and writes are rare (user resize gestures), so
/// rewriting wholesale keeps the format trivially inspectable.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: RefCell<HashMap<String, String>>,
}

impl JsonFileStore {
    /// Open a store backed by `path`, loading any existing entries.
    ///
    /// A missing file starts empty; an unreadable or corrupt file is logged
    /// and also starts empty rather than failing startup.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = Self::load(&path);
        Self {
            path,
            entries: RefCell::new(entries),
        }
    }

    fn load(path: &Path) -> HashMap<String, String> {
        if !path.exists() {
            return HashMap::new();
        }
        match fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "size store corrupt, starting empty");
                    HashMap::new()
                }
            },
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "size store unreadable, starting empty");
                HashMap::new()
            }
        }
    }

    fn flush(&self) {
        let entries = self.entries.borrow();
        let serialized = match serde_json::to_string_pretty(&*entries) {
            Ok(s) => s,
            Err(err) => {
                tracing::warn!(%err, "size store serialization failed, preference not saved");
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, serialized) {
            tracing::warn!(path = %self.path.display(), %err, "size store write failed, preference not saved");
        }
    }
}

impl SizeStore for JsonFileStore {
    fn get(
        &self,
        widget_id: &str,
    ) -> Option<String> {
        self.entries.borrow().get(&storage_key(widget_id)).cloned()
    }

    fn set(
        &self,
        widget_id: &str,
        size: &str,
    ) {
        self.entries
            .borrow_mut()
            .insert(storage_key(widget_id), size.to_string());
        self.flush();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_keys_namespaced_per_widget() {
        assert_eq!(storage_key("battery"), "widget_size_battery");
        assert_ne!(storage_key("battery"), storage_key("speed"));
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("battery"), None, "Fresh store has no entries");
        store.set("battery", "large");
        assert_eq!(store.get("battery"), Some("large".to_string()));
        store.set("battery", "small");
        assert_eq!(store.get("battery"), Some("small".to_string()), "Set replaces prior value");
    }

    #[test]
    fn test_memory_store_keys_do_not_collide() {
        let store = MemoryStore::new();
        store.set("battery", "large");
        store.set("speed", "medium");
        assert_eq!(store.get("battery"), Some("large".to_string()));
        assert_eq!(store.get("speed"), Some("medium".to_string()));
    }

    #[test]
    fn test_file_store_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("sizes.json"));
        assert_eq!(store.get("battery"), None);
    }

    #[test]
    fn test_file_store_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sizes.json");
        fs::write(&path, "not json {{{").unwrap();
        let store = JsonFileStore::open(&path);
        assert_eq!(store.get("battery"), None, "Corrupt store degrades to defaults");
    }

    #[test]
    fn test_file_store_writes_through_on_set() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sizes.json");
        let store = JsonFileStore::open(&path);
        store.set("battery", "large");
        let raw = fs::read_to_string(&path).unwrap();
        let on_disk: HashMap<String, String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(on_disk.get("widget_size_battery"), Some(&"large".to_string()));
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sizes.json");
        {
            let store = JsonFileStore::open(&path);
            store.set("battery", "large");
            store.set("heart_rate", "medium");
        }
        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get("battery"), Some("large".to_string()));
        assert_eq!(reopened.get("heart_rate"), Some("medium".to_string()));
    }
}
