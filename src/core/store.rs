//! Persisted key → value session store
//!
//! Session state is kept in a single JSON object file, one entry per key.
//! Everything here is best effort: a missing or unreadable file starts an
//! empty store, and an entry that does not decode is treated as absent.

use crate::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

/// Store keys
pub mod keys {
    /// Array of selected course ids
    pub const SELECTED_COURSES: &str = "selectedCoursesNumbers";
    /// Basic filter text
    pub const BASIC_FILTER: &str = "basicFilter";
    /// Advanced filter state
    pub const ADVANCED_FILTERS: &str = "advancedFilters-v5.0.1";
    /// Required-course view filters
    pub const REQUIRED_COURSE_FILTERS: &str = "requiredCourseFilters";
    /// Detective bucket order
    pub const ORDER_ELEMENTS: &str = "orderElements";
    /// Array of ids marked for registration
    pub const ADDED_SELECTED_COURSES: &str = "addedSelectedCourses";
    /// Map of id → registration weight
    pub const COURSE_WEIGHT: &str = "courseWeight";
    /// `"true"` once the announcement was shown
    pub const ENTRY_NOTIFICATION_SEEN: &str = "entryNotificationSeen";
    /// Announcement version that was shown
    pub const ENTRY_NOTIFICATION_VERSION: &str = "entryNotificationVersion";
    /// Detective time slots
    pub const SEARCH_TIME_SLOT: &str = "searchTimeSlot";
    /// Whether conflicting courses stay visible in search results
    pub const DISPLAY_CONFLICT_COURSES: &str = "displayConflictCourses";
}

/// Key → JSON value map backed by an optional file
#[derive(Debug, Clone, Default)]
pub struct Store {
    path: Option<PathBuf>,
    entries: BTreeMap<String, Value>,
}

impl Store {
    /// Store that is never written to disk
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open the store file at `path`
    ///
    /// A missing file gives an empty store. An unreadable or malformed file is
    /// reported and also gives an empty store; it is overwritten on save.
    #[must_use]
    pub fn open(path: &Path) -> Self {
        let entries = match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!("Ignoring malformed state file {}: {e}", path.display());
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No state file at {}, starting empty", path.display());
                BTreeMap::new()
            }
            Err(e) => {
                warn!("Could not read state file {}: {e}", path.display());
                BTreeMap::new()
            }
        };

        Self {
            path: Some(path.to_path_buf()),
            entries,
        }
    }

    /// File backing the store, if any
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Raw value of a key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// String value of a key
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Decode a key; `None` when it is missing or does not decode
    #[must_use]
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.get(key)?;
        match serde_json::from_value(value.clone()) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!("Ignoring malformed stored value for '{key}': {e}");
                None
            }
        }
    }

    /// Store a value under `key`
    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(encoded) => {
                self.entries.insert(key.to_string(), encoded);
            }
            Err(e) => warn!("Could not store '{key}': {e}"),
        }
    }

    /// Remove a key, returning whether it was present
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Stored keys, sorted
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Write the store to its file; in-memory stores are left alone
    ///
    /// # Errors
    /// Returns an error if the parent directory or the file cannot be written
    pub fn save(&self) -> Result<(), Box<dyn Error>> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        fs::write(path, content)?;
        debug!("Saved state to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_get_round_trip() {
        let mut store = Store::in_memory();
        store.set(keys::SELECTED_COURSES, &vec!["A", "B"]);
        store.set(keys::BASIC_FILTER, "lin");

        assert_eq!(
            store.get_json::<Vec<String>>(keys::SELECTED_COURSES),
            Some(vec!["A".to_string(), "B".to_string()])
        );
        assert_eq!(store.get_str(keys::BASIC_FILTER), Some("lin"));
        assert!(store.remove(keys::BASIC_FILTER));
        assert!(!store.remove(keys::BASIC_FILTER));
    }

    #[test]
    fn test_malformed_value_reads_as_absent() {
        let mut store = Store::in_memory();
        store.set(keys::COURSE_WEIGHT, "not a map");
        assert!(store.get_json::<BTreeMap<String, u8>>(keys::COURSE_WEIGHT).is_none());
    }

    #[test]
    fn test_save_and_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let mut store = Store::open(&path);
        assert_eq!(store.keys().count(), 0);
        store.set(keys::ENTRY_NOTIFICATION_SEEN, "true");
        store.save().unwrap();

        let reopened = Store::open(&path);
        assert_eq!(reopened.get_str(keys::ENTRY_NOTIFICATION_SEEN), Some("true"));
        assert_eq!(reopened.path(), Some(path.as_path()));
    }

    #[test]
    fn test_malformed_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{not json").unwrap();

        let store = Store::open(&path);
        assert_eq!(store.keys().count(), 0);
    }
}
