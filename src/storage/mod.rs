use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};

use crate::models::WatchItem;

/// Storage key for the persisted watchlist snapshot
pub const ITEMS_KEY: &str = "streamlist-items";

/// Storage key for the last query/result pair of the search feature
pub const LAST_SEARCH_KEY: &str = "streamlist-last-search";

/// Durable key-value storage backed by a directory of JSON files
///
/// Each key maps to one file holding a single JSON document, rewritten in
/// full on every save. The store is a cache of in-memory truth, not a source
/// of truth during a session: loads fall back to a default on any failure,
/// and saves are best effort. Nothing here can fail the caller.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Opens the store rooted at `dir`, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Reads and deserializes the value under `key`
    ///
    /// Returns `None` if the key is absent, the file is unreadable, or the
    /// content does not match the expected shape. Typed deserialization is
    /// the schema check: anything structurally off falls back here.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.path_for(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read persisted value");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Discarding malformed persisted value");
                None
            }
        }
    }

    /// Serializes `value` and writes it under `key`, replacing any prior value
    ///
    /// Write failures are logged and swallowed; the in-memory copy remains
    /// authoritative for the session. The write goes through a temp file and
    /// rename so the key always holds either the old or the new document.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        if let Err(e) = self.try_save(key, value) {
            tracing::warn!(key, error = %e, "Failed to persist value");
        }
    }

    fn try_save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> anyhow::Result<()> {
        let json = serde_json::to_string(value)?;
        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    /// Loads the watchlist snapshot, falling back to empty on any failure
    pub fn load_items(&self) -> Vec<WatchItem> {
        self.load(ITEMS_KEY).unwrap_or_default()
    }

    /// Persists the full watchlist snapshot
    pub fn save_items(&self, items: &[WatchItem]) {
        self.save(ITEMS_KEY, items);
    }

    #[cfg(test)]
    pub(crate) fn raw_path(&self, key: &str) -> PathBuf {
        self.path_for(key)
    }
}

/// Writes raw bytes under a key, bypassing serialization (test seeding only)
#[cfg(test)]
pub(crate) fn seed_raw(store: &LocalStore, key: &str, raw: &str) {
    fs::write(store.raw_path(key), raw).expect("seed raw value");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_temp() -> (tempfile::TempDir, LocalStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LocalStore::open(dir.path()).expect("open store");
        (dir, store)
    }

    fn item(id: u64, title: &str, completed: bool) -> WatchItem {
        WatchItem {
            id,
            title: title.to_string(),
            completed,
        }
    }

    #[test]
    fn load_items_absent_key_is_empty() {
        let (_dir, store) = open_temp();
        assert!(store.load_items().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let (_dir, store) = open_temp();
        let items = vec![item(1, "Dune", false), item(2, "Arrival", true)];

        store.save_items(&items);

        assert_eq!(store.load_items(), items);
    }

    #[test]
    fn load_items_not_json_is_empty() {
        let (_dir, store) = open_temp();
        seed_raw(&store, ITEMS_KEY, "not json");

        assert!(store.load_items().is_empty());
    }

    #[test]
    fn load_items_non_array_is_empty() {
        let (_dir, store) = open_temp();
        seed_raw(&store, ITEMS_KEY, r#"{"id": 1, "title": "Dune"}"#);

        assert!(store.load_items().is_empty());
    }

    #[test]
    fn load_items_wrong_element_shape_is_empty() {
        let (_dir, store) = open_temp();
        seed_raw(&store, ITEMS_KEY, r#"[{"name": "Dune"}]"#);

        assert!(store.load_items().is_empty());
    }

    #[test]
    fn missing_completed_field_defaults_to_false() {
        let (_dir, store) = open_temp();
        seed_raw(&store, ITEMS_KEY, r#"[{"id": 7, "title": "Dune"}]"#);

        assert_eq!(store.load_items(), vec![item(7, "Dune", false)]);
    }

    #[test]
    fn save_replaces_prior_value_wholesale() {
        let (_dir, store) = open_temp();
        store.save_items(&[item(1, "Dune", false), item(2, "Arrival", false)]);
        store.save_items(&[item(2, "Arrival", false)]);

        assert_eq!(store.load_items(), vec![item(2, "Arrival", false)]);
    }

    #[test]
    fn save_leaves_no_temp_file_behind() {
        let (dir, store) = open_temp();
        store.save_items(&[item(1, "Dune", false)]);

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .expect("read dir")
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn save_into_missing_dir_does_not_panic() {
        let parent = tempfile::tempdir().expect("tempdir");
        let data_dir = parent.path().join("data");
        let store = LocalStore::open(&data_dir).expect("open store");

        // Storage vanishing out from under us is a logged no-op, not a crash
        fs::remove_dir_all(&data_dir).expect("remove data dir");
        store.save_items(&[item(1, "Dune", false)]);

        assert!(store.load_items().is_empty());
    }
}
