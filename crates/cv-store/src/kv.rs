// kv.rs — KeyValueStore trait and its backends.
//
// The KeyValueStore trait is the abstraction API the stores persist through.
// The default implementation (JsonFileStore) writes one JSON file per key so
// state survives between sessions and is easy to inspect manually. The trait
// can be swapped for SQLite or a remote backend later without changing the
// rest of the system.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

/// Trait for persisting and retrieving whole-collection snapshots.
///
/// Semantics are deliberately minimal: `get` returns the last written value
/// for a key (or `None`), `set` overwrites it completely. Callers own the
/// snapshot shape; this layer never inspects it.
pub trait KeyValueStore {
    /// Read the snapshot stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite the snapshot stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Read and deserialize the snapshot stored under `key`.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Serialize and overwrite the snapshot stored under `key`.
    fn set_json<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(value)?;
        self.set(key, &raw)
    }
}

/// JSON file-based KeyValueStore implementation.
///
/// Each key gets a file: `<data_dir>/<key>.json`. Snapshots are small
/// (hundreds of records at most) so rewriting the whole file per mutation
/// is fine.
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the given directory.
    /// Creates the directory if it doesn't exist.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir).map_err(|source| StoreError::Io {
            path: data_dir.display().to_string(),
            source,
        })?;
        Ok(Self { data_dir })
    }

    /// Path to the JSON file for a given key.
    fn key_file(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.key_file(key);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Some(raw))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.key_file(key);
        fs::write(&path, value).map_err(|source| StoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!(key, bytes = value.len(), "snapshot written");
        Ok(())
    }
}

/// In-process KeyValueStore for tests and embedders that don't need disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn get_missing_key_returns_none() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data")).unwrap();

        assert!(store.get("voterSegments").unwrap().is_none());
    }

    #[test]
    fn set_then_get_round_trips() {
        let dir = tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("data")).unwrap();

        store.set("campaigns", "[1, 2, 3]").unwrap();
        assert_eq!(store.get("campaigns").unwrap().unwrap(), "[1, 2, 3]");
    }

    #[test]
    fn set_overwrites_previous_snapshot() {
        let dir = tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("data")).unwrap();

        store.set("campaigns", "[1]").unwrap();
        store.set("campaigns", "[2]").unwrap();
        assert_eq!(store.get("campaigns").unwrap().unwrap(), "[2]");
    }

    #[test]
    fn json_helpers_round_trip_typed_values() {
        let dir = tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("data")).unwrap();

        let value = vec!["base".to_string(), "persuadables".to_string()];
        store.set_json("voterSegments", &value).unwrap();

        let restored: Vec<String> = store.get_json("voterSegments").unwrap().unwrap();
        assert_eq!(restored, value);
    }

    #[test]
    fn store_survives_reopen() {
        let dir = tempdir().unwrap();
        let data_dir = dir.path().join("data");

        // Write with first store instance.
        {
            let mut store = JsonFileStore::new(&data_dir).unwrap();
            store.set("touchGoals", "{\"1\": 5}").unwrap();
        }

        // Read with second store instance.
        {
            let store = JsonFileStore::new(&data_dir).unwrap();
            assert_eq!(store.get("touchGoals").unwrap().unwrap(), "{\"1\": 5}");
        }
    }

    #[test]
    fn memory_store_round_trips() {
        let mut store = MemoryStore::new();
        assert!(store.get("anything").unwrap().is_none());

        store.set("anything", "value").unwrap();
        assert_eq!(store.get("anything").unwrap().unwrap(), "value");
    }
}
