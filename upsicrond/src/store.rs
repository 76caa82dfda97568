//! File-backed session store

use shell_core::{KeyValueStore, StoreError};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Key-value store kept in one JSON object file
///
/// The whole file is rewritten on every `set`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store at `path`
    ///
    /// A missing file is an empty store. A file that cannot be read or
    /// parsed is also treated as empty, with a warning; the next `set`
    /// replaces it.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|err| {
                tracing::warn!(target: "host.store", path = %path.display(), error = %err, "store_unreadable");
                BTreeMap::new()
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                tracing::warn!(target: "host.store", path = %path.display(), error = %err, "store_unreadable");
                BTreeMap::new()
            }
        };
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn save(&self) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(&self.values)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        fs::write(&self.path, text).map_err(|e| StoreError::Io(e.to_string()))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        self.save()?;
        tracing::trace!(target: "host.store", key, "store_saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("state.json"));
        assert!(store.is_empty());
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut store = JsonFileStore::open(&path);
        store.set("a", "1".to_string()).unwrap();
        store.set("b", "{\"x\":2}".to_string()).unwrap();

        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.len(), 2);
        assert_eq!(reopened.get("b").as_deref(), Some("{\"x\":2}"));
    }

    #[test]
    fn test_corrupt_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "not json").unwrap();

        let mut store = JsonFileStore::open(&path);
        assert!(store.is_empty());
        store.set("a", "1".to_string()).unwrap();
        assert_eq!(JsonFileStore::open(&path).get("a").as_deref(), Some("1"));
    }

    #[test]
    fn test_unwritable_path_errors() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path().join("missing").join("state.json"));
        assert!(matches!(
            store.set("a", "1".to_string()),
            Err(StoreError::Io(_))
        ));
    }
}
