//! File-backed key-value store
//!
//! All keys live in one JSON object document. Array and object values are
//! kept structured so the file stays readable; anything else is stored as a
//! JSON string. Every write replaces the document through a temporary file
//! and a rename. There is no locking: concurrent writers are last-write-wins.

use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use swasth_kadam_shared::{KeyValueStore, StoreError};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current document; a missing file is an empty document
    fn read_document(&self) -> Result<Map<String, Value>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&raw)? {
            Value::Object(map) => Ok(map),
            _ => Err(StoreError::Unavailable(format!(
                "{} is not a JSON object",
                self.path.display()
            ))),
        }
    }

    fn write_document(&self, document: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(document)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), keys = document.len(), "Wrote store document");
        Ok(())
    }
}

fn encode(value: &str) -> Value {
    match serde_json::from_str::<Value>(value) {
        Ok(structured @ (Value::Array(_) | Value::Object(_))) => structured,
        _ => Value::String(value.to_string()),
    }
}

fn decode(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_document()?.get(key).map(decode))
    }

    /// Fails without writing when the existing document is unreadable
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut document = self.read_document()?;
        document.insert(key.to_string(), encode(value));
        self.write_document(&document)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let mut document = self.read_document()?;
        if document.remove(key).is_some() {
            self.write_document(&document)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileStore {
        FileStore::new(dir.path().join("nested").join("store.json"))
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.get("theme").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_values_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        store.set("theme", "light").unwrap();
        store.set("userLoggedIn", "true").unwrap();
        store.set("trackedFoods", r#"[{"id":1}]"#).unwrap();
        store.set("quoted", "\"x\"").unwrap();

        assert_eq!(store.get("theme").unwrap().as_deref(), Some("light"));
        assert_eq!(store.get("userLoggedIn").unwrap().as_deref(), Some("true"));
        assert_eq!(store.get("trackedFoods").unwrap().as_deref(), Some(r#"[{"id":1}]"#));
        assert_eq!(store.get("quoted").unwrap().as_deref(), Some("\"x\""));
    }

    #[test]
    fn test_document_keeps_arrays_structured() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.set("trackedFoods", "[]").unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        let document: Value = serde_json::from_str(&raw).unwrap();
        assert!(document["trackedFoods"].is_array());
        assert!(!store.path().with_extension("tmp").exists());
    }

    #[test]
    fn test_remove() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.set("userData", r#"{"name":"Asha","initial":"A"}"#).unwrap();
        store.remove("userData").unwrap();
        store.remove("userData").unwrap();
        assert_eq!(store.get("userData").unwrap(), None);
    }

    #[test]
    fn test_corrupt_document_is_not_overwritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{ not json").unwrap();

        let mut store = FileStore::new(&path);
        assert!(store.get("theme").is_err());
        assert!(store.set("theme", "dark").is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn test_non_object_document_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "[1, 2]").unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(store.get("theme"), Err(StoreError::Unavailable(_))));
    }
}
