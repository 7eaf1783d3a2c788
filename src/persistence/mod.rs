//! Key/value persistence
//!
//! Backends:
//! - `LocalStore`: browser LocalStorage (wasm32)
//! - `FileStore`: one JSON file per key in a directory (native)
//! - `MemoryStore`: in-process map (tests, headless runs)
//!
//! Values are JSON text so every backend stores the same bytes.

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StorageError;

/// A string key/value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Read and decode a JSON value. `Ok(None)` if the key is absent.
pub fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(text) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| StorageError::Format {
            key: key.to_string(),
            source,
        })
}

/// Encode and write a JSON value
pub fn save_json<T: Serialize + ?Sized>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let text = serde_json::to_string(value).map_err(|source| StorageError::Format {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &text)
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One file per key under a directory
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> std::path::PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;
        // Write-then-rename so a crash never leaves a torn file
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, self.path(key))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
pub struct LocalStore {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    /// Open the window's LocalStorage, if the browser allows it
    pub fn open() -> Result<Self, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .map(|storage| Self { storage })
            .ok_or(StorageError::Unavailable)
    }

    fn backend_error(op: &'static str, key: &str, err: wasm_bindgen::JsValue) -> StorageError {
        StorageError::Backend {
            op,
            key: key.to_string(),
            message: format!("{err:?}"),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage
            .get_item(key)
            .map_err(|e| Self::backend_error("read", key, e))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| Self::backend_error("write", key, e))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage
            .remove_item(key)
            .map_err(|e| Self::backend_error("remove", key, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_roundtrip_in_memory() {
        let mut store = MemoryStore::new();
        assert_eq!(load_json::<u64>(&store, "best").unwrap(), None);
        save_json(&mut store, "best", &4200u64).unwrap();
        assert_eq!(store.get("best").unwrap().as_deref(), Some("4200"));
        assert_eq!(load_json::<u64>(&store, "best").unwrap(), Some(4200));

        store.remove("best").unwrap();
        assert_eq!(load_json::<u64>(&store, "best").unwrap(), None);
    }

    #[test]
    fn test_malformed_value_is_format_error() {
        let mut store = MemoryStore::new();
        store.set("best", "not a number").unwrap();
        let err = load_json::<u64>(&store, "best").unwrap_err();
        assert!(matches!(err, StorageError::Format { ref key, .. } if key == "best"));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store() {
        let dir = std::env::temp_dir().join(format!("star-strike-test-{}", std::process::id()));
        let mut store = FileStore::new(&dir);
        assert_eq!(store.get("settings").unwrap(), None);
        store.set("settings", "{\"a\":1}").unwrap();
        assert_eq!(store.get("settings").unwrap().as_deref(), Some("{\"a\":1}"));
        store.remove("settings").unwrap();
        store.remove("settings").unwrap();
        assert_eq!(store.get("settings").unwrap(), None);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
