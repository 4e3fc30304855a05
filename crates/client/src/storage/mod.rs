//! Durable client-side storage.
//!
//! A small JSON key-value layer standing in for the browser's local storage:
//! one value per fixed key, whole-value overwrite on every write, last writer
//! wins. The session and cart stores use disjoint keys and never share one.
//!
//! Absence or unreadability of a value is never fatal; callers treat it as
//! "empty" and continue.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use thiserror::Error;

/// Fixed storage keys. One namespace per component.
pub mod keys {
    /// Credential pair owned by the session manager.
    pub const AUTH: &str = "kiogloss_auth";

    /// Serialized cart owned by the cart store.
    pub const CART: &str = "kiogloss_cart";
}

/// Errors that can occur writing to durable storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Durable key-value storage for client state.
///
/// Reads are infallible by contract: any failure to produce a value is
/// reported as `None` and logged, since stored state is always recoverable
/// (the user logs in again, the cart starts empty).
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value could not be persisted.
    fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`. Removing an absent key is a no-op.
    fn remove(&self, key: &str);
}

/// File-backed storage: one JSON file per key inside a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Some(value),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                tracing::warn!(key, error = %err, "failed to read stored value; treating as absent");
                None
            }
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // Write-then-rename so a crash mid-write never leaves a torn value
        // under the live key.
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, self.path_for(key))?;
        Ok(())
    }

    fn remove(&self, key: &str) {
        if let Err(err) = fs::remove_file(self.path_for(key))
            && err.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!(key, error = %err, "failed to remove stored value");
        }
    }
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.values
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k"), None);

        store.put("k", "v1").expect("put");
        assert_eq!(store.get("k").as_deref(), Some("v1"));

        store.put("k", "v2").expect("overwrite");
        assert_eq!(store.get("k").as_deref(), Some("v2"));

        store.remove("k");
        assert_eq!(store.get("k"), None);
        // Removing an absent key is a no-op.
        store.remove("k");
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path()).expect("create store");

        assert_eq!(store.get(keys::CART), None);
        store.put(keys::CART, "[]").expect("put");
        assert_eq!(store.get(keys::CART).as_deref(), Some("[]"));

        // A fresh store over the same directory sees the persisted value.
        let reopened = FileStore::new(dir.path()).expect("reopen store");
        assert_eq!(reopened.get(keys::CART).as_deref(), Some("[]"));

        store.remove(keys::CART);
        assert_eq!(store.get(keys::CART), None);
    }

    #[test]
    fn test_file_store_disjoint_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path()).expect("create store");

        store.put(keys::AUTH, "{\"a\":1}").expect("put auth");
        store.put(keys::CART, "[]").expect("put cart");
        store.remove(keys::AUTH);
        assert_eq!(store.get(keys::CART).as_deref(), Some("[]"));
    }
}
