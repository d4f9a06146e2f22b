//! Key-value persistence for the session (shop domain and access token).

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Key under which the active shop domain is persisted.
pub const SHOP_KEY: &str = "shopify_shop";

/// Key under which the OAuth access token is persisted.
pub const ACCESS_TOKEN_KEY: &str = "shopify_access_token";

/// Minimal string key-value capability the session persists through.
pub trait KeyValueStore {
    /// Returns the value for `key`, or `None` if unset.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing storage cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing storage cannot be written.
    fn delete(&mut self, key: &str) -> Result<(), StoreError>;

    /// Stores several entries together.
    ///
    /// The default writes them one at a time, so a failure part way
    /// through can leave earlier entries written. Stores that can commit
    /// in one step override this.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing storage cannot be written.
    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<(), StoreError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Removes every entry, including entries that can no longer be read.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing storage cannot be written.
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// In-process store; contents are lost when it is dropped.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        Ok(())
    }
}

/// Store backed by a single JSON object on disk.
///
/// The file is read on every access and rewritten on every mutation. A
/// missing file reads as empty; its parent directory is created on first
/// write. Writes go to a sibling `.tmp` file that is then renamed over the
/// original, so a reader never sees a half-written object.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt {
            path: self.path.display().to_string(),
            source: e,
        })
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let body = serde_json::to_string_pretty(entries).map_err(|e| StoreError::Corrupt {
            path: self.path.display().to_string(),
            source: e,
        })?;
        let staging = self.staging_path();
        std::fs::write(&staging, body).map_err(|e| self.io_error(e))?;
        std::fs::rename(&staging, &self.path).map_err(|e| {
            let _ = std::fs::remove_file(&staging);
            self.io_error(e)
        })
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.load()?;
        entries.insert(key.to_owned(), value.to_owned());
        self.save(&entries)
    }

    fn delete(&mut self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }

    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<(), StoreError> {
        let mut current = self.load()?;
        for (key, value) in entries {
            current.insert((*key).to_owned(), (*value).to_owned());
        }
        self.save(&current)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("pricedesk-store-{}", uuid::Uuid::new_v4()))
            .join("session.json")
    }

    #[test]
    fn memory_store_set_get_delete() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get(SHOP_KEY).unwrap(), None);

        store.set(SHOP_KEY, "demo.myshopify.com").unwrap();
        assert_eq!(
            store.get(SHOP_KEY).unwrap().as_deref(),
            Some("demo.myshopify.com")
        );

        store.delete(SHOP_KEY).unwrap();
        assert_eq!(store.get(SHOP_KEY).unwrap(), None);
        store.delete(SHOP_KEY).expect("deleting an absent key is fine");
    }

    #[test]
    fn file_store_missing_file_reads_empty() {
        let store = FileStore::new(temp_path());
        assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn file_store_persists_across_instances() {
        let path = temp_path();
        let mut store = FileStore::new(&path);
        store.set(SHOP_KEY, "demo.myshopify.com").unwrap();
        store.set(ACCESS_TOKEN_KEY, "shpat_123").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(
            reopened.get(SHOP_KEY).unwrap().as_deref(),
            Some("demo.myshopify.com")
        );
        assert_eq!(
            reopened.get(ACCESS_TOKEN_KEY).unwrap().as_deref(),
            Some("shpat_123")
        );

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn file_store_delete_keeps_other_keys() {
        let path = temp_path();
        let mut store = FileStore::new(&path);
        store.set(SHOP_KEY, "demo.myshopify.com").unwrap();
        store.set(ACCESS_TOKEN_KEY, "shpat_123").unwrap();
        store.delete(ACCESS_TOKEN_KEY).unwrap();

        assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap(), None);
        assert!(store.get(SHOP_KEY).unwrap().is_some());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn file_store_rejects_non_object_contents() {
        let path = temp_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let store = FileStore::new(&path);
        let err = store.get(SHOP_KEY).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }), "got: {err:?}");

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn file_store_set_many_commits_both_keys() {
        let path = temp_path();
        let mut store = FileStore::new(&path);
        store
            .set_many(&[(SHOP_KEY, "demo.myshopify.com"), (ACCESS_TOKEN_KEY, "shpat_1")])
            .unwrap();

        assert_eq!(
            store.get(ACCESS_TOKEN_KEY).unwrap().as_deref(),
            Some("shpat_1")
        );
        assert!(!store.staging_path().exists());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn file_store_clear_removes_truncated_file() {
        let path = temp_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"shopify_shop": "demo.myshopify.com", "shopify_acc"#).unwrap();

        let mut store = FileStore::new(&path);
        assert!(matches!(
            store.get(SHOP_KEY).unwrap_err(),
            StoreError::Corrupt { .. }
        ));

        store.clear().unwrap();
        assert!(!path.exists());
        assert_eq!(store.get(SHOP_KEY).unwrap(), None);
        store.clear().expect("clearing a missing file is fine");

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
