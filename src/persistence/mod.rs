//! Save/load persistence
//!
//! Features:
//! - Key/blob storage contract ([`RecordStore`])
//! - File backend (`<dir>/<key>.json`), in-memory backend, LocalStorage on web
//! - Corruption detection: an unreadable blob falls back to defaults, never fatal

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::PersistenceError;
use crate::highscores::PersistentRecord;

/// Key/blob storage
pub trait RecordStore {
    /// Read the blob stored under `key`, `None` if nothing was ever saved
    fn load(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    /// Replace the blob stored under `key`
    fn save(&mut self, key: &str, blob: &str) -> Result<(), PersistenceError>;
}

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub const FILE_EXT: &'static str = "json";

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.{}", Self::FILE_EXT))
    }
}

impl RecordStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, key: &str, blob: &str) -> Result<(), PersistenceError> {
        if !self.dir.as_os_str().is_empty() {
            fs::create_dir_all(&self.dir)?;
        }
        fs::write(self.path_for(key), blob)?;
        Ok(())
    }
}

/// In-memory store. Clones share the same map, so a caller can keep a handle
/// to inspect what a session wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blobs: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a blob (e.g. a fixture save file)
    pub fn with_blob(key: &str, blob: &str) -> Self {
        let store = Self::new();
        store.blobs.borrow_mut().insert(key.to_string(), blob.to_string());
        store
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.blobs.borrow().get(key).cloned()
    }
}

impl RecordStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.get(key))
    }

    fn save(&mut self, key: &str, blob: &str) -> Result<(), PersistenceError> {
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), blob.to_string());
        Ok(())
    }
}

/// Browser LocalStorage backend (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore {
    prefix: String,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }

    fn storage() -> Result<web_sys::Storage, PersistenceError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| PersistenceError::Unavailable("no LocalStorage".to_string()))
    }

    fn item_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

#[cfg(target_arch = "wasm32")]
impl RecordStore for LocalStorageStore {
    fn load(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Self::storage()?
            .get_item(&self.item_key(key))
            .map_err(|e| PersistenceError::Unavailable(format!("{e:?}")))
    }

    fn save(&mut self, key: &str, blob: &str) -> Result<(), PersistenceError> {
        Self::storage()?
            .set_item(&self.item_key(key), blob)
            .map_err(|e| PersistenceError::Unavailable(format!("{e:?}")))
    }
}

/// Load and decode `key`, falling back to `T::default()` when the blob is
/// missing, unreadable, or corrupt.
pub fn load_or_default<T>(store: &dyn RecordStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match store.load(key) {
        Ok(Some(blob)) => match serde_json::from_str(&blob) {
            Ok(value) => {
                log::info!("Loaded '{}' from storage", key);
                value
            }
            Err(e) => {
                log::warn!("Stored '{}' is corrupt ({}), starting fresh", key, e);
                T::default()
            }
        },
        Ok(None) => {
            log::info!("No stored '{}' found, starting fresh", key);
            T::default()
        }
        Err(e) => {
            log::warn!("Failed to read '{}' ({}), starting fresh", key, e);
            T::default()
        }
    }
}

/// Encode and store `value` under `key`
pub fn save_value<T: Serialize>(
    store: &mut dyn RecordStore,
    key: &str,
    value: &T,
) -> Result<(), PersistenceError> {
    let blob = serde_json::to_string(value)?;
    store.save(key, &blob)
}

/// Load the persistent record (startup only)
pub fn load_record(store: &dyn RecordStore, key: &str) -> PersistentRecord {
    load_or_default::<PersistentRecord>(store, key).sanitized()
}
