//! Cart storage
//!
//! The cart is persisted as a single key holding a JSON array of line items.
//! Backends only move strings; encoding and corruption recovery live here.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use rustc_hash::FxHashMap;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

use crate::cart::items::LineItem;

/// Key the cart is stored under.
pub const CART_KEY: &str = "cart";

/// Storage backend errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error reading or writing a stored value
    #[error("storage IO error: {0}")]
    Io(#[from] io::Error),

    /// Failed to encode the cart
    #[error("failed to encode cart: {0}")]
    Encode(#[from] serde_json::Error),

    /// Keys must be non-empty and use only ASCII letters, digits, `-` and `_`
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// The in-memory store was poisoned by a panic in another thread
    #[error("storage lock poisoned")]
    Poisoned,
}

/// A string key/value store, the role local storage plays in a browser.
pub trait CartStorage {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory storage.
///
/// Clones share the same entries, the way browser tabs share one origin's
/// local storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<FxHashMap<String, String>>>,
}

impl MemoryStorage {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_err| StorageError::Poisoned)?;

        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_err| StorageError::Poisoned)?;

        entries.insert(key.to_string(), value.to_string());

        Ok(())
    }
}

/// File storage: one `<key>.json` file per key inside a directory.
///
/// Each write goes to its own temporary file in the same directory, which is
/// then renamed over the old one. A reader sees either the old list or the
/// new one, and concurrent writers never share a staging file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Store files under `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');

        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl CartStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;

        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;

        fs::create_dir_all(&self.dir)?;

        let mut staging = NamedTempFile::new_in(&self.dir)?;
        staging.write_all(value.as_bytes())?;
        staging.persist(&path).map_err(io::Error::from)?;

        debug!(path = %path.display(), bytes = value.len(), "wrote storage file");

        Ok(())
    }
}

/// Line items read from storage.
#[derive(Debug)]
pub struct StoredItems {
    /// The items, empty when nothing usable was stored
    pub items: Vec<LineItem>,

    /// Why the stored value was discarded, if it was not a valid cart
    pub corruption: Option<serde_json::Error>,
}

/// Read the cart. A missing key or a JSON `null` is an empty cart; a value
/// that is not a list of line items is discarded and reported in
/// [`StoredItems::corruption`].
///
/// # Errors
///
/// Returns a [`StorageError`] only if the backend itself fails.
pub fn load_items(storage: &impl CartStorage) -> Result<StoredItems, StorageError> {
    let Some(raw) = storage.get(CART_KEY)? else {
        return Ok(StoredItems {
            items: Vec::new(),
            corruption: None,
        });
    };

    match serde_json::from_str::<Option<Vec<LineItem>>>(&raw) {
        Ok(items) => Ok(StoredItems {
            items: items.unwrap_or_default(),
            corruption: None,
        }),
        Err(error) => Ok(StoredItems {
            items: Vec::new(),
            corruption: Some(error),
        }),
    }
}

/// Replace the stored cart with `items`.
///
/// # Errors
///
/// Returns a [`StorageError`] if encoding or writing fails.
pub fn save_items(storage: &impl CartStorage, items: &[LineItem]) -> Result<(), StorageError> {
    let encoded = serde_json::to_string(items)?;

    storage.set(CART_KEY, &encoded)
}
