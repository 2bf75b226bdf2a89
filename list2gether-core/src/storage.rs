//! Persistent key-value storage.
//!
//! The client keeps its credentials and preferences in flat string keys. This module
//! provides the storage trait and two implementations:
//!
//! - [`MemoryStore`]: process-local, lost on exit
//! - [`JsonFileStore`]: a JSON object on disk, rewritten on every mutation
//!
//! Multi-key writes and removals go through a single call so implementations can apply
//! them under one lock. Readers never observe half of a credential update.

use crate::errors::StorageError;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Well-known storage keys.
pub mod keys {
    /// Short-lived bearer credential.
    pub const ACCESS_TOKEN: &str = "access_token";
    /// Long-lived credential used to mint new access tokens.
    pub const REFRESH_TOKEN: &str = "refresh_token";
    /// Cached user profile, serialized as JSON.
    pub const USER: &str = "user";
    /// UI language preference.
    pub const LANGUAGE: &str = "l2g_lang";

    /// The credential triple, always cleared together.
    pub const CREDENTIALS: [&str; 3] = [ACCESS_TOKEN, REFRESH_TOKEN, USER];
}

/// Storage trait for flat string keys.
pub trait KeyValueStore: Send + Sync + Debug {
    /// Read a single key.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write several keys at once.
    fn set_many(&self, entries: &[(&str, String)]) -> StorageResult<()>;

    /// Remove several keys at once. Missing keys are ignored.
    fn remove_many(&self, keys: &[&str]) -> StorageResult<()>;

    /// Write a single key.
    fn set(&self, key: &str, value: String) -> StorageResult<()> {
        self.set_many(&[(key, value)])
    }

    /// Remove a single key.
    fn remove(&self, key: &str) -> StorageResult<()> {
        self.remove_many(&[key])
    }
}

/// In-memory storage implementation.
///
/// Suitable for tests and short-lived sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set_many(&self, entries: &[(&str, String)]) -> StorageResult<()> {
        let mut map = self.entries.write();
        for (key, value) in entries {
            map.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }

    fn remove_many(&self, keys: &[&str]) -> StorageResult<()> {
        let mut map = self.entries.write();
        for key in keys {
            map.remove(*key);
        }
        Ok(())
    }
}

/// File-backed storage.
///
/// The whole map is kept in memory and written back as a single JSON object after each
/// mutation. Writes go to a sibling temp file first and are renamed into place. A
/// mutation becomes visible to readers only once it is on disk.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Open (or lazily create) a store at `path`.
    ///
    /// A missing file is treated as an empty store; the file is created on first write.
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), keys = entries.len(), "Opened storage file");
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set_many(&self, entries: &[(&str, String)]) -> StorageResult<()> {
        let mut map = self.entries.write();
        let mut next = map.clone();
        for (key, value) in entries {
            next.insert((*key).to_string(), value.clone());
        }
        self.flush(&next)?;
        *map = next;
        Ok(())
    }

    fn remove_many(&self, keys: &[&str]) -> StorageResult<()> {
        let mut map = self.entries.write();
        if !keys.iter().any(|key| map.contains_key(*key)) {
            return Ok(());
        }
        let mut next = map.clone();
        for key in keys {
            next.remove(*key);
        }
        self.flush(&next)?;
        *map = next;
        Ok(())
    }
}
