//! Storage port for persisted documents.
//!
//! This module provides the key-value abstraction behind the shopping list,
//! favorites, and account session documents, enabling better testability and
//! adherence to the Dependency Inversion Principle. Keys are produced by a
//! pure `(purpose, namespace)` mapping so per-user isolation stays an
//! inspectable step rather than ad hoc string concatenation.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Namespace used for documents that belong to no signed-in account.
pub const ANONYMOUS_NAMESPACE: &str = "local";

/// Identifies one persisted document.
///
/// The key qualifies a document purpose (such as the shopping list) by a
/// namespace (the signed-in user id, or [`ANONYMOUS_NAMESPACE`]), so two
/// accounts never share a document.
///
/// # Examples
///
/// ```
/// use smart_kitchen::store::StorageKey;
///
/// let key = StorageKey::new("shopping-list", "local");
/// assert_eq!(key.as_str(), "shopping-list.local");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    /// Map a document purpose and namespace to a storage key.
    pub fn new(purpose: &str, namespace: &str) -> Self {
        Self(format!("{}.{}", purpose, namespace))
    }

    /// The rendered key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trait for abstracting document storage.
///
/// This trait allows for dependency injection of the persistence backend,
/// making the document types testable without touching the real data
/// directory. A missing key is an absent document, never an error.
pub trait KeyValueStore {
    /// Read the document stored under `key`, if any.
    fn get(&self, key: &StorageKey) -> io::Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous document.
    fn set(&self, key: &StorageKey, value: &str) -> io::Result<()>;

    /// Delete the document under `key`. Deleting a missing key succeeds.
    fn remove(&self, key: &StorageKey) -> io::Result<()>;
}

/// File-backed store keeping one JSON file per key under a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created lazily on
    /// first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the document files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &StorageKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_str()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &StorageKey) -> io::Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set(&self, key: &StorageKey, value: &str) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)
    }

    fn remove(&self, key: &StorageKey) -> io::Result<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// In-memory store for tests and ephemeral sessions.
///
/// Clones share the same underlying map, so a test can hand a clone to the
/// code under test and inspect writes through its own handle.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when a document exists under `key`.
    pub fn contains(&self, key: &StorageKey) -> bool {
        self.entries.lock().contains_key(key.as_str())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &StorageKey) -> io::Result<Option<String>> {
        Ok(self.entries.lock().get(key.as_str()).cloned())
    }

    fn set(&self, key: &StorageKey, value: &str) -> io::Result<()> {
        self.entries
            .lock()
            .insert(key.as_str().to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &StorageKey) -> io::Result<()> {
        self.entries.lock().remove(key.as_str());
        Ok(())
    }
}
