//! Session id slot: a single-key string store standing in for browser local storage.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use sled::{Db, Tree};

use crate::error::StorageError;

pub(crate) const TREE_SESSION: &str = "telemetry_session";

/// Minimal key/value contract the session resolver needs.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Durable sled-backed store.
#[derive(Clone)]
pub struct SledSessionStore {
    db: Db,
    tree: Tree,
}

impl SledSessionStore {
    pub fn new(db: Db) -> Result<Self, StorageError> {
        let tree = db.open_tree(TREE_SESSION)?;
        Ok(Self { db, tree })
    }

    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = sled::open(path).map_err(|e| {
            StorageError::Unavailable(format!("cannot open {}: {}", path.display(), e))
        })?;
        Self::new(db)
    }

    pub fn flush(&self) -> Result<(), StorageError> {
        self.db.flush()?;
        Ok(())
    }
}

impl SessionStore for SledSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let Some(raw) = self.tree.get(key.as_bytes())? else {
            return Ok(None);
        };
        let value = String::from_utf8(raw.to_vec()).map_err(|e| StorageError::InvalidValue {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Some(value))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.tree.insert(key.as_bytes(), value.as_bytes())?;
        self.flush()
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.tree.remove(key.as_bytes())?;
        self.flush()
    }
}

/// Process-local store for tests and for embedders that keep their own persistence.
#[derive(Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
    writes: AtomicUsize,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set` calls observed so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}
