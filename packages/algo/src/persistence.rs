//! Key-value persistence boundary.
//!
//! The engine only needs `read` and `write` of whole string values under a
//! fixed key. Hosts supply the backing store; [`MemoryStore`] serves tests and
//! embedders without durable storage.

use std::collections::HashMap;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

pub trait KeyValueStore {
    /// `Ok(None)` when nothing has been written under `key` yet.
    fn read(&self, key: &str) -> PersistenceResult<Option<String>>;

    /// Durably replace the value under `key` before returning.
    fn write(&mut self, key: &str, value: &str) -> PersistenceResult<()>;
}

/// Process-local store backed by a `HashMap`
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one value, e.g. a previously persisted fact store.
    pub fn with_value(key: &str, value: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.into());
        store
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Number of successful writes
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> PersistenceResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> PersistenceResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn read(&self, key: &str) -> PersistenceResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> PersistenceResult<()> {
        (**self).write(key, value)
    }
}
