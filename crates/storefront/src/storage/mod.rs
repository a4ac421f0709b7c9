//! Durable key-value slots.
//!
//! The cart persists to a single string slot under a fixed key, the same
//! contract a browser's local storage offers. Two implementations:
//!
//! - [`MemoryStore`] - process-local, for tests and embedding
//! - [`JsonFileStore`] - one JSON object file on disk, survives restarts

use std::path::PathBuf;

use thiserror::Error;

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Errors raised by a storage slot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but is not a JSON object of strings.
    #[error("storage file {path} is malformed: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The medium refused the write (full or disabled).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A synchronous string key-value store.
pub trait KeyValueStore {
    /// Read the value stored under `key`, or `None` if the key is unset.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write does not reach the medium. The
    /// previous value is kept in that case.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an unset key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write does not reach the medium.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}
