//! Persistence for the mood journal.
//!
//! All data lives in a key-value byte store holding whole JSON blobs. The store
//! is an injected capability (`ByteStore`) rather than something probed from
//! the environment, so the engine runs the same against a directory on disk,
//! an in-memory map, or nothing at all.
//!
//! # Module Structure
//!
//! - `entries`: the date-indexed `MoodEntryStore`
//! - `file`: `FileStore`, one JSON file per key
//! - `theme`: the persisted dark theme flag

pub mod entries;
pub mod file;
pub mod theme;

pub use entries::{Confirm, MoodEntry, MoodEntryStore, MutationOutcome, SkipReason};
pub use file::FileStore;

use crate::errors::StorageError;
use std::collections::HashMap;

/// A key-value store of string blobs.
///
/// `get` returns `Ok(None)` for a key that was never written. A store that does
/// not exist in the current environment answers every call with
/// `StorageError::Unavailable`.
pub trait ByteStore {
    /// Reads the blob stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the blob stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Read-modify-write of one blob.
    ///
    /// `apply` receives the current blob and returns the replacement, or
    /// `None` to leave the blob as it is. Returns whether a write happened.
    /// Stores shared with other processes hold their lock from the read to
    /// the write, so no other writer lands in between.
    ///
    /// # Errors
    ///
    /// Returns the first error from reading, from `apply`, or from writing.
    /// Nothing is written after an error.
    fn update(
        &mut self,
        key: &str,
        apply: &mut dyn FnMut(Option<String>) -> Result<Option<String>, StorageError>,
    ) -> Result<bool, StorageError> {
        match apply(self.get(key)?)? {
            Some(value) => {
                self.set(key, &value)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl<S: ByteStore + ?Sized> ByteStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn update(
        &mut self,
        key: &str,
        apply: &mut dyn FnMut(Option<String>) -> Result<Option<String>, StorageError>,
    ) -> Result<bool, StorageError> {
        (**self).update(key, apply)
    }
}

/// In-memory byte store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blobs: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw access to a stored blob, mostly useful in tests.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.blobs.get(key).map(String::as_str)
    }
}

impl ByteStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.blobs.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A store that is not there.
///
/// Used when no persistence medium could be set up; every read and write
/// reports `StorageError::Unavailable`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStore;

impl ByteStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}
