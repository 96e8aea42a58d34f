//! Error handling utilities for the moodjournal application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur at the application boundary, as well
//! as the convenience type alias `AppResult` for functions that can return these
//! errors.
//!
//! The journal engine itself never fails outward: storage problems are mapped to
//! well-defined defaults and reported through `MutationOutcome` values. The
//! `StorageError` and `LockError` types describe those problems precisely so they
//! can be logged.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents specific error cases that can occur when talking to a byte store.
///
/// # Examples
///
/// ```
/// use moodjournal::errors::StorageError;
///
/// let error = StorageError::Unavailable;
/// assert!(format!("{}", error).contains("not available"));
/// ```
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store does not exist in this environment.
    #[error("Storage is not available in this environment")]
    Unavailable,

    /// A stored blob could not be decoded.
    #[error("Stored data under '{key}' is malformed: {source}")]
    Malformed {
        /// The storage key that held the malformed blob
        key: String,
        /// The underlying decode error
        #[source]
        source: serde_json::Error,
    },

    /// Data could not be encoded for storage.
    #[error("Failed to encode data for '{key}': {source}")]
    Encode {
        /// The storage key being written
        key: String,
        /// The underlying encode error
        #[source]
        source: serde_json::Error,
    },

    /// Reading or writing the backing medium failed.
    #[error("Storage I/O failed for '{key}': {source}")]
    Io {
        /// The storage key being accessed
        key: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The blob could not be written because its lock is held elsewhere.
    #[error("Storage lock error: {0}")]
    Lock(#[from] LockError),
}

/// Represents errors that can occur when attempting to lock a store file.
///
/// # Examples
///
/// ```
/// use moodjournal::errors::LockError;
/// use std::path::PathBuf;
///
/// let error = LockError::FileBusy {
///     path: PathBuf::from("/data/moodEntries.lock"),
/// };
///
/// assert!(format!("{}", error).contains("in use by another process"));
/// ```
#[derive(Debug, Error)]
pub enum LockError {
    /// Error when the file is already locked by another process.
    #[error("Store file is in use by another process: {path}. Please wait for the other moodjournal process to finish.")]
    FileBusy {
        /// The path to the lock file
        path: PathBuf,
    },

    /// Error when acquiring the lock fails for a technical reason.
    #[error("Failed to acquire lock {path}: {source}. Please check file permissions and ensure the directory is accessible.")]
    AcquisitionFailed {
        /// The path to the lock file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Represents all possible errors that can surface at the application boundary.
///
/// # Examples
///
/// ```
/// use moodjournal::errors::AppError;
///
/// let error = AppError::Config("Data directory path is empty".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Data directory path is empty");
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem or terminal operations.
    ///
    /// This variant automatically converts from `std::io::Error` through the `From` trait.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors in journal input (e.g., invalid date formats).
    #[error("Journal logic error: {0}")]
    Journal(String),

    /// Errors related to the byte store.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Errors related to file locking.
    #[error("File locking error: {0}")]
    Lock(#[from] LockError),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// # Examples
///
/// ```
/// use moodjournal::errors::{AppResult, AppError};
///
/// fn might_fail() -> AppResult<String> {
///     if false {
///         return Err(AppError::Journal("Something went wrong".to_string()));
///     }
///     Ok("Operation succeeded".to_string())
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;
