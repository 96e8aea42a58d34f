//! The persisted dark theme flag.
//!
//! Only the stored preference lives here; applying a theme is up to the
//! presentation layer.

use crate::constants::DARK_THEME_KEY;
use crate::errors::StorageError;
use crate::store::ByteStore;
use tracing::warn;

/// Reads the dark theme flag. Missing or unreadable data means light theme.
pub fn load<S: ByteStore + ?Sized>(store: &S) -> bool {
    match store.get(DARK_THEME_KEY) {
        Ok(raw) => decode(raw.as_deref()),
        Err(StorageError::Unavailable) => false,
        Err(e) => {
            warn!(error = %e, "Failed to read theme preference");
            false
        }
    }
}

/// Flips the stored flag and returns the new value.
///
/// The read and the write happen in one `ByteStore::update`.
///
/// # Errors
///
/// Returns the backing store's error when the flag cannot be read or written.
pub fn toggle<S: ByteStore + ?Sized>(store: &mut S) -> Result<bool, StorageError> {
    let mut dark = false;
    store.update(DARK_THEME_KEY, &mut |raw| {
        dark = !decode(raw.as_deref());
        encode(dark).map(Some)
    })?;
    Ok(dark)
}

fn decode(raw: Option<&str>) -> bool {
    let Some(raw) = raw else {
        return false;
    };
    serde_json::from_str(raw).unwrap_or_else(|source| {
        let e = StorageError::Malformed {
            key: DARK_THEME_KEY.to_string(),
            source,
        };
        warn!(error = %e, "Ignoring malformed theme preference");
        false
    })
}

fn encode(dark: bool) -> Result<String, StorageError> {
    serde_json::to_string(&dark).map_err(|source| StorageError::Encode {
        key: DARK_THEME_KEY.to_string(),
        source,
    })
}
