//! Directory-backed byte store.
//!
//! Each key is a file `<dir>/<key>.json`. Writes replace the whole file: the
//! new blob goes to a temporary sibling which is then renamed over the old
//! one, so readers see either the old or the new blob.
//!
//! Writers take an exclusive `fs2` lock on `<dir>/<key>.lock`. `update` holds
//! it from the read to the write, so two processes mutating the same key
//! cannot both work from the same snapshot. A busy lock is an error rather
//! than a wait.

use crate::constants::{LOCK_FILE_EXTENSION, STORE_FILE_EXTENSION};
use crate::errors::{LockError, StorageError};
use crate::store::ByteStore;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Byte store keeping one JSON file per key in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens the store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` when the directory cannot be created or
    /// secured.
    pub fn open(dir: &Path) -> Result<Self, StorageError> {
        let io_err = |source: io::Error| StorageError::Io {
            key: dir.display().to_string(),
            source,
        };

        if !dir.exists() {
            fs::create_dir_all(dir).map_err(io_err)?;

            #[cfg(unix)]
            {
                let permissions =
                    fs::Permissions::from_mode(crate::constants::DEFAULT_DIR_PERMISSIONS);
                fs::set_permissions(dir, permissions).map_err(io_err)?;
                debug!("Set 0o700 permissions on data directory");
            }
        } else if !dir.is_dir() {
            return Err(io_err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "data path exists and is not a directory",
            )));
        }

        Ok(FileStore {
            dir: dir.to_path_buf(),
        })
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", key, STORE_FILE_EXTENSION))
    }

    fn lock_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", key, LOCK_FILE_EXTENSION))
    }

    fn lock(&self, key: &str) -> Result<File, LockError> {
        let path = self.lock_path(key);
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|source| LockError::AcquisitionFailed {
                path: path.clone(),
                source,
            })?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(file),
            Err(e) if e.kind() == fs2::lock_contended_error().kind() => {
                Err(LockError::FileBusy { path })
            }
            Err(source) => Err(LockError::AcquisitionFailed { path, source }),
        }
    }

    fn write_atomically(&self, key: &str, value: &str) -> io::Result<()> {
        let target = self.blob_path(key);
        let temp = self
            .dir
            .join(format!(".{}-{}.tmp", key, uuid::Uuid::new_v4()));

        let result = (|| -> io::Result<()> {
            let mut file = File::create(&temp)?;
            #[cfg(unix)]
            {
                let mut permissions = file.metadata()?.permissions();
                permissions.set_mode(crate::constants::DEFAULT_FILE_PERMISSIONS);
                file.set_permissions(permissions)?;
            }
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
            fs::rename(&temp, &target)
        })();

        if result.is_err() {
            let _ = fs::remove_file(&temp);
        }
        result
    }
}

fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::Io {
            key: key.to_string(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "invalid storage key"),
        })
    }
}

impl ByteStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        match fs::read_to_string(self.blob_path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(key, &mut |_| Ok(Some(value.to_string()))).map(|_| ())
    }

    fn update(
        &mut self,
        key: &str,
        apply: &mut dyn FnMut(Option<String>) -> Result<Option<String>, StorageError>,
    ) -> Result<bool, StorageError> {
        validate_key(key)?;
        let lock = self.lock(key)?;

        let result = self.get(key).and_then(|current| match apply(current)? {
            Some(value) => {
                debug!(key, bytes = value.len(), "Writing blob");
                self.write_atomically(key, &value)
                    .map(|()| true)
                    .map_err(|source| StorageError::Io {
                        key: key.to_string(),
                        source,
                    })
            }
            None => Ok(false),
        });

        let _ = FileExt::unlock(&lock);
        result
    }
}
