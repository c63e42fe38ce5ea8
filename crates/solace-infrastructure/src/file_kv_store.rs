//! File-backed key-value store.
//!
//! Each key is one file under the store directory (`<dir>/<key>.json`),
//! replaced atomically on every `set`.

use crate::storage::AtomicFile;
use solace_core::error::{Result, SolaceError};
use solace_core::kv::KeyValueStore;
use std::path::{Path, PathBuf};

const FILE_EXTENSION: &str = "json";

/// Key-value store persisted as one file per key.
///
/// # Directory Structure
///
/// ```text
/// <data_dir>/
/// ├── guest_data.json          # GuestAggregate document
/// ├── guest_session_id.json    # opaque session id
/// └── upsell_dismissed.json    # presence flag
/// ```
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_for(&self, key: &str) -> Result<AtomicFile> {
        validate_key(key)?;
        Ok(AtomicFile::new(
            self.dir.join(format!("{}.{}", key, FILE_EXTENSION)),
        ))
    }
}

/// Keys become file names, so only `[A-Za-z0-9_-]` is accepted.
fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(SolaceError::storage(format!("Invalid storage key '{}'", key)))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.file_for(key)?.read()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        tracing::trace!("[FileKeyValueStore] set key={} ({} bytes)", key, value.len());
        self.file_for(key)?.write(value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        tracing::trace!("[FileKeyValueStore] remove key={}", key);
        self.file_for(key)?.remove()
    }
}
