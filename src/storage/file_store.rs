//! JSON file snapshot store.
//!
//! Keeps the snapshot in `<dir>/<key>.json`. Writes go to a temporary file
//! next to it first and are then renamed into place, so a crash mid-write
//! leaves the previous snapshot intact.

use crate::storage::snapshot::{SnapshotStore, StorageError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Snapshot store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store the snapshot for `key` inside `dir`.
    pub fn new(dir: &Path, key: &str) -> Self {
        Self {
            path: dir.join(format!("{}.json", key)),
        }
    }

    /// Path of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

impl SnapshotStore for JsonFileStore {
    fn read_snapshot(&self) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::IoError(e.to_string())),
        }
    }

    fn write_snapshot(&mut self, payload: &str) -> Result<(), StorageError> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::IoError(e.to_string()))?;
        }

        let temp = self.temp_path();
        std::fs::write(&temp, payload).map_err(|e| StorageError::IoError(e.to_string()))?;
        std::fs::rename(&temp, &self.path).map_err(|e| StorageError::IoError(e.to_string()))?;

        tracing::debug!(path = %self.path.display(), bytes = payload.len(), "Wrote snapshot file");
        Ok(())
    }

    fn clear_snapshot(&mut self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::IoError(e.to_string())),
        }
    }
}
