//! JSON file snapshot store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::types::MapSnapshot;

use super::{SnapshotStore, StoreError};

/// Default file name, matching the storage key used by web embeddings.
pub const DEFAULT_STORE_FILE: &str = "mindmap-data.json";

/// Stores the snapshot as pretty-printed JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// A store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A store using the default file name inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(DEFAULT_STORE_FILE),
        }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Result<Option<MapSnapshot>, StoreError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StoreError::Io(err)),
        };
        let snapshot = serde_json::from_slice(&bytes)?;
        tracing::debug!(path = %self.path.display(), "loaded snapshot");
        Ok(Some(snapshot))
    }

    fn save(&mut self, snapshot: &MapSnapshot) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(snapshot)?;
        std::fs::write(&self.path, bytes)?;
        tracing::debug!(path = %self.path.display(), "saved snapshot");
        Ok(())
    }
}
