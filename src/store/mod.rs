//! Snapshot storage backends.
//!
//! A store holds at most one snapshot, mirroring a single browser
//! storage slot. `load` distinguishes "nothing stored yet" (`Ok(None)`)
//! from a payload that exists but cannot be read (`Err`); callers fall
//! back to the default dataset in both cases, silently for the former.

pub mod file;
pub mod memory;

use crate::types::MapSnapshot;

/// Errors from snapshot storage.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The underlying storage could not be read or written.
    #[error("Storage failure: {0}")]
    Io(#[from] std::io::Error),
    /// A stored payload exists but is not a valid snapshot document.
    #[error("Malformed snapshot payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A single-slot snapshot store.
pub trait SnapshotStore {
    /// Read the stored snapshot, if any.
    fn load(&self) -> Result<Option<MapSnapshot>, StoreError>;

    /// Replace the stored snapshot.
    fn save(&mut self, snapshot: &MapSnapshot) -> Result<(), StoreError>;
}

pub use file::{JsonFileStore, DEFAULT_STORE_FILE};
pub use memory::MemoryStore;
