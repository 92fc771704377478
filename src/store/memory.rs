//! In-memory snapshot store for testing.

use crate::types::MapSnapshot;

use super::{SnapshotStore, StoreError};

/// In-memory single-slot store.
///
/// Counts completed saves so tests can observe autosave coalescing.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Option<MapSnapshot>,
    saves: usize,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with a snapshot.
    pub fn with_snapshot(snapshot: MapSnapshot) -> Self {
        Self {
            slot: Some(snapshot),
            saves: 0,
        }
    }

    /// The stored snapshot, if any.
    pub fn stored(&self) -> Option<&MapSnapshot> {
        self.slot.as_ref()
    }

    /// Number of saves since construction.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<MapSnapshot>, StoreError> {
        Ok(self.slot.clone())
    }

    fn save(&mut self, snapshot: &MapSnapshot) -> Result<(), StoreError> {
        self.slot = Some(snapshot.clone());
        self.saves += 1;
        Ok(())
    }
}
