//! # mindmap-kernel
//!
//! Graph state and view synchronization for interactive mind-map canvases.
//!
//! The kernel answers one question:
//!
//! > Given what the user just did, **exactly which scene elements change**?
//!
//! ## Core Contract
//!
//! 1. The [`GraphModel`] is the single source of truth; the rendered scene
//!    is a mirror that only moves through [`ScenePatch`] instructions
//! 2. Interaction flows one way: event → intent → mutation → patches
//! 3. Invalid actions produce [`Notice`]s, never panics; the model is
//!    unchanged whenever an error is returned
//! 4. Progressive disclosure is cycle-safe: every traversal terminates on
//!    arbitrary hierarchies, including user-created cycles
//!
//! ## Architecture
//!
//! ```text
//! InteractionEvent → Intent → GraphModel / VisibilityController
//!                                   ↓
//!                              ScenePatch → Render Surface
//!                                   ↓
//!                             SnapshotStore (autosave)
//! ```
//!
//! ## Determinism Guarantees
//!
//! - Same model state → identical snapshot bytes and fingerprint
//! - Node, edge and patch ordering is canonical (by id)
//! - Autosave writes only when the fingerprint actually changed

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod canonical;
pub mod editor;
pub mod export;
pub mod levels;
pub mod model;
pub mod seed;
pub mod store;
pub mod types;
pub mod view;
pub mod visibility;

// Re-exports
pub use types::{
    Edge, EdgeId, EdgeKind, MapMetadata, MapSnapshot, Node, NodeData, NodeEntry, NodeId, NodeKind,
    SnapshotError,
};
pub use model::{GraphModel, ModelError, Removal};
pub use levels::{max_depth, top_level_nodes};
pub use visibility::{VisibilityController, VisibleSet};
pub use view::{
    ConnectionMode, InteractionEvent, InteractionSession, Intent, Notice, NoticeLevel, Outcome,
    SceneEdge, SceneNode, ScenePatch, SceneState, ViewSync, DEFAULT_NODE_LABEL,
    DEFAULT_NODE_SUMMARY,
};
pub use store::{JsonFileStore, MemoryStore, SnapshotStore, StoreError, DEFAULT_STORE_FILE};
pub use export::{
    image_export_spec, image_export_spec_at, json_export, json_export_at, ImageExportSpec,
    JsonExport, Theme,
};
pub use seed::default_snapshot;
pub use editor::MapEditor;
pub use canonical::{canonical_hash, canonical_hash_hex, to_canonical_bytes};

/// Schema version for persisted snapshots.
/// Increment on breaking changes to the snapshot format.
pub const MINDMAP_SCHEMA_VERSION: &str = "1.0.0";
