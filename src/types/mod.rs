//! Core types for the mind-map kernel.
//!
//! Identifiers, node and edge records, and the persisted snapshot form.
//! Everything here is plain data: ordering is derived from ids so the
//! same map always serializes and hashes the same way.

pub mod edge;
pub mod node;
pub mod snapshot;

pub use edge::{Edge, EdgeId, EdgeKind};
pub use node::{Node, NodeId, NodeKind};
pub use snapshot::{MapMetadata, MapSnapshot, NodeData, NodeEntry, SnapshotError};
