//! Persisted snapshot types for the mind map.
//!
//! A `MapSnapshot` is the wire form of an entire map: node records, edge
//! records and the hierarchy adjacency, plus optional dataset metadata.
//! The JSON shape is stable and round-trips without loss through export
//! and load:
//!
//! ```json
//! {
//!   "metadata": { "topic": "...", "contentType": "mindmap", "nodeCount": 10 },
//!   "nodes": [ { "id": "root", "data": { "label": "...", "type": "root", "summary": "..." } } ],
//!   "edges": [ { "id": "e_root_x", "source": "root", "target": "x", "type": "connects" } ],
//!   "hierarchy": { "root": ["x"], "x": [] }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::canonical::canonical_hash_hex;
use crate::MINDMAP_SCHEMA_VERSION;

use super::edge::{Edge, EdgeId};
use super::node::{NodeId, NodeKind};

/// Dataset metadata carried through load and save untouched.
///
/// The authoring pipeline stamps these once at generation time.
/// `nodeCount` is not recomputed after edits, so re-exporting an edited
/// map preserves the stamped value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapMetadata {
    /// Human-readable topic of the map.
    pub topic: String,
    /// Content type tag (`"mindmap"` in shipped datasets).
    #[serde(rename = "contentType")]
    pub content_type: String,
    /// Node count stamped at generation time.
    #[serde(rename = "nodeCount")]
    pub node_count: u64,
}

/// Per-node payload nested under `data` in the wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeData {
    /// Display label.
    pub label: String,
    /// Visual and semantic class.
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Longer description.
    pub summary: String,
}

/// A node record in the wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeEntry {
    /// Unique node identifier.
    pub id: NodeId,
    /// Nested node payload.
    pub data: NodeData,
}

/// Validation errors for persisted snapshots.
///
/// Any of these on load means the payload is rejected and the caller
/// falls back to the built-in default dataset.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    /// Two node records share an id.
    #[error("Duplicate node id: {0}")]
    DuplicateNode(NodeId),
    /// Two edge records share an id.
    #[error("Duplicate edge id: {0}")]
    DuplicateEdge(EdgeId),
    /// An edge or hierarchy entry references a node that does not exist.
    #[error("Unknown node {node} referenced by {context}")]
    UnknownNode {
        /// The missing node id.
        node: NodeId,
        /// Where the reference occurred.
        context: String,
    },
    /// An edge connects a node to itself.
    #[error("Self-loop edge: {0}")]
    SelfLoop(EdgeId),
}

/// Complete persisted state of a mind map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSnapshot {
    /// Optional dataset metadata (passed through untouched).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MapMetadata>,
    /// All node records.
    pub nodes: Vec<NodeEntry>,
    /// All edge records.
    pub edges: Vec<Edge>,
    /// Ordered children per node id. A missing key means "no children";
    /// the kernel itself always writes an entry (possibly empty) per node.
    pub hierarchy: BTreeMap<NodeId, Vec<NodeId>>,
}

impl MapSnapshot {
    /// Check referential integrity of the snapshot.
    ///
    /// Verifies that node and edge ids are unique, that every edge joins
    /// two distinct existing nodes, and that every hierarchy key and
    /// child references an existing node.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let mut node_ids: BTreeSet<&NodeId> = BTreeSet::new();
        for entry in &self.nodes {
            if !node_ids.insert(&entry.id) {
                return Err(SnapshotError::DuplicateNode(entry.id.clone()));
            }
        }

        let mut edge_ids: BTreeSet<&EdgeId> = BTreeSet::new();
        for edge in &self.edges {
            if !edge_ids.insert(&edge.id) {
                return Err(SnapshotError::DuplicateEdge(edge.id.clone()));
            }
            if edge.source == edge.target {
                return Err(SnapshotError::SelfLoop(edge.id.clone()));
            }
            for endpoint in [&edge.source, &edge.target] {
                if !node_ids.contains(endpoint) {
                    return Err(SnapshotError::UnknownNode {
                        node: endpoint.clone(),
                        context: format!("edge {}", edge.id),
                    });
                }
            }
        }

        for (parent, children) in &self.hierarchy {
            if !node_ids.contains(parent) {
                return Err(SnapshotError::UnknownNode {
                    node: parent.clone(),
                    context: "hierarchy key".to_string(),
                });
            }
            for child in children {
                if !node_ids.contains(child) {
                    return Err(SnapshotError::UnknownNode {
                        node: child.clone(),
                        context: format!("children of {}", parent),
                    });
                }
            }
        }

        Ok(())
    }

    /// Compute a deterministic fingerprint of this snapshot.
    ///
    /// Node and edge records are sorted by id before hashing, so two
    /// snapshots describing the same map hash identically regardless of
    /// record order. The autosave path skips writes whose fingerprint
    /// matches the last completed save.
    pub fn fingerprint(&self) -> String {
        let mut nodes: Vec<&NodeEntry> = self.nodes.iter().collect();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));

        let mut edges: Vec<&Edge> = self.edges.iter().collect();
        edges.sort();

        let input = FingerprintInput {
            schema_version: MINDMAP_SCHEMA_VERSION,
            metadata: &self.metadata,
            nodes,
            edges,
            hierarchy: &self.hierarchy,
        };
        canonical_hash_hex(&input)
    }

    /// Number of node records.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edge records.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// Internal struct for computing the snapshot fingerprint.
#[derive(Serialize)]
struct FingerprintInput<'a> {
    schema_version: &'a str,
    metadata: &'a Option<MapMetadata>,
    nodes: Vec<&'a NodeEntry>,
    edges: Vec<&'a Edge>,
    hierarchy: &'a BTreeMap<NodeId, Vec<NodeId>>,
}
