//! Edge types for the mind-map graph.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::node::NodeId;

/// Unique identifier for an edge.
///
/// Derived deterministically from the endpoints as `e_<source>_<target>`,
/// so the same ordered pair of nodes always yields the same id and a
/// repeated connection attempt is caught as an id collision.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(String);

impl EdgeId {
    /// Create an EdgeId from an existing id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive the canonical id for an edge between two nodes.
    pub fn between(source: &NodeId, target: &NodeId) -> Self {
        Self(format!("e_{}_{}", source, target))
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of edge in the mind map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Parent-to-child edge created alongside a hierarchy entry.
    Hierarchy,
    /// User-drawn cross link between two arbitrary nodes.
    Connects,
}

impl EdgeKind {
    /// Parse edge kind from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "hierarchy" => Some(Self::Hierarchy),
            "connects" => Some(Self::Connects),
            _ => None,
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hierarchy => write!(f, "hierarchy"),
            Self::Connects => write!(f, "connects"),
        }
    }
}

/// Directed edge between two nodes.
///
/// Implements `Ord` for deterministic ordering: id, then kind (the id
/// already encodes source and target).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Unique edge identifier (see [`EdgeId::between`]).
    pub id: EdgeId,
    /// Source node.
    pub source: NodeId,
    /// Target node.
    pub target: NodeId,
    /// Kind of edge.
    #[serde(rename = "type")]
    pub kind: EdgeKind,
}

impl Edge {
    /// Create a new edge with the canonical derived id.
    pub fn new(source: NodeId, target: NodeId, kind: EdgeKind) -> Self {
        let id = EdgeId::between(&source, &target);
        Self {
            id,
            source,
            target,
            kind,
        }
    }

    /// Create a cross link (`connects`) edge.
    pub fn connects(source: NodeId, target: NodeId) -> Self {
        Self::new(source, target, EdgeKind::Connects)
    }

    /// Create a parent-child (`hierarchy`) edge.
    pub fn hierarchy(source: NodeId, target: NodeId) -> Self {
        Self::new(source, target, EdgeKind::Hierarchy)
    }
}

// Canonical ordering: edge id, then kind
impl PartialOrd for Edge {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Edge {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.id.cmp(&other.id) {
            std::cmp::Ordering::Equal => self.kind.cmp(&other.kind),
            ord => ord,
        }
    }
}
