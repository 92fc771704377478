//! Node types for the mind-map graph.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a node in the mind map.
///
/// Wraps the string id carried in persisted snapshots (seeded datasets
/// use readable ids such as `root` or `cat_sources`) and implements
/// `Ord` for deterministic map ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a NodeId from an existing id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh unique id for a newly created node.
    ///
    /// Generated ids carry the `node_` prefix so they remain
    /// recognizable next to the readable ids of seeded datasets.
    pub fn fresh() -> Self {
        Self(format!("node_{}", Uuid::new_v4().simple()))
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Visual and semantic class of a node.
///
/// Doubles as the style class handed to the rendering backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Center node of a map.
    Root,
    /// Grouping node.
    Category,
    /// Detail node; the kind assigned to every user-created node.
    Component,
}

impl NodeKind {
    /// Parse node kind from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "root" => Some(Self::Root),
            "category" => Some(Self::Category),
            "component" => Some(Self::Component),
            _ => None,
        }
    }
}

impl Default for NodeKind {
    fn default() -> Self {
        Self::Component
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => write!(f, "root"),
            Self::Category => write!(f, "category"),
            Self::Component => write!(f, "component"),
        }
    }
}

/// A node in the mind map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Unique node identifier.
    pub id: NodeId,
    /// Display label rendered on the canvas.
    pub label: String,
    /// Visual and semantic class.
    pub kind: NodeKind,
    /// Longer description shown in detail panes.
    pub summary: String,
}

impl Node {
    /// Create a new node.
    pub fn new(
        id: NodeId,
        label: impl Into<String>,
        kind: NodeKind,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            kind,
            summary: summary.into(),
        }
    }
}
