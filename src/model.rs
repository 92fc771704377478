//! Canonical graph state and its mutations.
//!
//! `GraphModel` is the single source of truth for the map: node records,
//! edge records and the parent-to-children hierarchy. View state (what
//! is visible, what is selected) lives elsewhere and is derived from it.
//!
//! Mutations validate before touching state, so a returned error means
//! the model is unchanged. Lookups and iteration are backed by ordered
//! maps, which keeps snapshots and fingerprints deterministic.

use std::collections::BTreeMap;

use crate::types::{
    Edge, EdgeId, MapMetadata, MapSnapshot, Node, NodeData, NodeEntry, NodeId, NodeKind,
    SnapshotError,
};

/// Errors produced by graph mutations.
///
/// Each variant carries the id that failed the check. Display strings
/// are written for direct surfacing to users.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// The referenced node does not exist.
    #[error("Node not found: {0}")]
    NotFound(NodeId),
    /// The requested parent does not exist.
    #[error("Parent node not found: {0}")]
    InvalidParent(NodeId),
    /// Source and target of a connection are the same node.
    #[error("Cannot connect {0} to itself")]
    SelfLoop(NodeId),
    /// An edge with the same endpoints already exists.
    #[error("Connection already exists: {0}")]
    DuplicateEdge(EdgeId),
}

/// Everything removed by [`GraphModel::remove_node`].
///
/// Callers use this to mirror the removal into the rendered scene
/// without re-diffing the whole graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    /// The removed node record.
    pub node: Node,
    /// Ids of every edge that referenced the node.
    pub edges: Vec<EdgeId>,
}

/// The canonical mind-map graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphModel {
    metadata: Option<MapMetadata>,
    nodes: BTreeMap<NodeId, Node>,
    edges: BTreeMap<EdgeId, Edge>,
    hierarchy: BTreeMap<NodeId, Vec<NodeId>>,
}

impl GraphModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a model from a validated snapshot.
    ///
    /// The snapshot is validated first; a model is only constructed from
    /// payloads that pass every referential-integrity check. Nodes
    /// missing a hierarchy entry get an empty one, so every node id is
    /// always a hierarchy key afterwards.
    pub fn from_snapshot(snapshot: MapSnapshot) -> Result<Self, SnapshotError> {
        snapshot.validate()?;

        let mut model = Self {
            metadata: snapshot.metadata,
            ..Self::default()
        };
        for entry in snapshot.nodes {
            let node = Node::new(entry.id.clone(), entry.data.label, entry.data.kind, entry.data.summary);
            model.nodes.insert(entry.id, node);
        }
        for edge in snapshot.edges {
            model.edges.insert(edge.id.clone(), edge);
        }
        model.hierarchy = snapshot.hierarchy;
        for id in model.nodes.keys() {
            if !model.hierarchy.contains_key(id) {
                model.hierarchy.insert(id.clone(), Vec::new());
            }
        }
        Ok(model)
    }

    /// Export the current state as a snapshot.
    ///
    /// The result always passes [`MapSnapshot::validate`]: mutations
    /// maintain referential integrity, so there is nothing to repair
    /// on the way out.
    pub fn snapshot(&self) -> MapSnapshot {
        let nodes = self
            .nodes
            .values()
            .map(|node| NodeEntry {
                id: node.id.clone(),
                data: NodeData {
                    label: node.label.clone(),
                    kind: node.kind,
                    summary: node.summary.clone(),
                },
            })
            .collect();
        MapSnapshot {
            metadata: self.metadata.clone(),
            nodes,
            edges: self.edges.values().cloned().collect(),
            hierarchy: self.hierarchy.clone(),
        }
    }

    /// Add a new node, optionally as a child of `parent`.
    ///
    /// The node gets a fresh id and the `component` kind. With a parent,
    /// it is appended to the parent's children and a hierarchy edge is
    /// inserted. Labels and summaries are stored as given, including
    /// empty strings; callers supply defaults where they want them.
    pub fn add_node(
        &mut self,
        label: &str,
        summary: &str,
        parent: Option<&NodeId>,
    ) -> Result<NodeId, ModelError> {
        if let Some(parent) = parent {
            if !self.nodes.contains_key(parent) {
                return Err(ModelError::InvalidParent(parent.clone()));
            }
        }

        let id = NodeId::fresh();
        let node = Node::new(id.clone(), label, NodeKind::Component, summary);
        self.nodes.insert(id.clone(), node);
        self.hierarchy.entry(id.clone()).or_default();

        if let Some(parent) = parent {
            self.hierarchy
                .entry(parent.clone())
                .or_default()
                .push(id.clone());
            let edge = Edge::hierarchy(parent.clone(), id.clone());
            self.edges.insert(edge.id.clone(), edge);
        }

        Ok(id)
    }

    /// Replace a node's label.
    ///
    /// Returns `Ok(false)` without touching the model when the new label
    /// is empty or whitespace-only, so an aborted edit dialog never
    /// blanks a node.
    pub fn rename_node(&mut self, id: &NodeId, new_label: &str) -> Result<bool, ModelError> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| ModelError::NotFound(id.clone()))?;
        if new_label.trim().is_empty() {
            return Ok(false);
        }
        node.label = new_label.to_string();
        Ok(true)
    }

    /// Replace a node's summary, with the same empty-input guard as
    /// [`Self::rename_node`].
    pub fn edit_description(&mut self, id: &NodeId, new_summary: &str) -> Result<bool, ModelError> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| ModelError::NotFound(id.clone()))?;
        if new_summary.trim().is_empty() {
            return Ok(false);
        }
        node.summary = new_summary.to_string();
        Ok(true)
    }

    /// Remove a node and every reference to it.
    ///
    /// Deletes the node record, every edge touching it, its own
    /// hierarchy entry and its slot in any parent's child list. Children
    /// of the removed node are kept and simply lose that parent link.
    pub fn remove_node(&mut self, id: &NodeId) -> Result<Removal, ModelError> {
        let node = self
            .nodes
            .remove(id)
            .ok_or_else(|| ModelError::NotFound(id.clone()))?;

        let removed_edges: Vec<EdgeId> = self
            .edges
            .values()
            .filter(|edge| edge.source == *id || edge.target == *id)
            .map(|edge| edge.id.clone())
            .collect();
        for edge_id in &removed_edges {
            self.edges.remove(edge_id);
        }

        self.hierarchy.remove(id);
        for children in self.hierarchy.values_mut() {
            children.retain(|child| child != id);
        }

        Ok(Removal {
            node,
            edges: removed_edges,
        })
    }

    /// Insert a user-drawn connection between two existing nodes.
    ///
    /// Rejects self-loops, unknown endpoints and duplicates (an edge
    /// with the same direction already present; the reverse direction is
    /// a distinct edge). On success the target is also appended to the
    /// source's child list, so connections deepen the hierarchy the
    /// same way authored parent links do.
    pub fn connect(&mut self, source: &NodeId, target: &NodeId) -> Result<EdgeId, ModelError> {
        if source == target {
            return Err(ModelError::SelfLoop(source.clone()));
        }
        if !self.nodes.contains_key(source) {
            return Err(ModelError::NotFound(source.clone()));
        }
        if !self.nodes.contains_key(target) {
            return Err(ModelError::NotFound(target.clone()));
        }
        let edge_id = EdgeId::between(source, target);
        if self.edges.contains_key(&edge_id) {
            return Err(ModelError::DuplicateEdge(edge_id));
        }

        let edge = Edge::connects(source.clone(), target.clone());
        self.edges.insert(edge.id.clone(), edge);
        self.hierarchy
            .entry(source.clone())
            .or_default()
            .push(target.clone());

        Ok(edge_id)
    }

    /// Look up a node by id.
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Look up an edge by id.
    pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.edges.get(id)
    }

    /// Whether a node with this id exists.
    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Iterate over all nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Iterate over all edges in id order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Iterate over edges incident to a node.
    pub fn edges_of<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges
            .values()
            .filter(move |edge| edge.source == *id || edge.target == *id)
    }

    /// The ordered children of a node, or empty if it has none.
    pub fn children(&self, id: &NodeId) -> &[NodeId] {
        self.hierarchy.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The full hierarchy adjacency.
    pub fn hierarchy(&self) -> &BTreeMap<NodeId, Vec<NodeId>> {
        &self.hierarchy
    }

    /// Dataset metadata, if the loaded snapshot carried any.
    pub fn metadata(&self) -> Option<&MapMetadata> {
        self.metadata.as_ref()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
