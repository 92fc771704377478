//! Progressive disclosure of the hierarchy.
//!
//! The controller tracks a current disclosure level and the set of
//! visible nodes and edges derived from it. Level 0 shows only the
//! top-level frontier; each drill-down reveals one more hop. Subtree
//! toggling is asymmetric on purpose: expanding reveals only direct
//! children, collapsing hides the entire subtree.
//!
//! An edge is visible exactly when both of its endpoints are. Every
//! mutation here reports whether the visible set actually changed, which
//! is what decides whether the canvas needs a relayout.

use std::collections::{BTreeMap, BTreeSet};

use crate::levels::{max_depth, top_level_nodes};
use crate::model::GraphModel;
use crate::types::{EdgeId, NodeId};

/// The set of currently visible nodes and edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleSet {
    nodes: BTreeSet<NodeId>,
    edges: BTreeSet<EdgeId>,
}

impl VisibleSet {
    /// Everything in the model.
    pub fn all(model: &GraphModel) -> Self {
        let mut set = Self {
            nodes: model.nodes().map(|node| node.id.clone()).collect(),
            edges: BTreeSet::new(),
        };
        set.recompute_edges(model);
        set
    }

    /// Nodes within `limit` hops of the top-level frontier.
    ///
    /// A node reachable along several paths counts at its shallowest:
    /// each node records the smallest hop count seen so far and is only
    /// re-expanded when a shorter path finds it, which also terminates
    /// cyclic walks.
    pub fn up_to_level(model: &GraphModel, limit: usize) -> Self {
        let mut best: BTreeMap<NodeId, usize> = BTreeMap::new();
        for id in top_level_nodes(model) {
            descend(model, &id, 0, limit, &mut best);
        }
        let mut set = Self {
            nodes: best.into_keys().collect(),
            edges: BTreeSet::new(),
        };
        set.recompute_edges(model);
        set
    }

    /// Rebuild edge visibility from node visibility.
    fn recompute_edges(&mut self, model: &GraphModel) {
        self.edges = model
            .edges()
            .filter(|edge| self.nodes.contains(&edge.source) && self.nodes.contains(&edge.target))
            .map(|edge| edge.id.clone())
            .collect();
    }

    /// Whether a node is visible.
    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.nodes.contains(id)
    }

    /// Whether an edge is visible.
    pub fn contains_edge(&self, id: &EdgeId) -> bool {
        self.edges.contains(id)
    }

    /// Visible node ids in order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.iter()
    }

    /// Visible edge ids in order.
    pub fn edges(&self) -> impl Iterator<Item = &EdgeId> {
        self.edges.iter()
    }

    /// Number of visible nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of visible edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

fn descend(
    model: &GraphModel,
    id: &NodeId,
    at: usize,
    limit: usize,
    best: &mut BTreeMap<NodeId, usize>,
) {
    match best.get(id) {
        Some(seen) if *seen <= at => return,
        _ => {}
    }
    best.insert(id.clone(), at);
    if at < limit {
        for child in model.children(id) {
            descend(model, child, at + 1, limit, best);
        }
    }
}

/// Disclosure state for one open map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityController {
    current_level: usize,
    visible: VisibleSet,
}

impl VisibilityController {
    /// Start fully collapsed: level 0, top-level nodes only.
    pub fn collapsed(model: &GraphModel) -> Self {
        Self {
            current_level: 0,
            visible: VisibleSet::up_to_level(model, 0),
        }
    }

    /// Current disclosure level.
    pub fn level(&self) -> usize {
        self.current_level
    }

    /// The visible set.
    pub fn visible(&self) -> &VisibleSet {
        &self.visible
    }

    /// Reset to level 0. Returns whether visibility changed.
    pub fn collapse_all(&mut self, model: &GraphModel) -> bool {
        self.current_level = 0;
        self.replace(VisibleSet::up_to_level(model, 0))
    }

    /// Reveal every node and edge. The stored level is left as-is, so a
    /// later drill-down resumes from where the user last was.
    pub fn expand_all(&mut self, model: &GraphModel) -> bool {
        self.replace(VisibleSet::all(model))
    }

    /// Reveal one more level. No-op at maximum depth.
    pub fn drill_down(&mut self, model: &GraphModel) -> bool {
        if self.current_level >= max_depth(model) {
            return false;
        }
        self.current_level += 1;
        self.replace(VisibleSet::up_to_level(model, self.current_level))
    }

    /// Hide the deepest visible level. No-op at level 0.
    pub fn drill_up(&mut self, model: &GraphModel) -> bool {
        if self.current_level == 0 {
            return false;
        }
        self.current_level -= 1;
        self.replace(VisibleSet::up_to_level(model, self.current_level))
    }

    /// Expand or collapse one node's subtree.
    ///
    /// The first child's visibility decides the direction, matching
    /// what the user sees at the clicked node. Expansion reveals only
    /// direct children; collapse hides every descendant. Returns whether
    /// visibility changed (`false` for childless nodes).
    pub fn toggle_subtree(&mut self, model: &GraphModel, id: &NodeId) -> bool {
        let children = model.children(id);
        let first = match children.first() {
            Some(first) => first,
            None => return false,
        };

        if self.visible.nodes.contains(first) {
            let mut visited = BTreeSet::new();
            for child in children.to_vec() {
                self.hide_descendants(model, &child, &mut visited);
            }
        } else {
            for child in children.to_vec() {
                self.visible.nodes.insert(child);
            }
        }
        self.visible.recompute_edges(model);
        true
    }

    fn hide_descendants(&mut self, model: &GraphModel, id: &NodeId, visited: &mut BTreeSet<NodeId>) {
        if !visited.insert(id.clone()) {
            return;
        }
        self.visible.nodes.remove(id);
        for child in model.children(id).to_vec() {
            self.hide_descendants(model, &child, visited);
        }
    }

    /// Make one node visible regardless of level, e.g. a node the user
    /// just created under a collapsed parent.
    pub fn reveal(&mut self, model: &GraphModel, id: &NodeId) -> bool {
        let inserted = self.visible.nodes.insert(id.clone());
        self.visible.recompute_edges(model);
        inserted
    }

    /// Re-derive state after the model changed shape.
    ///
    /// Drops visible ids that no longer exist, clamps the level to the
    /// new maximum depth and rebuilds edge visibility. Nodes that were
    /// individually revealed or toggled stay as they are.
    pub fn refresh(&mut self, model: &GraphModel) -> bool {
        let before = self.visible.clone();
        self.visible
            .nodes
            .retain(|id| model.contains_node(id));
        self.current_level = self.current_level.min(max_depth(model));
        self.visible.recompute_edges(model);
        before != self.visible
    }

    fn replace(&mut self, next: VisibleSet) -> bool {
        if self.visible == next {
            return false;
        }
        self.visible = next;
        true
    }
}
