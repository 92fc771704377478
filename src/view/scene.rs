//! Scene mirror and patch vocabulary.
//!
//! `SceneState` mirrors what the render surface currently shows, and
//! every change to it is expressed as a `ScenePatch`. The renderer
//! applies patches in order; it never reads the model directly. Keeping
//! the mirror here lets the kernel emit minimal diffs instead of a full
//! scene rebuild per interaction.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::GraphModel;
use crate::types::{EdgeId, NodeId, NodeKind};
use crate::visibility::VisibleSet;

/// A node as the render surface knows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneNode {
    /// Node id.
    pub id: NodeId,
    /// Current display label.
    pub label: String,
    /// Style class (maps to the node kind).
    pub class: NodeKind,
    /// Whether the node is hidden.
    pub hidden: bool,
}

/// An edge as the render surface knows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneEdge {
    /// Edge id.
    pub id: EdgeId,
    /// Source node id.
    pub source: NodeId,
    /// Target node id.
    pub target: NodeId,
    /// Whether the edge is hidden.
    pub hidden: bool,
}

/// One instruction to the render surface.
///
/// Patches are serialized with an `op` tag so a remote renderer can
/// dispatch on them directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScenePatch {
    /// Add a node element.
    AddNode {
        /// The node to add.
        node: SceneNode,
    },
    /// Remove a node element.
    RemoveNode {
        /// Id of the node to remove.
        id: NodeId,
    },
    /// Add an edge element.
    AddEdge {
        /// The edge to add.
        edge: SceneEdge,
    },
    /// Remove an edge element.
    RemoveEdge {
        /// Id of the edge to remove.
        id: EdgeId,
    },
    /// Replace a node's label.
    SetNodeLabel {
        /// Node to relabel.
        id: NodeId,
        /// New label text.
        label: String,
    },
    /// Show or hide a node.
    SetNodeHidden {
        /// Node to change.
        id: NodeId,
        /// New hidden state.
        hidden: bool,
    },
    /// Show or hide an edge.
    SetEdgeHidden {
        /// Edge to change.
        id: EdgeId,
        /// New hidden state.
        hidden: bool,
    },
    /// Toggle a node's highlight styling.
    SetNodeHighlight {
        /// Node to change.
        id: NodeId,
        /// Whether the highlight is on.
        on: bool,
    },
    /// Toggle an edge's highlight styling.
    SetEdgeHighlight {
        /// Edge to change.
        id: EdgeId,
        /// Whether the highlight is on.
        on: bool,
    },
    /// Remove all highlight styling.
    ClearHighlights,
    /// Dim every element (connection-mode backdrop).
    DimAll,
    /// Remove all dimming.
    UndimAll,
    /// Dim or undim one node.
    SetNodeDimmed {
        /// Node to change.
        id: NodeId,
        /// Whether the node is dimmed.
        dimmed: bool,
    },
    /// Re-run the canvas layout.
    Relayout,
    /// Fit the viewport to the visible elements.
    FitView,
}

/// Mirror of the rendered scene.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneState {
    nodes: BTreeMap<NodeId, SceneNode>,
    edges: BTreeMap<EdgeId, SceneEdge>,
}

impl SceneState {
    /// Rebuild the mirror from scratch and emit the patches that take a
    /// renderer from empty to the full scene. Used on initial load; for
    /// everything after, the incremental methods emit smaller diffs.
    pub fn rebuild(&mut self, model: &GraphModel, visible: &VisibleSet) -> Vec<ScenePatch> {
        let mut patches = Vec::new();
        self.nodes.clear();
        self.edges.clear();

        for node in model.nodes() {
            let scene_node = SceneNode {
                id: node.id.clone(),
                label: node.label.clone(),
                class: node.kind,
                hidden: !visible.contains_node(&node.id),
            };
            self.nodes.insert(node.id.clone(), scene_node.clone());
            patches.push(ScenePatch::AddNode { node: scene_node });
        }
        for edge in model.edges() {
            let scene_edge = SceneEdge {
                id: edge.id.clone(),
                source: edge.source.clone(),
                target: edge.target.clone(),
                hidden: !visible.contains_edge(&edge.id),
            };
            self.edges.insert(edge.id.clone(), scene_edge.clone());
            patches.push(ScenePatch::AddEdge { edge: scene_edge });
        }

        patches.push(ScenePatch::Relayout);
        patches.push(ScenePatch::FitView);
        patches
    }

    /// Diff hidden flags against a new visible set.
    ///
    /// Emits one `SetNodeHidden`/`SetEdgeHidden` per element whose flag
    /// flips, then a single `Relayout` if anything did.
    pub fn sync_visibility(&mut self, visible: &VisibleSet) -> Vec<ScenePatch> {
        let mut patches = Vec::new();

        for (id, node) in &mut self.nodes {
            let hidden = !visible.contains_node(id);
            if node.hidden != hidden {
                node.hidden = hidden;
                patches.push(ScenePatch::SetNodeHidden {
                    id: id.clone(),
                    hidden,
                });
            }
        }
        for (id, edge) in &mut self.edges {
            let hidden = !visible.contains_edge(id);
            if edge.hidden != hidden {
                edge.hidden = hidden;
                patches.push(ScenePatch::SetEdgeHidden {
                    id: id.clone(),
                    hidden,
                });
            }
        }

        if !patches.is_empty() {
            patches.push(ScenePatch::Relayout);
        }
        patches
    }

    /// Add one node to the mirror and return its patch.
    pub fn add_node(&mut self, node: SceneNode) -> ScenePatch {
        self.nodes.insert(node.id.clone(), node.clone());
        ScenePatch::AddNode { node }
    }

    /// Add one edge to the mirror and return its patch.
    pub fn add_edge(&mut self, edge: SceneEdge) -> ScenePatch {
        self.edges.insert(edge.id.clone(), edge.clone());
        ScenePatch::AddEdge { edge }
    }

    /// Drop one node from the mirror and return its patch.
    pub fn remove_node(&mut self, id: &NodeId) -> ScenePatch {
        self.nodes.remove(id);
        ScenePatch::RemoveNode { id: id.clone() }
    }

    /// Drop one edge from the mirror and return its patch.
    pub fn remove_edge(&mut self, id: &EdgeId) -> ScenePatch {
        self.edges.remove(id);
        ScenePatch::RemoveEdge { id: id.clone() }
    }

    /// Update a node's label. Returns `None` if the scene does not have
    /// the node or already shows that label.
    pub fn set_label(&mut self, id: &NodeId, label: &str) -> Option<ScenePatch> {
        let node = self.nodes.get_mut(id)?;
        if node.label == label {
            return None;
        }
        node.label = label.to_string();
        Some(ScenePatch::SetNodeLabel {
            id: id.clone(),
            label: label.to_string(),
        })
    }

    /// Look up a mirrored node.
    pub fn node(&self, id: &NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    /// Look up a mirrored edge.
    pub fn edge(&self, id: &EdgeId) -> Option<&SceneEdge> {
        self.edges.get(id)
    }

    /// Number of mirrored nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of mirrored edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visibility::VisibilityController;

    fn sample() -> (GraphModel, NodeId, NodeId) {
        let mut model = GraphModel::new();
        let root = model.add_node("root", "", None).unwrap();
        let child = model.add_node("child", "", Some(&root)).unwrap();
        (model, root, child)
    }

    #[test]
    fn test_rebuild_emits_full_scene_then_layout() {
        let (model, root, child) = sample();
        let controller = VisibilityController::collapsed(&model);
        let mut scene = SceneState::default();

        let patches = scene.rebuild(&model, controller.visible());

        // Two nodes, one edge, relayout, fit.
        assert_eq!(patches.len(), 5);
        assert_eq!(scene.node_count(), 2);
        assert_eq!(scene.edge_count(), 1);
        assert!(!scene.node(&root).unwrap().hidden);
        assert!(scene.node(&child).unwrap().hidden);
        assert_eq!(patches[patches.len() - 2], ScenePatch::Relayout);
        assert_eq!(patches[patches.len() - 1], ScenePatch::FitView);
    }

    #[test]
    fn test_sync_visibility_diffs_hidden_flags() {
        let (model, _, child) = sample();
        let mut controller = VisibilityController::collapsed(&model);
        let mut scene = SceneState::default();
        scene.rebuild(&model, controller.visible());

        controller.drill_down(&model);
        let patches = scene.sync_visibility(controller.visible());

        // Child and its edge unhide, plus one relayout.
        assert_eq!(patches.len(), 3);
        assert!(patches.contains(&ScenePatch::SetNodeHidden {
            id: child.clone(),
            hidden: false,
        }));
        assert_eq!(patches.last(), Some(&ScenePatch::Relayout));
        assert!(!scene.node(&child).unwrap().hidden);
    }

    #[test]
    fn test_sync_visibility_with_no_change_is_silent() {
        let (model, ..) = sample();
        let controller = VisibilityController::collapsed(&model);
        let mut scene = SceneState::default();
        scene.rebuild(&model, controller.visible());

        assert!(scene.sync_visibility(controller.visible()).is_empty());
    }

    #[test]
    fn test_set_label_skips_redundant_updates() {
        let (model, root, _) = sample();
        let controller = VisibilityController::collapsed(&model);
        let mut scene = SceneState::default();
        scene.rebuild(&model, controller.visible());

        assert!(scene.set_label(&root, "root").is_none());
        let patch = scene.set_label(&root, "Renamed").unwrap();
        assert_eq!(
            patch,
            ScenePatch::SetNodeLabel {
                id: root.clone(),
                label: "Renamed".to_string(),
            }
        );
        assert_eq!(scene.node(&root).unwrap().label, "Renamed");
    }

    #[test]
    fn test_remove_updates_mirror() {
        let (model, root, child) = sample();
        let controller = VisibilityController::collapsed(&model);
        let mut scene = SceneState::default();
        scene.rebuild(&model, controller.visible());

        scene.remove_edge(&EdgeId::between(&root, &child));
        scene.remove_node(&child);

        assert_eq!(scene.node_count(), 1);
        assert_eq!(scene.edge_count(), 0);
    }

    #[test]
    fn test_patch_serialization_uses_op_tag() {
        let patch = ScenePatch::SetNodeHidden {
            id: NodeId::new("x"),
            hidden: true,
        };
        let value = serde_json::to_value(&patch).unwrap();

        assert_eq!(value["op"], "set_node_hidden");
        assert_eq!(value["id"], "x");
        assert_eq!(value["hidden"], true);

        let relayout = serde_json::to_value(ScenePatch::Relayout).unwrap();
        assert_eq!(relayout["op"], "relayout");
    }
}
