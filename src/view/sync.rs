//! Event interpretation and model-to-scene synchronization.
//!
//! Interaction flows one way: the render surface reports an
//! `InteractionEvent`, the kernel interprets it into `Intent`s against
//! the current session state, applies each intent to the model and
//! visibility state, and answers with an `Outcome` of scene patches and
//! user notices. The renderer never mutates state on its own.
//!
//! Rejected mutations are ordinary outcomes: the model stays untouched
//! and the outcome carries a notice explaining why. Nothing here panics
//! on bad input.

use serde::{Deserialize, Serialize};

use crate::model::{GraphModel, ModelError};
use crate::types::{EdgeId, NodeId};
use crate::visibility::VisibilityController;

use super::scene::{SceneEdge, SceneNode, ScenePatch, SceneState};
use super::session::InteractionSession;

/// Label given to nodes created without one.
pub const DEFAULT_NODE_LABEL: &str = "New Node";
/// Summary given to nodes created without one.
pub const DEFAULT_NODE_SUMMARY: &str = "A new added node.";

/// A raw gesture reported by the render surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum InteractionEvent {
    /// The pointer entered a node.
    HoverEnter {
        /// The hovered node.
        node: NodeId,
    },
    /// The pointer left a node.
    HoverLeave {
        /// The node that was hovered.
        node: NodeId,
    },
    /// A node was tapped.
    TapNode {
        /// The tapped node.
        node: NodeId,
    },
    /// The empty canvas was tapped.
    TapBackground,
    /// A context (long-press or right-click) tap.
    ContextTap {
        /// The node under the pointer, if any.
        node: Option<NodeId>,
    },
    /// A connection drag started on a node.
    ConnectDragStart {
        /// The drag source.
        node: NodeId,
    },
    /// A connection drag was released on a node.
    ConnectDragComplete {
        /// The drop target.
        node: NodeId,
    },
}

/// One resolved editing or navigation action.
///
/// Intents are what [`ViewSync::interpret`] produces from events, and
/// what embedders invoke directly for toolbar buttons and menu items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    /// Set or clear the hovered node.
    SetHover {
        /// The node to hover, or `None` to clear.
        node: Option<NodeId>,
    },
    /// Set or clear the selection.
    SetSelection {
        /// The node to select, or `None` to clear.
        node: Option<NodeId>,
    },
    /// Expand or collapse a node's subtree.
    ToggleSubtree {
        /// The subtree root.
        node: NodeId,
    },
    /// Create a top-level node.
    AddNode {
        /// Label, defaulted when blank.
        label: String,
        /// Summary, defaulted when blank.
        summary: String,
    },
    /// Create a node under a parent.
    AddChild {
        /// The parent node.
        parent: NodeId,
        /// Label, defaulted when blank.
        label: String,
        /// Summary, defaulted when blank.
        summary: String,
    },
    /// Replace a node's label.
    Rename {
        /// The node to rename.
        node: NodeId,
        /// The new label.
        label: String,
    },
    /// Replace a node's summary.
    EditSummary {
        /// The node to edit.
        node: NodeId,
        /// The new summary.
        summary: String,
    },
    /// Delete a node and its edges.
    Remove {
        /// The node to delete.
        node: NodeId,
    },
    /// Begin a connection from a source node.
    StartConnection {
        /// The connection source.
        source: NodeId,
    },
    /// Complete the pending connection at a target node.
    CompleteConnection {
        /// The connection target.
        target: NodeId,
    },
    /// Abandon the pending connection.
    CancelConnection,
    /// Collapse to the top level.
    CollapseAll,
    /// Reveal the entire map.
    ExpandAll,
    /// Reveal one more level.
    DrillDown,
    /// Hide the deepest level.
    DrillUp,
    /// Fit the viewport to the visible elements.
    FitView,
}

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    /// Informational.
    Info,
    /// The action was refused; state is unchanged.
    Warning,
    /// Something failed that the user should act on.
    Error,
}

/// A message for the user, surfaced by the embedding UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Display text.
    pub message: String,
}

impl Notice {
    /// An informational notice.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    /// A refusal notice.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    /// A failure notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Everything one intent produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Patches for the render surface, in application order.
    pub patches: Vec<ScenePatch>,
    /// Notices for the user.
    pub notices: Vec<Notice>,
    /// Whether the canonical model changed (drives autosave).
    pub model_changed: bool,
}

impl Outcome {
    fn rejected(notice: Notice) -> Self {
        Self {
            notices: vec![notice],
            ..Self::default()
        }
    }

    /// Fold another outcome into this one, preserving patch order.
    pub fn merge(&mut self, other: Outcome) {
        self.patches.extend(other.patches);
        self.notices.extend(other.notices);
        self.model_changed |= other.model_changed;
    }
}

/// Translates events to intents and intents to scene patches.
///
/// Owns the scene mirror; the model, visibility and session state are
/// borrowed per call so embedders keep ownership of them.
#[derive(Debug, Clone, Default)]
pub struct ViewSync {
    scene: SceneState,
}

impl ViewSync {
    /// A sync engine with an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current scene mirror.
    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    /// Build the initial scene and return the patches that render it.
    pub fn bootstrap(
        &mut self,
        model: &GraphModel,
        visibility: &VisibilityController,
    ) -> Vec<ScenePatch> {
        self.scene.rebuild(model, visibility.visible())
    }

    /// Resolve a raw event into intents.
    ///
    /// A node tap normally selects and, when the node has children,
    /// toggles its subtree. While a connection is awaiting its target
    /// the same tap completes the connection instead and changes no
    /// selection.
    pub fn interpret(
        &self,
        event: InteractionEvent,
        model: &GraphModel,
        session: &InteractionSession,
    ) -> Vec<Intent> {
        match event {
            InteractionEvent::HoverEnter { node } => vec![Intent::SetHover { node: Some(node) }],
            InteractionEvent::HoverLeave { .. } => vec![Intent::SetHover { node: None }],
            InteractionEvent::TapNode { node } => {
                if session.is_awaiting_target() {
                    return vec![Intent::CompleteConnection { target: node }];
                }
                let mut intents = vec![Intent::SetSelection {
                    node: Some(node.clone()),
                }];
                if !model.children(&node).is_empty() {
                    intents.push(Intent::ToggleSubtree { node });
                }
                intents
            }
            InteractionEvent::TapBackground => vec![Intent::SetSelection { node: None }],
            InteractionEvent::ContextTap { .. } => {
                // Context taps only open chrome menus; the kernel has nothing to do.
                Vec::new()
            }
            InteractionEvent::ConnectDragStart { node } => {
                vec![Intent::StartConnection { source: node }]
            }
            InteractionEvent::ConnectDragComplete { node } => {
                vec![Intent::CompleteConnection { target: node }]
            }
        }
    }

    /// Apply one intent and report what it produced.
    pub fn apply(
        &mut self,
        intent: Intent,
        model: &mut GraphModel,
        visibility: &mut VisibilityController,
        session: &mut InteractionSession,
    ) -> Outcome {
        match intent {
            Intent::SetHover { node } => self.apply_hover(node, model, visibility, session),
            Intent::SetSelection { node } => {
                // Selection styling is native to the render surface.
                session.set_selection(node);
                Outcome::default()
            }
            Intent::ToggleSubtree { node } => {
                if !model.contains_node(&node) {
                    return Outcome::rejected(notice_for(&ModelError::NotFound(node)));
                }
                if visibility.toggle_subtree(model, &node) {
                    Outcome {
                        patches: self.scene.sync_visibility(visibility.visible()),
                        ..Outcome::default()
                    }
                } else {
                    Outcome::default()
                }
            }
            Intent::AddNode { label, summary } => {
                self.apply_add(None, &label, &summary, model, visibility)
            }
            Intent::AddChild {
                parent,
                label,
                summary,
            } => self.apply_add(Some(&parent), &label, &summary, model, visibility),
            Intent::Rename { node, label } => match model.rename_node(&node, &label) {
                Ok(true) => {
                    let mut outcome = Outcome {
                        model_changed: true,
                        ..Outcome::default()
                    };
                    if let Some(patch) = self.scene.set_label(&node, &label) {
                        outcome.patches.push(patch);
                    }
                    outcome
                }
                Ok(false) => Outcome::default(),
                Err(err) => Outcome::rejected(notice_for(&err)),
            },
            Intent::EditSummary { node, summary } => {
                match model.edit_description(&node, &summary) {
                    Ok(true) => {
                        // Detail panes read summaries straight from the
                        // model, so no scene patch is needed.
                        Outcome {
                            model_changed: true,
                            ..Outcome::default()
                        }
                    }
                    Ok(false) => Outcome::default(),
                    Err(err) => Outcome::rejected(notice_for(&err)),
                }
            }
            Intent::Remove { node } => self.apply_remove(&node, model, visibility, session),
            Intent::StartConnection { source } => {
                if !model.contains_node(&source) {
                    return Outcome::rejected(notice_for(&ModelError::NotFound(source)));
                }
                let mut outcome = Outcome::default();
                if session.begin_connection(source.clone()).is_some() {
                    // Restarting from a new source tears down the old
                    // styling before applying the new one.
                    outcome.patches.push(ScenePatch::UndimAll);
                    outcome.patches.push(ScenePatch::ClearHighlights);
                }
                outcome.patches.push(ScenePatch::DimAll);
                outcome.patches.push(ScenePatch::SetNodeDimmed {
                    id: source.clone(),
                    dimmed: false,
                });
                outcome.patches.push(ScenePatch::SetNodeHighlight {
                    id: source,
                    on: true,
                });
                outcome
            }
            Intent::CompleteConnection { target } => {
                self.apply_complete_connection(&target, model, visibility, session)
            }
            Intent::CancelConnection => {
                if session.cancel_connection().is_some() {
                    Outcome {
                        patches: vec![ScenePatch::UndimAll, ScenePatch::ClearHighlights],
                        ..Outcome::default()
                    }
                } else {
                    Outcome::default()
                }
            }
            Intent::CollapseAll => {
                let changed = visibility.collapse_all(model);
                self.apply_level_change(changed, visibility)
            }
            Intent::ExpandAll => {
                let changed = visibility.expand_all(model);
                self.apply_level_change(changed, visibility)
            }
            Intent::DrillDown => {
                let changed = visibility.drill_down(model);
                self.apply_level_change(changed, visibility)
            }
            Intent::DrillUp => {
                let changed = visibility.drill_up(model);
                self.apply_level_change(changed, visibility)
            }
            Intent::FitView => Outcome {
                patches: vec![ScenePatch::FitView],
                ..Outcome::default()
            },
        }
    }

    fn apply_hover(
        &mut self,
        node: Option<NodeId>,
        model: &GraphModel,
        visibility: &VisibilityController,
        session: &mut InteractionSession,
    ) -> Outcome {
        let mut outcome = Outcome::default();
        if session.hovered().is_some() {
            outcome.patches.push(ScenePatch::ClearHighlights);
        }
        if let Some(id) = &node {
            if model.contains_node(id) {
                outcome.patches.push(ScenePatch::SetNodeHighlight {
                    id: id.clone(),
                    on: true,
                });
                for edge in model.edges_of(id) {
                    if visibility.visible().contains_edge(&edge.id) {
                        outcome.patches.push(ScenePatch::SetEdgeHighlight {
                            id: edge.id.clone(),
                            on: true,
                        });
                    }
                }
            }
        }
        session.set_hovered(node);
        outcome
    }

    fn apply_add(
        &mut self,
        parent: Option<&NodeId>,
        label: &str,
        summary: &str,
        model: &mut GraphModel,
        visibility: &mut VisibilityController,
    ) -> Outcome {
        let label = if label.trim().is_empty() {
            DEFAULT_NODE_LABEL
        } else {
            label
        };
        let summary = if summary.trim().is_empty() {
            DEFAULT_NODE_SUMMARY
        } else {
            summary
        };

        let id = match model.add_node(label, summary, parent) {
            Ok(id) => id,
            Err(err) => return Outcome::rejected(notice_for(&err)),
        };

        let mut outcome = Outcome {
            model_changed: true,
            ..Outcome::default()
        };
        // New nodes show up immediately, whatever the disclosure level.
        visibility.reveal(model, &id);

        if let Some(node) = model.node(&id) {
            outcome.patches.push(self.scene.add_node(SceneNode {
                id: node.id.clone(),
                label: node.label.clone(),
                class: node.kind,
                hidden: false,
            }));
        }
        if let Some(parent) = parent {
            let edge_id = EdgeId::between(parent, &id);
            if let Some(edge) = model.edge(&edge_id) {
                outcome.patches.push(self.scene.add_edge(SceneEdge {
                    id: edge.id.clone(),
                    source: edge.source.clone(),
                    target: edge.target.clone(),
                    hidden: !visibility.visible().contains_edge(&edge.id),
                }));
            }
        }

        outcome
            .patches
            .extend(self.scene.sync_visibility(visibility.visible()));
        if !outcome.patches.contains(&ScenePatch::Relayout) {
            outcome.patches.push(ScenePatch::Relayout);
        }
        outcome
    }

    fn apply_remove(
        &mut self,
        node: &NodeId,
        model: &mut GraphModel,
        visibility: &mut VisibilityController,
        session: &mut InteractionSession,
    ) -> Outcome {
        let removal = match model.remove_node(node) {
            Ok(removal) => removal,
            Err(err) => return Outcome::rejected(notice_for(&err)),
        };

        let mut outcome = Outcome {
            model_changed: true,
            ..Outcome::default()
        };
        for edge_id in &removal.edges {
            outcome.patches.push(self.scene.remove_edge(edge_id));
        }
        outcome.patches.push(self.scene.remove_node(node));

        if session.forget(node) {
            // The pending connection lost its source with the node.
            outcome.patches.push(ScenePatch::UndimAll);
            outcome.patches.push(ScenePatch::ClearHighlights);
        }

        visibility.refresh(model);
        outcome
            .patches
            .extend(self.scene.sync_visibility(visibility.visible()));
        if !outcome.patches.contains(&ScenePatch::Relayout) {
            outcome.patches.push(ScenePatch::Relayout);
        }
        outcome
    }

    fn apply_complete_connection(
        &mut self,
        target: &NodeId,
        model: &mut GraphModel,
        visibility: &mut VisibilityController,
        session: &mut InteractionSession,
    ) -> Outcome {
        let source = match session.pending_source() {
            Some(source) => source.clone(),
            None => return Outcome::rejected(Notice::warning("No connection in progress")),
        };

        match model.connect(&source, target) {
            Ok(edge_id) => {
                session.cancel_connection();
                let mut outcome = Outcome {
                    patches: vec![ScenePatch::UndimAll, ScenePatch::ClearHighlights],
                    model_changed: true,
                    ..Outcome::default()
                };
                visibility.refresh(model);
                if let Some(edge) = model.edge(&edge_id) {
                    // Just the new edge; existing positions are kept.
                    outcome.patches.push(self.scene.add_edge(SceneEdge {
                        id: edge.id.clone(),
                        source: edge.source.clone(),
                        target: edge.target.clone(),
                        hidden: !visibility.visible().contains_edge(&edge.id),
                    }));
                }
                outcome
            }
            Err(err) => {
                // Mode stays pending so the user can pick another target.
                Outcome::rejected(notice_for(&err))
            }
        }
    }

    fn apply_level_change(&mut self, changed: bool, visibility: &VisibilityController) -> Outcome {
        if !changed {
            return Outcome::default();
        }
        Outcome {
            patches: self.scene.sync_visibility(visibility.visible()),
            ..Outcome::default()
        }
    }
}

fn notice_for(err: &ModelError) -> Notice {
    tracing::warn!(error = %err, "rejected mutation");
    match err {
        ModelError::SelfLoop(_) => Notice::warning("Cannot connect a node to itself."),
        ModelError::DuplicateEdge(_) => Notice::warning("Connection already exists."),
        ModelError::NotFound(_) | ModelError::InvalidParent(_) => Notice::warning(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (GraphModel, NodeId, NodeId, NodeId) {
        let mut model = GraphModel::new();
        let root = model.add_node("root", "", None).unwrap();
        let a = model.add_node("a", "", Some(&root)).unwrap();
        let b = model.add_node("b", "", Some(&root)).unwrap();
        (model, root, a, b)
    }

    fn engine(model: &GraphModel) -> (ViewSync, VisibilityController, InteractionSession) {
        let visibility = VisibilityController::collapsed(model);
        let mut sync = ViewSync::new();
        sync.bootstrap(model, &visibility);
        (sync, visibility, InteractionSession::default())
    }

    #[test]
    fn test_tap_on_parent_selects_and_toggles() {
        let (model, root, ..) = sample();
        let (sync, _, session) = engine(&model);

        let intents = sync.interpret(
            InteractionEvent::TapNode { node: root.clone() },
            &model,
            &session,
        );

        assert_eq!(
            intents,
            vec![
                Intent::SetSelection {
                    node: Some(root.clone()),
                },
                Intent::ToggleSubtree { node: root },
            ]
        );
    }

    #[test]
    fn test_tap_on_leaf_only_selects() {
        let (model, _, a, _) = sample();
        let (sync, _, session) = engine(&model);

        let intents = sync.interpret(InteractionEvent::TapNode { node: a.clone() }, &model, &session);

        assert_eq!(intents, vec![Intent::SetSelection { node: Some(a) }]);
    }

    #[test]
    fn test_tap_while_awaiting_completes_connection() {
        let (model, _, a, b) = sample();
        let (sync, _, mut session) = engine(&model);
        session.begin_connection(a);

        let intents = sync.interpret(InteractionEvent::TapNode { node: b.clone() }, &model, &session);

        assert_eq!(intents, vec![Intent::CompleteConnection { target: b }]);
    }

    #[test]
    fn test_background_tap_clears_selection() {
        let (model, ..) = sample();
        let (sync, _, session) = engine(&model);

        let intents = sync.interpret(InteractionEvent::TapBackground, &model, &session);

        assert_eq!(intents, vec![Intent::SetSelection { node: None }]);
    }

    #[test]
    fn test_context_tap_produces_nothing() {
        let (model, root, ..) = sample();
        let (sync, _, session) = engine(&model);

        assert!(sync
            .interpret(
                InteractionEvent::ContextTap { node: Some(root) },
                &model,
                &session,
            )
            .is_empty());
    }

    #[test]
    fn test_hover_highlights_node_and_visible_edges() {
        let (mut model, root, a, _) = sample();
        let (mut sync, mut visibility, mut session) = engine(&model);

        let outcome = sync.apply(
            Intent::SetHover {
                node: Some(root.clone()),
            },
            &mut model,
            &mut visibility,
            &mut session,
        );

        // At level 0 the children are hidden, so no edge highlights.
        assert_eq!(
            outcome.patches,
            vec![ScenePatch::SetNodeHighlight {
                id: root.clone(),
                on: true,
            }]
        );

        // After drilling down the incident edges highlight too.
        sync.apply(
            Intent::SetHover { node: None },
            &mut model,
            &mut visibility,
            &mut session,
        );
        sync.apply(
            Intent::DrillDown,
            &mut model,
            &mut visibility,
            &mut session,
        );
        let outcome = sync.apply(
            Intent::SetHover {
                node: Some(root.clone()),
            },
            &mut model,
            &mut visibility,
            &mut session,
        );
        assert!(outcome.patches.contains(&ScenePatch::SetEdgeHighlight {
            id: EdgeId::between(&root, &a),
            on: true,
        }));
    }

    #[test]
    fn test_hover_leave_clears_highlights() {
        let (mut model, root, ..) = sample();
        let (mut sync, mut visibility, mut session) = engine(&model);
        sync.apply(
            Intent::SetHover {
                node: Some(root.clone()),
            },
            &mut model,
            &mut visibility,
            &mut session,
        );

        let outcome = sync.apply(
            Intent::SetHover { node: None },
            &mut model,
            &mut visibility,
            &mut session,
        );

        assert_eq!(outcome.patches, vec![ScenePatch::ClearHighlights]);
        assert!(session.hovered().is_none());
    }

    #[test]
    fn test_selection_produces_no_patches() {
        let (mut model, root, ..) = sample();
        let (mut sync, mut visibility, mut session) = engine(&model);

        let outcome = sync.apply(
            Intent::SetSelection {
                node: Some(root.clone()),
            },
            &mut model,
            &mut visibility,
            &mut session,
        );

        assert!(outcome.patches.is_empty());
        assert!(!outcome.model_changed);
        assert_eq!(session.selection(), Some(&root));
    }

    #[test]
    fn test_rejection_notices_use_display_strings() {
        let err = ModelError::SelfLoop(NodeId::new("a"));
        assert_eq!(notice_for(&err).message, "Cannot connect a node to itself.");

        let err = ModelError::DuplicateEdge(EdgeId::new("e_a_b"));
        assert_eq!(notice_for(&err).message, "Connection already exists.");

        let err = ModelError::NotFound(NodeId::new("ghost"));
        assert_eq!(notice_for(&err).message, "Node not found: ghost");
        assert_eq!(notice_for(&err).level, NoticeLevel::Warning);
    }

    #[test]
    fn test_cancel_without_pending_is_silent() {
        let (mut model, ..) = sample();
        let (mut sync, mut visibility, mut session) = engine(&model);

        let outcome = sync.apply(
            Intent::CancelConnection,
            &mut model,
            &mut visibility,
            &mut session,
        );

        assert_eq!(outcome, Outcome::default());
    }

    #[test]
    fn test_intent_serialization_uses_intent_tag() {
        let intent = Intent::AddChild {
            parent: NodeId::new("root"),
            label: "x".to_string(),
            summary: "y".to_string(),
        };
        let value = serde_json::to_value(&intent).unwrap();

        assert_eq!(value["intent"], "add_child");
        assert_eq!(value["parent"], "root");

        let event = serde_json::to_value(InteractionEvent::TapBackground).unwrap();
        assert_eq!(event["event"], "tap_background");
    }
}
