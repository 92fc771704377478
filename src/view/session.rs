//! Transient per-session interaction state.
//!
//! Selection, hover and the two-step connection gesture live here, next
//! to the model but never inside it: none of this survives a reload.

use serde::{Deserialize, Serialize};

use crate::types::NodeId;

/// Where the connection gesture currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ConnectionMode {
    /// No connection in progress.
    Idle,
    /// A source was chosen; the next node tap completes the edge.
    AwaitingTarget {
        /// The chosen source node.
        source: NodeId,
    },
}

impl Default for ConnectionMode {
    fn default() -> Self {
        Self::Idle
    }
}

/// Hover, selection and connection state for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionSession {
    connection: ConnectionMode,
    selection: Option<NodeId>,
    hovered: Option<NodeId>,
}

impl InteractionSession {
    /// Current connection mode.
    pub fn connection(&self) -> &ConnectionMode {
        &self.connection
    }

    /// Whether a connection gesture is waiting for its target.
    pub fn is_awaiting_target(&self) -> bool {
        matches!(self.connection, ConnectionMode::AwaitingTarget { .. })
    }

    /// The pending connection source, if any.
    pub fn pending_source(&self) -> Option<&NodeId> {
        match &self.connection {
            ConnectionMode::AwaitingTarget { source } => Some(source),
            ConnectionMode::Idle => None,
        }
    }

    /// Start (or restart) a connection from `source`.
    ///
    /// Returns the source of a previously pending gesture so the caller
    /// can tear down its styling.
    pub fn begin_connection(&mut self, source: NodeId) -> Option<NodeId> {
        let previous = self.take_pending();
        self.connection = ConnectionMode::AwaitingTarget { source };
        previous
    }

    /// Abandon any pending connection, returning its source.
    pub fn cancel_connection(&mut self) -> Option<NodeId> {
        self.take_pending()
    }

    fn take_pending(&mut self) -> Option<NodeId> {
        match std::mem::replace(&mut self.connection, ConnectionMode::Idle) {
            ConnectionMode::AwaitingTarget { source } => Some(source),
            ConnectionMode::Idle => None,
        }
    }

    /// The selected node, if any.
    pub fn selection(&self) -> Option<&NodeId> {
        self.selection.as_ref()
    }

    /// Set or clear the selection.
    pub fn set_selection(&mut self, node: Option<NodeId>) {
        self.selection = node;
    }

    /// The hovered node, if any.
    pub fn hovered(&self) -> Option<&NodeId> {
        self.hovered.as_ref()
    }

    /// Set or clear the hovered node.
    pub fn set_hovered(&mut self, node: Option<NodeId>) {
        self.hovered = node;
    }

    /// Drop every reference to a node that no longer exists.
    ///
    /// Returns `true` when a pending connection was sourced at the node
    /// and had to be abandoned.
    pub fn forget(&mut self, id: &NodeId) -> bool {
        if self.selection.as_ref() == Some(id) {
            self.selection = None;
        }
        if self.hovered.as_ref() == Some(id) {
            self.hovered = None;
        }
        if self.pending_source() == Some(id) {
            self.take_pending();
            return true;
        }
        false
    }
}
