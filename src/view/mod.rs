//! View synchronization layer.
//!
//! Splits the view problem into three parts: the scene mirror and patch
//! vocabulary ([`scene`]), transient interaction state ([`session`]),
//! and the event-to-patch engine that ties them to the model ([`sync`]).

pub mod scene;
pub mod session;
pub mod sync;

pub use scene::{SceneEdge, SceneNode, ScenePatch, SceneState};
pub use session::{ConnectionMode, InteractionSession};
pub use sync::{
    InteractionEvent, Intent, Notice, NoticeLevel, Outcome, ViewSync, DEFAULT_NODE_LABEL,
    DEFAULT_NODE_SUMMARY,
};
