//! The assembled editor: model, visibility, view sync and persistence.
//!
//! `MapEditor` is what an embedding binds to. It owns every piece of
//! state, routes events through the sync engine and autosaves after
//! each model change. Saves are coalesced by snapshot fingerprint, so
//! a burst of no-op intents never touches the store.

use crate::export::{
    image_export_spec, json_export, ImageExportSpec, JsonExport, Theme,
};
use crate::model::GraphModel;
use crate::seed::default_snapshot;
use crate::store::SnapshotStore;
use crate::types::MapSnapshot;
use crate::view::{
    InteractionEvent, InteractionSession, Intent, Notice, Outcome, ScenePatch, ViewSync,
};
use crate::visibility::VisibilityController;

/// A complete editing session over one store.
#[derive(Debug)]
pub struct MapEditor<S: SnapshotStore> {
    model: GraphModel,
    visibility: VisibilityController,
    session: InteractionSession,
    sync: ViewSync,
    store: S,
    last_saved: Option<String>,
}

impl<S: SnapshotStore> MapEditor<S> {
    /// Open an editor on a store.
    ///
    /// Loads the stored snapshot if there is a usable one, otherwise
    /// falls back to the default dataset. The map starts fully
    /// collapsed. A first run (nothing stored) persists the fallback so
    /// the next launch starts from the same map.
    pub fn open(store: S) -> Self {
        let (model, last_saved) = load_or_default(&store);
        let visibility = VisibilityController::collapsed(&model);
        let mut editor = Self {
            model,
            visibility,
            session: InteractionSession::default(),
            sync: ViewSync::new(),
            store,
            last_saved,
        };
        if editor.last_saved.is_none() {
            let _ = editor.persist();
        }
        editor
    }

    /// Patches that render the initial scene.
    pub fn bootstrap(&mut self) -> Vec<ScenePatch> {
        self.sync.bootstrap(&self.model, &self.visibility)
    }

    /// Route one raw event: interpret it, apply every resulting intent
    /// and fold the outcomes together.
    pub fn handle_event(&mut self, event: InteractionEvent) -> Outcome {
        let intents = self.sync.interpret(event, &self.model, &self.session);
        let mut outcome = Outcome::default();
        for intent in intents {
            outcome.merge(self.dispatch(intent));
        }
        outcome
    }

    /// Apply one intent directly (toolbar buttons, menu items).
    ///
    /// Autosaves when the intent changed the model; a failed save adds
    /// an error notice to the outcome instead of unwinding.
    pub fn dispatch(&mut self, intent: Intent) -> Outcome {
        let mut outcome = self.sync.apply(
            intent,
            &mut self.model,
            &mut self.visibility,
            &mut self.session,
        );
        if outcome.model_changed {
            if let Some(notice) = self.persist() {
                outcome.notices.push(notice);
            }
        }
        outcome
    }

    fn persist(&mut self) -> Option<Notice> {
        let snapshot = self.model.snapshot();
        let fingerprint = snapshot.fingerprint();
        if self.last_saved.as_deref() == Some(fingerprint.as_str()) {
            return None;
        }
        match self.store.save(&snapshot) {
            Ok(()) => {
                tracing::debug!(%fingerprint, "autosaved snapshot");
                self.last_saved = Some(fingerprint);
                None
            }
            Err(err) => {
                tracing::warn!(error = %err, "autosave failed, in-memory state remains authoritative");
                Some(Notice::error(
                    "Could not save the map. Consider exporting your data as a backup.",
                ))
            }
        }
    }

    /// Export the current map as JSON.
    pub fn export_json(&self) -> Result<JsonExport, serde_json::Error> {
        json_export(&self.model.snapshot())
    }

    /// Build the image export instruction for the current theme.
    pub fn export_image_spec(&self, theme: Theme) -> ImageExportSpec {
        image_export_spec(theme)
    }

    /// The canonical model.
    pub fn model(&self) -> &GraphModel {
        &self.model
    }

    /// The disclosure state.
    pub fn visibility(&self) -> &VisibilityController {
        &self.visibility
    }

    /// The interaction session.
    pub fn session(&self) -> &InteractionSession {
        &self.session
    }

    /// A snapshot of the current model.
    pub fn snapshot(&self) -> MapSnapshot {
        self.model.snapshot()
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Load the stored snapshot, falling back to the default dataset.
///
/// Returns the model plus the fingerprint of what the store holds, or
/// `None` when the fallback was used and has not been persisted yet.
fn load_or_default<S: SnapshotStore>(store: &S) -> (GraphModel, Option<String>) {
    match store.load() {
        Ok(Some(snapshot)) => {
            let fingerprint = snapshot.fingerprint();
            match GraphModel::from_snapshot(snapshot) {
                Ok(model) => return (model, Some(fingerprint)),
                Err(err) => {
                    tracing::warn!(error = %err, "stored snapshot failed validation, using default dataset");
                }
            }
        }
        Ok(None) => {}
        Err(err) => {
            tracing::warn!(error = %err, "could not load stored snapshot, using default dataset");
        }
    }
    let model = GraphModel::from_snapshot(default_snapshot()).expect("default dataset is valid");
    (model, None)
}
