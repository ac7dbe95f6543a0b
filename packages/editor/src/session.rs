//! # Edit Session Management
//!
//! Owns the current [`ApplicationState`] for one editor window and is the
//! only place mutations are dispatched from.
//!
//! A session runs every mutation through the [`PostEffectEngine`], records
//! successful steps in the [`UndoStack`], and routes failures by
//! [`ErrorClass`]: user input problems go to the [`Notifier`] (a blocking
//! alert in an interactive shell), everything else is logged.

use crate::config::EditorConfig;
use crate::factory::{self, CreateOutcome};
use crate::model::ComponentId;
use crate::mutations::{ErrorClass, Mutation, MutationError};
use crate::post_effects::PostEffectEngine;
use crate::state::ApplicationState;
use crate::undo_stack::UndoStack;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Message shown to the user after a rejected edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Mutation that was rejected
    pub mutation: &'static str,
    pub message: String,
}

/// Receives user-facing notices
pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

/// Keeps every notice in memory and logs it
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Vec<Notice>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notice: Notice) {
        warn!("{}: {}", notice.mutation, notice.message);
        self.notices.push(notice);
    }
}

/// Single edit session
#[derive(Debug)]
pub struct EditSession<N: Notifier = RecordingNotifier> {
    state: ApplicationState,
    engine: PostEffectEngine,
    history: UndoStack,
    notifier: N,

    /// Incremented on every state change, including undo/redo
    version: u64,
}

impl EditSession<RecordingNotifier> {
    /// Create new edit session
    pub fn new(config: EditorConfig) -> Self {
        Self::with_notifier(config, RecordingNotifier::default())
    }
}

impl<N: Notifier> EditSession<N> {
    pub fn with_notifier(config: EditorConfig, notifier: N) -> Self {
        let history = UndoStack::with_max_levels(config.undo_levels);
        Self {
            state: ApplicationState::new(config),
            engine: PostEffectEngine::new(),
            history,
            notifier,
            version: 0,
        }
    }

    pub fn state(&self) -> &ApplicationState {
        &self.state
    }

    pub fn config(&self) -> &Arc<EditorConfig> {
        self.state.config()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    /// Apply a mutation and its post-effects, returning the error untouched.
    ///
    /// On failure the state is unchanged.
    pub fn try_dispatch(&mut self, mutation: Mutation) -> Result<&ApplicationState, MutationError> {
        let name = mutation.name();
        let (next, applied) = self.engine.apply_with_effects(mutation, &self.state)?;
        debug!("{} applied ({} mutations)", name, applied.len());

        self.history.record(applied, &self.state);
        self.replace_state(next);
        Ok(&self.state)
    }

    /// Apply a mutation, reporting any failure by its class.
    ///
    /// Returns whether the mutation was applied.
    pub fn dispatch(&mut self, mutation: Mutation) -> bool {
        let name = mutation.name();
        match self.try_dispatch(mutation) {
            Ok(_) => true,
            Err(err) => {
                self.report(name, &err);
                false
            }
        }
    }

    /// Create a component through the deferred factory and focus it
    pub async fn add_component(&mut self, title: &str) -> Result<ComponentId, MutationError> {
        let existing = self.state.components().cloned().collect();
        let outcome = factory::create_component_deferred(
            self.state.next_component_id(),
            title.to_string(),
            existing,
            self.state.config().clone(),
        )
        .await;

        let result = match outcome {
            CreateOutcome::Created(component) => {
                let id = component.id;
                self.state.with_created_component(component).map(|next| (id, next))
            }
            CreateOutcome::Rejected { reason, .. } => Err(reason.into()),
        };

        match result {
            Ok((id, next)) => {
                let title = next.component(id).map_or("", |c| c.title.as_str());
                info!("Created component {} ({})", title, id);
                let mutation = Mutation::AddComponent {
                    title: title.to_string(),
                };
                self.history.record(vec![mutation], &self.state);
                self.replace_state(next);
                Ok(id)
            }
            Err(err) => {
                self.report("AddComponent", &err);
                Err(err)
            }
        }
    }

    /// Start grouping mutations into one undo step
    pub fn begin_gesture(&mut self, description: impl Into<String>) {
        self.history.begin_batch(&self.state);
        self.history.set_batch_description(description);
    }

    pub fn end_gesture(&mut self) {
        self.history.end_batch();
    }

    /// Restore the state before the last step. Returns false if there is none.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(self.state.clone()) {
            Some(previous) => {
                self.replace_state(previous);
                true
            }
            None => false,
        }
    }

    /// Reapply the last undone step. Returns false if there is none.
    pub fn redo(&mut self) -> bool {
        match self.history.redo(self.state.clone()) {
            Some(next) => {
                self.replace_state(next);
                true
            }
            None => false,
        }
    }

    fn replace_state(&mut self, next: ApplicationState) {
        self.state = next;
        self.version += 1;
    }

    /// Route a failure by its class: user input problems to the notifier,
    /// everything else to the log
    pub fn report(&mut self, mutation: &'static str, err: &MutationError) {
        match err.class() {
            ErrorClass::UserInput => self.notifier.notify(Notice {
                mutation,
                message: err.to_string(),
            }),
            ErrorClass::Unimplemented => info!("{}: {}", mutation, err),
            ErrorClass::DataIntegrity | ErrorClass::Structural => {
                error!("{} rejected ({}): {}", mutation, err.class(), err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PlacementRef;

    fn add(title: &str) -> Mutation {
        Mutation::AddComponent {
            title: title.to_string(),
        }
    }

    #[test]
    fn test_session_creation() {
        let session = EditSession::new(EditorConfig::default());

        assert!(session.state().is_empty());
        assert_eq!(session.version(), 0);
        assert!(session.notifier().notices().is_empty());
    }

    #[test]
    fn test_dispatch_bumps_version() {
        let mut session = EditSession::new(EditorConfig::default());

        assert!(session.dispatch(add("Box")));
        assert_eq!(session.version(), 1);
        assert_eq!(session.state().len(), 1);
    }

    #[test]
    fn test_user_errors_reach_notifier() {
        let mut session = EditSession::new(EditorConfig::default());
        session.dispatch(add("Box"));

        assert!(!session.dispatch(add("box")));
        assert!(!session.dispatch(Mutation::DeleteChild {
            parent_id: None,
            child_id: Some(PlacementRef::SelfPlacement),
            called_from_delete_component: false,
        }));

        let notices = session.notifier_mut().take();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].mutation, "AddComponent");
        assert_eq!(notices[1].mutation, "DeleteChild");
        assert_eq!(session.version(), 1);
    }

    #[test]
    fn test_integrity_errors_are_only_logged() {
        let mut session = EditSession::new(EditorConfig::default());

        assert!(!session.dispatch(Mutation::TogglePanel {
            component_id: ComponentId(42),
        }));
        assert!(session.notifier().notices().is_empty());
    }

    #[test]
    fn test_undo_and_redo() {
        let mut session = EditSession::new(EditorConfig::default());
        session.dispatch(add("Box"));
        session.dispatch(add("Card"));

        assert!(session.undo());
        assert_eq!(session.state().len(), 1);
        assert!(session.redo());
        assert_eq!(session.state().len(), 2);
        assert!(!session.redo());
    }
}
