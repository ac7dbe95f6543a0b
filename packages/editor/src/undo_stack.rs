//! # Undo/Redo Stack
//!
//! Tracks edit history and enables undo/redo operations.
//!
//! ## Design
//!
//! - States are immutable values, so history stores the snapshot taken
//!   before each step instead of computing inverses
//! - Undo swaps the current state for the recorded one and keeps the current
//!   state for redo
//! - New mutations clear the redo stack
//! - Supports batched operations (a drag gesture is many `HandleTransform`s
//!   but one undo step)
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut stack = UndoStack::new();
//! let next = stack.apply(&mutation, &state)?;
//!
//! let previous = stack.undo(next).unwrap();
//! let restored = stack.redo(previous).unwrap();
//! ```

use crate::state::ApplicationState;
use crate::{Mutation, MutationError};

/// A group of mutations that should be undone/redone together
#[derive(Debug, Clone)]
pub struct MutationBatch {
    /// The mutations in this batch (in application order)
    pub mutations: Vec<Mutation>,

    /// State before the first mutation of the batch
    pub before: ApplicationState,

    /// Optional description of this batch
    pub description: Option<String>,
}

impl MutationBatch {
    /// Create an empty batch that records mutations from `before` onwards
    pub fn starting_at(before: ApplicationState) -> Self {
        Self {
            mutations: Vec::new(),
            before,
            description: None,
        }
    }
}

/// A step that can be redone: the state it produced plus its mutations
#[derive(Debug, Clone)]
struct RedoEntry {
    batch: MutationBatch,
    after: ApplicationState,
}

/// Undo/redo stack for the editor state
#[derive(Debug)]
pub struct UndoStack {
    /// Stack of applied batches (most recent last)
    undo_stack: Vec<MutationBatch>,

    /// Stack of undone batches (most recent last)
    redo_stack: Vec<RedoEntry>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Currently building a batch
    current_batch: Option<MutationBatch>,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    /// Create an undo stack with custom max levels
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
        }
    }

    /// Apply a mutation and record it for undo
    pub fn apply(
        &mut self,
        mutation: &Mutation,
        state: &ApplicationState,
    ) -> Result<ApplicationState, MutationError> {
        let next = mutation.apply(state)?;
        self.record(vec![mutation.clone()], state);
        Ok(next)
    }

    /// Record mutations that turned `before` into a new state.
    ///
    /// Inside a batch, only the first recorded `before` is kept.
    pub fn record(&mut self, mutations: Vec<Mutation>, before: &ApplicationState) {
        if let Some(batch) = &mut self.current_batch {
            batch.mutations.extend(mutations);
        } else {
            let mut batch = MutationBatch::starting_at(before.clone());
            batch.mutations = mutations;
            self.push_batch(batch);
        }
    }

    /// Start a batch of mutations (will be undone/redone together)
    pub fn begin_batch(&mut self, state: &ApplicationState) {
        if self.current_batch.is_none() {
            self.current_batch = Some(MutationBatch::starting_at(state.clone()));
        }
    }

    /// End the current batch and push to undo stack
    pub fn end_batch(&mut self) {
        if let Some(batch) = self.current_batch.take() {
            if !batch.mutations.is_empty() {
                self.push_batch(batch);
            }
        }
    }

    /// Set description for current batch (if batching)
    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        if let Some(batch) = &mut self.current_batch {
            batch.description = Some(description.into());
        }
    }

    /// Push a batch to the undo stack
    fn push_batch(&mut self, batch: MutationBatch) {
        self.undo_stack.push(batch);

        // Trim if exceeded max levels
        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // Clear redo stack (new action invalidates future)
        self.redo_stack.clear();
    }

    /// Undo the most recent batch, returning the state to restore.
    ///
    /// An open batch is closed first so a gesture in progress is undone as a
    /// whole. Returns `None` when there is nothing to undo.
    pub fn undo(&mut self, current: ApplicationState) -> Option<ApplicationState> {
        self.end_batch();
        let batch = self.undo_stack.pop()?;
        let restored = batch.before.clone();

        self.redo_stack.push(RedoEntry {
            batch,
            after: current,
        });

        Some(restored)
    }

    /// Redo the most recently undone batch, returning the state to restore
    pub fn redo(&mut self, current: ApplicationState) -> Option<ApplicationState> {
        let RedoEntry { mut batch, after } = self.redo_stack.pop()?;

        // `current` is the state undo restored; keep it for the next undo
        batch.before = current;
        self.undo_stack.push(batch);

        Some(after)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
            || self
                .current_batch
                .as_ref()
                .map_or(false, |batch| !batch.mutations.is_empty())
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get the number of undo levels available
    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of redo levels available
    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Get description of the next undo operation
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|batch| batch.description.as_deref())
    }

    /// Get description of the next redo operation
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|entry| entry.batch.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ComponentId, PlacementRef};

    fn add(title: &str) -> Mutation {
        Mutation::AddComponent {
            title: title.to_string(),
        }
    }

    fn nudge(x: f64) -> Mutation {
        Mutation::HandleTransform {
            component_id: ComponentId(1),
            child_id: PlacementRef::SelfPlacement,
            x,
            y: 0.0,
            width: 0.0,
            height: 0.0,
        }
    }

    #[test]
    fn test_undo_redo_single_mutation() {
        let mut stack = UndoStack::new();
        let empty = ApplicationState::default();

        let state = stack.apply(&add("Box"), &empty).unwrap();
        assert_eq!(state.len(), 1);
        assert!(stack.can_undo());

        let state = stack.undo(state).unwrap();
        assert!(state.is_empty());
        assert!(stack.can_redo());

        let state = stack.redo(state).unwrap();
        assert_eq!(state.len(), 1);
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_failed_mutation_is_not_recorded() {
        let mut stack = UndoStack::new();
        let state = ApplicationState::default();

        assert!(stack.apply(&add("   "), &state).is_err());
        assert!(!stack.can_undo());
    }

    #[test]
    fn test_batch_undoes_as_one_step() {
        let mut stack = UndoStack::new();
        let state = stack.apply(&add("Box"), &ApplicationState::default()).unwrap();

        stack.begin_batch(&state);
        stack.set_batch_description("Drag Box");
        let mut dragged = state.clone();
        for x in [30.0, 40.0, 50.0] {
            dragged = stack.apply(&nudge(x), &dragged).unwrap();
        }
        stack.end_batch();

        assert_eq!(stack.undo_levels(), 2);
        assert_eq!(stack.undo_description(), Some("Drag Box"));

        let restored = stack.undo(dragged).unwrap();
        assert_eq!(restored.component(ComponentId(1)).unwrap().position.x, 25.0);
        assert_eq!(stack.redo_description(), Some("Drag Box"));
    }

    #[test]
    fn test_new_mutation_clears_redo() {
        let mut stack = UndoStack::new();
        let state = stack.apply(&add("Box"), &ApplicationState::default()).unwrap();
        let state = stack.undo(state).unwrap();
        assert_eq!(stack.redo_levels(), 1);

        stack.apply(&add("Card"), &state).unwrap();
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_max_levels_trims_oldest() {
        let mut stack = UndoStack::with_max_levels(2);
        let mut state = ApplicationState::default();
        for title in ["Box", "Card", "Panel"] {
            state = stack.apply(&add(title), &state).unwrap();
        }

        assert_eq!(stack.undo_levels(), 2);
        let state = stack.undo(state).unwrap();
        let state = stack.undo(state).unwrap();
        assert_eq!(state.len(), 1);
        assert!(stack.undo(state).is_none());
    }
}
