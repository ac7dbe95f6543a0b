//! # Composer Editor
//!
//! Core state engine for the component composer.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ canvas / CLI: user intents → Mutation       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: ApplicationState + mutations        │
//! │  - Validate and apply mutations             │
//! │  - Cascade post-effects                     │
//! │  - Keep the component graph acyclic         │
//! │  - Undo/redo history                        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ layout: focused component → render tree     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **State is a value**: every mutation returns a new snapshot; a failed
//!    mutation leaves the previous one untouched
//! 2. **Ids, not copies**: focus is a pair of cursors into the component table
//! 3. **No self-embedding**: a component can never contain itself, directly or
//!    through other components
//!
//! ## Usage
//!
//! ```rust,ignore
//! use composer_editor::{EditSession, EditorConfig, Mutation};
//!
//! let mut session = EditSession::new(EditorConfig::default());
//! session.dispatch(Mutation::AddComponent { title: "Box".into() });
//! session.dispatch(Mutation::AddChild {
//!     title: "Image".into(),
//!     child_type: "Image".into(),
//!     html_info: Default::default(),
//! });
//!
//! let focused = session.state().focus_component();
//! ```

mod config;
mod errors;
mod factory;
mod graph;
mod model;
mod mutations;
mod post_effects;
mod script;
mod session;
mod state;
mod tree;
mod undo_stack;

pub use config::{EditorConfig, DEFAULT_CONFIG_NAME};
pub use errors::{EditorError, EditorResult};
pub use factory::{
    create_component, create_component_deferred, normalize_title, CreateOutcome, RejectReason,
};
pub use graph::{ComponentGraph, GraphError};
pub use model::{
    Child, ChildId, ChildKind, Component, ComponentId, Placement, PlacementRef, Prop,
    SelfPlacement, COMPONENT_CHILD_TYPE, SELF_PLACEMENT_RAW_ID,
};
pub use mutations::{ErrorClass, Mutation, MutationError, SortValue};
pub use post_effects::{CascadeComponentDeletion, PostEffect, PostEffectEngine};
pub use script::{load_script, parse_script};
pub use session::{EditSession, Notice, Notifier, RecordingNotifier};
pub use state::ApplicationState;
pub use tree::ComponentTree;
pub use undo_stack::{MutationBatch, UndoStack};
