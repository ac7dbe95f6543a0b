//! # Post-Effect System
//!
//! Mutations trigger cascading effects to keep the component table consistent.
//!
//! ## Design
//!
//! When a mutation is applied, it may imply additional changes. Deleting a
//! component, for example, removes every instance of it from other canvases.
//! `Mutation::apply` carries those changes out itself, so a direct apply never
//! leaves dangling references; post-effects name them as secondary mutations
//! so history and logs see every change.
//!
//! Post-effects are:
//! - **Deterministic**: Same mutation always produces same effects
//! - **Minimal**: Only generate necessary secondary mutations
//! - **Composable**: Multiple effects can be triggered by one mutation
//!
//! After all effects ran, the component graph is validated whenever the batch
//! touched component references. A graph error rejects the whole batch.

use crate::mutations::{Mutation, MutationError};
use crate::state::ApplicationState;
use tracing::debug;

/// Post-effect that can be triggered by a mutation
pub trait PostEffect: std::fmt::Debug {
    /// Analyze the mutation against the state it is applied to and list the
    /// secondary mutations it implies
    fn analyze(&self, mutation: &Mutation, state: &ApplicationState) -> Vec<Mutation>;
}

/// Remove all instances when a component is deleted
#[derive(Debug)]
pub struct CascadeComponentDeletion;

impl PostEffect for CascadeComponentDeletion {
    fn analyze(&self, mutation: &Mutation, state: &ApplicationState) -> Vec<Mutation> {
        match mutation {
            Mutation::DeleteComponent { component_id } => {
                Mutation::instance_removals(state, *component_id)
            }
            _ => vec![],
        }
    }
}

/// Post-effect engine that applies all registered effects
#[derive(Debug)]
pub struct PostEffectEngine {
    effects: Vec<Box<dyn PostEffect>>,
}

impl PostEffectEngine {
    /// Create engine with default effects
    pub fn new() -> Self {
        Self {
            effects: vec![Box::new(CascadeComponentDeletion)],
        }
    }

    /// Analyze a mutation and generate all secondary mutations
    pub fn analyze(&self, mutation: &Mutation, state: &ApplicationState) -> Vec<Mutation> {
        let mut secondary_mutations = Vec::new();

        for effect in &self.effects {
            let mut effect_mutations = effect.analyze(mutation, state);
            secondary_mutations.append(&mut effect_mutations);
        }

        secondary_mutations
    }

    /// Apply a mutation with all its post-effects.
    ///
    /// Returns the resulting state and every mutation applied, primary first.
    /// Secondary mutations are already part of the primary's result and are
    /// recorded, not applied again.
    pub fn apply_with_effects(
        &self,
        mutation: Mutation,
        state: &ApplicationState,
    ) -> Result<(ApplicationState, Vec<Mutation>), MutationError> {
        // Secondary mutations are read from the state before the change
        let secondary = self.analyze(&mutation, state);
        let next = mutation.apply(state)?;

        let mut touches_references = mutation.touches_references();
        let mut applied_mutations = vec![mutation];

        for secondary_mutation in secondary {
            debug!("Post-effect: {}", secondary_mutation.name());
            touches_references |= secondary_mutation.touches_references();
            applied_mutations.push(secondary_mutation);
        }

        if touches_references {
            next.graph().validate()?;
        }

        Ok((next, applied_mutations))
    }
}

impl Default for PostEffectEngine {
    fn default() -> Self {
        Self::new()
    }
}
