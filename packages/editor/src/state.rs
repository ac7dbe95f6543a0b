//! # Application State
//!
//! The single value every mutation consumes and produces. Components live in
//! an arena keyed by [`ComponentId`]; focus is a pair of explicit cursors
//! rather than copies of the focused entities, so an edited entity never has
//! a stale focused twin.

use crate::config::EditorConfig;
use crate::graph::ComponentGraph;
use crate::model::{Component, ComponentId, Placement, PlacementRef};
use crate::mutations::MutationError;
use composer_common::IdSource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Canonical editor state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationState {
    components: BTreeMap<ComponentId, Component>,

    /// Component whose canvas is being edited
    focus_component: Option<ComponentId>,

    /// Selected placement within the focused component
    focus_child: Option<PlacementRef>,

    /// Components that may be attached inside the focused component
    selectable_children: Vec<ComponentId>,

    /// Components that embed the focused component, directly or transitively
    ancestors: Vec<ComponentId>,

    component_ids: IdSource,

    #[serde(skip)]
    config: Arc<EditorConfig>,
}

impl ApplicationState {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            components: BTreeMap::new(),
            focus_component: None,
            focus_child: None,
            selectable_children: Vec::new(),
            ancestors: Vec::new(),
            component_ids: IdSource::default(),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &Arc<EditorConfig> {
        &self.config
    }

    /// Reattach a config after deserializing a snapshot
    pub fn with_config(mut self, config: Arc<EditorConfig>) -> Self {
        self.config = config;
        self
    }

    /// Components in id order
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    pub fn component_ids(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.components.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(&id)
    }

    pub fn component_by_title(&self, title: &str) -> Option<&Component> {
        self.components.values().find(|c| c.title == title)
    }

    /// Id the next created component will receive
    pub fn next_component_id(&self) -> ComponentId {
        ComponentId(self.component_ids.peek())
    }

    pub fn focus_component_id(&self) -> Option<ComponentId> {
        self.focus_component
    }

    pub fn focus_component(&self) -> Option<&Component> {
        self.focus_component.and_then(|id| self.components.get(&id))
    }

    pub fn focus_child_ref(&self) -> Option<PlacementRef> {
        self.focus_child
    }

    /// The focused placement, resolved against the focused component
    pub fn focus_child(&self) -> Option<Placement> {
        let placement = self.focus_child?;
        self.focus_component()?.placement(placement)
    }

    pub fn selectable_children(&self) -> &[ComponentId] {
        &self.selectable_children
    }

    pub fn ancestors(&self) -> &[ComponentId] {
        &self.ancestors
    }

    pub fn graph(&self) -> ComponentGraph {
        ComponentGraph::from_components(self.components.values())
    }

    /// Append a component produced by the factory and focus it.
    ///
    /// Every other component's panel collapses so only the new one is open.
    pub fn with_created_component(&self, component: Component) -> Result<Self, MutationError> {
        if self.components.contains_key(&component.id) {
            return Err(MutationError::DuplicateComponentId(component.id));
        }
        if self
            .components
            .values()
            .any(|c| c.title.eq_ignore_ascii_case(&component.title))
        {
            return Err(MutationError::DuplicateTitle(component.title));
        }

        let mut next = self.clone();
        for existing in next.components.values_mut() {
            existing.expanded = false;
        }

        let id = component.id;
        while next.component_ids.peek() <= id.0 {
            next.component_ids.next_id();
        }
        next.components.insert(id, component);
        next.focus_component = Some(id);
        next.focus_child = None;
        next.refresh_selection();
        Ok(next)
    }

    pub(crate) fn component_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.components.get_mut(&id)
    }

    pub(crate) fn remove_component(&mut self, id: ComponentId) -> Option<Component> {
        self.components.remove(&id)
    }

    pub(crate) fn set_focus(&mut self, component: Option<ComponentId>, child: Option<PlacementRef>) {
        self.focus_component = component;
        self.focus_child = child;
    }

    pub(crate) fn set_focus_child(&mut self, child: Option<PlacementRef>) {
        self.focus_child = child;
    }

    /// Drop cursors that point at entities which no longer exist, then
    /// recompute the selectable set and ancestor closure of the focus.
    pub(crate) fn refresh_selection(&mut self) {
        if let Some(id) = self.focus_component {
            if !self.components.contains_key(&id) {
                self.focus_component = None;
            }
        }

        let focus_child = match (self.focus_component(), self.focus_child) {
            (None, _) => None,
            (Some(component), Some(PlacementRef::Child(child_id)))
                if component.child(child_id).is_none() =>
            {
                None
            }
            (Some(_), cursor) => cursor,
        };
        self.focus_child = focus_child;

        let graph = self.graph();
        match self.focus_component {
            Some(id) => {
                self.ancestors = graph.ancestors(id).into_iter().collect();
                self.selectable_children = graph.selectable_children(id);
            }
            None => {
                self.ancestors = Vec::new();
                self.selectable_children = self.components.keys().copied().collect();
            }
        }
    }
}

impl Default for ApplicationState {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChildId;
    use composer_common::Position;

    fn named(id: u32, title: &str) -> Component {
        let mut component = Component::template(Position::new(25.0, 25.0, 800.0, 550.0));
        component.id = ComponentId(id);
        component.title = title.to_string();
        component.expanded = true;
        component
    }

    #[test]
    fn test_created_component_takes_focus_and_collapses_others() {
        let state = ApplicationState::default()
            .with_created_component(named(1, "Box"))
            .unwrap()
            .with_created_component(named(2, "Card"))
            .unwrap();

        assert_eq!(state.focus_component_id(), Some(ComponentId(2)));
        assert!(!state.component(ComponentId(1)).unwrap().expanded);
        assert!(state.component(ComponentId(2)).unwrap().expanded);
        assert_eq!(state.next_component_id(), ComponentId(3));
        assert_eq!(state.selectable_children(), &[ComponentId(1)]);
    }

    #[test]
    fn test_duplicate_title_is_refused() {
        let state = ApplicationState::default()
            .with_created_component(named(1, "Box"))
            .unwrap();

        assert_eq!(
            state.with_created_component(named(2, "BOX")).unwrap_err(),
            MutationError::DuplicateTitle("BOX".to_string())
        );
    }

    #[test]
    fn test_refresh_selection_drops_stale_child_cursor() {
        let mut state = ApplicationState::default()
            .with_created_component(named(1, "Box"))
            .unwrap();

        state.set_focus_child(Some(PlacementRef::Child(ChildId(7))));
        state.refresh_selection();
        assert_eq!(state.focus_child_ref(), None);

        state.set_focus_child(Some(PlacementRef::SelfPlacement));
        state.refresh_selection();
        assert_eq!(state.focus_child_ref(), Some(PlacementRef::SelfPlacement));
    }
}
