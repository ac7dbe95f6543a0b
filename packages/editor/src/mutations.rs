//! # State Mutations
//!
//! Every edit the canvas can make, expressed as a serializable value.
//!
//! ## Design Principles
//!
//! 1. **Pure**: `apply` reads one [`ApplicationState`] and returns a new one
//! 2. **Validated**: guards run before any change, so a failure leaves the
//!    caller's snapshot untouched
//! 3. **Classified**: every [`MutationError`] belongs to one [`ErrorClass`],
//!    which decides whether the user is told or the failure is only logged
//!
//! ## Mutation Semantics
//!
//! ### AddChild
//! - Component instances must be selectable from the focused component
//!   (neither the component itself nor one of its ancestors)
//! - HTML children need a known element kind; unknown kinds are refused
//!
//! ### DeleteChild
//! - The self placement can only be "deleted" as part of a component cascade,
//!   where it is a no-op
//! - Ids are never reused: `next_child_id` only grows
//!
//! ### DeleteComponent
//! - Every instance of the component is removed along with it
//!
//! ### HandleTransform
//! - `0` in any field means "not provided" and keeps the previous value
//! - A result with a negative width or height is refused

use crate::factory::{self, CreateOutcome, RejectReason};
use crate::graph::GraphError;
use crate::model::{
    Child, ChildId, ChildKind, Component, ComponentId, PlacementRef, Prop, COMPONENT_CHILD_TYPE,
};
use crate::state::ApplicationState;
use composer_common::{html_elements, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Semantic edits of the component table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Create a component from a title and focus it
    AddComponent { title: String },

    /// Delete a component and every instance of it
    #[serde(rename_all = "camelCase")]
    DeleteComponent { component_id: ComponentId },

    /// Rename a component or change its flags/props (defaults to the focused one)
    #[serde(rename_all = "camelCase")]
    UpdateComponent {
        #[serde(default)]
        component_id: Option<ComponentId>,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        stateful: Option<bool>,
        #[serde(default)]
        props: Option<Vec<Prop>>,
    },

    /// Open or close a component's side panel
    #[serde(rename_all = "camelCase")]
    TogglePanel { component_id: ComponentId },

    /// Drop a child onto the focused component's canvas
    #[serde(rename_all = "camelCase")]
    AddChild {
        title: String,
        #[serde(default)]
        child_type: String,
        #[serde(default, rename = "HTMLInfo")]
        html_info: BTreeMap<String, String>,
    },

    /// Remove one child (defaults to the focused child of the focused component)
    #[serde(rename_all = "camelCase")]
    DeleteChild {
        #[serde(default)]
        parent_id: Option<ComponentId>,
        #[serde(default)]
        child_id: Option<PlacementRef>,
        #[serde(default)]
        called_from_delete_component: bool,
    },

    /// Move or resize a placement
    #[serde(rename_all = "camelCase")]
    HandleTransform {
        component_id: ComponentId,
        child_id: PlacementRef,
        #[serde(default)]
        x: f64,
        #[serde(default)]
        y: f64,
        #[serde(default)]
        width: f64,
        #[serde(default)]
        height: f64,
    },

    /// Switch the edited component (no title refreshes the current one)
    ChangeFocusComponent {
        #[serde(default)]
        title: Option<String>,
    },

    /// Select a placement on the focused canvas
    #[serde(rename_all = "camelCase")]
    ChangeFocusChild { child_id: PlacementRef },

    /// Remember a component's last selected child
    #[serde(rename_all = "camelCase")]
    ChangeComponentFocusChild {
        component_id: ComponentId,
        child_id: PlacementRef,
    },

    /// Declare a prop on the focused component
    AddProp {
        key: String,
        #[serde(default)]
        value: Option<String>,
        #[serde(default)]
        required: bool,
        #[serde(default, rename = "type")]
        prop_type: String,
    },

    /// Remove a prop from the focused component
    #[serde(rename_all = "camelCase")]
    DeleteProp { prop_id: u32 },

    /// Set one attribute of the focused HTML child
    UpdateHtmlAttr { attr: String, value: String },

    /// Rewrite the sort key of every child of the focused component
    #[serde(rename_all = "camelCase")]
    UpdateChildrenSort { new_sort_values: Vec<SortValue> },
}

/// New sort key for one child
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SortValue {
    pub child_id: ChildId,
    pub child_sort: i64,
}

/// How a failure is surfaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Bad input: the user is notified
    UserInput,
    /// Ids that do not resolve: logged for diagnostics
    DataIntegrity,
    /// A gap in a supporting lookup table: logged, expected
    Unimplemented,
    /// Would break the acyclic component graph
    Structural,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorClass::UserInput => "user input",
            ErrorClass::DataIntegrity => "data integrity",
            ErrorClass::Unimplemented => "unimplemented",
            ErrorClass::Structural => "structural",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Component title is empty")]
    EmptyTitle,

    #[error("A component named {0} already exists")]
    DuplicateTitle(String),

    #[error("No child type specified")]
    MissingChildType,

    #[error("No component selected")]
    NoComponentFocused,

    #[error("No child selected")]
    NoChildSelected,

    #[error("Cannot delete the root placement of a component")]
    CannotDeleteSelfPlacement,

    #[error("Component not found: {0}")]
    ComponentNotFound(ComponentId),

    #[error("No component titled {0}")]
    TitleNotFound(String),

    #[error("Component id {0} is already in use")]
    DuplicateComponentId(ComponentId),

    #[error("Child {child_id} not found in component {component_id}")]
    ChildNotFound {
        component_id: ComponentId,
        child_id: ChildId,
    },

    #[error("Prop {prop_id} not found in component {component_id}")]
    PropNotFound {
        component_id: ComponentId,
        prop_id: u32,
    },

    #[error("Child {0} is not an HTML element")]
    NotAnHtmlChild(ChildId),

    #[error("No sort value supplied for child {0}")]
    MissingSortValue(ChildId),

    #[error("Transform would give {target} of component {component_id} a size of {width}x{height}")]
    DegenerateGeometry {
        component_id: ComponentId,
        target: PlacementRef,
        width: f64,
        height: f64,
    },

    #[error("HTML element {0} is not implemented")]
    UnknownHtmlElement(String),

    #[error("Component {candidate} cannot be placed inside component {parent}: it would contain itself")]
    CycleDetected {
        parent: ComponentId,
        candidate: ComponentId,
    },

    #[error("Invalid component graph: {0}")]
    Graph(#[from] GraphError),
}

impl MutationError {
    pub fn class(&self) -> ErrorClass {
        match self {
            MutationError::EmptyTitle
            | MutationError::DuplicateTitle(_)
            | MutationError::MissingChildType
            | MutationError::NoComponentFocused
            | MutationError::NoChildSelected
            | MutationError::CannotDeleteSelfPlacement => ErrorClass::UserInput,

            MutationError::ComponentNotFound(_)
            | MutationError::TitleNotFound(_)
            | MutationError::DuplicateComponentId(_)
            | MutationError::ChildNotFound { .. }
            | MutationError::PropNotFound { .. }
            | MutationError::NotAnHtmlChild(_)
            | MutationError::MissingSortValue(_)
            | MutationError::DegenerateGeometry { .. }
            | MutationError::Graph(GraphError::DanglingReference { .. }) => {
                ErrorClass::DataIntegrity
            }

            MutationError::UnknownHtmlElement(_) => ErrorClass::Unimplemented,

            MutationError::CycleDetected { .. } | MutationError::Graph(GraphError::Cycle { .. }) => {
                ErrorClass::Structural
            }
        }
    }
}

impl From<RejectReason> for MutationError {
    fn from(reason: RejectReason) -> Self {
        match reason {
            RejectReason::EmptyTitle => MutationError::EmptyTitle,
            RejectReason::DuplicateTitle(title) => MutationError::DuplicateTitle(title),
        }
    }
}

impl Mutation {
    /// Debug name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::AddComponent { .. } => "AddComponent",
            Mutation::DeleteComponent { .. } => "DeleteComponent",
            Mutation::UpdateComponent { .. } => "UpdateComponent",
            Mutation::TogglePanel { .. } => "TogglePanel",
            Mutation::AddChild { .. } => "AddChild",
            Mutation::DeleteChild { .. } => "DeleteChild",
            Mutation::HandleTransform { .. } => "HandleTransform",
            Mutation::ChangeFocusComponent { .. } => "ChangeFocusComponent",
            Mutation::ChangeFocusChild { .. } => "ChangeFocusChild",
            Mutation::ChangeComponentFocusChild { .. } => "ChangeComponentFocusChild",
            Mutation::AddProp { .. } => "AddProp",
            Mutation::DeleteProp { .. } => "DeleteProp",
            Mutation::UpdateHtmlAttr { .. } => "UpdateHtmlAttr",
            Mutation::UpdateChildrenSort { .. } => "UpdateChildrenSort",
        }
    }

    /// Does this mutation add or remove component references?
    pub fn touches_references(&self) -> bool {
        match self {
            Mutation::AddChild { child_type, .. } => child_type == COMPONENT_CHILD_TYPE,
            Mutation::DeleteChild { .. } | Mutation::DeleteComponent { .. } => true,
            _ => false,
        }
    }

    /// Cascading `DeleteChild`s that remove every instance of `component_id`
    pub fn instance_removals(state: &ApplicationState, component_id: ComponentId) -> Vec<Mutation> {
        state
            .components()
            .flat_map(|parent| {
                parent
                    .children
                    .iter()
                    .filter(move |child| child.referenced_component() == Some(component_id))
                    .map(move |child| Mutation::DeleteChild {
                        parent_id: Some(parent.id),
                        child_id: Some(child.child_id.into()),
                        called_from_delete_component: true,
                    })
            })
            .collect()
    }

    /// Apply mutation to a state snapshot, producing the next snapshot
    pub fn apply(&self, state: &ApplicationState) -> Result<ApplicationState, MutationError> {
        // Validate first
        self.validate(state)?;

        if let Mutation::AddComponent { title } = self {
            return Self::apply_add_component(state, title);
        }

        let mut next = state.clone();
        match self {
            Mutation::AddComponent { .. } => {}

            Mutation::DeleteComponent { component_id } => {
                Self::apply_delete_component(&mut next, *component_id)?
            }

            Mutation::UpdateComponent {
                component_id,
                title,
                stateful,
                props,
            } => Self::apply_update_component(
                &mut next,
                *component_id,
                title.as_deref(),
                *stateful,
                props.as_ref(),
            )?,

            Mutation::TogglePanel { component_id } => {
                let component = next
                    .component_mut(*component_id)
                    .ok_or(MutationError::ComponentNotFound(*component_id))?;
                component.expanded = !component.expanded;
            }

            Mutation::AddChild {
                title,
                child_type,
                html_info,
            } => Self::apply_add_child(&mut next, title, child_type, html_info)?,

            Mutation::DeleteChild {
                parent_id,
                child_id,
                called_from_delete_component,
            } => Self::apply_delete_child(
                &mut next,
                *parent_id,
                *child_id,
                *called_from_delete_component,
            )?,

            Mutation::HandleTransform {
                component_id,
                child_id,
                x,
                y,
                width,
                height,
            } => Self::apply_transform(
                &mut next,
                *component_id,
                *child_id,
                Position::new(*x, *y, *width, *height),
            )?,

            Mutation::ChangeFocusComponent { title } => {
                Self::apply_change_focus_component(&mut next, title.as_deref())?
            }

            Mutation::ChangeFocusChild { child_id } => {
                let component = next
                    .focus_component()
                    .ok_or(MutationError::NoComponentFocused)?;
                let cursor = match child_id {
                    PlacementRef::Child(id) if component.child(*id).is_some() => *child_id,
                    _ => PlacementRef::SelfPlacement,
                };
                next.set_focus_child(Some(cursor));
            }

            Mutation::ChangeComponentFocusChild {
                component_id,
                child_id,
            } => {
                let component = next
                    .component_mut(*component_id)
                    .ok_or(MutationError::ComponentNotFound(*component_id))?;
                component.focus_child_id = match child_id {
                    PlacementRef::SelfPlacement => None,
                    PlacementRef::Child(id) => {
                        component.child(*id).ok_or(MutationError::ChildNotFound {
                            component_id: *component_id,
                            child_id: *id,
                        })?;
                        Some(*id)
                    }
                };
            }

            Mutation::AddProp {
                key,
                value,
                required,
                prop_type,
            } => {
                let component = Self::focused_mut(&mut next)?;
                let value = value
                    .as_deref()
                    .filter(|v| !v.is_empty())
                    .unwrap_or(key)
                    .to_string();
                component.props.push(Prop {
                    id: component.next_prop_id,
                    key: key.clone(),
                    value,
                    required: *required,
                    prop_type: prop_type.clone(),
                });
                component.next_prop_id += 1;
            }

            Mutation::DeleteProp { prop_id } => {
                let component = Self::focused_mut(&mut next)?;
                let index = component
                    .props
                    .iter()
                    .position(|p| p.id == *prop_id)
                    .ok_or(MutationError::PropNotFound {
                        component_id: component.id,
                        prop_id: *prop_id,
                    })?;
                component.props.remove(index);
            }

            Mutation::UpdateHtmlAttr { attr, value } => {
                Self::apply_update_html_attr(&mut next, attr, value)?
            }

            Mutation::UpdateChildrenSort { new_sort_values } => {
                Self::apply_children_sort(&mut next, new_sort_values)?
            }
        }

        next.refresh_selection();
        Ok(next)
    }

    /// Validate without applying.
    ///
    /// Covers the guards that need no lookups; lookups that fail during
    /// `apply` are reported from there.
    pub fn validate(&self, state: &ApplicationState) -> Result<(), MutationError> {
        match self {
            Mutation::AddChild {
                title, child_type, ..
            } => {
                if child_type.is_empty() {
                    return Err(MutationError::MissingChildType);
                }
                let parent = state
                    .focus_component()
                    .ok_or(MutationError::NoComponentFocused)?;

                if child_type == COMPONENT_CHILD_TYPE {
                    let candidate = state
                        .component_by_title(title)
                        .ok_or_else(|| MutationError::TitleNotFound(title.clone()))?;

                    if state.graph().would_create_cycle(parent.id, candidate.id) {
                        return Err(MutationError::CycleDetected {
                            parent: parent.id,
                            candidate: candidate.id,
                        });
                    }
                } else if html_elements::lookup(child_type).is_none() {
                    return Err(MutationError::UnknownHtmlElement(child_type.clone()));
                }

                Ok(())
            }

            Mutation::DeleteChild {
                parent_id,
                child_id,
                called_from_delete_component,
            } => {
                if parent_id.or(state.focus_component_id()).is_none() {
                    return Err(MutationError::NoComponentFocused);
                }
                match child_id.or(state.focus_child_ref()) {
                    None => Err(MutationError::NoChildSelected),
                    Some(PlacementRef::SelfPlacement) if !called_from_delete_component => {
                        Err(MutationError::CannotDeleteSelfPlacement)
                    }
                    Some(_) => Ok(()),
                }
            }

            Mutation::UpdateComponent {
                title: Some(title), ..
            } if factory::normalize_title(title).is_empty() => Err(MutationError::EmptyTitle),

            Mutation::AddProp { .. }
            | Mutation::DeleteProp { .. }
            | Mutation::UpdateHtmlAttr { .. }
            | Mutation::UpdateChildrenSort { .. }
            | Mutation::ChangeFocusChild { .. } => {
                if state.focus_component().is_none() {
                    return Err(MutationError::NoComponentFocused);
                }
                Ok(())
            }

            _ => Ok(()),
        }
    }

    fn focused_mut(state: &mut ApplicationState) -> Result<&mut Component, MutationError> {
        let id = state
            .focus_component_id()
            .ok_or(MutationError::NoComponentFocused)?;
        state
            .component_mut(id)
            .ok_or(MutationError::ComponentNotFound(id))
    }

    fn apply_add_component(
        state: &ApplicationState,
        title: &str,
    ) -> Result<ApplicationState, MutationError> {
        let outcome = factory::create_component(
            state.next_component_id(),
            title,
            state.components(),
            state.config(),
        );

        match outcome {
            CreateOutcome::Created(component) => state.with_created_component(component),
            CreateOutcome::Rejected { reason, .. } => {
                debug!("AddComponent: title {:?} refused ({:?})", title, reason);
                Err(reason.into())
            }
        }
    }

    fn apply_delete_component(
        state: &mut ApplicationState,
        component_id: ComponentId,
    ) -> Result<(), MutationError> {
        let removals = Self::instance_removals(state, component_id);
        state
            .remove_component(component_id)
            .ok_or(MutationError::ComponentNotFound(component_id))?;

        for removal in removals {
            if let Mutation::DeleteChild {
                parent_id,
                child_id,
                ..
            } = removal
            {
                Self::apply_delete_child(state, parent_id, child_id, true)?;
            }
        }

        if state.focus_component_id() == Some(component_id) {
            let fallback = state.component_ids().next();
            let restored = fallback
                .and_then(|id| state.component(id))
                .and_then(|c| c.focus_child_id)
                .map(PlacementRef::Child);
            state.set_focus(fallback, restored);
        }

        state.graph().validate()?;
        Ok(())
    }

    fn apply_update_component(
        state: &mut ApplicationState,
        component_id: Option<ComponentId>,
        title: Option<&str>,
        stateful: Option<bool>,
        props: Option<&Vec<Prop>>,
    ) -> Result<(), MutationError> {
        let id = component_id
            .or(state.focus_component_id())
            .ok_or(MutationError::NoComponentFocused)?;
        state
            .component(id)
            .ok_or(MutationError::ComponentNotFound(id))?;

        let new_title = match title {
            Some(title) => {
                let normalized = factory::normalize_title(title);
                let taken = state
                    .components()
                    .any(|c| c.id != id && c.title.eq_ignore_ascii_case(&normalized));
                if taken {
                    return Err(MutationError::DuplicateTitle(normalized));
                }
                Some(normalized)
            }
            None => None,
        };

        if let Some(component) = state.component_mut(id) {
            if let Some(title) = &new_title {
                component.title = title.clone();
            }
            if let Some(stateful) = stateful {
                component.stateful = stateful;
            }
            if let Some(props) = props {
                component.props = props.clone();
                let next_prop_id = props.iter().map(|p| p.id + 1).max().unwrap_or(0);
                component.next_prop_id = component.next_prop_id.max(next_prop_id);
            }
        }

        // Instances carry the component's name
        if let Some(title) = new_title {
            let parents: Vec<ComponentId> = state.component_ids().collect();
            for parent in parents {
                if let Some(component) = state.component_mut(parent) {
                    for child in &mut component.children {
                        if child.referenced_component() == Some(id) {
                            child.component_name = title.clone();
                        }
                    }
                }
            }
        }

        Ok(())
    }

    fn apply_add_child(
        state: &mut ApplicationState,
        title: &str,
        child_type: &str,
        html_info: &BTreeMap<String, String>,
    ) -> Result<(), MutationError> {
        let config = state.config().clone();
        let parent = state
            .focus_component()
            .ok_or(MutationError::NoComponentFocused)?;
        let parent_id = parent.id;
        let origin = parent.position;
        let child_id = ChildId(parent.next_child_id);
        let step = f64::from(child_id.0) * config.child_offset_step;

        let (kind, position) = if child_type == COMPONENT_CHILD_TYPE {
            let referenced = state
                .component_by_title(title)
                .ok_or_else(|| MutationError::TitleNotFound(title.to_string()))?;
            // Component children wrap so a long run of drops stays near the origin
            let offset = step % config.component_offset_wrap;
            (
                ChildKind::Component {
                    component_id: referenced.id,
                },
                Position::new(
                    origin.x + offset,
                    origin.y + offset,
                    referenced.position.width,
                    referenced.position.height,
                ),
            )
        } else {
            let spec = html_elements::lookup(child_type)
                .ok_or_else(|| MutationError::UnknownHtmlElement(child_type.to_string()))?;
            let attributes = if html_info.is_empty() {
                spec.attributes
                    .iter()
                    .map(|key| (key.to_string(), String::new()))
                    .collect()
            } else {
                html_info.clone()
            };
            (
                ChildKind::Html {
                    element: child_type.to_string(),
                    attributes,
                },
                Position::new(
                    origin.x + step,
                    origin.y + step,
                    spec.size.width,
                    spec.size.height,
                ),
            )
        };

        let child = Child {
            child_id,
            kind,
            component_name: title.to_string(),
            position,
            child_sort: i64::from(child_id.0),
            color: None,
        };

        let parent = state
            .component_mut(parent_id)
            .ok_or(MutationError::ComponentNotFound(parent_id))?;
        parent.children.push(child);
        parent.focus_child_id = Some(child_id);
        parent.next_child_id += 1;
        state.set_focus_child(Some(PlacementRef::Child(child_id)));

        Ok(())
    }

    fn apply_delete_child(
        state: &mut ApplicationState,
        parent_id: Option<ComponentId>,
        child_id: Option<PlacementRef>,
        cascading: bool,
    ) -> Result<(), MutationError> {
        let parent_id = parent_id
            .or(state.focus_component_id())
            .ok_or(MutationError::NoComponentFocused)?;
        let child_id = match child_id.or(state.focus_child_ref()) {
            None => return Err(MutationError::NoChildSelected),
            Some(PlacementRef::Child(id)) => id,
            // Never stored, so there is nothing to remove
            Some(PlacementRef::SelfPlacement) if cascading => return Ok(()),
            Some(PlacementRef::SelfPlacement) => {
                return Err(MutationError::CannotDeleteSelfPlacement)
            }
        };

        let parent = state
            .component_mut(parent_id)
            .ok_or(MutationError::ComponentNotFound(parent_id))?;
        let index = parent
            .children
            .iter()
            .position(|c| c.child_id == child_id)
            .ok_or(MutationError::ChildNotFound {
                component_id: parent_id,
                child_id,
            })?;
        parent.children.remove(index);

        // If the deleted child was selected, reset it
        if parent.focus_child_id == Some(child_id) {
            parent.focus_child_id = None;
        }
        let last_child = parent
            .children
            .last()
            .map(|c| PlacementRef::Child(c.child_id));

        // A component cascade owns the global focus
        if !cascading {
            state.set_focus(Some(parent_id), last_child);
        }

        Ok(())
    }

    fn apply_transform(
        state: &mut ApplicationState,
        component_id: ComponentId,
        target: PlacementRef,
        update: Position,
    ) -> Result<(), MutationError> {
        let component = state
            .component_mut(component_id)
            .ok_or(MutationError::ComponentNotFound(component_id))?;

        // The self placement's geometry is the component's own position
        let position = match target {
            PlacementRef::SelfPlacement => &mut component.position,
            PlacementRef::Child(child_id) => {
                &mut component
                    .child_mut(child_id)
                    .ok_or(MutationError::ChildNotFound {
                        component_id,
                        child_id,
                    })?
                    .position
            }
        };

        let merged = position.merge_nonzero(&update);
        if merged.is_degenerate() {
            return Err(MutationError::DegenerateGeometry {
                component_id,
                target,
                width: merged.width,
                height: merged.height,
            });
        }
        *position = merged;

        Ok(())
    }

    fn apply_change_focus_component(
        state: &mut ApplicationState,
        title: Option<&str>,
    ) -> Result<(), MutationError> {
        let component = match title {
            Some(title) => state
                .component_by_title(title)
                .ok_or_else(|| MutationError::TitleNotFound(title.to_string()))?,
            None => state
                .focus_component()
                .ok_or(MutationError::NoComponentFocused)?,
        };

        let restored = component
            .focus_child_id
            .filter(|id| component.child(*id).is_some())
            .map(PlacementRef::Child);
        let id = component.id;
        state.set_focus(Some(id), restored);

        Ok(())
    }

    fn apply_update_html_attr(
        state: &mut ApplicationState,
        attr: &str,
        value: &str,
    ) -> Result<(), MutationError> {
        let child_id = state
            .focus_child_ref()
            .and_then(PlacementRef::child_id)
            .ok_or(MutationError::NoChildSelected)?;
        let component = Self::focused_mut(state)?;
        let component_id = component.id;
        let child = component
            .child_mut(child_id)
            .ok_or(MutationError::ChildNotFound {
                component_id,
                child_id,
            })?;

        match &mut child.kind {
            ChildKind::Html { attributes, .. } => {
                attributes.insert(attr.to_string(), value.to_string());
                Ok(())
            }
            ChildKind::Component { .. } => Err(MutationError::NotAnHtmlChild(child_id)),
        }
    }

    fn apply_children_sort(
        state: &mut ApplicationState,
        values: &[SortValue],
    ) -> Result<(), MutationError> {
        let component = Self::focused_mut(state)?;

        // Resolve every value before writing any
        let sorts = component
            .children
            .iter()
            .map(|child| {
                values
                    .iter()
                    .find(|v| v.child_id == child.child_id)
                    .map(|v| v.child_sort)
                    .ok_or(MutationError::MissingSortValue(child.child_id))
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (child, sort) in component.children.iter_mut().zip(sorts) {
            debug!(
                "UpdateChildrenSort: child {} sort {} -> {}",
                child.child_id, child.child_sort, sort
            );
            child.child_sort = sort;
        }

        Ok(())
    }
}
