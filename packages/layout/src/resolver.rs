//! # Layout Resolver
//!
//! Turns the focused component into a [`RenderTree`].
//!
//! ## Paint Order
//!
//! The component's own rectangle is painted first, then its children by
//! descending area. Smaller rectangles end up on top, so they win hit tests
//! against the larger ones they overlap.
//!
//! ## Nested Instances
//!
//! A component child renders the referenced component's children inside the
//! instance rectangle. Each nested rectangle is mapped from the referenced
//! component's coordinate space into the instance:
//!
//! ```text
//! scale.x  = instance.width  / referenced.width
//! scale.y  = instance.height / referenced.height
//! nested.x = (grandchild.x - referenced.x) * scale.x
//! nested.y = (grandchild.y - referenced.y) * scale.y
//! nested.w = grandchild.width  * scale.x
//! nested.h = grandchild.height * scale.y
//! ```
//!
//! The same mapping applies at every depth. HTML children are leaves.
//!
//! ## Recursion Protection
//!
//! The component table is kept acyclic by the editor, but the resolver does
//! not rely on it: every expansion pushes onto a component stack and a
//! component already on the stack is reported as [`LayoutError::Cycle`].

use crate::render_tree::{NodeKind, RenderNode, RenderTree};
use composer_common::{html_elements::HTML_STROKE, Position, Scale};
use composer_editor::{
    ApplicationState, Child, ChildId, ChildKind, Component, ComponentId, Placement, PlacementRef,
};
use thiserror::Error;
use tracing::{debug, instrument};

pub type LayoutResult<T> = Result<T, LayoutError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("No component is focused")]
    NoFocus,

    #[error("Component not found: {0}")]
    ComponentNotFound(ComponentId),

    #[error("Child {child} of component {parent} references missing component {missing}")]
    DanglingReference {
        parent: ComponentId,
        child: ChildId,
        missing: ComponentId,
    },

    #[error("Component {0} has a zero width or height and cannot be scaled")]
    DegenerateComponent(ComponentId),

    #[error("Circular component reference: {path:?}")]
    Cycle { path: Vec<ComponentId> },
}

/// Every placement on a component's canvas: the real children plus the
/// synthesized self placement, cloned out of the state.
pub fn direct_placements(component: &Component) -> Vec<Placement> {
    let mut placements: Vec<Placement> = component
        .children
        .iter()
        .cloned()
        .map(Placement::Child)
        .collect();
    placements.push(Placement::SelfPlacement(component.self_placement()));
    placements
}

/// Sort placements into paint order: self first, then largest to smallest.
///
/// The sort is stable, so equal areas keep their stored order.
pub fn sort_paint_order(placements: &mut [Placement]) {
    placements.sort_by(|a, b| match (a, b) {
        (Placement::SelfPlacement(_), Placement::SelfPlacement(_)) => std::cmp::Ordering::Equal,
        (Placement::SelfPlacement(_), _) => std::cmp::Ordering::Less,
        (_, Placement::SelfPlacement(_)) => std::cmp::Ordering::Greater,
        (a, b) => b.position().area().total_cmp(&a.position().area()),
    });
}

/// Resolve the focused component of `state`
pub fn resolve_layout(state: &ApplicationState) -> LayoutResult<RenderTree> {
    Resolver::new(state).resolve_focused()
}

pub struct Resolver<'a> {
    state: &'a ApplicationState,

    /// Components currently being expanded, outermost first
    component_stack: Vec<ComponentId>,
}

impl<'a> Resolver<'a> {
    pub fn new(state: &'a ApplicationState) -> Self {
        Self {
            state,
            component_stack: Vec::new(),
        }
    }

    pub fn resolve_focused(&mut self) -> LayoutResult<RenderTree> {
        let id = self
            .state
            .focus_component_id()
            .ok_or(LayoutError::NoFocus)?;
        self.resolve(id)
    }

    /// Resolve the canvas of one component
    #[instrument(skip(self), fields(component = %id))]
    pub fn resolve(&mut self, id: ComponentId) -> LayoutResult<RenderTree> {
        let state = self.state;
        let component = state
            .component(id)
            .ok_or(LayoutError::ComponentNotFound(id))?;

        let mut placements = direct_placements(component);
        sort_paint_order(&mut placements);

        self.component_stack.clear();
        self.component_stack.push(id);

        let nodes = placements
            .into_iter()
            .map(|placement| match placement {
                Placement::SelfPlacement(own) => Ok(RenderNode {
                    placement: PlacementRef::SelfPlacement,
                    kind: NodeKind::SelfPlacement,
                    name: own.component_name,
                    position: own.position,
                    absolute: own.position,
                    stroke: own.color,
                    children: Vec::new(),
                }),
                Placement::Child(child) => {
                    self.child_node(id, &child, child.position, child.position)
                }
            })
            .collect::<LayoutResult<Vec<_>>>()?;

        self.component_stack.pop();

        let tree = RenderTree {
            component_id: id,
            nodes,
        };
        debug!(nodes = tree.len(), "Resolved layout");
        Ok(tree)
    }

    /// Build the node for `child` of `owner`, placed at `position` within its
    /// container and at `absolute` on the canvas.
    fn child_node(
        &mut self,
        owner: ComponentId,
        child: &Child,
        position: Position,
        absolute: Position,
    ) -> LayoutResult<RenderNode> {
        let state = self.state;
        let (kind, stroke, children) = match &child.kind {
            ChildKind::Html { element, .. } => (
                NodeKind::Html {
                    element: element.clone(),
                },
                HTML_STROKE.to_string(),
                Vec::new(),
            ),
            ChildKind::Component { component_id } => {
                let referenced = state.component(*component_id).ok_or(
                    LayoutError::DanglingReference {
                        parent: owner,
                        child: child.child_id,
                        missing: *component_id,
                    },
                )?;
                let children = self.expand(referenced, &position, &absolute)?;
                (
                    NodeKind::Component {
                        component_id: *component_id,
                    },
                    referenced.color.clone(),
                    children,
                )
            }
        };

        Ok(RenderNode {
            placement: child.child_id.into(),
            kind,
            name: child.component_name.clone(),
            position,
            absolute,
            stroke,
            children,
        })
    }

    /// Lay out `referenced`'s children inside an instance of it
    fn expand(
        &mut self,
        referenced: &Component,
        instance: &Position,
        absolute: &Position,
    ) -> LayoutResult<Vec<RenderNode>> {
        if self.component_stack.contains(&referenced.id) {
            let mut path = self.component_stack.clone();
            path.push(referenced.id);
            return Err(LayoutError::Cycle { path });
        }

        let scale = Scale::between(instance, &referenced.position)
            .ok_or(LayoutError::DegenerateComponent(referenced.id))?;

        let mut grandchildren: Vec<Placement> = referenced
            .children
            .iter()
            .cloned()
            .map(Placement::Child)
            .collect();
        sort_paint_order(&mut grandchildren);

        self.component_stack.push(referenced.id);
        let mut nodes = Vec::with_capacity(grandchildren.len());
        for placement in grandchildren {
            if let Placement::Child(grandchild) = placement {
                let nested = grandchild.position.rescale_into(&referenced.position, scale);
                let nested_absolute = nested.translate(absolute.x, absolute.y);
                nodes.push(self.child_node(referenced.id, &grandchild, nested, nested_absolute)?);
            }
        }
        self.component_stack.pop();

        Ok(nodes)
    }
}
