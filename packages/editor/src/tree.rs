//! Component tree view.
//!
//! The nested outline shown next to the canvas: a component, then every child
//! in sort order, with component instances expanded into their own children.
//! HTML children are leaves.

use crate::model::{ChildKind, ComponentId};
use crate::state::ApplicationState;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentTree {
    pub name: String,
    pub children: Vec<ComponentTree>,
}

impl ComponentTree {
    /// Build the tree rooted at `root`, or `None` if it does not exist.
    ///
    /// A reference back into the current path or to a missing component is
    /// shown as a leaf instead of being expanded.
    pub fn build(state: &ApplicationState, root: ComponentId) -> Option<Self> {
        let component = state.component(root)?;
        let mut path = BTreeSet::new();
        Some(Self::expand(state, root, component.title.clone(), &mut path))
    }

    fn expand(
        state: &ApplicationState,
        id: ComponentId,
        name: String,
        path: &mut BTreeSet<ComponentId>,
    ) -> Self {
        let component = match state.component(id) {
            Some(component) if path.insert(id) => component,
            _ => return Self::leaf(name),
        };

        let mut children: Vec<_> = component.children.iter().collect();
        children.sort_by_key(|child| (child.child_sort, child.child_id));

        let children = children
            .into_iter()
            .map(|child| match &child.kind {
                ChildKind::Component { component_id } => {
                    Self::expand(state, *component_id, child.component_name.clone(), path)
                }
                ChildKind::Html { .. } => Self::leaf(child.component_name.clone()),
            })
            .collect();

        path.remove(&id);
        Self { name, children }
    }

    fn leaf(name: String) -> Self {
        Self {
            name,
            children: Vec::new(),
        }
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(ComponentTree::len).sum::<usize>()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    fn write_children(&self, f: &mut fmt::Formatter<'_>, prefix: &str) -> fmt::Result {
        let count = self.children.len();
        for (index, child) in self.children.iter().enumerate() {
            let last = index + 1 == count;
            let (branch, indent) = if last {
                ("└── ", "    ")
            } else {
                ("├── ", "│   ")
            };
            writeln!(f, "{}{}{}", prefix, branch, child.name)?;
            child.write_children(f, &format!("{}{}", prefix, indent))?;
        }
        Ok(())
    }
}

impl fmt::Display for ComponentTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        self.write_children(f, "")
    }
}
