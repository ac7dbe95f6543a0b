//! Component reference graph.
//!
//! Edges point from a component to every component instantiated on its canvas
//! ("embeds"). The graph answers the two questions the editor needs to keep
//! the component table well formed:
//!
//! - which components transitively embed a given one (its ancestor closure),
//!   and therefore which components may legally be attached inside it
//! - whether the table as a whole is acyclic and free of dangling references

use crate::model::{ChildId, Component, ComponentId};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Circular component reference: {}", format_path(.path))]
    Cycle { path: Vec<ComponentId> },

    #[error("Child {child} of component {parent} references missing component {missing}")]
    DanglingReference {
        parent: ComponentId,
        child: ChildId,
        missing: ComponentId,
    },
}

fn format_path(path: &[ComponentId]) -> String {
    path.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" → ")
}

/// Snapshot of the "embeds" relation between components
#[derive(Clone, Debug, Default)]
pub struct ComponentGraph {
    /// component -> components instantiated on its canvas
    embeds: BTreeMap<ComponentId, Vec<ComponentId>>,

    /// Reverse lookup: component -> components that instantiate it
    embedded_in: BTreeMap<ComponentId, Vec<ComponentId>>,

    /// component -> (child, referenced component) for every component child
    references: BTreeMap<ComponentId, Vec<(ChildId, ComponentId)>>,
}

impl ComponentGraph {
    /// Build the graph from a component table
    pub fn from_components<'a>(components: impl IntoIterator<Item = &'a Component>) -> Self {
        let mut graph = Self::default();

        for component in components {
            graph.embeds.entry(component.id).or_default();
            graph.embedded_in.entry(component.id).or_default();

            for child in &component.children {
                if let Some(target) = child.referenced_component() {
                    graph.add_edge(component.id, target);
                    graph
                        .references
                        .entry(component.id)
                        .or_default()
                        .push((child.child_id, target));
                }
            }
        }

        graph
    }

    fn add_edge(&mut self, parent: ComponentId, target: ComponentId) {
        let targets = self.embeds.entry(parent).or_default();
        if !targets.contains(&target) {
            targets.push(target);
        }

        let parents = self.embedded_in.entry(target).or_default();
        if !parents.contains(&parent) {
            parents.push(parent);
        }
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.embeds.contains_key(&id)
    }

    /// Every component that embeds `id`, directly or transitively
    pub fn ancestors(&self, id: ComponentId) -> BTreeSet<ComponentId> {
        Self::closure(&self.embedded_in, id)
    }

    /// Every component embedded by `id`, directly or transitively
    pub fn descendants(&self, id: ComponentId) -> BTreeSet<ComponentId> {
        Self::closure(&self.embeds, id)
    }

    fn closure(
        edges: &BTreeMap<ComponentId, Vec<ComponentId>>,
        start: ComponentId,
    ) -> BTreeSet<ComponentId> {
        let mut seen = BTreeSet::new();
        let mut queue = VecDeque::from([start]);

        while let Some(current) = queue.pop_front() {
            if let Some(next) = edges.get(&current) {
                for &id in next {
                    if seen.insert(id) {
                        queue.push_back(id);
                    }
                }
            }
        }

        // A component only reaches itself through a cycle
        seen.remove(&start);
        seen
    }

    /// Components that may be attached inside `id` without creating a cycle:
    /// everything except `id` itself and its ancestors.
    pub fn selectable_children(&self, id: ComponentId) -> Vec<ComponentId> {
        let excluded = self.ancestors(id);
        self.embeds
            .keys()
            .copied()
            .filter(|candidate| *candidate != id && !excluded.contains(candidate))
            .collect()
    }

    /// Would instantiating `candidate` inside `parent` close a cycle?
    pub fn would_create_cycle(&self, parent: ComponentId, candidate: ComponentId) -> bool {
        candidate == parent || self.ancestors(parent).contains(&candidate)
    }

    /// Check that every reference resolves and that the relation is acyclic
    pub fn validate(&self) -> Result<(), GraphError> {
        for (parent, refs) in &self.references {
            for (child, target) in refs {
                if !self.embeds.contains_key(target) {
                    return Err(GraphError::DanglingReference {
                        parent: *parent,
                        child: *child,
                        missing: *target,
                    });
                }
            }
        }

        self.detect_cycles()
    }

    /// Detect circular references using DFS
    pub fn detect_cycles(&self) -> Result<(), GraphError> {
        let mut visited = BTreeSet::new();
        let mut stack = Vec::new();

        for &node in self.embeds.keys() {
            if !visited.contains(&node) {
                self.dfs_detect_cycle(node, &mut visited, &mut stack)?;
            }
        }

        Ok(())
    }

    fn dfs_detect_cycle(
        &self,
        node: ComponentId,
        visited: &mut BTreeSet<ComponentId>,
        stack: &mut Vec<ComponentId>,
    ) -> Result<(), GraphError> {
        visited.insert(node);
        stack.push(node);

        if let Some(targets) = self.embeds.get(&node) {
            for &target in targets {
                if let Some(start) = stack.iter().position(|id| *id == target) {
                    let mut path = stack[start..].to_vec();
                    path.push(target);
                    return Err(GraphError::Cycle { path });
                }

                if !visited.contains(&target) {
                    self.dfs_detect_cycle(target, visited, stack)?;
                }
            }
        }

        stack.pop();
        Ok(())
    }
}
