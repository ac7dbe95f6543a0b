//! Render tree produced by the resolver.
//!
//! Top-level nodes are the focused component's placements in paint order.
//! Every node carries two rectangles: `position`, relative to its container
//! (the canvas for top-level nodes), and `absolute`, in canvas coordinates.

use composer_common::{Point, Position};
use composer_editor::{ComponentId, PlacementRef};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NodeKind {
    /// The focused component's own rectangle
    SelfPlacement,
    #[serde(rename_all = "camelCase")]
    Component { component_id: ComponentId },
    Html { element: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderNode {
    /// Placement within the component that owns this node
    pub placement: PlacementRef,
    pub kind: NodeKind,
    pub name: String,
    pub position: Position,
    pub absolute: Position,
    pub stroke: String,
    /// Nested placements, already in paint order
    pub children: Vec<RenderNode>,
}

impl RenderNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, this one included
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(RenderNode::len).sum::<usize>()
    }

    /// Deepest nesting level below this node (0 for a leaf)
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderTree {
    pub component_id: ComponentId,
    /// Top-level placements, first painted first
    pub nodes: Vec<RenderNode>,
}

impl RenderTree {
    /// Total number of nodes at every depth
    pub fn len(&self) -> usize {
        self.nodes.iter().map(RenderNode::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Placement that receives a click at `point`.
    ///
    /// The last painted node containing the point wins, so a small child on
    /// top of a large one is picked before it. Nested nodes belong to their
    /// top-level instance and are not selectable by themselves.
    pub fn hit_test(&self, point: Point) -> Option<PlacementRef> {
        self.nodes
            .iter()
            .rev()
            .find(|node| node.absolute.contains(point))
            .map(|node| node.placement)
    }

    pub fn node(&self, placement: PlacementRef) -> Option<&RenderNode> {
        self.nodes.iter().find(|node| node.placement == placement)
    }

    /// Paint order of the top-level placements
    pub fn paint_order(&self) -> Vec<PlacementRef> {
        self.nodes.iter().map(|node| node.placement).collect()
    }
}
