//! # Component Model
//!
//! Canonical data the editor owns: component definitions, the children placed
//! on their canvases, and props.
//!
//! A component's own rectangle (its size when embedded elsewhere) is not a
//! child. It is exposed as [`Placement::SelfPlacement`], synthesized on demand
//! and never stored in `children`.

use composer_common::Position;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// `child_type` value that selects a component instance in `AddChild`
pub const COMPONENT_CHILD_TYPE: &str = "COMP";

/// Raw id that addresses a component's own placement on the wire
pub const SELF_PLACEMENT_RAW_ID: i64 = -1;

/// Stable component identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(pub u32);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Child identifier, unique within one parent component
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChildId(pub u32);

impl fmt::Display for ChildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Prop declared on a component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prop {
    pub id: u32,
    pub key: String,
    pub value: String,
    pub required: bool,
    #[serde(rename = "type")]
    pub prop_type: String,
}

/// What a child renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "childType")]
pub enum ChildKind {
    /// Instance of another component
    #[serde(rename = "COMP")]
    Component {
        #[serde(rename = "childComponentId")]
        component_id: ComponentId,
    },

    /// Native HTML element
    #[serde(rename = "HTML")]
    Html {
        #[serde(rename = "htmlElement")]
        element: String,
        #[serde(rename = "HTMLInfo", default)]
        attributes: BTreeMap<String, String>,
    },
}

/// One instance placed on a component's canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    pub child_id: ChildId,
    #[serde(flatten)]
    pub kind: ChildKind,
    pub component_name: String,
    /// Relative to the parent component's canvas
    pub position: Position,
    pub child_sort: i64,
    #[serde(default)]
    pub color: Option<String>,
}

impl Child {
    /// Component rendered by this child, if it is a component instance
    pub fn referenced_component(&self) -> Option<ComponentId> {
        match &self.kind {
            ChildKind::Component { component_id } => Some(*component_id),
            ChildKind::Html { .. } => None,
        }
    }

    pub fn is_html(&self) -> bool {
        matches!(self.kind, ChildKind::Html { .. })
    }

    /// HTML element kind, if this child is an HTML element
    pub fn html_element(&self) -> Option<&str> {
        match &self.kind {
            ChildKind::Html { element, .. } => Some(element),
            ChildKind::Component { .. } => None,
        }
    }
}

/// Reusable component definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: ComponentId,
    pub title: String,
    pub stateful: bool,
    pub expanded: bool,
    pub color: String,
    pub props: Vec<Prop>,
    /// Geometry used when this component is embedded as a child elsewhere
    pub position: Position,
    pub children: Vec<Child>,
    pub next_child_id: u32,
    pub next_prop_id: u32,
    /// Child to restore as focus when this component is focused again
    pub focus_child_id: Option<ChildId>,
}

impl Component {
    /// Blank template every new component starts from
    pub fn template(position: Position) -> Self {
        Self {
            id: ComponentId(0),
            title: String::new(),
            stateful: false,
            expanded: false,
            color: String::new(),
            props: Vec::new(),
            position,
            children: Vec::new(),
            next_child_id: 1,
            next_prop_id: 0,
            focus_child_id: None,
        }
    }

    pub fn child(&self, child_id: ChildId) -> Option<&Child> {
        self.children.iter().find(|c| c.child_id == child_id)
    }

    pub fn child_mut(&mut self, child_id: ChildId) -> Option<&mut Child> {
        self.children.iter_mut().find(|c| c.child_id == child_id)
    }

    /// The component's own rectangle, as it appears when embedded
    pub fn self_placement(&self) -> SelfPlacement {
        SelfPlacement {
            component_id: self.id,
            component_name: self.title.clone(),
            position: self.position,
            color: self.color.clone(),
        }
    }

    /// Resolve a placement reference against this component
    pub fn placement(&self, placement: PlacementRef) -> Option<Placement> {
        match placement {
            PlacementRef::SelfPlacement => Some(Placement::SelfPlacement(self.self_placement())),
            PlacementRef::Child(child_id) => self.child(child_id).cloned().map(Placement::Child),
        }
    }

    /// Components instantiated directly on this canvas
    pub fn referenced_components(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.children.iter().filter_map(Child::referenced_component)
    }
}

/// A component's own rectangle, viewed as an embeddable unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelfPlacement {
    pub component_id: ComponentId,
    pub component_name: String,
    pub position: Position,
    pub color: String,
}

/// Anything selectable on a component's canvas
#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    SelfPlacement(SelfPlacement),
    Child(Child),
}

impl Placement {
    pub fn placement_ref(&self) -> PlacementRef {
        match self {
            Placement::SelfPlacement(_) => PlacementRef::SelfPlacement,
            Placement::Child(child) => PlacementRef::Child(child.child_id),
        }
    }

    pub fn position(&self) -> &Position {
        match self {
            Placement::SelfPlacement(p) => &p.position,
            Placement::Child(child) => &child.position,
        }
    }

    pub fn component_name(&self) -> &str {
        match self {
            Placement::SelfPlacement(p) => &p.component_name,
            Placement::Child(child) => &child.component_name,
        }
    }

    pub fn as_child(&self) -> Option<&Child> {
        match self {
            Placement::Child(child) => Some(child),
            Placement::SelfPlacement(_) => None,
        }
    }
}

/// Address of a placement within one component.
///
/// Serialized as the raw child id, with `-1` for the component's own placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum PlacementRef {
    SelfPlacement,
    Child(ChildId),
}

impl PlacementRef {
    pub fn raw(self) -> i64 {
        match self {
            PlacementRef::SelfPlacement => SELF_PLACEMENT_RAW_ID,
            PlacementRef::Child(id) => i64::from(id.0),
        }
    }

    pub fn child_id(self) -> Option<ChildId> {
        match self {
            PlacementRef::Child(id) => Some(id),
            PlacementRef::SelfPlacement => None,
        }
    }
}

impl From<PlacementRef> for i64 {
    fn from(placement: PlacementRef) -> Self {
        placement.raw()
    }
}

impl TryFrom<i64> for PlacementRef {
    type Error = String;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        if raw == SELF_PLACEMENT_RAW_ID {
            return Ok(PlacementRef::SelfPlacement);
        }

        u32::try_from(raw)
            .ok()
            .filter(|id| *id > 0)
            .map(|id| PlacementRef::Child(ChildId(id)))
            .ok_or_else(|| format!("{} is not a placement id", raw))
    }
}

impl From<ChildId> for PlacementRef {
    fn from(id: ChildId) -> Self {
        PlacementRef::Child(id)
    }
}

impl fmt::Display for PlacementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementRef::SelfPlacement => write!(f, "self"),
            PlacementRef::Child(id) => write!(f, "{}", id),
        }
    }
}
