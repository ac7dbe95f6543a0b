//! # Composer Layout
//!
//! Resolves the focused component into a render tree: every placement on
//! its canvas in paint order, with component instances expanded recursively
//! into scaled copies of the components they render.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use composer_layout::resolve_layout;
//!
//! let tree = resolve_layout(session.state())?;
//! let clicked = tree.hit_test(Point::new(120.0, 80.0));
//! ```

mod render_tree;
mod resolver;

pub use render_tree::{NodeKind, RenderNode, RenderTree};
pub use resolver::{
    direct_placements, resolve_layout, sort_paint_order, LayoutError, LayoutResult, Resolver,
};
