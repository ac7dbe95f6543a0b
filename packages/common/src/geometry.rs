//! Canvas geometry.
//!
//! Every rectangle on the canvas is a [`Position`]: an origin plus a size, in
//! canvas pixels. Children store their position relative to the canvas of the
//! component that owns them; the layout resolver rescales those positions when
//! a component is embedded somewhere else.

use serde::{Deserialize, Serialize};

/// A point on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height of a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Rectangle geometry of a component or a child
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Build a rectangle from an origin and a size
    pub const fn from_parts(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// A rectangle with no width or no height cannot be used as a scale reference
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point lies inside this rectangle (edges included)
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Same size, origin moved by the given delta
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Merge a partial update where `0` means "not provided".
    ///
    /// Canvas transforms report every field; a field left at zero keeps the
    /// previous value. This makes it impossible to move an entity to exactly
    /// `0` on either axis.
    pub fn merge_nonzero(&self, update: &Position) -> Self {
        fn pick(new: f64, old: f64) -> f64 {
            if new == 0.0 {
                old
            } else {
                new
            }
        }

        Self {
            x: pick(update.x, self.x),
            y: pick(update.y, self.y),
            width: pick(update.width, self.width),
            height: pick(update.height, self.height),
        }
    }

    /// Map this rectangle, expressed in `reference`'s coordinate space, into the
    /// local space of an instance scaled by `scale`.
    pub fn rescale_into(&self, reference: &Position, scale: Scale) -> Self {
        Self {
            x: (self.x - reference.x) * scale.x,
            y: (self.y - reference.y) * scale.y,
            width: self.width * scale.x,
            height: self.height * scale.y,
        }
    }
}

/// Per-axis scale factor between an instance and the component it renders
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub x: f64,
    pub y: f64,
}

impl Scale {
    pub const IDENTITY: Scale = Scale { x: 1.0, y: 1.0 };

    /// Scale that maps `reference` onto `instance`, or `None` when the reference
    /// has a zero dimension.
    pub fn between(instance: &Position, reference: &Position) -> Option<Self> {
        if reference.is_degenerate() {
            return None;
        }

        Some(Self {
            x: instance.width / reference.width,
            y: instance.height / reference.height,
        })
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::IDENTITY
    }
}
