use serde::{Deserialize, Serialize};

use crate::SpriteSize;

const TOP: u8 = 0b0001;
const BOTTOM: u8 = 0b0010;
const LEFT: u8 = 0b0100;
const RIGHT: u8 = 0b1000;
const ALL_EDGES: u8 = TOP | BOTTOM | LEFT | RIGHT;

/// Axis-aligned rectangle whose four edges can be assigned independently.
///
/// Edges are expressed in world units with `y` growing downwards, so `top` is
/// numerically smaller than `bottom` for well-formed boxes. The box does not
/// validate edge ordering; callers keep the edges consistent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    top: f64,
    bottom: f64,
    left: f64,
    right: f64,
    defined: u8,
}

impl BoundingBox {
    /// Creates a box with no edge defined yet.
    ///
    /// Used for the world boundary, whose corners arrive one at a time while
    /// the level records are consumed.
    #[must_use]
    pub const fn undefined() -> Self {
        Self {
            top: 0.0,
            bottom: 0.0,
            left: 0.0,
            right: 0.0,
            defined: 0,
        }
    }

    /// Creates a fully defined box from its four edges.
    #[must_use]
    pub const fn new(top: f64, bottom: f64, left: f64, right: f64) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
            defined: ALL_EDGES,
        }
    }

    /// Creates a fully defined box anchored at the top-left corner `(x, y)`.
    #[must_use]
    pub fn from_origin_and_size(x: f64, y: f64, size: SpriteSize) -> Self {
        Self::new(y, y + size.height(), x, x + size.width())
    }

    /// Reports whether all four edges have been assigned.
    #[must_use]
    pub const fn is_defined(&self) -> bool {
        self.defined & ALL_EDGES == ALL_EDGES
    }

    /// Y coordinate of the top edge.
    #[must_use]
    pub const fn top(&self) -> f64 {
        self.top
    }

    /// Y coordinate of the bottom edge.
    #[must_use]
    pub const fn bottom(&self) -> f64 {
        self.bottom
    }

    /// X coordinate of the left edge.
    #[must_use]
    pub const fn left(&self) -> f64 {
        self.left
    }

    /// X coordinate of the right edge.
    #[must_use]
    pub const fn right(&self) -> f64 {
        self.right
    }

    /// Assigns the top edge and marks it as defined.
    pub fn set_top(&mut self, top: f64) {
        self.top = top;
        self.defined |= TOP;
    }

    /// Assigns the bottom edge and marks it as defined.
    pub fn set_bottom(&mut self, bottom: f64) {
        self.bottom = bottom;
        self.defined |= BOTTOM;
    }

    /// Assigns the left edge and marks it as defined.
    pub fn set_left(&mut self, left: f64) {
        self.left = left;
        self.defined |= LEFT;
    }

    /// Assigns the right edge and marks it as defined.
    pub fn set_right(&mut self, right: f64) {
        self.right = right;
        self.defined |= RIGHT;
    }

    /// Assigns the left and top edges from a single corner point.
    pub fn set_top_left(&mut self, x: f64, y: f64) {
        self.set_left(x);
        self.set_top(y);
    }

    /// Assigns the right and bottom edges from a single corner point.
    pub fn set_bottom_right(&mut self, x: f64, y: f64) {
        self.set_right(x);
        self.set_bottom(y);
    }

    /// Horizontal midpoint between the left and right edges.
    #[must_use]
    pub fn center_x(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    /// Vertical midpoint between the top and bottom edges.
    #[must_use]
    pub fn center_y(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }

    /// Width spanned by the horizontal edges.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Height spanned by the vertical edges.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Shifts every edge by the provided offsets.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.top += dy;
        self.bottom += dy;
        self.left += dx;
        self.right += dx;
    }

    /// Inclusive overlap test: boxes sharing only an edge still overlap.
    #[must_use]
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.top <= other.bottom
            && self.bottom >= other.top
            && self.left <= other.right
            && self.right >= other.left
    }
}
