//! Position and collision extents shared by every object in the arena.

use glam::DVec2;
use shadow_dimension_core::{BoundingBox, Direction, SpriteSize};

/// Top-left anchored position paired with the bounding box derived from it.
///
/// Every translation updates both halves together so the box never drifts
/// away from the anchor.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    position: DVec2,
    bounds: BoundingBox,
}

impl Body {
    /// Creates a body anchored at `(x, y)` spanning `size`.
    #[must_use]
    pub fn new(x: f64, y: f64, size: SpriteSize) -> Self {
        Self {
            position: DVec2::new(x, y),
            bounds: BoundingBox::from_origin_and_size(x, y, size),
        }
    }

    /// Top-left anchor of the body.
    #[must_use]
    pub const fn position(&self) -> DVec2 {
        self.position
    }

    /// Collision extents of the body.
    #[must_use]
    pub const fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Midpoint of the collision extents.
    #[must_use]
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.bounds.center_x(), self.bounds.center_y())
    }

    /// Moves the anchor and the box `distance` units toward `direction`.
    pub fn translate(&mut self, direction: Direction, distance: f64) {
        let (dx, dy) = direction.offset();
        let delta = DVec2::new(dx, dy) * distance;
        self.position += delta;
        self.bounds.translate(delta.x, delta.y);
    }

    /// Resizes the box horizontally so its right edge sits `width` past the anchor.
    pub fn set_width(&mut self, width: f64) {
        self.bounds.set_right(self.position.x + width);
    }

    /// Inclusive overlap test against another body.
    #[must_use]
    pub fn overlaps(&self, other: &Body) -> bool {
        self.bounds.overlaps(&other.bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translation_moves_anchor_and_bounds_together() {
        let mut body = Body::new(10.0, 20.0, SpriteSize::new(5.0, 8.0));
        body.translate(Direction::West, 3.0);
        body.translate(Direction::South, 2.5);

        assert_eq!(body.position(), DVec2::new(7.0, 22.5));
        assert_eq!(body.bounds().left(), 7.0);
        assert_eq!(body.bounds().right(), 12.0);
        assert_eq!(body.bounds().top(), 22.5);
        assert_eq!(body.bounds().bottom(), 30.5);
    }

    #[test]
    fn width_changes_keep_the_anchor() {
        let mut body = Body::new(0.0, 0.0, SpriteSize::new(5.0, 5.0));
        body.set_width(9.0);
        assert_eq!(body.bounds().left(), 0.0);
        assert_eq!(body.bounds().right(), 9.0);
        assert_eq!(body.position(), DVec2::ZERO);
    }
}
