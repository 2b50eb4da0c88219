//! Stationary fire zones hostiles project toward a nearby target.

use shadow_dimension_core::{BoundingBox, EntityId, HazardSnapshot, HostileKind, Quadrant, SpriteSize};

use crate::body::Body;

/// Damage zone anchored just outside one corner of its owning hostile.
#[derive(Clone, Debug, PartialEq)]
pub struct Hazard {
    owner: EntityId,
    owner_kind: HostileKind,
    quadrant: Quadrant,
    body: Body,
}

impl Hazard {
    /// Places a hazard of `size` at the corner of `owner_bounds` facing `quadrant`.
    ///
    /// The hazard is offset outward by its own extents so it starts clear of
    /// its owner.
    #[must_use]
    pub fn anchored(
        owner: EntityId,
        owner_kind: HostileKind,
        quadrant: Quadrant,
        owner_bounds: &BoundingBox,
        size: SpriteSize,
    ) -> Self {
        let (x, y) = match quadrant {
            Quadrant::NorthEast => (owner_bounds.right(), owner_bounds.top() - size.height()),
            Quadrant::NorthWest => (
                owner_bounds.left() - size.width(),
                owner_bounds.top() - size.height(),
            ),
            Quadrant::SouthEast => (owner_bounds.right(), owner_bounds.bottom()),
            Quadrant::SouthWest => (owner_bounds.left() - size.width(), owner_bounds.bottom()),
        };

        Self {
            owner,
            owner_kind,
            quadrant,
            body: Body::new(x, y, size),
        }
    }

    /// Corner the hazard sits at.
    #[must_use]
    pub const fn quadrant(&self) -> Quadrant {
        self.quadrant
    }

    /// Position and collision extents.
    #[must_use]
    pub const fn body(&self) -> &Body {
        &self.body
    }

    /// Read-only description for presentation.
    #[must_use]
    pub fn snapshot(&self) -> HazardSnapshot {
        HazardSnapshot {
            owner: self.owner,
            owner_kind: self.owner_kind,
            quadrant: self.quadrant,
            bounds: *self.body.bounds(),
        }
    }
}
