//! Entries of the arena's object list.

use shadow_dimension_core::{BoundingBox, CombatantKind, EntityId, ObjectKind, ObjectSnapshot};

use crate::{actor::Combatant, body::Body, hostile::Hostile, movement::Obstruction};

/// Capability of objects that can be flagged for end-of-frame removal.
pub trait Removable {
    /// Flags the object for removal.
    fn mark_removed(&mut self);

    /// Reports whether the object is flagged for removal.
    fn is_removed(&self) -> bool;
}

/// Static obstacle blocking movement.
#[derive(Clone, Debug)]
pub struct Obstacle {
    id: EntityId,
    organic: bool,
    body: Body,
}

impl Obstacle {
    /// Creates an obstacle; `organic` selects a tree instead of a wall.
    #[must_use]
    pub fn new(id: EntityId, organic: bool, body: Body) -> Self {
        Self { id, organic, body }
    }

    /// Kind reported to presentation.
    #[must_use]
    pub const fn kind(&self) -> ObjectKind {
        if self.organic {
            ObjectKind::Tree
        } else {
            ObjectKind::Wall
        }
    }
}

/// Floor trap that damages the player once and then disappears.
#[derive(Clone, Debug)]
pub struct Sinkhole {
    id: EntityId,
    body: Body,
    removed: bool,
}

impl Sinkhole {
    /// Creates an armed sinkhole.
    #[must_use]
    pub fn new(id: EntityId, body: Body) -> Self {
        Self {
            id,
            body,
            removed: false,
        }
    }

    /// Identifier assigned at spawn.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }
}

impl Removable for Sinkhole {
    fn mark_removed(&mut self) {
        self.removed = true;
    }

    fn is_removed(&self) -> bool {
        self.removed
    }
}

impl Combatant for Sinkhole {
    fn combatant(&self) -> CombatantKind {
        CombatantKind::Sinkhole
    }
}

/// Closed set of objects that populate the arena.
#[derive(Clone, Debug)]
pub enum WorldObject {
    /// Wall or tree.
    Obstacle(Obstacle),
    /// Floor trap.
    Sinkhole(Sinkhole),
    /// Enemy actor.
    Hostile(Hostile),
}

impl WorldObject {
    /// Identifier assigned at spawn.
    #[must_use]
    pub fn id(&self) -> EntityId {
        match self {
            Self::Obstacle(obstacle) => obstacle.id,
            Self::Sinkhole(sinkhole) => sinkhole.id,
            Self::Hostile(hostile) => hostile.id(),
        }
    }

    /// Kind of the object.
    #[must_use]
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Obstacle(obstacle) => obstacle.kind(),
            Self::Sinkhole(_) => ObjectKind::Sinkhole,
            Self::Hostile(hostile) => ObjectKind::Hostile(hostile.kind()),
        }
    }

    /// Collision extents.
    #[must_use]
    pub fn bounds(&self) -> &BoundingBox {
        match self {
            Self::Obstacle(obstacle) => obstacle.body.bounds(),
            Self::Sinkhole(sinkhole) => sinkhole.body.bounds(),
            Self::Hostile(hostile) => hostile.actor().body().bounds(),
        }
    }

    /// Reports whether the object is dead or flagged for removal and will be
    /// pruned at the end of the frame.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        match self {
            Self::Obstacle(_) => false,
            Self::Sinkhole(sinkhole) => sinkhole.is_removed(),
            Self::Hostile(hostile) => hostile.actor().is_dead(),
        }
    }

    /// Collision view of the object, or `None` once it has expired.
    #[must_use]
    pub fn obstruction(&self) -> Option<Obstruction<'_>> {
        if self.is_expired() {
            return None;
        }

        Some(Obstruction {
            id: self.id(),
            kind: self.kind(),
            bounds: self.bounds(),
        })
    }

    /// Hostile stored in this entry, if any.
    #[must_use]
    pub fn as_hostile(&self) -> Option<&Hostile> {
        match self {
            Self::Hostile(hostile) => Some(hostile),
            _ => None,
        }
    }

    /// Mutable hostile stored in this entry, if any.
    pub fn as_hostile_mut(&mut self) -> Option<&mut Hostile> {
        match self {
            Self::Hostile(hostile) => Some(hostile),
            _ => None,
        }
    }

    /// Mutable sinkhole stored in this entry, if any.
    pub fn as_sinkhole_mut(&mut self) -> Option<&mut Sinkhole> {
        match self {
            Self::Sinkhole(sinkhole) => Some(sinkhole),
            _ => None,
        }
    }

    /// Read-only description for presentation.
    #[must_use]
    pub fn snapshot(&self) -> ObjectSnapshot {
        let (sprite, health, wander) = match self {
            Self::Hostile(hostile) => (
                Some(hostile.actor().sprite()),
                Some(hostile.actor().health()),
                Some(hostile.wander()),
            ),
            Self::Obstacle(_) | Self::Sinkhole(_) => (None, None, None),
        };

        ObjectSnapshot {
            id: self.id(),
            kind: self.kind(),
            bounds: *self.bounds(),
            sprite,
            health,
            wander,
        }
    }
}

/// Yields collision views of every live object except the one at `skip`.
pub fn obstructions_excluding(
    objects: &[WorldObject],
    skip: Option<usize>,
) -> impl Iterator<Item = Obstruction<'_>> + '_ {
    objects
        .iter()
        .enumerate()
        .filter(move |(index, _)| Some(*index) != skip)
        .filter_map(|(_, object)| object.obstruction())
}
