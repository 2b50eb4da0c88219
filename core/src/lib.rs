#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Shadow Dimension engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative arena, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the arena executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values describing what
//! happened during the frame. Read-only snapshots ([`ActorSnapshot`],
//! [`ObjectSnapshot`], [`HazardSnapshot`]) expose everything presentation
//! layers need without granting mutable access.

mod bounds;
mod vitality;

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use bounds::BoundingBox;
pub use vitality::{HealthTier, Vitality, MIN_HEALTH};

const TIMESCALE_MULTIPLIER: f64 = 0.5;

/// Commands that express all permissible arena mutations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Advances the simulation by a single frame.
    Tick {
        /// Simulated time that elapsed since the previous frame.
        dt: Duration,
        /// Speed control applied to non-player movement during the frame.
        timescale: Timescale,
    },
    /// Requests that the player move in the provided direction this frame.
    MovePlayer {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Requests that the player begin an attack if one is available.
    StartAttack,
}

/// Events broadcast by the arena after processing commands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Indicates that the simulation clock advanced by one frame.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the frame.
        dt: Duration,
        /// Timescale that governed hostile movement during the frame.
        timescale: Timescale,
    },
    /// Confirms that the player moved.
    PlayerMoved {
        /// Direction the player travelled in.
        direction: Direction,
        /// Distance covered after collision clipping.
        distance: f64,
    },
    /// Announces that the player entered the attacking state.
    AttackStarted,
    /// Announces that the player's attack ended and its cooldown began.
    AttackEnded,
    /// Announces that the player's attack cooldown elapsed.
    AttackReady,
    /// Reports a successful damage application.
    DamageInflicted {
        /// Combatant responsible for the damage.
        source: CombatantKind,
        /// Actor that received the damage.
        target: ActorRef,
        /// Amount of damage applied.
        amount: u32,
        /// Health remaining on the target after the hit.
        health: u32,
        /// Maximum health of the target.
        max_health: u32,
    },
    /// Reports that an actor's health reached the minimum.
    ActorDied {
        /// Actor that died.
        target: ActorRef,
    },
    /// Announces that a hostile noticed its target and produced a hazard.
    HazardActivated {
        /// Hostile owning the hazard.
        owner: EntityId,
        /// Corner the hazard was placed at.
        quadrant: Quadrant,
    },
    /// Announces that a hostile lost track of its target.
    HazardCleared {
        /// Hostile that owned the hazard.
        owner: EntityId,
    },
    /// Reports that a hostile collided and reversed its wander direction.
    WanderReversed {
        /// Hostile that reversed.
        hostile: EntityId,
        /// Wander state adopted after the reversal.
        wander: Wander,
    },
    /// Reports that the player stepped onto a sinkhole.
    SinkholeTriggered {
        /// Sinkhole that fired.
        sinkhole: EntityId,
    },
    /// Confirms that an object left the arena during end-of-frame pruning.
    ObjectRemoved {
        /// Identifier of the removed object.
        object: EntityId,
        /// Kind of the removed object.
        kind: ObjectKind,
    },
}

/// Cardinal movement directions available to every mobile entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing `y`.
    North,
    /// Movement toward increasing `x`.
    East,
    /// Movement toward increasing `y`.
    South,
    /// Movement toward decreasing `x`.
    West,
}

impl Direction {
    /// Every direction, in the order used when sampling a random heading.
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::North,
        Direction::West,
        Direction::South,
    ];

    /// Direction pointing the opposite way along the same axis.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Reports whether the direction runs along the `x` axis.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::East | Self::West)
    }

    /// Unit offset applied to a position when travelling in this direction.
    #[must_use]
    pub const fn offset(self) -> (f64, f64) {
        match self {
            Self::North => (0.0, -1.0),
            Self::East => (1.0, 0.0),
            Self::South => (0.0, 1.0),
            Self::West => (-1.0, 0.0),
        }
    }
}

/// Horizontal orientation an actor is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    /// Facing toward decreasing `x`.
    Left,
    /// Facing toward increasing `x`.
    Right,
}

impl Facing {
    /// Facing implied by travelling in `direction`, if horizontal.
    #[must_use]
    pub const fn from_direction(direction: Direction) -> Option<Self> {
        match direction {
            Direction::East => Some(Self::Right),
            Direction::West => Some(Self::Left),
            Direction::North | Direction::South => None,
        }
    }
}

/// Diagonal corner of a hostile a hazard can be anchored to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quadrant {
    /// Target lies to the right of and above the origin.
    NorthEast,
    /// Target lies to the left of and above the origin.
    NorthWest,
    /// Target lies to the right of and below the origin.
    SouthEast,
    /// Target lies to the left of and below the origin.
    SouthWest,
}

impl Quadrant {
    /// Classifies `target` relative to `origin`.
    ///
    /// The axes are compared independently. A target sharing the origin's `x`
    /// counts as west and one sharing its `y` counts as south, so a target at
    /// the exact centre resolves to [`Quadrant::SouthWest`].
    #[must_use]
    pub fn locate(origin: (f64, f64), target: (f64, f64)) -> Self {
        let east = target.0 > origin.0;
        let north = target.1 < origin.1;
        match (east, north) {
            (true, true) => Self::NorthEast,
            (false, true) => Self::NorthWest,
            (true, false) => Self::SouthEast,
            (false, false) => Self::SouthWest,
        }
    }
}

/// Wander state of a hostile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Wander {
    /// The hostile never moves.
    Stationary,
    /// The hostile travels in the provided direction every frame.
    Heading(Direction),
}

impl Wander {
    /// Direction of travel, if any.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Self::Stationary => None,
            Self::Heading(direction) => Some(direction),
        }
    }

    /// Wander state heading the opposite way; stationary stays stationary.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Stationary => Self::Stationary,
            Self::Heading(direction) => Self::Heading(direction.opposite()),
        }
    }
}

/// Integer speed control applied to non-player movement.
///
/// Each unit of magnitude compounds a 50% change in step size: positive values
/// speed hostiles up, negative values slow them down, and zero leaves steps
/// untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timescale(i8);

impl Timescale {
    /// Timescale that leaves step sizes unchanged.
    pub const NEUTRAL: Self = Self(0);

    /// Creates a timescale with the provided raw value.
    #[must_use]
    pub const fn new(value: i8) -> Self {
        Self(value)
    }

    /// Raw integer value.
    #[must_use]
    pub const fn get(&self) -> i8 {
        self.0
    }

    /// Scales `base` by `(1 + 0.5 * sign)^|timescale|`.
    #[must_use]
    pub fn scale(self, base: f64) -> f64 {
        if self.0 == 0 {
            return base;
        }

        let factor = 1.0 + TIMESCALE_MULTIPLIER * f64::from(self.0.signum());
        base * factor.powi(i32::from(self.0.unsigned_abs()))
    }

    /// Returns a timescale one unit faster, capped at `max`.
    #[must_use]
    pub fn faster(self, max: Timescale) -> Self {
        if self < max {
            Self(self.0.saturating_add(1))
        } else {
            self
        }
    }

    /// Returns a timescale one unit slower, floored at `min`.
    #[must_use]
    pub fn slower(self, min: Timescale) -> Self {
        if self > min {
            Self(self.0.saturating_sub(1))
        } else {
            self
        }
    }
}

/// Unique identifier assigned to every object spawned into the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new entity identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Reference to an actor that can receive damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorRef {
    /// The single player-controlled actor.
    Player,
    /// A hostile stored in the arena's object list.
    Hostile(EntityId),
}

/// Closed set of kinds able to inflict damage.
///
/// Each kind supplies the display name used in damage logs and its fixed
/// damage value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatantKind {
    /// The player character.
    Player,
    /// Minor hostile.
    Demon,
    /// Boss hostile.
    Navec,
    /// One-shot floor trap.
    Sinkhole,
}

impl CombatantKind {
    /// Name shown in damage logs.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Player => "Fae",
            Self::Demon => "Demon",
            Self::Navec => "Navec",
            Self::Sinkhole => "Sinkhole",
        }
    }

    /// Damage applied per successful hit.
    #[must_use]
    pub const fn damage(self) -> u32 {
        match self {
            Self::Player => 20,
            Self::Demon => 10,
            Self::Navec => 20,
            Self::Sinkhole => 30,
        }
    }
}

/// Kinds of hostiles that can populate a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostileKind {
    /// Optional minor enemy; half of them wander.
    Demon,
    /// Boss enemy; always wanders and must be slain to win its level.
    Navec,
}

impl HostileKind {
    /// Combatant identity used for naming and damage.
    #[must_use]
    pub const fn combatant(self) -> CombatantKind {
        match self {
            Self::Demon => CombatantKind::Demon,
            Self::Navec => CombatantKind::Navec,
        }
    }

    /// Health the hostile spawns with.
    #[must_use]
    pub const fn max_health(self) -> u32 {
        match self {
            Self::Demon => 40,
            Self::Navec => 80,
        }
    }

    /// Reports whether the hostile always rolls an aggressive wander.
    #[must_use]
    pub const fn always_aggressive(self) -> bool {
        matches!(self, Self::Navec)
    }

    /// Reports whether the hostile is the level's boss.
    #[must_use]
    pub const fn is_boss(self) -> bool {
        matches!(self, Self::Navec)
    }
}

/// Kinds of objects stored in the arena's object list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Inorganic wall obstacle.
    Wall,
    /// Organic tree obstacle.
    Tree,
    /// Removable floor trap.
    Sinkhole,
    /// Hostile actor of the provided kind.
    Hostile(HostileKind),
}

/// Width and height of a sprite, which also define collision extents.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpriteSize {
    width: f64,
    height: f64,
}

impl SpriteSize {
    /// Creates a new sprite size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Horizontal extent in world units.
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }

    /// Vertical extent in world units.
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }
}

/// Sprite selection state the renderer maps to an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteState {
    /// Horizontal orientation.
    pub facing: Facing,
    /// Whether the actor is inside its invincibility window.
    pub invincible: bool,
    /// Whether the actor is attacking.
    pub attacking: bool,
}

/// Health figures exposed to the HUD.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HealthReading {
    /// Remaining health.
    pub current: u32,
    /// Maximum health.
    pub max: u32,
    /// Truncated percentage of health remaining.
    pub percent: u32,
    /// Colour tier.
    pub tier: HealthTier,
}

impl From<&Vitality> for HealthReading {
    fn from(vitality: &Vitality) -> Self {
        Self {
            current: vitality.current(),
            max: vitality.max(),
            percent: vitality.percent(),
            tier: vitality.tier(),
        }
    }
}

/// Immutable representation of the player used for queries.
///
/// The draw anchor is the top-left corner of `bounds`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActorSnapshot {
    /// Combatant identity of the actor.
    pub kind: CombatantKind,
    /// Collision extents of the actor.
    pub bounds: BoundingBox,
    /// Sprite selection state.
    pub sprite: SpriteState,
    /// Health figures.
    pub health: HealthReading,
    /// Whether the actor's health reached the minimum.
    pub dead: bool,
}

/// Immutable representation of a single arena object used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObjectSnapshot {
    /// Identifier assigned to the object at spawn.
    pub id: EntityId,
    /// Kind of object.
    pub kind: ObjectKind,
    /// Collision extents; the top-left corner is the draw anchor.
    pub bounds: BoundingBox,
    /// Sprite selection state for hostiles.
    pub sprite: Option<SpriteState>,
    /// Health figures for hostiles.
    pub health: Option<HealthReading>,
    /// Wander state for hostiles.
    pub wander: Option<Wander>,
}

/// Read-only snapshot of every object in the arena in list order.
#[derive(Clone, Debug, Default)]
pub struct ObjectView {
    snapshots: Vec<ObjectSnapshot>,
}

impl ObjectView {
    /// Creates a new object view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(snapshots: Vec<ObjectSnapshot>) -> Self {
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in list order.
    pub fn iter(&self) -> impl Iterator<Item = &ObjectSnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ObjectSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of an active hazard used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HazardSnapshot {
    /// Hostile owning the hazard.
    pub owner: EntityId,
    /// Kind of the owning hostile, selecting the hazard sprite.
    pub owner_kind: HostileKind,
    /// Corner the hazard is anchored at; selects the sprite rotation.
    pub quadrant: Quadrant,
    /// Collision extents; the top-left corner is the draw anchor.
    pub bounds: BoundingBox,
}
