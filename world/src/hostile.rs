//! Hostiles: wandering actors that project fire toward a nearby target.

use std::{ops::Range, time::Duration};

use rand::Rng;
use shadow_dimension_core::{
    ActorRef, BoundingBox, CombatantKind, Direction, EntityId, Event, Facing, HostileKind,
    Quadrant, SpriteSize, Timescale, Wander,
};
use tracing::debug;

use crate::{
    actor::{inflict, Actor, Combatant},
    config::ArenaConfig,
    hazard::Hazard,
    movement::{Clip, CollisionPolicy, Obstruction},
};

/// Range aggressive hostiles draw their step size from.
pub const WANDER_STEP_RANGE: Range<f64> = 0.2..0.7;

/// Construction-time random choices of a hostile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WanderRoll {
    /// Initial horizontal orientation.
    pub facing: Facing,
    /// Step size per frame; zero for stationary hostiles.
    pub step_size: f64,
    /// Initial wander state.
    pub wander: Wander,
}

impl WanderRoll {
    /// Roll describing a hostile that never moves.
    #[must_use]
    pub const fn stationary(facing: Facing) -> Self {
        Self {
            facing,
            step_size: 0.0,
            wander: Wander::Stationary,
        }
    }

    /// Roll describing a hostile heading `direction` at `step_size`.
    #[must_use]
    pub const fn heading(facing: Facing, step_size: f64, direction: Direction) -> Self {
        Self {
            facing,
            step_size,
            wander: Wander::Heading(direction),
        }
    }

    /// Draws facing, aggression, step size, and direction from `rng`, in that
    /// order. Non-aggressive hostiles consume no further randomness.
    pub fn sample<R>(rng: &mut R, always_aggressive: bool) -> Self
    where
        R: Rng + ?Sized,
    {
        let facing = if rng.gen::<bool>() {
            Facing::Left
        } else {
            Facing::Right
        };

        let aggressive = always_aggressive || rng.gen::<bool>();
        if !aggressive {
            return Self::stationary(facing);
        }

        let step_size = rng.gen_range(WANDER_STEP_RANGE);
        let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
        Self::heading(facing, step_size, direction)
    }
}

/// Configured extents and aggro radius shared by every hostile of one kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HostileProfile {
    /// Body size.
    pub size: SpriteSize,
    /// Size of the fire the hostile projects.
    pub hazard_size: SpriteSize,
    /// Aggro radius measured between centres.
    pub detect_radius: f64,
}

impl HostileProfile {
    /// Looks up the profile of `kind` in `config`.
    #[must_use]
    pub fn from_config(config: &ArenaConfig, kind: HostileKind) -> Self {
        Self {
            size: config.sprites.hostile(kind),
            hazard_size: config.sprites.fire(kind),
            detect_radius: config.detect_radius.for_kind(kind),
        }
    }
}

/// Wander move computed against a read-only view of the arena.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WanderPlan {
    /// Direction of travel.
    pub direction: Direction,
    /// Collision-free distance.
    pub distance: f64,
    /// Whether the world boundary or an object clipped the move.
    pub collided: bool,
}

#[derive(Default)]
struct WanderPolicy {
    collided: bool,
}

impl CollisionPolicy for WanderPolicy {
    fn world_bound_reached(&mut self) {
        self.collided = true;
    }

    fn object_reached(&mut self, distance: f64, _: Obstruction<'_>, _: Direction) -> Clip {
        self.collided = true;
        Clip::At(distance)
    }
}

/// Enemy actor with an aggro radius, a wander state, and an optional hazard.
#[derive(Clone, Debug)]
pub struct Hostile {
    id: EntityId,
    kind: HostileKind,
    actor: Actor,
    detect_radius: f64,
    wander: Wander,
    hazard: Option<Hazard>,
    hazard_size: SpriteSize,
}

impl Hostile {
    /// Creates a hostile anchored at `(x, y)` using a pre-drawn roll.
    #[must_use]
    pub fn new(
        id: EntityId,
        kind: HostileKind,
        x: f64,
        y: f64,
        profile: HostileProfile,
        roll: WanderRoll,
    ) -> Self {
        Self {
            id,
            kind,
            actor: Actor::new(
                kind.combatant(),
                x,
                y,
                profile.size,
                kind.max_health(),
                roll.step_size,
                roll.facing,
            ),
            detect_radius: profile.detect_radius,
            wander: roll.wander,
            hazard: None,
            hazard_size: profile.hazard_size,
        }
    }

    /// Identifier assigned at spawn.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Kind of hostile.
    #[must_use]
    pub const fn kind(&self) -> HostileKind {
        self.kind
    }

    /// Underlying actor.
    #[must_use]
    pub const fn actor(&self) -> &Actor {
        &self.actor
    }

    pub(crate) fn actor_mut(&mut self) -> &mut Actor {
        &mut self.actor
    }

    /// Aggro radius measured between centres.
    #[must_use]
    pub const fn detect_radius(&self) -> f64 {
        self.detect_radius
    }

    /// Current wander state.
    #[must_use]
    pub const fn wander(&self) -> Wander {
        self.wander
    }

    /// Active hazard, if the target is within range.
    #[must_use]
    pub const fn hazard(&self) -> Option<&Hazard> {
        self.hazard.as_ref()
    }

    /// Evaluates aggro against `target` and applies hazard damage on overlap.
    ///
    /// Outside the detect radius any hazard is cleared. Inside it the hazard
    /// is re-anchored at the corner facing the target every call.
    pub fn track(&mut self, target: &mut Actor, target_ref: ActorRef, out: &mut Vec<Event>) {
        let origin = self.actor.body().center();
        let aim = target.body().center();

        if origin.distance(aim) > self.detect_radius {
            if self.hazard.take().is_some() {
                out.push(Event::HazardCleared { owner: self.id });
            }
            return;
        }

        let quadrant = Quadrant::locate((origin.x, origin.y), (aim.x, aim.y));
        let hazard = Hazard::anchored(
            self.id,
            self.kind,
            quadrant,
            self.actor.body().bounds(),
            self.hazard_size,
        );
        if self.hazard.is_none() {
            debug!(hostile = self.id.get(), ?quadrant, "target in range");
            out.push(Event::HazardActivated {
                owner: self.id,
                quadrant,
            });
        }

        let hit = hazard.body().overlaps(target.body());
        self.hazard = Some(hazard);

        if !hit {
            return;
        }

        if let Some(report) = inflict(self, target, false) {
            report.publish(target_ref, out);
        }
    }

    /// Computes this frame's wander move, or `None` for stationary hostiles.
    ///
    /// `obstructions` must not include the hostile itself.
    pub fn plan_wander<'a, I>(
        &self,
        obstructions: I,
        world: &BoundingBox,
        timescale: Timescale,
    ) -> Option<WanderPlan>
    where
        I: IntoIterator<Item = Obstruction<'a>>,
    {
        let direction = self.wander.direction()?;
        let mut policy = WanderPolicy::default();
        let distance = self
            .actor
            .plan_move(direction, obstructions, world, timescale, &mut policy);

        Some(WanderPlan {
            direction,
            distance,
            collided: policy.collided,
        })
    }

    /// Performs a planned wander move, reversing direction after a collision.
    ///
    /// Returns the new wander state when a reversal happened.
    pub fn commit_wander(&mut self, plan: WanderPlan) -> Option<Wander> {
        self.actor.commit_move(plan.direction, plan.distance);
        if !plan.collided {
            return None;
        }

        self.wander = self.wander.reversed();
        Some(self.wander)
    }

    /// Counts the invincibility window down by `elapsed`.
    pub fn update_invincibility(&mut self, elapsed: Duration) {
        self.actor.update_invincibility(elapsed);
    }
}

impl Combatant for Hostile {
    fn combatant(&self) -> CombatantKind {
        self.kind.combatant()
    }
}
