//! Actors: bodies with health, a step size, and timed invincibility.

use std::time::Duration;

use shadow_dimension_core::{
    ActorRef, BoundingBox, CombatantKind, Direction, Event, Facing, HealthReading, SpriteSize,
    SpriteState, Timescale, Vitality,
};
use tracing::info;

use crate::{
    body::Body,
    movement::{resolve_step, CollisionPolicy, Obstruction},
};

/// Length of the window after a hit during which further hits are ignored.
pub const INVINCIBILITY_DURATION: Duration = Duration::from_millis(3000);

/// Anything able to deal damage: supplies a display name and a damage value.
pub trait Combatant {
    /// Identity used to name the attacker in damage logs.
    fn combatant(&self) -> CombatantKind;

    /// Damage applied per successful hit.
    fn damage(&self) -> u32 {
        self.combatant().damage()
    }
}

/// Outcome of a damage application that got past invincibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageReport {
    /// Combatant responsible for the damage.
    pub source: CombatantKind,
    /// Damage applied.
    pub amount: u32,
    /// Health remaining on the receiver.
    pub health: u32,
    /// Maximum health of the receiver.
    pub max_health: u32,
    /// Whether this hit drove the receiver to the minimum.
    pub died: bool,
}

impl DamageReport {
    /// Appends the events describing this hit on `target`.
    pub fn publish(&self, target: ActorRef, out: &mut Vec<Event>) {
        out.push(Event::DamageInflicted {
            source: self.source,
            target,
            amount: self.amount,
            health: self.health,
            max_health: self.max_health,
        });
        if self.died {
            info!(killer = self.source.display_name(), ?target, "actor died");
            out.push(Event::ActorDied { target });
        }
    }
}

/// Applies `attacker`'s damage to `target`.
///
/// Returns `None` when the target is invincible and `force` is not set.
pub fn inflict<C>(attacker: &C, target: &mut Actor, force: bool) -> Option<DamageReport>
where
    C: Combatant + ?Sized,
{
    target.receive_damage(attacker.damage(), attacker.combatant(), force)
}

/// Entity with health, movement, and the ability to exchange damage.
#[derive(Clone, Debug)]
pub struct Actor {
    kind: CombatantKind,
    body: Body,
    vitality: Vitality,
    step_size: f64,
    allowed_step: f64,
    facing: Facing,
    invincible: bool,
    invincible_remaining: Duration,
    dead: bool,
}

impl Actor {
    /// Creates a full-health actor anchored at `(x, y)`.
    #[must_use]
    pub fn new(
        kind: CombatantKind,
        x: f64,
        y: f64,
        size: SpriteSize,
        max_health: u32,
        step_size: f64,
        facing: Facing,
    ) -> Self {
        Self {
            kind,
            body: Body::new(x, y, size),
            vitality: Vitality::new(max_health),
            step_size,
            allowed_step: step_size,
            facing,
            invincible: false,
            invincible_remaining: Duration::ZERO,
            dead: false,
        }
    }

    /// Combatant identity of the actor.
    #[must_use]
    pub const fn kind(&self) -> CombatantKind {
        self.kind
    }

    /// Position and collision extents.
    #[must_use]
    pub const fn body(&self) -> &Body {
        &self.body
    }

    /// Health pool.
    #[must_use]
    pub const fn vitality(&self) -> &Vitality {
        &self.vitality
    }

    /// Unscaled per-frame displacement.
    #[must_use]
    pub const fn step_size(&self) -> f64 {
        self.step_size
    }

    /// Distance permitted by the most recent collision scan.
    #[must_use]
    pub const fn allowed_step(&self) -> f64 {
        self.allowed_step
    }

    /// Horizontal orientation.
    #[must_use]
    pub const fn facing(&self) -> Facing {
        self.facing
    }

    /// Whether further non-forced damage is currently ignored.
    #[must_use]
    pub const fn is_invincible(&self) -> bool {
        self.invincible
    }

    /// Time left in the invincibility window.
    #[must_use]
    pub const fn invincibility_remaining(&self) -> Duration {
        self.invincible_remaining
    }

    /// Whether health reached the minimum.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.dead
    }

    /// Sprite selection state; actors without an attack never report attacking.
    #[must_use]
    pub const fn sprite(&self) -> SpriteState {
        SpriteState {
            facing: self.facing,
            invincible: self.invincible,
            attacking: false,
        }
    }

    /// Health figures for the HUD.
    #[must_use]
    pub fn health(&self) -> HealthReading {
        HealthReading::from(&self.vitality)
    }

    /// Applies this actor's damage to `other`, respecting its invincibility.
    pub fn inflict_on(&self, other: &mut Actor) -> Option<DamageReport> {
        inflict(self, other, false)
    }

    /// Receives `amount` damage from `source`.
    ///
    /// Ignored while invincible unless `force` is set. A successful hit
    /// restarts the invincibility window and marks the actor dead once its
    /// health reaches the minimum.
    pub fn receive_damage(
        &mut self,
        amount: u32,
        source: CombatantKind,
        force: bool,
    ) -> Option<DamageReport> {
        if self.invincible && !force {
            return None;
        }

        self.vitality.apply_damage(amount);
        self.invincible = true;
        self.invincible_remaining = INVINCIBILITY_DURATION;

        let died = !self.dead && self.vitality.is_depleted();
        if died {
            self.dead = true;
        }

        let name = self.kind.display_name();
        info!(
            source = source.display_name(),
            receiver = name,
            amount,
            health = self.vitality.current(),
            "{} inflicts {} damage points on {}. {}'s current health: {}/{}",
            source.display_name(),
            amount,
            name,
            name,
            self.vitality.current(),
            self.vitality.max(),
        );

        Some(DamageReport {
            source,
            amount,
            health: self.vitality.current(),
            max_health: self.vitality.max(),
            died,
        })
    }

    /// Counts the invincibility window down by `elapsed`.
    pub fn update_invincibility(&mut self, elapsed: Duration) {
        if !self.invincible {
            return;
        }

        self.invincible_remaining = self.invincible_remaining.saturating_sub(elapsed);
        if self.invincible_remaining.is_zero() {
            self.invincible = false;
        }
    }

    /// Computes the collision-free distance for a move without performing it.
    ///
    /// The base step is scaled by `timescale` before clipping.
    pub fn plan_move<'a, P, I>(
        &self,
        direction: Direction,
        obstructions: I,
        world: &BoundingBox,
        timescale: Timescale,
        policy: &mut P,
    ) -> f64
    where
        P: CollisionPolicy + ?Sized,
        I: IntoIterator<Item = Obstruction<'a>>,
    {
        let step = timescale.scale(self.step_size);
        resolve_step(
            self.body.bounds(),
            self.body.position(),
            direction,
            step,
            world,
            obstructions,
            policy,
        )
    }

    /// Translates by a distance previously produced by [`Actor::plan_move`].
    pub fn commit_move(&mut self, direction: Direction, distance: f64) {
        self.allowed_step = distance;
        self.shift(direction, distance, true);
    }

    /// Plans and performs a move in one call.
    ///
    /// Returns the distance travelled.
    pub fn move_and_resolve<'a, P, I>(
        &mut self,
        direction: Direction,
        obstructions: I,
        world: &BoundingBox,
        timescale: Timescale,
        policy: &mut P,
    ) -> f64
    where
        P: CollisionPolicy + ?Sized,
        I: IntoIterator<Item = Obstruction<'a>>,
    {
        let distance = self.plan_move(direction, obstructions, world, timescale, policy);
        self.commit_move(direction, distance);
        distance
    }

    /// Translates without collision checks; `turn` controls whether a
    /// horizontal shift updates the facing.
    pub(crate) fn shift(&mut self, direction: Direction, distance: f64, turn: bool) {
        self.body.translate(direction, distance);
        if turn {
            if let Some(facing) = Facing::from_direction(direction) {
                self.facing = facing;
            }
        }
    }

    pub(crate) fn set_width(&mut self, width: f64) {
        self.body.set_width(width);
    }
}

impl Combatant for Actor {
    fn combatant(&self) -> CombatantKind {
        self.kind
    }
}
