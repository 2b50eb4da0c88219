//! The player character: movement with trap handling and a timed melee attack.

use std::time::Duration;

use shadow_dimension_core::{
    ActorRef, ActorSnapshot, BoundingBox, CombatantKind, Direction, EntityId, Event, Facing,
    ObjectKind, SpriteSize, SpriteState, Timescale,
};
use tracing::{debug, info};

use crate::{
    actor::{inflict, Actor},
    movement::{Clip, CollisionPolicy, Obstruction},
    object::{obstructions_excluding, Removable, WorldObject},
};

/// Unscaled player displacement per move command.
pub const PLAYER_STEP: f64 = 2.0;

/// Health the player starts a level with.
pub const PLAYER_MAX_HEALTH: u32 = 100;

/// How long an attack keeps the widened hitbox active.
pub const ATTACK_DURATION: Duration = Duration::from_millis(1000);

/// Delay after an attack ends before the next may start.
pub const ATTACK_COOLDOWN: Duration = Duration::from_millis(2000);

/// Attack state machine of the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackPhase {
    /// An attack may start.
    Ready,
    /// Attack in progress.
    Attacking {
        /// Time left before the attack ends.
        remaining: Duration,
        /// Whether the hitbox was shifted left to extend in front of the player.
        shifted: bool,
    },
    /// Attack over, waiting for the cooldown.
    Cooling {
        /// Time left before another attack may start.
        remaining: Duration,
    },
}

/// Collision reactions of the player: traps are passable but recorded,
/// hostiles are passable, everything else blocks.
#[derive(Debug, Default)]
struct PlayerPolicy {
    traps: Vec<(EntityId, f64)>,
}

impl PlayerPolicy {
    /// Traps whose near edge lies strictly inside the distance travelled.
    fn reached(self, travelled: f64) -> impl Iterator<Item = EntityId> {
        self.traps
            .into_iter()
            .filter(move |&(_, gap)| gap < travelled)
            .map(|(id, _)| id)
    }
}

impl CollisionPolicy for PlayerPolicy {
    fn object_reached(&mut self, distance: f64, object: Obstruction<'_>, _: Direction) -> Clip {
        match object.kind {
            ObjectKind::Sinkhole => {
                self.traps.push((object.id, distance));
                Clip::Ignore
            }
            ObjectKind::Hostile(_) => Clip::Ignore,
            ObjectKind::Wall | ObjectKind::Tree => Clip::At(distance),
        }
    }
}

/// Player-controlled actor.
#[derive(Clone, Debug)]
pub struct Player {
    actor: Actor,
    attack: AttackPhase,
    idle_width: f64,
    attack_width: f64,
}

impl Player {
    /// Creates a full-health player anchored at `(x, y)` facing right.
    #[must_use]
    pub fn new(x: f64, y: f64, idle: SpriteSize, attack: SpriteSize) -> Self {
        Self {
            actor: Actor::new(
                CombatantKind::Player,
                x,
                y,
                idle,
                PLAYER_MAX_HEALTH,
                PLAYER_STEP,
                Facing::Right,
            ),
            attack: AttackPhase::Ready,
            idle_width: idle.width(),
            attack_width: attack.width(),
        }
    }

    /// Underlying actor.
    #[must_use]
    pub const fn actor(&self) -> &Actor {
        &self.actor
    }

    pub(crate) fn actor_mut(&mut self) -> &mut Actor {
        &mut self.actor
    }

    /// Current attack phase.
    #[must_use]
    pub const fn attack_phase(&self) -> AttackPhase {
        self.attack
    }

    /// Whether an attack is in progress.
    #[must_use]
    pub const fn is_attacking(&self) -> bool {
        matches!(self.attack, AttackPhase::Attacking { .. })
    }

    /// Begins an attack, widening the hitbox toward the facing direction.
    ///
    /// Returns `false` while attacking or cooling down.
    pub fn start_attack(&mut self) -> bool {
        if self.attack != AttackPhase::Ready {
            return false;
        }

        let shifted = self.actor.facing() == Facing::Left;
        self.actor.set_width(self.attack_width);
        if shifted {
            self.actor
                .shift(Direction::West, self.attack_width - self.idle_width, false);
        }

        self.attack = AttackPhase::Attacking {
            remaining: ATTACK_DURATION,
            shifted,
        };
        debug!("attack started");
        true
    }

    /// Moves one base step toward `direction` at neutral timescale.
    ///
    /// Sinkholes the committed step actually reaches fire after the move: each
    /// inflicts forced damage and is flagged for removal. A trap cut off by a
    /// nearer wall stays armed.
    pub fn step(
        &mut self,
        direction: Direction,
        objects: &mut [WorldObject],
        world: &BoundingBox,
        out: &mut Vec<Event>,
    ) -> f64 {
        let mut policy = PlayerPolicy::default();
        let distance = self.actor.move_and_resolve(
            direction,
            obstructions_excluding(objects, None),
            world,
            Timescale::NEUTRAL,
            &mut policy,
        );
        out.push(Event::PlayerMoved {
            direction,
            distance,
        });

        for id in policy.reached(distance) {
            let Some(sinkhole) = objects
                .iter_mut()
                .filter_map(WorldObject::as_sinkhole_mut)
                .find(|sinkhole| sinkhole.id() == id)
            else {
                continue;
            };

            info!(sinkhole = id.get(), "sinkhole triggered");
            out.push(Event::SinkholeTriggered { sinkhole: id });
            if let Some(report) = inflict(&*sinkhole, &mut self.actor, true) {
                report.publish(ActorRef::Player, out);
            }
            sinkhole.mark_removed();
        }

        distance
    }

    /// Advances timers by `elapsed` and resolves an active attack against
    /// every overlapping live hostile.
    pub fn update(&mut self, elapsed: Duration, objects: &mut [WorldObject], out: &mut Vec<Event>) {
        self.actor.update_invincibility(elapsed);

        match self.attack {
            AttackPhase::Ready => {}
            AttackPhase::Attacking { remaining, shifted } => {
                self.strike(objects, out);

                let remaining = remaining.saturating_sub(elapsed);
                if remaining.is_zero() {
                    self.end_attack(shifted);
                    out.push(Event::AttackEnded);
                } else {
                    self.attack = AttackPhase::Attacking { remaining, shifted };
                }
            }
            AttackPhase::Cooling { remaining } => {
                let remaining = remaining.saturating_sub(elapsed);
                if remaining.is_zero() {
                    self.attack = AttackPhase::Ready;
                    out.push(Event::AttackReady);
                } else {
                    self.attack = AttackPhase::Cooling { remaining };
                }
            }
        }
    }

    fn strike(&self, objects: &mut [WorldObject], out: &mut Vec<Event>) {
        for hostile in objects.iter_mut().filter_map(WorldObject::as_hostile_mut) {
            if hostile.actor().is_dead() || !self.actor.body().overlaps(hostile.actor().body()) {
                continue;
            }

            let target = ActorRef::Hostile(hostile.id());
            if let Some(report) = inflict(&self.actor, hostile.actor_mut(), false) {
                report.publish(target, out);
            }
        }
    }

    fn end_attack(&mut self, shifted: bool) {
        self.actor.set_width(self.idle_width);
        if shifted {
            self.actor
                .shift(Direction::East, self.attack_width - self.idle_width, false);
        }
        self.attack = AttackPhase::Cooling {
            remaining: ATTACK_COOLDOWN,
        };
        debug!("attack ended");
    }

    /// Sprite selection state, including the attack flag.
    #[must_use]
    pub fn sprite(&self) -> SpriteState {
        let mut sprite = self.actor.sprite();
        sprite.attacking = self.is_attacking();
        sprite
    }

    /// Read-only description for presentation.
    #[must_use]
    pub fn snapshot(&self) -> ActorSnapshot {
        ActorSnapshot {
            kind: self.actor.kind(),
            bounds: *self.actor.body().bounds(),
            sprite: self.sprite(),
            health: self.actor.health(),
            dead: self.actor.is_dead(),
        }
    }
}
