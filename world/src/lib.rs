#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative arena state for Shadow Dimension.
//!
//! The [`Arena`] owns the player, the ordered object list, and the world
//! boundary. Adapters and systems mutate it exclusively through [`apply`] and
//! read it through the [`query`] module.

pub mod actor;
pub mod body;
pub mod config;
pub mod hazard;
pub mod hostile;
pub mod level;
pub mod movement;
pub mod object;
pub mod player;

use std::time::Duration;

use rand::Rng;
use shadow_dimension_core::{
    ActorRef, BoundingBox, Command, EntityId, Event, HostileKind, Timescale,
};
use tracing::{info, warn};

pub use config::{ArenaConfig, ConfigError, DetectRadii, GoalConfig, SpriteTable};
pub use level::{parse_records, LevelError, LevelRecord, RecordKind};

use crate::{
    body::Body,
    hostile::{Hostile, HostileProfile, WanderRoll},
    object::{obstructions_excluding, Obstacle, Sinkhole, WorldObject},
    player::Player,
};

/// Complete simulation state of a single level.
#[derive(Clone, Debug)]
pub struct Arena {
    objects: Vec<WorldObject>,
    world_bounds: BoundingBox,
    player: Player,
    boss: Option<EntityId>,
    goal: GoalConfig,
    tick_index: u64,
}

impl Arena {
    /// Builds an arena from parsed level records.
    ///
    /// Hostile wander rolls are drawn from `rng` in record order.
    pub fn from_records<R>(
        records: &[LevelRecord],
        config: &ArenaConfig,
        rng: &mut R,
    ) -> Result<Self, LevelError>
    where
        R: Rng + ?Sized,
    {
        config.validate()?;
        let sprites = &config.sprites;

        let mut world_bounds = BoundingBox::undefined();
        let mut player = None;
        let mut boss = None;
        let mut objects = Vec::new();
        let mut counter = 0;

        for record in records {
            let (x, y) = (f64::from(record.x), f64::from(record.y));
            match record.kind {
                RecordKind::Player => {
                    if player.is_some() {
                        warn!(x, y, "duplicate player entry replaces the previous one");
                    }
                    player = Some(Player::new(x, y, sprites.player, sprites.player_attack));
                }
                RecordKind::TopLeft => world_bounds.set_top_left(x, y),
                RecordKind::BottomRight => world_bounds.set_bottom_right(x, y),
                RecordKind::Wall | RecordKind::Tree => {
                    let organic = record.kind == RecordKind::Tree;
                    let size = if organic { sprites.tree } else { sprites.wall };
                    objects.push(WorldObject::Obstacle(Obstacle::new(
                        next_id(&mut counter),
                        organic,
                        Body::new(x, y, size),
                    )));
                }
                RecordKind::Sinkhole => objects.push(WorldObject::Sinkhole(Sinkhole::new(
                    next_id(&mut counter),
                    Body::new(x, y, sprites.sinkhole),
                ))),
                RecordKind::Demon | RecordKind::Navec => {
                    let kind = if record.kind == RecordKind::Navec {
                        HostileKind::Navec
                    } else {
                        HostileKind::Demon
                    };
                    let id = next_id(&mut counter);
                    if kind.is_boss() {
                        boss = Some(id);
                    }
                    let roll = WanderRoll::sample(rng, kind.always_aggressive());
                    objects.push(WorldObject::Hostile(Hostile::new(
                        id,
                        kind,
                        x,
                        y,
                        HostileProfile::from_config(config, kind),
                        roll,
                    )));
                }
            }
        }

        if !world_bounds.is_defined() {
            return Err(LevelError::MissingCorner);
        }
        let player = player.ok_or(LevelError::MissingPlayer)?;

        info!(
            objects = objects.len(),
            boss = boss.is_some(),
            "arena constructed"
        );

        Ok(Self {
            objects,
            world_bounds,
            player,
            boss,
            goal: config.goal,
            tick_index: 0,
        })
    }

    /// Parses level text and builds an arena from it.
    pub fn from_level_text<R>(
        text: &str,
        config: &ArenaConfig,
        rng: &mut R,
    ) -> Result<Self, LevelError>
    where
        R: Rng + ?Sized,
    {
        let records = parse_records(text)?;
        Self::from_records(&records, config, rng)
    }

    fn advance_hostiles(&mut self, dt: Duration, timescale: Timescale, out: &mut Vec<Event>) {
        for index in 0..self.objects.len() {
            match self.objects[index].as_hostile_mut() {
                Some(hostile) if !hostile.actor().is_dead() => {
                    hostile.track(self.player.actor_mut(), ActorRef::Player, out);
                }
                _ => continue,
            }

            let plan = self.objects[index].as_hostile().and_then(|hostile| {
                hostile.plan_wander(
                    obstructions_excluding(&self.objects, Some(index)),
                    &self.world_bounds,
                    timescale,
                )
            });

            if let Some(hostile) = self.objects[index].as_hostile_mut() {
                if let Some(plan) = plan {
                    if let Some(wander) = hostile.commit_wander(plan) {
                        out.push(Event::WanderReversed {
                            hostile: hostile.id(),
                            wander,
                        });
                    }
                }
                hostile.update_invincibility(dt);
            }
        }
    }

    fn prune(&mut self, out: &mut Vec<Event>) {
        self.objects.retain(|object| {
            if !object.is_expired() {
                return true;
            }
            out.push(Event::ObjectRemoved {
                object: object.id(),
                kind: object.kind(),
            });
            false
        });
    }
}

fn next_id(counter: &mut u32) -> EntityId {
    *counter = counter.saturating_add(1);
    EntityId::new(*counter)
}

/// Applies the provided command to the arena, mutating state deterministically.
pub fn apply(arena: &mut Arena, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt, timescale } => {
            arena.tick_index = arena.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt, timescale });

            arena.player.update(dt, &mut arena.objects, out_events);
            arena.advance_hostiles(dt, timescale, out_events);
            arena.prune(out_events);
        }
        Command::MovePlayer { direction } => {
            if arena.player.actor().is_dead() {
                return;
            }
            let _ = arena.player.step(
                direction,
                &mut arena.objects,
                &arena.world_bounds,
                out_events,
            );
        }
        Command::StartAttack => {
            if arena.player.actor().is_dead() {
                return;
            }
            if arena.player.start_attack() {
                out_events.push(Event::AttackStarted);
            }
        }
    }
}

/// Query functions that provide read-only access to the arena state.
pub mod query {
    use shadow_dimension_core::{
        ActorSnapshot, BoundingBox, EntityId, HazardSnapshot, ObjectSnapshot, ObjectView,
    };

    use super::Arena;
    use crate::player::AttackPhase;

    /// Captures the player's presentation state.
    #[must_use]
    pub fn player(arena: &Arena) -> ActorSnapshot {
        arena.player.snapshot()
    }

    /// Reports the player's attack state machine.
    #[must_use]
    pub fn attack_phase(arena: &Arena) -> AttackPhase {
        arena.player.attack_phase()
    }

    /// Captures every object in list order.
    #[must_use]
    pub fn objects(arena: &Arena) -> ObjectView {
        let snapshots: Vec<ObjectSnapshot> =
            arena.objects.iter().map(|object| object.snapshot()).collect();
        ObjectView::from_snapshots(snapshots)
    }

    /// Captures every active hazard in owner list order.
    #[must_use]
    pub fn hazards(arena: &Arena) -> Vec<HazardSnapshot> {
        arena
            .objects
            .iter()
            .filter_map(|object| object.as_hostile())
            .filter_map(|hostile| hostile.hazard())
            .map(|hazard| hazard.snapshot())
            .collect()
    }

    /// World boundary established by the level's corner entries.
    #[must_use]
    pub fn world_bounds(arena: &Arena) -> BoundingBox {
        arena.world_bounds
    }

    /// Identifier of the level's boss, if it has one.
    #[must_use]
    pub fn boss(arena: &Arena) -> Option<EntityId> {
        arena.boss
    }

    /// Reports whether the level is cleared.
    ///
    /// Levels with a boss are cleared once the boss is dead; others once the
    /// player's anchor reaches the goal coordinate on both axes.
    #[must_use]
    pub fn has_won(arena: &Arena) -> bool {
        match arena.boss {
            Some(boss) => !arena
                .objects
                .iter()
                .any(|object| object.id() == boss && !object.is_expired()),
            None => {
                let anchor = arena.player.actor().body().position();
                anchor.x >= arena.goal.x && anchor.y >= arena.goal.y
            }
        }
    }

    /// Reports whether the player's health reached the minimum.
    #[must_use]
    pub fn has_lost(arena: &Arena) -> bool {
        arena.player.actor().is_dead()
    }

    /// Number of ticks processed so far.
    #[must_use]
    pub fn tick_index(arena: &Arena) -> u64 {
        arena.tick_index
    }
}
