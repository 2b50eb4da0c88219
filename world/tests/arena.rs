use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use shadow_dimension_core::{
    ActorRef, CombatantKind, Command, Direction, EntityId, Event, Facing, HostileKind, ObjectKind,
    ObjectSnapshot, Quadrant, SpriteSize, Timescale,
};
use shadow_dimension_world::{
    self as world,
    actor::Actor,
    hostile::{Hostile, HostileProfile, WanderRoll},
    movement::SolidPolicy,
    query, Arena, ArenaConfig, LevelError,
};

const FRAME: Duration = Duration::from_millis(100);

const BOUNDARY: &str = "TopLeft,0,0\nBottomRight,1024,768\n";

/// Navec enclosed by walls flush against every side of its 110x120 body.
const CAGED_BOSS: &str = "\
Navec,400,300
Wall,350,300
Wall,350,350
Wall,350,400
Wall,510,300
Wall,510,350
Wall,510,400
Wall,400,250
Wall,450,250
Wall,500,250
Wall,400,420
Wall,450,420
Wall,500,420
";

fn build(level: &str, seed: u64) -> Arena {
    let text = format!("{BOUNDARY}{level}");
    Arena::from_level_text(
        &text,
        &ArenaConfig::default(),
        &mut ChaCha8Rng::seed_from_u64(seed),
    )
    .expect("level builds")
}

fn tick(arena: &mut Arena, timescale: Timescale) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(
        arena,
        Command::Tick {
            dt: FRAME,
            timescale,
        },
        &mut events,
    );
    events
}

fn step(arena: &mut Arena, direction: Direction) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(arena, Command::MovePlayer { direction }, &mut events);
    events
}

#[test]
fn consecutive_hits_walk_health_down() {
    let mut actor = Actor::new(
        CombatantKind::Demon,
        0.0,
        0.0,
        SpriteSize::new(60.0, 60.0),
        40,
        0.0,
        Facing::Right,
    );

    let mut health = vec![actor.vitality().current()];
    for _ in 0..3 {
        let report = actor
            .receive_damage(10, CombatantKind::Player, false)
            .expect("vulnerable actor takes damage");
        health.push(report.health);
        actor.update_invincibility(Duration::from_millis(3000));
    }

    assert_eq!(health, vec![40, 30, 20, 10]);
    assert!(!actor.is_dead());

    let _ = actor.receive_damage(10, CombatantKind::Player, false);
    assert_eq!(actor.vitality().current(), 0);
    assert!(actor.is_dead());
}

#[test]
fn doubled_timescale_compounds_the_step() {
    let actor = Actor::new(
        CombatantKind::Player,
        500.0,
        400.0,
        SpriteSize::new(60.0, 66.0),
        100,
        2.0,
        Facing::Right,
    );
    let boundary = query::world_bounds(&build("Fae,10,10\n", 0));

    let distance = actor.plan_move(
        Direction::East,
        [],
        &boundary,
        Timescale::new(2),
        &mut SolidPolicy,
    );
    assert!((distance - 4.5).abs() < 1e-12);
}

#[test]
fn hazard_lands_south_east_of_a_hostile_above_and_left_of_its_target() {
    let config = ArenaConfig::default();
    let demon = config.sprites.demon;
    let player = config.sprites.player;

    let mut hostile = Hostile::new(
        EntityId::new(1),
        HostileKind::Demon,
        100.0 - demon.width() / 2.0,
        100.0 - demon.height() / 2.0,
        HostileProfile::from_config(&config, HostileKind::Demon),
        WanderRoll::stationary(Facing::Right),
    );
    let mut target = Actor::new(
        CombatantKind::Player,
        200.0 - player.width() / 2.0,
        150.0 - player.height() / 2.0,
        player,
        100,
        2.0,
        Facing::Right,
    );

    let mut events = Vec::new();
    hostile.track(&mut target, ActorRef::Player, &mut events);

    let hazard = hostile.hazard().expect("target within 150 units");
    assert_eq!(hazard.quadrant(), Quadrant::SouthEast);
    let owner = *hostile.actor().body().bounds();
    assert_eq!(hazard.body().bounds().left(), owner.right());
    assert_eq!(hazard.body().bounds().top(), owner.bottom());
}

#[test]
fn level_without_both_corners_is_rejected() {
    let config = ArenaConfig::default();
    for text in [
        "Fae,10,10\nTopLeft,0,0\n",
        "Fae,10,10\nBottomRight,1024,768\n",
        "Fae,10,10\n",
    ] {
        let result = Arena::from_level_text(text, &config, &mut ChaCha8Rng::seed_from_u64(0));
        assert_eq!(result.err(), Some(LevelError::MissingCorner));
    }
}

#[test]
fn level_without_player_is_rejected() {
    let result = Arena::from_level_text(
        "TopLeft,0,0\nBottomRight,1024,768\nWall,5,5\n",
        &ArenaConfig::default(),
        &mut ChaCha8Rng::seed_from_u64(0),
    );
    assert_eq!(result.err(), Some(LevelError::MissingPlayer));
}

#[test]
fn invalid_config_is_rejected_before_construction() {
    let mut config = ArenaConfig::default();
    config.detect_radius.demon = -1.0;
    let result = Arena::from_level_text(
        "TopLeft,0,0\nBottomRight,1024,768\nFae,1,1\n",
        &config,
        &mut ChaCha8Rng::seed_from_u64(0),
    );
    assert!(matches!(result, Err(LevelError::Config(_))));
}

#[test]
fn reaching_the_goal_clears_a_boss_free_level() {
    let mut arena = build("Fae,948,668\n", 0);
    assert!(!query::has_won(&arena));

    let _ = step(&mut arena, Direction::East);
    assert!(!query::has_won(&arena));
    let _ = step(&mut arena, Direction::South);
    assert!(query::has_won(&arena));
}

#[test]
fn killing_the_boss_clears_the_level() {
    let mut arena = build(&format!("{CAGED_BOSS}Fae,420,320\n"), 5);
    let boss = query::boss(&arena).expect("level has a boss");
    let mut log = Vec::new();

    for _ in 0..200 {
        if query::has_won(&arena) {
            break;
        }
        world::apply(&mut arena, Command::StartAttack, &mut log);
        log.extend(tick(&mut arena, Timescale::NEUTRAL));
    }

    assert!(query::has_won(&arena));
    assert!(!query::has_lost(&arena));
    assert_eq!(query::tick_index(&arena), 91);

    let hits: Vec<u32> = log
        .iter()
        .filter_map(|event| match event {
            Event::DamageInflicted {
                target: ActorRef::Hostile(id),
                health,
                ..
            } if *id == boss => Some(*health),
            _ => None,
        })
        .collect();
    assert_eq!(hits, vec![60, 40, 20, 0]);
    assert!(log.contains(&Event::ActorDied {
        target: ActorRef::Hostile(boss),
    }));
    assert!(log.contains(&Event::ObjectRemoved {
        object: boss,
        kind: ObjectKind::Hostile(HostileKind::Navec),
    }));
}

#[test]
fn caged_hostile_reverses_every_frame_without_moving() {
    let mut arena = build(&format!("{CAGED_BOSS}Fae,10,10\n"), 11);
    let before = navec(&arena);

    for _ in 0..6 {
        let events = tick(&mut arena, Timescale::new(3));
        let reversals = events
            .iter()
            .filter(|event| matches!(event, Event::WanderReversed { .. }))
            .count();
        assert_eq!(reversals, 1);
    }

    let after = navec(&arena);
    assert_eq!(before.bounds, after.bounds);
    assert_eq!(before.wander, after.wander, "six reversals restore the heading");
}

#[test]
fn sinkholes_drain_the_player_and_are_pruned() {
    let mut arena = build(
        "Fae,100,100\nSinkhole,161,100\nSinkhole,100,49\nSinkhole,100,165\nSinkhole,51,100\n",
        0,
    );

    let mut log = Vec::new();
    for direction in [
        Direction::East,
        Direction::North,
        Direction::South,
        Direction::West,
    ] {
        log.extend(step(&mut arena, direction));
    }

    let health: Vec<u32> = log
        .iter()
        .filter_map(|event| match event {
            Event::DamageInflicted {
                source: CombatantKind::Sinkhole,
                health,
                ..
            } => Some(*health),
            _ => None,
        })
        .collect();
    assert_eq!(health, vec![70, 40, 10, 0]);
    assert!(log.contains(&Event::ActorDied {
        target: ActorRef::Player,
    }));
    assert!(query::has_lost(&arena));
    assert_eq!(query::objects(&arena).len(), 4);

    let events = tick(&mut arena, Timescale::NEUTRAL);
    let removed = events
        .iter()
        .filter(|event| {
            matches!(
                event,
                Event::ObjectRemoved {
                    kind: ObjectKind::Sinkhole,
                    ..
                }
            )
        })
        .count();
    assert_eq!(removed, 4);
    assert!(query::objects(&arena).is_empty());
}

#[test]
fn identical_seeds_replay_identically() {
    let level = "Fae,20,20\nDemon,300,300\nDemon,600,200\nDemon,150,500\nNavec,700,500\nTree,400,400\n";
    let first = replay(level, 42);
    let second = replay(level, 42);
    assert_eq!(first, second);
}

fn replay(level: &str, seed: u64) -> (Vec<Event>, Vec<ObjectSnapshot>) {
    let mut arena = build(level, seed);
    let mut log = Vec::new();

    for frame in 0..300u32 {
        let timescale = Timescale::new(i8::try_from(frame % 7).unwrap_or(0) - 3);
        log.extend(tick(&mut arena, timescale));
        let direction = if frame % 2 == 0 {
            Direction::East
        } else {
            Direction::South
        };
        log.extend(step(&mut arena, direction));
    }

    (log, query::objects(&arena).into_vec())
}

fn navec(arena: &Arena) -> ObjectSnapshot {
    query::objects(arena)
        .into_vec()
        .into_iter()
        .find(|object| object.kind == ObjectKind::Hostile(HostileKind::Navec))
        .expect("navec is present")
}
