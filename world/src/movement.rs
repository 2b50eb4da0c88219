//! Directional move-and-collide resolver shared by every mobile actor.
//!
//! A move is resolved in two phases. [`resolve_step`] scans the world
//! boundary and the object list without mutating anything and returns the
//! largest collision-free distance; the caller then performs a single
//! translation by that amount. Type-specific reactions plug in through
//! [`CollisionPolicy`], whose hooks may only shrink the permitted distance,
//! which keeps the outcome independent of the order objects are visited in.

use glam::DVec2;
use shadow_dimension_core::{BoundingBox, Direction, EntityId, ObjectKind};

/// Object the resolver may collide with during a scan.
#[derive(Clone, Copy, Debug)]
pub struct Obstruction<'a> {
    /// Identifier of the object.
    pub id: EntityId,
    /// Kind of the object.
    pub kind: ObjectKind,
    /// Collision extents of the object.
    pub bounds: &'a BoundingBox,
}

/// Reaction chosen by a [`CollisionPolicy`] when an object lies within reach.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Clip {
    /// Clamp the allowed step to the provided distance.
    At(f64),
    /// Treat the object as passable.
    Ignore,
}

/// Hooks invoked while resolving a move.
pub trait CollisionPolicy {
    /// Called when the world boundary lies closer than the allowed step.
    fn world_bound_reached(&mut self) {}

    /// Called when `object` lies `distance` units ahead, closer than the
    /// currently allowed step. Defaults to stopping in front of the object.
    fn object_reached(
        &mut self,
        distance: f64,
        object: Obstruction<'_>,
        direction: Direction,
    ) -> Clip {
        let _ = (object, direction);
        Clip::At(distance)
    }
}

/// Policy that treats every object as a wall and ignores collision events.
#[derive(Clone, Copy, Debug, Default)]
pub struct SolidPolicy;

impl CollisionPolicy for SolidPolicy {}

/// Computes how far a box may travel toward `direction`, up to `step`.
///
/// `anchor` is the mover's top-left position; world-bound distances are
/// measured from it. The returned distance is never negative and never
/// exceeds `step`.
pub fn resolve_step<'a, P, I>(
    mover: &BoundingBox,
    anchor: DVec2,
    direction: Direction,
    step: f64,
    world: &BoundingBox,
    obstructions: I,
    policy: &mut P,
) -> f64
where
    P: CollisionPolicy + ?Sized,
    I: IntoIterator<Item = Obstruction<'a>>,
{
    let mut allowed = step.max(0.0);

    let bound_distance = world_bound_distance(anchor, direction, world);
    if bound_distance < allowed {
        allowed = bound_distance.max(0.0);
        policy.world_bound_reached();
    }

    for object in obstructions {
        if !is_adjacent(mover, object.bounds, direction) {
            continue;
        }

        let distance = gap(mover, object.bounds, direction);
        if distance < allowed {
            if let Clip::At(limit) = policy.object_reached(distance, object, direction) {
                allowed = allowed.min(limit.max(0.0));
            }
        }
    }

    debug_assert!(allowed >= 0.0, "allowed step must never be negative");
    allowed
}

/// Signed distance from the anchor to the world edge in the direction of travel.
#[must_use]
pub fn world_bound_distance(anchor: DVec2, direction: Direction, world: &BoundingBox) -> f64 {
    match direction {
        Direction::West => anchor.x - world.left(),
        Direction::East => world.right() - anchor.x,
        Direction::North => anchor.y - world.top(),
        Direction::South => world.bottom() - anchor.y,
    }
}

/// Reports whether `object` lies ahead of `mover` along `direction`.
///
/// The mover's leading edge must be at or behind the object's near edge, and
/// the two boxes must overlap strictly on the perpendicular axis; boxes that
/// merely share a perpendicular edge slide past each other.
#[must_use]
pub fn is_adjacent(mover: &BoundingBox, object: &BoundingBox, direction: Direction) -> bool {
    let vertical_overlap = mover.top() < object.bottom() && mover.bottom() > object.top();
    let horizontal_overlap = mover.left() < object.right() && mover.right() > object.left();

    match direction {
        Direction::West => mover.left() >= object.right() && vertical_overlap,
        Direction::East => mover.right() <= object.left() && vertical_overlap,
        Direction::North => mover.top() >= object.bottom() && horizontal_overlap,
        Direction::South => mover.bottom() <= object.top() && horizontal_overlap,
    }
}

/// Free space between the mover's leading edge and the object's near edge.
#[must_use]
pub fn gap(mover: &BoundingBox, object: &BoundingBox, direction: Direction) -> f64 {
    match direction {
        Direction::West => mover.left() - object.right(),
        Direction::East => object.left() - mover.right(),
        Direction::North => mover.top() - object.bottom(),
        Direction::South => object.top() - mover.bottom(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORLD: BoundingBox = BoundingBox::new(0.0, 500.0, 0.0, 500.0);

    fn mover() -> BoundingBox {
        BoundingBox::new(100.0, 110.0, 100.0, 110.0)
    }

    fn wall(id: u32, bounds: &BoundingBox) -> Obstruction<'_> {
        Obstruction {
            id: EntityId::new(id),
            kind: ObjectKind::Wall,
            bounds,
        }
    }

    #[derive(Default)]
    struct Recorder {
        world_hits: usize,
        objects: Vec<(EntityId, f64)>,
    }

    impl CollisionPolicy for Recorder {
        fn world_bound_reached(&mut self) {
            self.world_hits += 1;
        }

        fn object_reached(
            &mut self,
            distance: f64,
            object: Obstruction<'_>,
            _direction: Direction,
        ) -> Clip {
            self.objects.push((object.id, distance));
            Clip::At(distance)
        }
    }

    #[test]
    fn unobstructed_move_uses_full_step() {
        let bounds = mover();
        let allowed = resolve_step(
            &bounds,
            DVec2::new(100.0, 100.0),
            Direction::East,
            4.0,
            &WORLD,
            std::iter::empty(),
            &mut SolidPolicy,
        );
        assert_eq!(allowed, 4.0);
    }

    #[test]
    fn world_bound_clamps_and_notifies() {
        let bounds = BoundingBox::new(1.5, 11.5, 50.0, 60.0);
        let mut recorder = Recorder::default();
        let allowed = resolve_step(
            &bounds,
            DVec2::new(50.0, 1.5),
            Direction::North,
            2.0,
            &WORLD,
            std::iter::empty(),
            &mut recorder,
        );
        assert_eq!(allowed, 1.5);
        assert_eq!(recorder.world_hits, 1);
    }

    #[test]
    fn world_bound_distance_is_measured_from_the_anchor() {
        let anchor = DVec2::new(498.0, 10.0);
        assert_eq!(world_bound_distance(anchor, Direction::East, &WORLD), 2.0);
        assert_eq!(world_bound_distance(anchor, Direction::West, &WORLD), 498.0);
        assert_eq!(world_bound_distance(anchor, Direction::North, &WORLD), 10.0);
        assert_eq!(world_bound_distance(anchor, Direction::South, &WORLD), 490.0);
    }

    #[test]
    fn nearest_obstruction_wins_regardless_of_order() {
        let bounds = mover();
        let near = BoundingBox::new(100.0, 110.0, 111.0, 121.0);
        let far = BoundingBox::new(100.0, 110.0, 112.5, 122.5);

        let forward = resolve_step(
            &bounds,
            DVec2::new(100.0, 100.0),
            Direction::East,
            5.0,
            &WORLD,
            [wall(1, &near), wall(2, &far)],
            &mut SolidPolicy,
        );
        let backward = resolve_step(
            &bounds,
            DVec2::new(100.0, 100.0),
            Direction::East,
            5.0,
            &WORLD,
            [wall(2, &far), wall(1, &near)],
            &mut SolidPolicy,
        );

        assert_eq!(forward, 1.0);
        assert_eq!(backward, 1.0);
    }

    #[test]
    fn hook_only_fires_for_objects_within_reach() {
        let bounds = mover();
        let near = BoundingBox::new(100.0, 110.0, 111.0, 121.0);
        let distant = BoundingBox::new(100.0, 110.0, 200.0, 210.0);
        let mut recorder = Recorder::default();

        let allowed = resolve_step(
            &bounds,
            DVec2::new(100.0, 100.0),
            Direction::East,
            5.0,
            &WORLD,
            [wall(1, &distant), wall(2, &near)],
            &mut recorder,
        );

        assert_eq!(allowed, 1.0);
        assert_eq!(recorder.objects, vec![(EntityId::new(2), 1.0)]);
    }

    #[test]
    fn perpendicular_edge_contact_is_not_adjacent() {
        let bounds = mover();
        let grazing = BoundingBox::new(110.0, 120.0, 111.0, 121.0);
        assert!(!is_adjacent(&bounds, &grazing, Direction::East));

        let overlapping = BoundingBox::new(109.9, 120.0, 111.0, 121.0);
        assert!(is_adjacent(&bounds, &overlapping, Direction::East));
    }

    #[test]
    fn objects_behind_the_mover_are_ignored() {
        let bounds = mover();
        let behind = BoundingBox::new(100.0, 110.0, 80.0, 99.0);
        assert!(!is_adjacent(&bounds, &behind, Direction::East));
        assert!(is_adjacent(&bounds, &behind, Direction::West));
        assert_eq!(gap(&bounds, &behind, Direction::West), 1.0);
    }

    #[test]
    fn touching_obstruction_blocks_completely() {
        let bounds = mover();
        let flush = BoundingBox::new(110.0, 130.0, 95.0, 105.0);
        let allowed = resolve_step(
            &bounds,
            DVec2::new(100.0, 100.0),
            Direction::South,
            2.0,
            &WORLD,
            [wall(7, &flush)],
            &mut SolidPolicy,
        );
        assert_eq!(allowed, 0.0);
    }

    #[test]
    fn ignored_objects_do_not_clip() {
        struct Ghost;
        impl CollisionPolicy for Ghost {
            fn object_reached(&mut self, _: f64, _: Obstruction<'_>, _: Direction) -> Clip {
                Clip::Ignore
            }
        }

        let bounds = mover();
        let near = BoundingBox::new(100.0, 110.0, 111.0, 121.0);
        let allowed = resolve_step(
            &bounds,
            DVec2::new(100.0, 100.0),
            Direction::East,
            5.0,
            &WORLD,
            [wall(1, &near)],
            &mut Ghost,
        );
        assert_eq!(allowed, 5.0);
    }

    /// Box of side 10 whose near edge sits `gap` units ahead of [`mover`].
    fn ahead(direction: Direction, gap: f64) -> BoundingBox {
        match direction {
            Direction::East => BoundingBox::new(100.0, 110.0, 110.0 + gap, 120.0 + gap),
            Direction::West => BoundingBox::new(100.0, 110.0, 90.0 - gap, 100.0 - gap),
            Direction::North => BoundingBox::new(90.0 - gap, 100.0 - gap, 100.0, 110.0),
            Direction::South => BoundingBox::new(110.0 + gap, 120.0 + gap, 100.0, 110.0),
        }
    }

    fn orders(len: usize) -> Vec<Vec<usize>> {
        if len == 0 {
            return vec![Vec::new()];
        }
        let mut all = Vec::new();
        for order in orders(len - 1) {
            for slot in 0..len {
                let mut next = order.clone();
                next.insert(slot, len - 1);
                all.push(next);
            }
        }
        all
    }

    fn interiors_overlap(a: &BoundingBox, b: &BoundingBox) -> bool {
        a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
    }

    #[test]
    fn every_direction_and_order_clips_to_the_nearest_gap() {
        const STEP: f64 = 2.5;
        let layouts: [(&[f64], f64); 4] = [
            (&[3.0, 7.0], STEP),
            (&[1.5, 3.0, 7.0], 1.5),
            (&[7.0, 0.0, 1.5, 3.0], 0.0),
            (&[2.5, 4.0], STEP),
        ];

        for direction in Direction::ALL {
            for (gaps, expected) in layouts {
                let boxes: Vec<BoundingBox> =
                    gaps.iter().map(|&gap| ahead(direction, gap)).collect();

                for order in orders(boxes.len()) {
                    let obstructions = order
                        .iter()
                        .map(|&index| wall(u32::try_from(index).expect("few boxes"), &boxes[index]));
                    let allowed = resolve_step(
                        &mover(),
                        DVec2::new(100.0, 100.0),
                        direction,
                        STEP,
                        &WORLD,
                        obstructions,
                        &mut SolidPolicy,
                    );

                    assert_eq!(allowed, expected, "{direction:?} {gaps:?} {order:?}");
                    assert!((0.0..=STEP).contains(&allowed));

                    let mut moved = mover();
                    match direction {
                        Direction::East => moved.translate(allowed, 0.0),
                        Direction::West => moved.translate(-allowed, 0.0),
                        Direction::North => moved.translate(0.0, -allowed),
                        Direction::South => moved.translate(0.0, allowed),
                    }
                    for other in &boxes {
                        assert!(
                            !interiors_overlap(&moved, other),
                            "{direction:?} {gaps:?} {order:?} intrudes"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn outside_world_never_yields_negative_step() {
        let bounds = BoundingBox::new(100.0, 110.0, 505.0, 515.0);
        let allowed = resolve_step(
            &bounds,
            DVec2::new(505.0, 100.0),
            Direction::East,
            3.0,
            &WORLD,
            std::iter::empty(),
            &mut SolidPolicy,
        );
        assert_eq!(allowed, 0.0);
    }
}
