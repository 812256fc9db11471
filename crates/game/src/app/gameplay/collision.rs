use engine::{Rect, Vec2};

use super::level::{LevelScene, ObjectId, ObjectKind, Playfield, SceneObject};

pub const MOVEMENT_INCREMENT: f32 = 10.0;
pub const REST_TOLERANCE: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn offset(self, step: f32) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -step),
            Direction::Down => Vec2::new(0.0, step),
            Direction::Left => Vec2::new(-step, 0.0),
            Direction::Right => Vec2::new(step, 0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionSettings {
    pub step: f32,
    pub rest_tolerance: f32,
}

impl Default for CollisionSettings {
    fn default() -> Self {
        Self {
            step: MOVEMENT_INCREMENT,
            rest_tolerance: REST_TOLERANCE,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckOptions {
    /// Leave the character out of the obstacle set.
    pub ignore_character: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Clear,
    BoundaryHit,
    BlockedBy(ObjectId),
    Hazard(ObjectId),
    /// The character comes to rest at this position instead of taking the
    /// plain step.
    SnapTo(Vec2),
    /// The pushed object may move and lifts the character one step with it.
    Carry { character: ObjectId },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Aabb {
    pub fn of(object: &SceneObject) -> Self {
        Self::from(object.rect())
    }

    pub fn translated(self, offset: Vec2) -> Self {
        Self {
            min_x: self.min_x + offset.x,
            max_x: self.max_x + offset.x,
            min_y: self.min_y + offset.y,
            max_y: self.max_y + offset.y,
        }
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.min_x, self.min_y)
    }

    fn with_bottom(self, bottom: f32) -> Self {
        self.translated(Vec2::new(0.0, bottom - self.max_y))
    }
}

impl From<Rect> for Aabb {
    fn from(rect: Rect) -> Self {
        Self {
            min_x: rect.x,
            max_x: rect.right(),
            min_y: rect.y,
            max_y: rect.bottom(),
        }
    }
}

/// Closed-interval overlap: touching endpoints count. Both directions are
/// checked so a wider interval containing a narrower one is detected.
pub fn intervals_overlap(a_min: f32, a_max: f32, b_min: f32, b_max: f32) -> bool {
    let a_in_b = (a_min >= b_min && a_min <= b_max) || (a_max >= b_min && a_max <= b_max);
    let b_in_a = (b_min >= a_min && b_min <= a_max) || (b_max >= a_min && b_max <= a_max);
    a_in_b || b_in_a
}

pub fn boxes_overlap(a: &Aabb, b: &Aabb) -> bool {
    intervals_overlap(a.min_x, a.max_x, b.min_x, b.max_x)
        && intervals_overlap(a.min_y, a.max_y, b.min_y, b.max_y)
}

pub fn outside_playfield(aabb: &Aabb, playfield: Playfield) -> bool {
    aabb.min_x < 0.0
        || aabb.min_y < 0.0
        || aabb.max_x > playfield.width
        || aabb.max_y > playfield.height
}

fn contacts<'s>(
    scene: &'s LevelScene,
    moved: Aabb,
    skip: impl Fn(&SceneObject) -> bool + 's,
) -> impl Iterator<Item = &'s SceneObject> + 's {
    scene
        .objects()
        .iter()
        .filter(move |other| !skip(other) && boxes_overlap(&moved, &Aabb::of(other)))
}

fn boundary_or_clear(moved: &Aabb, playfield: Playfield) -> Outcome {
    if outside_playfield(moved, playfield) {
        Outcome::BoundaryHit
    } else {
        Outcome::Clear
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CollisionEngine {
    settings: CollisionSettings,
}

impl CollisionEngine {
    pub fn new(settings: CollisionSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> CollisionSettings {
        self.settings
    }

    /// Decides whether `candidate` may take one step in `direction`.
    ///
    /// Object contacts are reported before the playfield boundary. Moves of
    /// the character go through the character rules (hazards, resting on
    /// surfaces, landing); every other object uses the plain overlap test
    /// plus the carry rule for upward pushes into the character.
    pub fn check_move(
        &self,
        scene: &LevelScene,
        candidate: &SceneObject,
        direction: Direction,
        options: CheckOptions,
    ) -> Outcome {
        if candidate.id == scene.character_id() {
            return self.check_character_move(scene, candidate, direction);
        }

        let moved = Aabb::of(candidate).translated(direction.offset(self.settings.step));
        let character_id = scene.character_id();
        let outcome = self.plain_outcome(scene, moved, |other| {
            other.id == candidate.id || (options.ignore_character && other.id == character_id)
        });

        match outcome {
            Outcome::BlockedBy(id)
                if id == character_id && direction == Direction::Up && candidate.moveable =>
            {
                self.try_carry(scene, candidate, moved)
            }
            other => other,
        }
    }

    fn plain_outcome(
        &self,
        scene: &LevelScene,
        moved: Aabb,
        skip: impl Fn(&SceneObject) -> bool,
    ) -> Outcome {
        if let Some(other) = contacts(scene, moved, skip).next() {
            return Outcome::BlockedBy(other.id);
        }
        boundary_or_clear(&moved, scene.playfield())
    }

    fn try_carry(&self, scene: &LevelScene, pusher: &SceneObject, pusher_moved: Aabb) -> Outcome {
        let character = scene.character();
        let lifted = Aabb::of(character).translated(Direction::Up.offset(self.settings.step));
        let character_clear = self.plain_outcome(scene, lifted, |other| {
            other.id == character.id || other.id == pusher.id
        });
        if character_clear != Outcome::Clear {
            return Outcome::BlockedBy(character.id);
        }

        match self.plain_outcome(scene, pusher_moved, |other| {
            other.id == pusher.id || other.id == character.id
        }) {
            Outcome::Clear => Outcome::Carry {
                character: character.id,
            },
            other => other,
        }
    }

    fn check_character_move(
        &self,
        scene: &LevelScene,
        character: &SceneObject,
        direction: Direction,
    ) -> Outcome {
        let current = Aabb::of(character);
        let moved = current.translated(direction.offset(self.settings.step));
        match direction {
            Direction::Left | Direction::Right => self.resolve_sideways(scene, character.id, moved),
            Direction::Down => self.resolve_fall(scene, character.id, current, moved),
            Direction::Up => {
                if let Some(other) = contacts(scene, moved, |other| other.id == character.id).next()
                {
                    return match other.kind {
                        ObjectKind::Hazard => Outcome::Hazard(other.id),
                        _ => Outcome::BlockedBy(other.id),
                    };
                }
                boundary_or_clear(&moved, scene.playfield())
            }
        }
    }

    fn resolve_sideways(&self, scene: &LevelScene, character_id: ObjectId, moved: Aabb) -> Outcome {
        let tolerance = self.settings.rest_tolerance;
        let mut support_top: Option<f32> = None;

        for other in contacts(scene, moved, |other| other.id == character_id) {
            match other.kind {
                ObjectKind::Hazard => return Outcome::Hazard(other.id),
                ObjectKind::Goal => return Outcome::BlockedBy(other.id),
                ObjectKind::Character | ObjectKind::Solid => {}
            }
            let top = other.position.y;
            if (moved.max_y - top).abs() <= tolerance {
                support_top = Some(support_top.map_or(top, |best| best.min(top)));
            } else {
                return Outcome::BlockedBy(other.id);
            }
        }

        let snapped = match support_top {
            Some(top) if top != moved.max_y => moved.with_bottom(top),
            _ => return boundary_or_clear(&moved, scene.playfield()),
        };

        for other in contacts(scene, snapped, |other| other.id == character_id) {
            match other.kind {
                ObjectKind::Hazard => return Outcome::Hazard(other.id),
                ObjectKind::Goal => return Outcome::BlockedBy(other.id),
                ObjectKind::Character | ObjectKind::Solid => {}
            }
            if (snapped.max_y - other.position.y).abs() > tolerance {
                return Outcome::BlockedBy(other.id);
            }
        }

        if outside_playfield(&snapped, scene.playfield()) {
            Outcome::BoundaryHit
        } else {
            Outcome::SnapTo(snapped.min())
        }
    }

    fn resolve_fall(
        &self,
        scene: &LevelScene,
        character_id: ObjectId,
        current: Aabb,
        moved: Aabb,
    ) -> Outcome {
        let mut landing: Option<(f32, ObjectId)> = None;
        let mut blocker: Option<ObjectId> = None;
        let mut special: Vec<&SceneObject> = Vec::new();

        for other in contacts(scene, moved, |other| other.id == character_id) {
            if matches!(other.kind, ObjectKind::Hazard | ObjectKind::Goal) {
                special.push(other);
                continue;
            }
            let top = other.position.y;
            if top >= current.max_y {
                if landing.map_or(true, |(best, _)| top < best) {
                    landing = Some((top, other.id));
                }
            } else if blocker.is_none() {
                blocker = Some(other.id);
            }
        }

        // A hazard or goal hidden below the landing surface is never reached.
        let reached = special.into_iter().find(|other| {
            landing.map_or(true, |(landing_top, _)| other.position.y <= landing_top)
        });
        if let Some(other) = reached {
            return match other.kind {
                ObjectKind::Hazard => Outcome::Hazard(other.id),
                _ => Outcome::BlockedBy(other.id),
            };
        }

        if let Some(id) = blocker {
            return Outcome::BlockedBy(id);
        }

        match landing {
            Some((top, id)) => {
                let rest = current.with_bottom(top);
                if rest.min_y > current.min_y && !outside_playfield(&rest, scene.playfield()) {
                    Outcome::SnapTo(rest.min())
                } else {
                    Outcome::BlockedBy(id)
                }
            }
            None => boundary_or_clear(&moved, scene.playfield()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::gameplay::level::{
        load_level, Dimension, LevelSource, RawPosition, RawSceneObject,
    };

    const FIELD: Playfield = Playfield::new(800.0, 600.0);

    fn raw(name: &str, id: u32, rect: [f32; 4], moveable: bool) -> RawSceneObject {
        RawSceneObject {
            name: name.to_string(),
            id: ObjectId(id),
            pos: RawPosition {
                x: Dimension::Literal(rect[0]),
                y: Dimension::Literal(rect[1]),
            },
            width: Dimension::Literal(rect[2]),
            height: Dimension::Literal(rect[3]),
            stroke_color: String::new(),
            fill_color: "white".to_string(),
            moveable,
        }
    }

    fn scene(objects: Vec<RawSceneObject>) -> LevelScene {
        load_level(
            &LevelSource {
                scene_data: objects,
            },
            FIELD,
        )
        .expect("scene")
    }

    fn far_character() -> RawSceneObject {
        raw("character", 99, [700.0, 0.0, 20.0, 20.0], false)
    }

    fn check(scene: &LevelScene, id: u32, direction: Direction) -> Outcome {
        check_with(scene, id, direction, CheckOptions::default())
    }

    fn check_with(scene: &LevelScene, id: u32, direction: Direction, options: CheckOptions) -> Outcome {
        let engine = CollisionEngine::default();
        let candidate = scene.object(ObjectId(id)).expect("candidate");
        engine.check_move(scene, candidate, direction, options)
    }

    fn aabb(min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Aabb {
        Aabb {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    #[test]
    fn disjoint_axis_never_overlaps() {
        let a = aabb(0.0, 10.0, 0.0, 10.0);
        let right_of_a = aabb(20.0, 30.0, 0.0, 10.0);
        let below_a = aabb(0.0, 10.0, 20.0, 30.0);

        assert!(!boxes_overlap(&a, &right_of_a));
        assert!(!boxes_overlap(&a, &below_a));
    }

    #[test]
    fn containment_overlaps_in_both_orders() {
        let big = aabb(0.0, 100.0, 0.0, 100.0);
        let small = aabb(40.0, 60.0, 40.0, 60.0);

        assert!(boxes_overlap(&big, &small));
        assert!(boxes_overlap(&small, &big));
        assert!(intervals_overlap(0.0, 100.0, 40.0, 60.0));
        assert!(intervals_overlap(40.0, 60.0, 0.0, 100.0));
    }

    #[test]
    fn touching_edges_overlap() {
        assert!(intervals_overlap(0.0, 10.0, 10.0, 20.0));
        assert!(!intervals_overlap(0.0, 10.0, 10.5, 20.0));
    }

    #[test]
    fn move_inside_playfield_without_contacts_is_clear() {
        let scene = scene(vec![far_character(), raw("box", 1, [100.0, 100.0, 20.0, 20.0], true)]);
        for direction in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            assert_eq!(check(&scene, 1, direction), Outcome::Clear, "{direction:?}");
        }
    }

    #[test]
    fn leaving_playfield_is_boundary_hit() {
        let scene = scene(vec![
            far_character(),
            raw("box", 1, [5.0, 100.0, 20.0, 20.0], true),
            raw("box", 2, [100.0, 575.0, 20.0, 20.0], true),
            raw("box", 3, [775.0, 300.0, 20.0, 20.0], true),
            raw("box", 4, [300.0, 5.0, 20.0, 20.0], true),
        ]);

        assert_eq!(check(&scene, 1, Direction::Left), Outcome::BoundaryHit);
        assert_eq!(check(&scene, 2, Direction::Down), Outcome::BoundaryHit);
        assert_eq!(check(&scene, 3, Direction::Right), Outcome::BoundaryHit);
        assert_eq!(check(&scene, 4, Direction::Up), Outcome::BoundaryHit);
    }

    #[test]
    fn overlapping_object_blocks_move() {
        let scene = scene(vec![
            far_character(),
            raw("box", 1, [100.0, 100.0, 20.0, 20.0], true),
            raw("wall", 2, [125.0, 90.0, 20.0, 50.0], false),
        ]);

        assert_eq!(check(&scene, 1, Direction::Right), Outcome::BlockedBy(ObjectId(2)));
        assert_eq!(check(&scene, 1, Direction::Left), Outcome::Clear);
    }

    #[test]
    fn object_contact_is_reported_before_boundary() {
        let scene = scene(vec![
            far_character(),
            raw("box", 1, [0.0, 100.0, 20.0, 20.0], true),
            raw("wall", 2, [-30.0, 100.0, 25.0, 20.0], false),
        ]);

        assert_eq!(check(&scene, 1, Direction::Left), Outcome::BlockedBy(ObjectId(2)));
    }

    #[test]
    fn death_blocks_plain_objects_without_hazard() {
        let scene = scene(vec![
            far_character(),
            raw("box", 1, [100.0, 100.0, 20.0, 20.0], true),
            raw("death", 2, [100.0, 125.0, 20.0, 20.0], false),
        ]);

        assert_eq!(check(&scene, 1, Direction::Down), Outcome::BlockedBy(ObjectId(2)));
    }

    #[test]
    fn character_steps_onto_surface_within_tolerance() {
        let scene = scene(vec![
            raw("floor", 1, [0.0, 300.0, 800.0, 20.0], false),
            raw("character", 2, [100.0, 280.0, 20.0, 20.0], false),
            raw("step", 3, [130.0, 296.0, 50.0, 4.0], false),
        ]);

        assert_eq!(
            check(&scene, 2, Direction::Right),
            Outcome::SnapTo(Vec2::new(110.0, 276.0))
        );
    }

    #[test]
    fn character_walks_along_resting_surface() {
        let scene = scene(vec![
            raw("floor", 1, [0.0, 300.0, 800.0, 20.0], false),
            raw("character", 2, [100.0, 280.0, 20.0, 20.0], false),
        ]);

        assert_eq!(check(&scene, 2, Direction::Right), Outcome::Clear);
        assert_eq!(check(&scene, 2, Direction::Left), Outcome::Clear);
    }

    #[test]
    fn character_is_blocked_by_tall_wall() {
        let scene = scene(vec![
            raw("floor", 1, [0.0, 300.0, 800.0, 20.0], false),
            raw("character", 2, [100.0, 280.0, 20.0, 20.0], false),
            raw("wall", 3, [130.0, 200.0, 20.0, 100.0], false),
        ]);

        assert_eq!(check(&scene, 2, Direction::Right), Outcome::BlockedBy(ObjectId(3)));
    }

    #[test]
    fn snapped_position_is_rechecked_for_ceilings() {
        let scene = scene(vec![
            raw("floor", 1, [0.0, 300.0, 800.0, 20.0], false),
            raw("character", 2, [100.0, 280.0, 20.0, 20.0], false),
            raw("step", 3, [130.0, 296.0, 50.0, 4.0], false),
            raw("ceiling", 4, [100.0, 260.0, 100.0, 18.0], false),
        ]);

        assert_eq!(check(&scene, 2, Direction::Right), Outcome::BlockedBy(ObjectId(4)));
    }

    #[test]
    fn character_touching_death_is_hazard() {
        let scene = scene(vec![
            raw("character", 1, [100.0, 100.0, 20.0, 20.0], false),
            raw("death", 2, [125.0, 100.0, 20.0, 20.0], false),
            raw("death", 3, [100.0, 125.0, 20.0, 20.0], false),
        ]);

        assert_eq!(check(&scene, 1, Direction::Right), Outcome::Hazard(ObjectId(2)));
        assert_eq!(check(&scene, 1, Direction::Down), Outcome::Hazard(ObjectId(3)));
    }

    #[test]
    fn character_reaching_end_reports_goal_object() {
        let scene = scene(vec![
            raw("character", 1, [80.0, 0.0, 20.0, 20.0], false),
            raw("END", 2, [100.0, 0.0, 20.0, 20.0], false),
        ]);

        assert_eq!(check(&scene, 1, Direction::Right), Outcome::BlockedBy(ObjectId(2)));
    }

    #[test]
    fn falling_character_snaps_onto_floor() {
        let scene = scene(vec![
            raw("character", 1, [100.0, 535.0, 20.0, 20.0], false),
            raw("floor", 2, [0.0, 560.0, 800.0, 40.0], false),
        ]);

        assert_eq!(
            check(&scene, 1, Direction::Down),
            Outcome::SnapTo(Vec2::new(100.0, 540.0))
        );
    }

    #[test]
    fn resting_character_cannot_fall_further() {
        let scene = scene(vec![
            raw("character", 1, [100.0, 540.0, 20.0, 20.0], false),
            raw("floor", 2, [0.0, 560.0, 800.0, 40.0], false),
        ]);

        assert_eq!(check(&scene, 1, Direction::Down), Outcome::BlockedBy(ObjectId(2)));
    }

    #[test]
    fn falling_character_hits_bottom_boundary() {
        let scene = scene(vec![raw("character", 1, [100.0, 580.0, 20.0, 20.0], false)]);
        assert_eq!(check(&scene, 1, Direction::Down), Outcome::BoundaryHit);
    }

    #[test]
    fn landing_picks_nearest_surface_below() {
        let scene = scene(vec![
            raw("character", 1, [100.0, 100.0, 20.0, 20.0], false),
            raw("low", 2, [90.0, 129.0, 40.0, 5.0], false),
            raw("high", 3, [95.0, 124.0, 10.0, 5.0], false),
        ]);

        assert_eq!(
            check(&scene, 1, Direction::Down),
            Outcome::SnapTo(Vec2::new(100.0, 104.0))
        );
    }

    #[test]
    fn pushing_moveable_object_up_carries_character() {
        let scene = scene(vec![
            raw("character", 1, [100.0, 200.0, 20.0, 20.0], false),
            raw("lift", 2, [100.0, 220.0, 20.0, 20.0], true),
        ]);

        assert_eq!(
            check(&scene, 2, Direction::Up),
            Outcome::Carry {
                character: ObjectId(1)
            }
        );
    }

    #[test]
    fn carry_is_refused_when_character_has_no_headroom() {
        let scene = scene(vec![
            raw("ceiling", 3, [0.0, 180.0, 800.0, 10.0], false),
            raw("character", 1, [100.0, 200.0, 20.0, 20.0], false),
            raw("lift", 2, [100.0, 220.0, 20.0, 20.0], true),
        ]);

        assert_eq!(check(&scene, 2, Direction::Up), Outcome::BlockedBy(ObjectId(1)));
    }

    #[test]
    fn carry_does_not_stack_through_objects_resting_on_character() {
        let scene = scene(vec![
            raw("character", 1, [100.0, 200.0, 20.0, 20.0], false),
            raw("lift", 2, [100.0, 220.0, 20.0, 20.0], true),
            raw("hat", 3, [100.0, 180.0, 20.0, 20.0], true),
        ]);

        assert_eq!(check(&scene, 2, Direction::Up), Outcome::BlockedBy(ObjectId(1)));
    }

    #[test]
    fn carry_requires_moveable_pusher_and_upward_push() {
        let scene = scene(vec![
            raw("character", 1, [100.0, 200.0, 20.0, 20.0], false),
            raw("fixed", 2, [100.0, 220.0, 20.0, 20.0], false),
            raw("crate", 3, [75.0, 200.0, 20.0, 20.0], true),
        ]);

        assert_eq!(check(&scene, 2, Direction::Up), Outcome::BlockedBy(ObjectId(1)));
        assert_eq!(check(&scene, 3, Direction::Right), Outcome::BlockedBy(ObjectId(1)));
    }

    #[test]
    fn carry_reports_pusher_obstacle_besides_character() {
        let scene = scene(vec![
            raw("character", 1, [100.0, 200.0, 20.0, 20.0], false),
            raw("lift", 2, [100.0, 220.0, 40.0, 20.0], true),
            raw("overhang", 3, [125.0, 205.0, 20.0, 10.0], false),
        ]);

        assert_eq!(check(&scene, 2, Direction::Up), Outcome::BlockedBy(ObjectId(3)));
    }

    #[test]
    fn ignore_character_skips_character_geometry() {
        let scene = scene(vec![
            raw("character", 1, [100.0, 200.0, 20.0, 20.0], false),
            raw("crate", 2, [75.0, 200.0, 20.0, 20.0], true),
        ]);
        let options = CheckOptions {
            ignore_character: true,
        };

        assert_eq!(check_with(&scene, 2, Direction::Right, options), Outcome::Clear);
    }

    #[test]
    fn hazard_below_landing_surface_is_not_reached() {
        let scene = scene(vec![
            raw("character", 1, [100.0, 535.0, 20.0, 20.0], false),
            raw("floor", 2, [0.0, 560.0, 800.0, 5.0], false),
            raw("death", 3, [0.0, 565.0, 800.0, 35.0], false),
        ]);

        assert_eq!(
            check(&scene, 1, Direction::Down),
            Outcome::SnapTo(Vec2::new(100.0, 540.0))
        );
    }

    #[test]
    fn hazard_level_with_landing_surface_is_reached() {
        let scene = scene(vec![
            raw("character", 1, [100.0, 535.0, 20.0, 20.0], false),
            raw("floor", 2, [0.0, 560.0, 100.0, 40.0], false),
            raw("death", 3, [100.0, 560.0, 100.0, 40.0], false),
        ]);

        assert_eq!(check(&scene, 1, Direction::Down), Outcome::Hazard(ObjectId(3)));
    }

    #[test]
    fn step_up_stops_at_rest_tolerance() {
        let within = scene(vec![
            raw("floor", 1, [0.0, 300.0, 800.0, 20.0], false),
            raw("character", 2, [100.0, 280.0, 20.0, 20.0], false),
            raw("step", 3, [130.0, 295.0, 50.0, 5.0], false),
        ]);
        assert_eq!(
            check(&within, 2, Direction::Right),
            Outcome::SnapTo(Vec2::new(110.0, 275.0))
        );

        let beyond = scene(vec![
            raw("floor", 1, [0.0, 300.0, 800.0, 20.0], false),
            raw("character", 2, [100.0, 280.0, 20.0, 20.0], false),
            raw("step", 3, [130.0, 294.0, 50.0, 6.0], false),
        ]);
        assert_eq!(check(&beyond, 2, Direction::Right), Outcome::BlockedBy(ObjectId(3)));
    }
}
