//! Directional projections: how far an [`Actor`] may travel in a direction before it first
//! touches an obstacle.

use super::{span_test, Actor, Orientation, Segment, Solid};
use crate::Fp;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Axis {
    X,
    Y,
}
impl Axis {
    #[inline]
    pub fn pick<T>(self, x: T, y: T) -> T {
        //! Selects the component belonging to this axis.
        match self {
            Axis::X => x,
            Axis::Y => y,
        }
    }
    #[inline]
    pub fn cross(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
    #[inline]
    pub fn stopped_by(self) -> Orientation {
        //! The segment orientation that can stop travel along this axis.
        match self {
            Axis::X => Orientation::Vertical,
            Axis::Y => Orientation::Horizontal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}
impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Left, Direction::Up, Direction::Right, Direction::Down];

    #[inline]
    pub fn axis(self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::X,
            Direction::Up | Direction::Down => Axis::Y,
        }
    }
    #[inline]
    pub fn is_negative(self) -> bool {
        //! Whether travel decreases the coordinate (left and up, y grows downward).
        matches!(self, Direction::Left | Direction::Up)
    }
    #[inline]
    pub fn toward(axis: Axis, delta: Fp) -> Direction {
        //! The direction of travel along `axis` for a signed `delta`. Zero counts as positive.
        match (axis, delta < 0.0) {
            (Axis::X, true) => Direction::Left,
            (Axis::X, false) => Direction::Right,
            (Axis::Y, true) => Direction::Up,
            (Axis::Y, false) => Direction::Down,
        }
    }
    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
        }
    }
}

// ---------- Project ---------- //

pub trait Project {
    /// Returns the distance `actor` can travel toward `dir` until it touches `self`.
    ///
    /// `Fp::INFINITY` when they can never meet travelling that way. Never negative.
    fn project(&self, actor: &Actor, dir: Direction) -> Fp;
}

impl Project for Solid {
    fn project(&self, actor: &Actor, dir: Direction) -> Fp {
        let hb = actor.hitbox();
        let along = dir.axis();
        let across = along.cross();

        let perpendicular = span_test(
            across.pick(hb.pos.x, hb.pos.y),
            across.pick(hb.size.x, hb.size.y),
            across.pick(self.pos.x, self.pos.y),
            across.pick(self.size.x, self.size.y),
        );
        if !perpendicular {
            return Fp::INFINITY;
        }
        let inside = span_test(
            along.pick(hb.pos.x, hb.pos.y),
            along.pick(hb.size.x, hb.size.y),
            along.pick(self.pos.x, self.pos.y),
            along.pick(self.size.x, self.size.y),
        );
        if inside {
            return 0.0;
        }

        let lo = along.pick(actor.pos.x, actor.pos.y);
        let hi = lo + along.pick(actor.size.x, actor.size.y) as Fp;
        let solid_lo = along.pick(self.pos.x, self.pos.y) as Fp;
        let solid_hi = solid_lo + along.pick(self.size.x, self.size.y) as Fp;

        let gap = if dir.is_negative() {
            if solid_lo >= lo {
                return Fp::INFINITY;
            }
            lo - solid_hi
        } else {
            if solid_lo <= lo {
                return Fp::INFINITY;
            }
            solid_lo - hi
        };
        // rounding may report a sliver of overlap the grid test above did not see
        gap.max(0.0)
    }
}

impl Project for Segment {
    fn project(&self, actor: &Actor, dir: Direction) -> Fp {
        let along = dir.axis();
        if self.orient != along.stopped_by() {
            return Fp::INFINITY;
        }
        // travelling left/up meets the far side, right/down meets the near side
        let blocks = if dir.is_negative() { self.block_far } else { self.block_near };
        if !blocks {
            return Fp::INFINITY;
        }

        let hb = actor.hitbox();
        let across = along.cross();
        let perpendicular = span_test(
            across.pick(hb.pos.x, hb.pos.y),
            across.pick(hb.size.x, hb.size.y),
            across.pick(self.pos.x, self.pos.y),
            self.len,
        );
        if !perpendicular {
            return Fp::INFINITY;
        }

        let at = along.pick(self.pos.x, self.pos.y);
        let lo = along.pick(actor.pos.x, actor.pos.y);
        let hi = lo + along.pick(actor.size.x, actor.size.y) as Fp;
        if dir.is_negative() {
            if at > along.pick(hb.pos.x, hb.pos.y) {
                return Fp::INFINITY;
            }
            (lo - at as Fp).max(0.0)
        } else {
            if at < hi.round() as i32 {
                return Fp::INFINITY;
            }
            (at as Fp - hi).max(0.0)
        }
    }
}

#[inline]
pub fn project_left<P: Project>(actor: &Actor, obstacle: &P) -> Fp {
    obstacle.project(actor, Direction::Left)
}
#[inline]
pub fn project_up<P: Project>(actor: &Actor, obstacle: &P) -> Fp {
    obstacle.project(actor, Direction::Up)
}
#[inline]
pub fn project_right<P: Project>(actor: &Actor, obstacle: &P) -> Fp {
    obstacle.project(actor, Direction::Right)
}
#[inline]
pub fn project_down<P: Project>(actor: &Actor, obstacle: &P) -> Fp {
    obstacle.project(actor, Direction::Down)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_projection_test() {
        let solid = Solid::new(0, 100, 50, 10);

        let above = Actor::new(10.0, 70.0, 10, 20);
        assert_eq!(project_down(&above, &solid), 10.0);
        assert_eq!(project_up(&above, &solid), Fp::INFINITY);
        assert_eq!(project_left(&above, &solid), Fp::INFINITY);
        assert_eq!(project_right(&above, &solid), Fp::INFINITY);

        let below = Actor::new(10.0, 113.0, 10, 20);
        assert_eq!(project_down(&below, &solid), Fp::INFINITY);
        assert_eq!(project_up(&below, &solid), 3.0);

        let inside = Actor::new(10.0, 95.0, 10, 20);
        for &dir in Direction::ALL.iter() {
            assert_eq!(solid.project(&inside, dir), 0.0);
        }

        // no overlap across the direction of travel
        let beside = Actor::new(50.0, 70.0, 10, 20);
        assert_eq!(project_down(&beside, &solid), Fp::INFINITY);
        assert_eq!(project_left(&Actor::new(60.0, 100.0, 10, 10), &solid), 10.0);
        assert_eq!(project_right(&Actor::new(-25.5, 95.0, 10, 10), &solid), 15.5);
    }

    #[test]
    fn solid_projection_never_negative() {
        // 9.6 snaps to 10, the grid says no overlap while the continuous gap is -0.4
        let actor = Actor::new(9.6, 0.0, 5, 5);
        let solid = Solid::new(0, 0, 10, 10);
        assert_eq!(project_left(&actor, &solid), 0.0);
    }

    #[test]
    fn segment_projection_test() {
        let wall = Segment::new(30, 0, 40, Orientation::Vertical, true, false);
        let actor = Actor::new(10.0, 10.0, 10, 10);
        assert_eq!(project_right(&actor, &wall), 10.0);
        assert_eq!(project_left(&actor, &wall), Fp::INFINITY);
        assert_eq!(project_up(&actor, &wall), Fp::INFINITY);
        assert_eq!(project_down(&actor, &wall), Fp::INFINITY);

        // blocks only from the left, so an actor on the right passes
        let right_of = Actor::new(40.0, 10.0, 10, 10);
        assert_eq!(project_left(&right_of, &wall), Fp::INFINITY);

        let two_way = Segment::new(30, 0, 40, Orientation::Vertical, true, true);
        assert_eq!(project_left(&right_of, &two_way), 10.0);
        assert_eq!(project_left(&Actor::new(30.0, 10.0, 10, 10), &two_way), 0.0);

        let platform = Segment::platform(0, 50, 30);
        assert_eq!(project_down(&actor, &platform), 30.0);
        assert_eq!(project_up(&Actor::new(10.0, 60.0, 10, 10), &platform), Fp::INFINITY);
        assert_eq!(project_down(&Actor::new(30.0, 10.0, 10, 10), &platform), Fp::INFINITY);
    }

    #[test]
    fn segment_without_blocking_is_invisible() {
        let ghosts = [
            Segment::new(30, 0, 40, Orientation::Vertical, false, false),
            Segment::new(0, 50, 30, Orientation::Horizontal, false, false),
            Segment::new(0, 0, 100, Orientation::Horizontal, false, false),
        ];
        let actors = [
            Actor::new(10.0, 10.0, 10, 10),
            Actor::new(40.0, 10.0, 10, 10),
            Actor::new(10.0, 60.0, 10, 10),
            Actor::new(-5.5, -20.25, 10, 10),
        ];
        for ghost in ghosts.iter() {
            for actor in actors.iter() {
                for &dir in Direction::ALL.iter() {
                    assert_eq!(ghost.project(actor, dir), Fp::INFINITY);
                }
            }
        }
    }

    #[test]
    fn direction_test() {
        assert_eq!(Direction::toward(Axis::X, -0.5), Direction::Left);
        assert_eq!(Direction::toward(Axis::X, 0.0), Direction::Right);
        assert_eq!(Direction::toward(Axis::Y, -2.0), Direction::Up);
        assert_eq!(Direction::toward(Axis::Y, 2.0), Direction::Down);
        for &dir in Direction::ALL.iter() {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_eq!(dir.opposite().axis(), dir.axis());
            assert_ne!(dir.opposite().is_negative(), dir.is_negative());
        }
    }
}
