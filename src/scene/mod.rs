//! The collision scene: obstacle and actor storage plus occupancy and projection queries.
//!
//! A [`Scene`] mutably borrows the driver's obstacle and actor slices for its whole lifetime
//! and owns the per-actor bookkeeping sized from them. Changing the number of obstacles or
//! actors therefore means building a new scene.

mod resolve;

use crate::error::SceneError;
use crate::narrow::project::{Direction, Project};
use crate::narrow::swept::{collision_side, Side};
use crate::narrow::{Actor, Hitbox, Overlap, Segment, Solid};
use crate::{Fp, Vec2};
use glam::IVec2;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Gravity {
    /// Actors fall toward +y.
    Down,
    /// Actors fall toward -y.
    Up,
}
impl Gravity {
    pub fn from_sign(sign: i32) -> Result<Gravity, SceneError> {
        match sign {
            1 => Ok(Gravity::Down),
            -1 => Ok(Gravity::Up),
            _ => Err(SceneError::GravitySign(sign)),
        }
    }
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Gravity::Down => 1,
            Gravity::Up => -1,
        }
    }
    #[inline]
    pub fn direction(self) -> Direction {
        match self {
            Gravity::Down => Direction::Down,
            Gravity::Up => Direction::Up,
        }
    }
    #[inline]
    pub fn flipped(self) -> Gravity {
        match self {
            Gravity::Down => Gravity::Up,
            Gravity::Up => Gravity::Down,
        }
    }
    #[inline]
    pub(crate) fn crushing_side(self) -> Side {
        //! The side of a standing actor facing away from its support.
        match self {
            Gravity::Down => Side::Top,
            Gravity::Up => Side::Bottom,
        }
    }
}
impl Default for Gravity {
    fn default() -> Self {
        Gravity::Down
    }
}

/// Identifies an obstacle by its index in the scene's storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Obstacle {
    Solid(usize),
    Segment(usize),
}

/// The nearest contact in some direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub dist: Fp,
    /// `None` when nothing lies that way.
    pub obstacle: Option<Obstacle>,
}

pub struct Scene<'a> {
    gravity: Gravity,
    solids: &'a mut [Solid],
    segments: &'a mut [Segment],
    actors: &'a mut [Actor],
    /// Cleared once and for all when an actor dies.
    alive: Vec<bool>,
    /// Actor positions at the start of the last tick.
    prev: Vec<Vec2>,
}

impl<'a> Scene<'a> {
    pub fn new(
        gravity: Gravity,
        solids: &'a mut [Solid],
        segments: &'a mut [Segment],
        actors: &'a mut [Actor],
    ) -> Result<Scene<'a>, SceneError> {
        if let Some(index) = solids.iter().position(|s| s.size.x == 0 || s.size.y == 0) {
            return Err(SceneError::EmptySolid { index });
        }
        if let Some(index) = segments.iter().position(|s| s.len == 0) {
            return Err(SceneError::EmptySegment { index });
        }
        if let Some(index) = actors.iter().position(|a| a.size.x == 0 || a.size.y == 0) {
            return Err(SceneError::EmptyActor { index });
        }

        let alive = vec![true; actors.len()];
        let prev = actors.iter().map(|a| a.pos).collect();
        Ok(Scene { gravity, solids, segments, actors, alive, prev })
    }

    // ---------- Access ---------- //

    #[inline]
    pub fn gravity(&self) -> Gravity {
        self.gravity
    }
    pub fn set_gravity(&mut self, gravity: Gravity) {
        //! Takes effect from the next tick.
        self.gravity = gravity;
    }

    #[inline]
    pub fn solids(&self) -> &[Solid] {
        &self.solids
    }
    #[inline]
    pub fn solids_mut(&mut self) -> &mut [Solid] {
        &mut self.solids
    }
    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
    #[inline]
    pub fn segments_mut(&mut self) -> &mut [Segment] {
        &mut self.segments
    }
    #[inline]
    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }
    #[inline]
    pub fn actors_mut(&mut self) -> &mut [Actor] {
        &mut self.actors
    }
    #[inline]
    pub fn actor(&self, index: usize) -> Option<&Actor> {
        self.actors.get(index)
    }
    #[inline]
    pub fn actor_mut(&mut self, index: usize) -> Option<&mut Actor> {
        self.actors.get_mut(index)
    }

    #[inline]
    pub fn alive(&self) -> &[bool] {
        &self.alive
    }
    #[inline]
    pub fn is_alive(&self, index: usize) -> bool {
        self.alive.get(index).copied().unwrap_or(false)
    }
    pub fn living(&self) -> impl Iterator<Item = (usize, &Actor)> + '_ {
        self.alive
            .iter()
            .zip(self.actors.iter())
            .enumerate()
            .filter(|(_, (alive, _))| **alive)
            .map(|(i, (_, actor))| (i, actor))
    }
    pub fn kill(&mut self, index: usize) -> bool {
        //! Kills an actor on the driver's behalf, e.g. when it touches a hazard.
        //! Returns whether the actor was alive.
        if !self.is_alive(index) {
            return false;
        }
        self.die(index, "killed");
        true
    }

    pub fn displacement(&self, index: usize) -> Option<Vec2> {
        //! How far the actor moved during the last tick, carrying and pushing included.
        Some(self.actors.get(index)?.pos - *self.prev.get(index)?)
    }

    pub(crate) fn die(&mut self, index: usize, cause: &str) {
        if std::mem::replace(&mut self.alive[index], false) {
            log::debug!("actor {} died ({}) at {:?}", index, cause, self.actors[index].pos);
        }
    }

    #[inline]
    pub(crate) fn shift(&mut self, obstacle: Obstacle, offset: IVec2) {
        match obstacle {
            Obstacle::Solid(i) => self.solids[i].pos += offset,
            Obstacle::Segment(i) => self.segments[i].pos += offset,
        }
    }

    // ---------- Queries ---------- //

    pub fn place_solid(&self, hitbox: &Hitbox) -> bool {
        //! Returns whether any solid occupies part of `hitbox`. Segments are ignored.
        self.solids.iter().any(|s| s.hitbox_test(hitbox))
    }
    pub fn place_free(&self, hitbox: &Hitbox) -> bool {
        //! Returns whether `hitbox` is clear of solids and crossed by no segment, blocking or not.
        !self.place_solid(hitbox) && !self.segments.iter().any(|s| s.hitbox_test(hitbox))
    }

    pub fn project_free_with(&self, actor: &Actor, dir: Direction) -> Projection {
        //! Finds the nearest obstacle `actor` would touch travelling toward `dir`.
        //!
        //! Solids are scanned before segments in storage order; a later obstacle only wins when
        //! strictly closer.
        let mut nearest = Projection { dist: Fp::INFINITY, obstacle: None };
        for (i, solid) in self.solids.iter().enumerate() {
            let dist = solid.project(actor, dir);
            if dist < nearest.dist {
                nearest = Projection { dist, obstacle: Some(Obstacle::Solid(i)) };
            }
        }
        for (i, segment) in self.segments.iter().enumerate() {
            let dist = segment.project(actor, dir);
            if dist < nearest.dist {
                nearest = Projection { dist, obstacle: Some(Obstacle::Segment(i)) };
            }
        }
        nearest
    }
    #[inline]
    pub fn project_free(&self, actor: &Actor, dir: Direction) -> Fp {
        self.project_free_with(actor, dir).dist
    }
    #[inline]
    pub fn project_free_left(&self, actor: &Actor) -> Fp {
        self.project_free(actor, Direction::Left)
    }
    #[inline]
    pub fn project_free_up(&self, actor: &Actor) -> Fp {
        self.project_free(actor, Direction::Up)
    }
    #[inline]
    pub fn project_free_right(&self, actor: &Actor) -> Fp {
        self.project_free(actor, Direction::Right)
    }
    #[inline]
    pub fn project_free_down(&self, actor: &Actor) -> Fp {
        self.project_free(actor, Direction::Down)
    }

    pub fn is_standing(&self, index: usize, epsilon: Fp) -> bool {
        //! Whether the actor is within `epsilon` of footing in the gravity direction.
        match self.actors.get(index) {
            Some(actor) => self.project_free(actor, self.gravity.direction()) <= epsilon,
            None => false,
        }
    }

    pub fn collision_side(&self, actor: &Actor, solid: usize, displacement: IVec2) -> Option<Side> {
        //! Which side of `actor` solid `solid` would strike if it moved by `displacement`.
        //! The solid itself is left untouched.
        let moved = Solid { vel: displacement, ..*self.solids.get(solid)? };
        collision_side(actor, &moved)
    }
}
