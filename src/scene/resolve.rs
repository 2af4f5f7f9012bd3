//! The per-tick resolver.

use super::{Obstacle, Scene};
use crate::narrow::project::{Axis, Direction, Project};
use crate::narrow::swept::{collision_side, Side};
use crate::narrow::{Actor, Overlap};
use crate::{Fp, Vec2};
use glam::IVec2;

#[inline]
fn rests_on<O: Overlap>(actor: &Actor, obstacle: &O, grav: i32) -> bool {
    //! Touching `obstacle` one cell toward gravity without overlapping it now.
    let below = actor.translate(Vec2::new(0.0, grav as Fp));
    obstacle.hitbox_test(&below.hitbox()) && !obstacle.hitbox_test(&actor.hitbox())
}

#[inline]
fn set_component(v: &mut Vec2, axis: Axis, value: Fp) {
    match axis {
        Axis::X => v.x = value,
        Axis::Y => v.y = value,
    }
}

impl<'a> Scene<'a> {
    pub fn update(&mut self) {
        //! Advances the scene by one tick.
        //!
        //! 1. Obstacles carry the actors resting on them, then move. An actor standing on a
        //!    Solid is remembered as standing for the rest of the tick.
        //! 2. Every other moving obstacle shoves the actors in its path, then moves. A standing
        //!    actor struck from the side away from its support is crushed.
        //! 3. Actors move by their own velocity, stopping flush at the nearest obstacle on each
        //!    blocked axis and losing that velocity component.
        //!
        //! Any living actor left overlapping a Solid dies. Dead actors are never moved again.
        for (prev, actor) in self.prev.iter_mut().zip(self.actors.iter()) {
            *prev = actor.pos;
        }

        let mut standing = vec![false; self.actors.len()];
        let (carried_solids, carried_segments) = self.carry_phase(&mut standing);
        self.push_with_solids(&carried_solids, &standing);
        self.push_with_segments(&carried_segments);
        self.move_actors();
    }

    // ---------- Carry ---------- //

    fn carry_phase(&mut self, standing: &mut [bool]) -> (Vec<bool>, Vec<bool>) {
        let grav = self.gravity.sign();

        let mut carried_solids = vec![false; self.solids.len()];
        for i in 0..self.solids.len() {
            let solid = self.solids[i];
            for k in 0..self.actors.len() {
                if !self.alive[k] || !rests_on(&self.actors[k], &solid, grav) {
                    continue;
                }
                standing[k] = true;
                if self.carry(k, Obstacle::Solid(i), solid.vel) {
                    carried_solids[i] = true;
                }
            }
            if carried_solids[i] {
                self.solids[i].advance();
            }
        }

        let mut carried_segments = vec![false; self.segments.len()];
        for i in 0..self.segments.len() {
            let segment = self.segments[i];
            if !segment.can_carry() {
                continue;
            }
            for k in 0..self.actors.len() {
                if !self.alive[k] || !rests_on(&self.actors[k], &segment, grav) {
                    continue;
                }
                if self.carry(k, Obstacle::Segment(i), segment.vel) {
                    carried_segments[i] = true;
                }
            }
            if carried_segments[i] {
                self.segments[i].advance();
            }
        }

        (carried_solids, carried_segments)
    }

    fn carry(&mut self, k: usize, obstacle: Obstacle, vel: IVec2) -> bool {
        //! Moves actor `k` along with `obstacle`. Returns whether the obstacle moves in a
        //! direction that carries.
        //!
        //! Horizontal motion always carries, vertical motion only when it follows gravity.
        //! Rising obstacles are left to push their riders instead.
        let grav = self.gravity.sign();
        let mut actor = self.actors[k];
        let mut carries = false;

        if vel.x != 0 {
            carries = true;
            actor.pos.x += self.carry_offset(&actor, Axis::X, vel.x);
        }
        if vel.y * grav > 0 {
            carries = true;
            // lowered first, so the footing itself does not block the descent
            self.shift(obstacle, IVec2::new(0, vel.y));
            actor.pos.y += self.carry_offset(&actor, Axis::Y, vel.y);
            self.shift(obstacle, IVec2::new(0, -vel.y));
        }

        if carries {
            log::trace!("{:?} carried actor {} from {:?} to {:?}", obstacle, k, self.actors[k].pos, actor.pos);
        }
        self.actors[k] = actor;
        carries
    }

    fn carry_offset(&self, actor: &Actor, axis: Axis, delta: i32) -> Fp {
        //! How far `actor` gets when dragged `delta` cells along `axis`.
        let delta = delta as Fp;
        let mut offset = Vec2::new(0.0, 0.0);
        set_component(&mut offset, axis, delta);
        if self.place_free(&actor.translate(offset).hitbox()) {
            return delta;
        }

        let dist = self.project_free(actor, Direction::toward(axis, delta));
        if dist < delta.abs() {
            if delta < 0.0 { -dist.round() } else { dist.round() }
        } else {
            delta
        }
    }

    // ---------- Push ---------- //

    fn push_with_solids(&mut self, carried: &[bool], standing: &[bool]) {
        let crushing = self.gravity.crushing_side();

        for i in 0..self.solids.len() {
            let solid = self.solids[i];
            if carried[i] || solid.is_still() {
                continue;
            }
            let swept = solid.translate(solid.vel);
            let hb = solid.hitbox();

            for k in 0..self.actors.len() {
                if !self.alive[k] || !swept.hitbox_test(&self.actors[k].hitbox()) {
                    continue;
                }
                let actor = &mut self.actors[k];
                let side = match collision_side(actor, &solid) {
                    Some(side) => side,
                    None => {
                        log::warn!("solid {} overlaps actor {} after moving but never struck a side of it", i, k);
                        continue;
                    }
                };

                let from = actor.pos;
                match side {
                    Side::Left => actor.pos.x = (hb.right() + solid.vel.x) as Fp,
                    Side::Right => actor.pos.x = (hb.left() + solid.vel.x - actor.size.x as i32) as Fp,
                    Side::Top => actor.pos.y = (hb.bottom() + solid.vel.y) as Fp,
                    Side::Bottom => actor.pos.y = (hb.top() + solid.vel.y - actor.size.y as i32) as Fp,
                }
                log::trace!("solid {} pushed actor {} on its {:?} side from {:?} to {:?}", i, k, side, from, actor.pos);

                if standing[k] && side == crushing {
                    self.die(k, "crushed");
                }
            }
            self.solids[i].advance();
        }
    }

    fn push_with_segments(&mut self, carried: &[bool]) {
        for i in 0..self.segments.len() {
            let segment = self.segments[i];
            if carried[i] || segment.is_still() {
                continue;
            }
            let swept = segment.translate(segment.vel);
            let (axis, delta) = if segment.is_vertical() {
                (Axis::X, segment.vel.x)
            } else {
                (Axis::Y, segment.vel.y)
            };
            // the face met is the one looking back against the motion
            let facing = Direction::toward(axis, delta as Fp).opposite();
            let at = axis.pick(segment.pos.x, segment.pos.y) + delta;

            for k in 0..self.actors.len() {
                if !self.alive[k] {
                    continue;
                }
                let actor = &mut self.actors[k];
                let hb = actor.hitbox();
                if !swept.hitbox_test(&hb) || segment.hitbox_test(&hb) {
                    continue;
                }
                if segment.project(actor, facing) >= delta.abs() as Fp {
                    continue;
                }

                let from = actor.pos;
                let to = if delta < 0 { at - axis.pick(actor.size.x, actor.size.y) as i32 } else { at };
                set_component(&mut actor.pos, axis, to as Fp);
                log::trace!("segment {} pushed actor {} from {:?} to {:?}", i, k, from, actor.pos);
            }
            self.segments[i].advance();
        }
    }

    // ---------- Self Motion ---------- //

    fn move_actors(&mut self) {
        for k in 0..self.actors.len() {
            if !self.alive[k] {
                continue;
            }
            if self.place_solid(&self.actors[k].hitbox()) {
                self.die(k, "embedded");
                continue;
            }

            let mut actor = self.actors[k];
            let target = actor.translate(actor.vel).hitbox();
            if !self.place_free(&target) {
                let clear_x = self.clamp_axis(&mut actor, Axis::X);
                let clear_y = self.clamp_axis(&mut actor, Axis::Y);
                // a corner neither axis sees on its own
                if clear_x && clear_y && self.place_solid(&target) {
                    actor.vel.x = 0.0;
                }
            }
            actor.pos += actor.vel;
            self.actors[k] = actor;

            if self.place_solid(&actor.hitbox()) {
                self.die(k, "embedded");
            }
        }
    }

    fn clamp_axis(&self, actor: &mut Actor, axis: Axis) -> bool {
        //! Stops `actor` against the nearest obstacle along `axis` when its velocity would reach
        //! it, zeroing that velocity component. Returns whether the full velocity fits.
        let delta = axis.pick(actor.vel.x, actor.vel.y);
        let dist = self.project_free(actor, Direction::toward(axis, delta));
        if dist >= delta.abs() {
            return true;
        }

        let step = if delta < 0.0 { -dist.round() } else { dist.round() };
        let stop = axis.pick(actor.pos.x, actor.pos.y) + step;
        set_component(&mut actor.pos, axis, stop);
        set_component(&mut actor.vel, axis, 0.0);
        false
    }
}
