//! Narrowphase data and logic module.
//!
//! Obstacles ([`Solid`], [`Segment`]) sit on the integer grid. [`Actor`]s keep continuous
//! coordinates and are snapped to the grid through [`Actor::hitbox`] whenever an occupancy
//! question is asked.

pub mod project;
pub mod swept;

use crate::{Fp, Vec2};
use glam::{IVec2, UVec2};
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

// ---------- Span ---------- //

#[inline]
pub fn span_test(s1: i32, l1: u32, s2: i32, l2: u32) -> bool {
    //! Returns whether the half-open spans `[s1, s1 + l1)` and `[s2, s2 + l2)` overlap.
    s2 < s1 + l1 as i32 && s1 < s2 + l2 as i32
}
#[inline]
pub fn span_test_fp(s1: Fp, l1: u32, s2: Fp, l2: u32) -> bool {
    //! Continuous variant of [`span_test`].
    s2 < s1 + l1 as Fp && s1 < s2 + l2 as Fp
}

// ---------- Hitbox ---------- //

/// An axis-aligned rectangle of grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Hitbox {
    pub pos: IVec2,
    pub size: UVec2,
}
impl Hitbox {
    #[inline]
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Hitbox {
        Hitbox {
            pos: IVec2::new(x, y),
            size: UVec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.pos.x
    }
    #[inline]
    pub fn top(&self) -> i32 {
        self.pos.y
    }
    #[inline]
    pub fn right(&self) -> i32 {
        self.pos.x + self.size.x as i32
    }
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.pos.y + self.size.y as i32
    }

    #[inline]
    pub fn translate(self, offset: IVec2) -> Hitbox {
        Hitbox {
            pos: self.pos + offset,
            size: self.size,
        }
    }
}

// ---------- Obstacles ---------- //

/// A fully blocking rectangle that moves by `vel` every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Solid {
    pub pos: IVec2,
    pub size: UVec2,
    /// Displacement per tick.
    pub vel: IVec2,
}
impl Solid {
    #[inline]
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Solid {
        Solid {
            pos: IVec2::new(x, y),
            size: UVec2::new(width, height),
            vel: IVec2::new(0, 0),
        }
    }
    #[inline]
    pub fn with_vel(self, dx: i32, dy: i32) -> Solid {
        Solid { vel: IVec2::new(dx, dy), ..self }
    }

    #[inline]
    pub fn hitbox(&self) -> Hitbox {
        Hitbox { pos: self.pos, size: self.size }
    }
    #[inline]
    pub fn translate(self, offset: IVec2) -> Solid {
        Solid { pos: self.pos + offset, ..self }
    }
    #[inline]
    pub fn is_still(&self) -> bool {
        self.vel.x == 0 && self.vel.y == 0
    }

    #[inline]
    pub(crate) fn advance(&mut self) {
        self.pos += self.vel;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Orientation {
    /// Spans along x at a fixed y.
    Horizontal,
    /// Spans along y at a fixed x.
    Vertical,
}

/// A zero-thickness wall or platform.
///
/// `block_near` blocks actors approaching from the left (vertical) or top (horizontal),
/// `block_far` blocks actors approaching from the right or bottom. A segment blocking
/// neither side is legal and never stops anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Segment {
    /// Left or top end point.
    pub pos: IVec2,
    pub len: u32,
    pub orient: Orientation,
    pub block_near: bool,
    pub block_far: bool,
    /// Displacement per tick.
    pub vel: IVec2,
}
impl Segment {
    #[inline]
    pub fn new(x: i32, y: i32, len: u32, orient: Orientation, block_near: bool, block_far: bool) -> Segment {
        Segment {
            pos: IVec2::new(x, y),
            len,
            orient,
            block_near,
            block_far,
            vel: IVec2::new(0, 0),
        }
    }
    pub fn platform(x: i32, y: i32, len: u32) -> Segment {
        //! A one-way platform: horizontal, only blocks from above.
        Segment::new(x, y, len, Orientation::Horizontal, true, false)
    }
    #[inline]
    pub fn with_vel(self, dx: i32, dy: i32) -> Segment {
        Segment { vel: IVec2::new(dx, dy), ..self }
    }

    #[inline]
    pub fn is_vertical(&self) -> bool {
        self.orient == Orientation::Vertical
    }
    #[inline]
    pub fn can_carry(&self) -> bool {
        //! Only horizontal segments blocking from the top can hold actors up.
        !self.is_vertical() && self.block_near
    }
    #[inline]
    pub fn is_still(&self) -> bool {
        self.vel.x == 0 && self.vel.y == 0
    }
    #[inline]
    pub fn translate(self, offset: IVec2) -> Segment {
        Segment { pos: self.pos + offset, ..self }
    }

    #[inline]
    pub(crate) fn advance(&mut self) {
        self.pos += self.vel;
    }
}

// ---------- Actor ---------- //

/// A continuously positioned box, moved by its own velocity and resolved against obstacles.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Actor {
    pub pos: Vec2,
    pub size: UVec2,
    /// Desired displacement for the next tick.
    pub vel: Vec2,
}
impl Actor {
    #[inline]
    pub fn new(x: Fp, y: Fp, width: u32, height: u32) -> Actor {
        Actor {
            pos: Vec2::new(x, y),
            size: UVec2::new(width, height),
            vel: Vec2::new(0.0, 0.0),
        }
    }
    #[inline]
    pub fn with_vel(self, dx: Fp, dy: Fp) -> Actor {
        Actor { vel: Vec2::new(dx, dy), ..self }
    }

    #[inline]
    pub fn left(&self) -> Fp {
        self.pos.x
    }
    #[inline]
    pub fn top(&self) -> Fp {
        self.pos.y
    }
    #[inline]
    pub fn right(&self) -> Fp {
        self.pos.x + self.size.x as Fp
    }
    #[inline]
    pub fn bottom(&self) -> Fp {
        self.pos.y + self.size.y as Fp
    }

    #[inline]
    pub fn hitbox(&self) -> Hitbox {
        //! Snaps the actor to the grid, rounding half away from zero.
        Hitbox {
            pos: IVec2::new(self.pos.x.round() as i32, self.pos.y.round() as i32),
            size: self.size,
        }
    }
    #[inline]
    pub fn translate(self, offset: Vec2) -> Actor {
        Actor { pos: self.pos + offset, ..self }
    }
}

// ---------- Overlap ---------- //

pub trait Overlap {
    /// Returns whether `self` occupies any cell of `hitbox`.
    fn hitbox_test(&self, hitbox: &Hitbox) -> bool;
}

impl Overlap for Hitbox {
    #[inline]
    fn hitbox_test(&self, other: &Hitbox) -> bool {
        span_test(self.pos.x, self.size.x, other.pos.x, other.size.x)
            && span_test(self.pos.y, self.size.y, other.pos.y, other.size.y)
    }
}
impl Overlap for Solid {
    #[inline]
    fn hitbox_test(&self, hitbox: &Hitbox) -> bool {
        self.hitbox().hitbox_test(hitbox)
    }
}
impl Overlap for Segment {
    fn hitbox_test(&self, hitbox: &Hitbox) -> bool {
        // zero thickness across, so the segment must lie strictly inside the hitbox on that axis
        match self.orient {
            Orientation::Vertical => {
                span_test(hitbox.pos.x, hitbox.size.x, self.pos.x, 0)
                    && span_test(hitbox.pos.y, hitbox.size.y, self.pos.y, self.len)
            }
            Orientation::Horizontal => {
                span_test(hitbox.pos.y, hitbox.size.y, self.pos.y, 0)
                    && span_test(hitbox.pos.x, hitbox.size.x, self.pos.x, self.len)
            }
        }
    }
}
