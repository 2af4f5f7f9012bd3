//! Swept classification of which side of a stationary [`Actor`] a moving [`Solid`] strikes.

use super::project::{project_down, project_left, project_right, project_up};
use super::{span_test_fp, Actor, Solid};
use crate::Fp;
use glam::IVec2;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// The side of an actor struck by a moving solid.
///
/// `Side::Left` means the solid arrives from the actor's left, and the actor ends up flush
/// against the solid's right face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Side {
    Left,
    Top,
    Right,
    Bottom,
}

// ---------- Edge Sweeps ---------- //

#[inline]
fn sweep_edge_h(x1: Fp, y1: Fp, l1: u32, x2: i32, y2: i32, l2: u32, vel: IVec2) -> bool {
    //! Returns whether horizontal edge 2, travelling by `vel`, reaches the height of edge 1
    //! within the tick while overlapping it along x.
    if vel.y == 0 { return false; }
    let k = (y1 - y2 as Fp) / vel.y as Fp;
    k >= 0.0 && k <= 1.0 && span_test_fp(x1, l1, x2 as Fp + k * vel.x as Fp, l2)
}
#[inline]
fn sweep_edge_v(x1: Fp, y1: Fp, l1: u32, x2: i32, y2: i32, l2: u32, vel: IVec2) -> bool {
    //! Returns whether vertical edge 2, travelling by `vel`, reaches the column of edge 1
    //! within the tick while overlapping it along y.
    if vel.x == 0 { return false; }
    let k = (x1 - x2 as Fp) / vel.x as Fp;
    k >= 0.0 && k <= 1.0 && span_test_fp(y1, l1, y2 as Fp + k * vel.y as Fp, l2)
}

// ---------- Classification ---------- //

pub fn collision_side(actor: &Actor, solid: &Solid) -> Option<Side> {
    //! Classifies which side of `actor` the solid meets when it moves by its velocity.
    //!
    //! Axis-aligned motion compares the projected gap with the travel distance. Diagonal
    //! motion sweeps the solid's leading vertical edge first, then its leading horizontal
    //! edge, so a corner hit where both sweeps succeed resolves sideways.
    //! `None` when the solid is still or never reaches the actor this tick.
    let vel = solid.vel;
    let hb = solid.hitbox();

    match (vel.x.signum(), vel.y.signum()) {
        (0, 0) => None,
        (0, -1) => (project_down(actor, solid) <= vel.y.abs() as Fp).then(|| Side::Bottom),
        (0, _) => (project_up(actor, solid) <= vel.y.abs() as Fp).then(|| Side::Top),
        (-1, 0) => (project_right(actor, solid) <= vel.x.abs() as Fp).then(|| Side::Right),
        (_, 0) => (project_left(actor, solid) <= vel.x.abs() as Fp).then(|| Side::Left),
        (sx, sy) => {
            let sideways = if sx < 0 {
                sweep_edge_v(actor.right(), actor.top(), actor.size.y, hb.left(), hb.top(), hb.size.y, vel)
            } else {
                sweep_edge_v(actor.left(), actor.top(), actor.size.y, hb.right(), hb.top(), hb.size.y, vel)
            };
            if sideways {
                return Some(if sx < 0 { Side::Right } else { Side::Left });
            }

            let capped = if sy < 0 {
                sweep_edge_h(actor.left(), actor.bottom(), actor.size.x, hb.left(), hb.top(), hb.size.x, vel)
            } else {
                sweep_edge_h(actor.left(), actor.top(), actor.size.x, hb.left(), hb.bottom(), hb.size.x, vel)
            };
            if capped {
                Some(if sy < 0 { Side::Bottom } else { Side::Top })
            } else {
                None
            }
        }
    }
}
