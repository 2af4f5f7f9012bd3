//! Collision resolution core for a precision 2D platformer.
//!
//! Obstacles live on an integer grid: [`Solid`]s block from every side, [`Segment`]s are
//! zero-thickness walls that block from one or both sides. [`Actor`]s move continuously and
//! are resolved against the obstacles once per tick by [`Scene::update`], which carries actors
//! standing on moving obstacles, pushes actors that obstacles move into, and finally moves
//! every actor by its own velocity. An actor that ends up inside solid matter dies.

pub mod control;
pub mod error;
pub mod narrow;
pub mod scene;

#[cfg(not(feature = "f64"))]
pub type Fp = f32;
#[cfg(not(feature = "f64"))]
pub type Vec2 = glam::Vec2;

#[cfg(feature = "f64")]
pub type Fp = f64;
#[cfg(feature = "f64")]
pub type Vec2 = glam::DVec2;

pub use control::{Input, Jump, Player, Tuning};
pub use error::SceneError;
pub use narrow::project::{Axis, Direction};
pub use narrow::swept::Side;
pub use narrow::{Actor, Hitbox, Orientation, Overlap, Segment, Solid};
pub use scene::{Gravity, Obstacle, Projection, Scene};
