//! A reference platformer driver: turns per-tick input into the next-tick velocity of one actor.
//!
//! Nothing here reaches into the scene's internals, a game is free to replace it with its own.

use crate::scene::Scene;
use crate::Fp;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Movement constants, in cells and cells per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Tuning {
    pub run_speed: Fp,
    /// Terminal speed in the gravity direction.
    pub max_fall_speed: Fp,
    pub jump_force: Fp,
    pub air_jump_force: Fp,
    /// Speed gained toward gravity every tick.
    pub gravity: Fp,
    /// Jumps available between touching ground.
    pub air_jumps: u32,
    /// How close footing must be for the actor to count as grounded.
    pub ground_epsilon: Fp,
    /// Scale applied to rising speed when the jump input is let go.
    pub jump_cut: Fp,
}
impl Default for Tuning {
    fn default() -> Self {
        Tuning {
            run_speed: 3.0,
            max_fall_speed: 9.0,
            jump_force: 8.5,
            air_jump_force: 7.0,
            gravity: 0.4,
            air_jumps: 1,
            ground_epsilon: 1.0,
            jump_cut: 0.45,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Input {
    /// -1 for left, 1 for right, 0 for neither.
    pub horizontal: i8,
    /// The jump input went down this tick.
    pub jump_pressed: bool,
    /// The jump input went up this tick.
    pub jump_released: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jump {
    Ground,
    Air,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    /// Index of the steered actor in the scene.
    pub index: usize,
    pub tuning: Tuning,
    /// Air jumps left until next landing.
    pub air_jumps: u32,
}
impl Player {
    pub fn new(index: usize, tuning: Tuning) -> Player {
        Player { index, tuning, air_jumps: tuning.air_jumps }
    }

    pub fn steer(&mut self, scene: &mut Scene, input: &Input) -> Option<Jump> {
        //! Sets the actor's velocity for the coming tick. Call once per tick before
        //! [`Scene::update`]. Returns the jump performed, if any.
        //!
        //! Dead or missing actors are left untouched.
        if !scene.is_alive(self.index) {
            return None;
        }
        let grav = scene.gravity().sign() as Fp;
        let standing = scene.is_standing(self.index, self.tuning.ground_epsilon);
        let tuning = self.tuning;
        let actor = scene.actor_mut(self.index)?;

        actor.vel.x = input.horizontal.signum() as Fp * tuning.run_speed;
        if grav * actor.vel.y > tuning.max_fall_speed {
            actor.vel.y = grav * tuning.max_fall_speed;
        }
        if standing {
            self.air_jumps = tuning.air_jumps;
        }

        let mut jump = None;
        if input.jump_pressed {
            if standing {
                actor.vel.y = -grav * tuning.jump_force;
                jump = Some(Jump::Ground);
            } else if self.air_jumps > 0 {
                actor.vel.y = -grav * tuning.air_jump_force;
                self.air_jumps -= 1;
                jump = Some(Jump::Air);
            }
        }
        if input.jump_released && actor.vel.y * grav < 0.0 {
            actor.vel.y *= tuning.jump_cut;
        }
        actor.vel.y += grav * tuning.gravity;

        if let Some(jump) = jump {
            log::debug!("actor {} {:?} jump", self.index, jump);
        }
        jump
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narrow::{Actor, Segment, Solid};
    use crate::scene::Gravity;
    use approx::assert_abs_diff_eq;

    const PRESS: Input = Input { horizontal: 0, jump_pressed: true, jump_released: false };
    const RELEASE: Input = Input { horizontal: 0, jump_pressed: false, jump_released: true };

    #[test]
    fn ground_jump_test() {
        let mut solids = [Solid::new(0, 100, 50, 10)];
        let mut segments: [Segment; 0] = [];
        let mut actors = [Actor::new(10.0, 80.0, 10, 20)];
        let mut scene = Scene::new(Gravity::Down, &mut solids, &mut segments, &mut actors).unwrap();
        let mut player = Player::new(0, Tuning::default());

        let input = Input { horizontal: 1, ..PRESS };
        assert_eq!(player.steer(&mut scene, &input), Some(Jump::Ground));
        assert_abs_diff_eq!(scene.actors()[0].vel.x, 3.0);
        assert_abs_diff_eq!(scene.actors()[0].vel.y, -8.1, epsilon = 1e-5);
        assert_eq!(player.air_jumps, 1);

        scene.update();
        assert_abs_diff_eq!(scene.actors()[0].pos.y, 71.9, epsilon = 1e-4);

        // letting go while rising cuts the jump short
        assert_eq!(player.steer(&mut scene, &RELEASE), None);
        assert_abs_diff_eq!(scene.actors()[0].vel.y, -8.1 * 0.45 + 0.4, epsilon = 1e-5);
        assert_abs_diff_eq!(scene.actors()[0].vel.x, 0.0);
    }

    #[test]
    fn air_jump_test() {
        let mut solids: [Solid; 0] = [];
        let mut segments: [Segment; 0] = [];
        let mut actors = [Actor::new(10.0, 0.0, 10, 20)];
        let mut scene = Scene::new(Gravity::Down, &mut solids, &mut segments, &mut actors).unwrap();
        let mut player = Player::new(0, Tuning::default());

        assert_eq!(player.steer(&mut scene, &PRESS), Some(Jump::Air));
        assert_abs_diff_eq!(scene.actors()[0].vel.y, -6.6, epsilon = 1e-5);
        assert_eq!(player.air_jumps, 0);

        assert_eq!(player.steer(&mut scene, &PRESS), None);
        assert_abs_diff_eq!(scene.actors()[0].vel.y, -6.2, epsilon = 1e-5);
    }

    #[test]
    fn fall_speed_is_capped() {
        let mut solids: [Solid; 0] = [];
        let mut segments: [Segment; 0] = [];
        let mut actors = [Actor::new(10.0, 0.0, 10, 20).with_vel(0.0, 20.0)];
        let mut scene = Scene::new(Gravity::Down, &mut solids, &mut segments, &mut actors).unwrap();
        let mut player = Player::new(0, Tuning::default());

        player.steer(&mut scene, &Input::default());
        assert_abs_diff_eq!(scene.actors()[0].vel.y, 9.4, epsilon = 1e-5);
    }

    #[test]
    fn inverted_gravity_jump() {
        let mut solids = [Solid::new(0, 0, 50, 10)];
        let mut segments: [Segment; 0] = [];
        let mut actors = [Actor::new(10.0, 10.0, 10, 20)];
        let mut scene = Scene::new(Gravity::Up, &mut solids, &mut segments, &mut actors).unwrap();
        let mut player = Player::new(0, Tuning::default());

        assert_eq!(player.steer(&mut scene, &PRESS), Some(Jump::Ground));
        assert_abs_diff_eq!(scene.actors()[0].vel.y, 8.1, epsilon = 1e-5);
    }

    #[test]
    fn dead_actors_are_not_steered() {
        let mut solids: [Solid; 0] = [];
        let mut segments: [Segment; 0] = [];
        let mut actors = [Actor::new(10.0, 0.0, 10, 20)];
        let mut scene = Scene::new(Gravity::Down, &mut solids, &mut segments, &mut actors).unwrap();
        scene.kill(0);

        let mut player = Player::new(0, Tuning::default());
        assert_eq!(player.steer(&mut scene, &Input { horizontal: -1, ..PRESS }), None);
        assert_eq!(scene.actors()[0].vel, crate::Vec2::new(0.0, 0.0));
        assert_eq!(Player::new(3, Tuning::default()).steer(&mut scene, &PRESS), None);
    }

    #[test]
    fn jump_and_land() {
        let mut solids = [Solid::new(0, 100, 200, 10)];
        let mut segments: [Segment; 0] = [];
        let mut actors = [Actor::new(10.0, 80.0, 10, 20)];
        let mut scene = Scene::new(Gravity::Down, &mut solids, &mut segments, &mut actors).unwrap();
        let mut player = Player::new(0, Tuning::default());

        let mut jumps = Vec::new();
        for tick in 0..60 {
            let input = Input { horizontal: 1, jump_pressed: tick == 0, jump_released: false };
            jumps.extend(player.steer(&mut scene, &input));
            scene.update();
        }
        assert_eq!(jumps, vec![Jump::Ground]);
        assert!(scene.is_alive(0));
        assert!(scene.is_standing(0, 1.0));
        assert_eq!(scene.actors()[0].hitbox().pos.y, 80);
        assert_abs_diff_eq!(scene.actors()[0].pos.x, 190.0);
    }
}
