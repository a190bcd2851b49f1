use std::fmt;

use glam::Vec3;

use crate::input::{InputProvider, InputSnapshot};
use crate::physics::{CollisionFlags, CollisionQuery};

use super::{
    ConfigError, ControllerConfig, ControllerState, LateralAxes, MotionState, MovementDirection,
    MovementIntegrator, Orientation, Planar, Spatial,
};

/// Side-scrolling controller: lateral velocity ramps towards input.
pub type PlatformerController<Q> = Controller<Planar, Q>;

/// Free-roaming controller: lateral velocity follows input directly.
pub type FirstPersonController<Q> = Controller<Spatial, Q>;

/// Movement state machine for one character.
///
/// Each [`advance`](Self::advance) runs one frame in a fixed order: derived
/// constants, input, physics for the active state, the move through the
/// collision backend, then the active state's transition rule against the
/// collision result of that same move.
pub struct Controller<L: LateralAxes, Q: CollisionQuery> {
    config: ControllerConfig,
    body: Q,
    input: InputSnapshot,
    orientation: Orientation,
    motion: MotionState<L>,
}

impl<L: LateralAxes, Q: CollisionQuery> Controller<L, Q> {
    pub fn new(config: ControllerConfig, body: Q) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            config,
            body,
            input: InputSnapshot::new(),
            orientation: Orientation::IDENTITY,
            motion: MotionState::default(),
        })
    }

    pub fn reconfigure(&mut self, config: ControllerConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn state(&self) -> ControllerState {
        self.motion.state
    }

    pub fn last_distinct_state(&self) -> ControllerState {
        self.motion.last_distinct_state
    }

    pub fn lateral(&self) -> L {
        self.motion.lateral
    }

    pub fn velocity_y(&self) -> f32 {
        self.motion.velocity_y
    }

    /// World-space velocity for the current orientation.
    pub fn velocity(&self) -> Vec3 {
        self.motion.lateral.map_onto(&self.orientation, |v| v)
            + self.orientation.up() * self.motion.velocity_y
    }

    pub fn movement_speed(&self) -> f32 {
        self.config.movement_speed
    }

    /// Live-tunes the lateral speed, e.g. for a run/walk toggle.
    pub fn set_movement_speed(&mut self, speed: f32) {
        self.config.movement_speed = speed;
    }

    pub fn air_time(&self) -> f32 {
        self.motion.air_time
    }

    pub fn air_jump_available(&self) -> bool {
        self.motion.air_jump_available
    }

    pub fn wall_jump_direction(&self) -> MovementDirection {
        self.motion.wall_jump_direction
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    pub fn body(&self) -> &Q {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut Q {
        &mut self.body
    }

    /// Runs one frame. `dt` is the elapsed time in seconds and is expected
    /// to be finite and non-negative.
    pub fn advance<P>(&mut self, provider: &P, dt: f32) -> ControllerState
    where
        P: InputProvider + ?Sized,
    {
        self.compute_dynamic_attributes();

        self.input.update(provider);
        let flags = self.process_physics(dt);

        self.motion.previous_state = self.motion.state;
        self.process_state(flags, dt);

        let previous = self.motion.previous_state;
        if self.motion.state != previous {
            // the state being left, not the one entered: grace jumps check where we came from
            self.motion.last_distinct_state = previous;
            self.log(format_args!("State change {} -> {}", previous, self.motion.state));
        }

        self.motion.state
    }

    fn compute_dynamic_attributes(&mut self) {
        self.motion.jump_grace_time = self.config.jump_grace_time();
    }

    fn process_physics(&mut self, dt: f32) -> CollisionFlags {
        let input = L::read_input(&self.input);
        let motion = &mut self.motion;

        match motion.state {
            ControllerState::Grounded => {
                motion.lateral.track_input(
                    input,
                    self.config.movement_speed,
                    self.config.movement_acceleration,
                    dt,
                );
                motion.velocity_y = -self.config.ground_stick;
            }
            ControllerState::InAir => {
                motion.lateral.track_input(
                    input,
                    self.config.movement_speed,
                    self.config.movement_acceleration,
                    dt,
                );
                motion.velocity_y = fall(motion.velocity_y, self.config.gravity, dt);
            }
            ControllerState::WallHugging => {
                motion.lateral.follow_input(input);
                motion.velocity_y = fall(motion.velocity_y, self.config.wall_hug_gravity, dt);
            }
            ControllerState::WallJumping => {
                // lateral velocity is locked for the whole wall jump
                motion.velocity_y = fall(motion.velocity_y, self.config.gravity, dt);
            }
        }

        MovementIntegrator::new(&self.config, self.orientation).integrate(
            &mut self.body,
            motion.state,
            &motion.lateral,
            motion.velocity_y,
            dt,
        )
    }

    fn process_state(&mut self, flags: CollisionFlags, dt: f32) {
        match self.motion.state {
            ControllerState::Grounded => {
                if self.input.pressed_jump() {
                    self.jump();
                }

                self.motion.air_time = 0.0;
                self.motion.air_jump_available = true;

                if !flags.contains(CollisionFlags::BELOW) {
                    self.motion.state = ControllerState::InAir;
                }
            }
            ControllerState::InAir => {
                self.motion.air_time += dt;

                if self.input.pressed_jump() {
                    self.jump_in_air();
                } else if self.config.variable_jump
                    && self.input.released_jump()
                    && self.motion.velocity_y > 0.0
                {
                    self.motion.velocity_y /= self.config.variable_jump_cut;
                } else if self.config.can_wall_hug
                    && flags.contains(CollisionFlags::SIDES)
                    && self.motion.air_time >= self.config.wall_hug_required_airtime
                {
                    self.enter_wall_hug();
                } else if flags.contains(CollisionFlags::BELOW) {
                    self.motion.state = ControllerState::Grounded;
                }
            }
            ControllerState::WallHugging => {
                self.motion.air_time = 0.0;

                if self.input.pressed_jump() && self.config.can_wall_jump {
                    self.wall_jump();
                } else if flags.contains(CollisionFlags::BELOW) {
                    self.motion.state = ControllerState::Grounded;
                } else if !flags.contains(CollisionFlags::SIDES) {
                    self.motion.state = ControllerState::InAir;
                }
            }
            ControllerState::WallJumping => {
                self.motion.wall_jump_timer -= dt;

                if flags.contains(CollisionFlags::SIDES) {
                    self.enter_wall_hug();
                } else if flags.contains(CollisionFlags::BELOW) {
                    self.motion.state = ControllerState::Grounded;
                } else if self.config.can_air_jump && self.motion.air_jump_available {
                    self.jump();
                    self.motion.air_jump_available = false;
                } else if self.motion.wall_jump_timer <= 0.0 {
                    self.motion.state = ControllerState::InAir;
                }
            }
        }
    }

    /// Jump press while airborne: air jump first, then the grace window.
    fn jump_in_air(&mut self) {
        if self.config.can_air_jump && self.motion.air_jump_available {
            self.jump();
            self.motion.air_jump_available = false;
        } else if self.motion.air_time < self.motion.jump_grace_time {
            let last = self.motion.last_distinct_state;

            if self.config.can_wall_jump && last == ControllerState::WallHugging {
                self.log(format_args!(
                    "Grace wall jump, airtime {}s (last state {})",
                    self.motion.air_time, last
                ));
                self.wall_jump();
            } else if last != ControllerState::WallJumping {
                self.log(format_args!(
                    "Grace jump, airtime {}s (last state {})",
                    self.motion.air_time, last
                ));
                self.jump();
            }
        }
    }

    fn enter_wall_hug(&mut self) {
        self.motion.state = ControllerState::WallHugging;
        self.motion.velocity_y = 0.0;
        self.motion.wall_jump_direction =
            MovementDirection::away_from(self.motion.lateral.kick_component());
    }

    fn jump(&mut self) {
        self.motion.state = ControllerState::InAir;
        self.motion.velocity_y = self.config.jump_velocity();
    }

    fn wall_jump(&mut self) {
        self.motion.state = ControllerState::WallJumping;
        self.motion.wall_jump_timer = self.config.wall_jump_time;

        let kick = self
            .motion
            .wall_jump_direction
            .kick_velocity(self.config.movement_speed);
        self.motion.lateral.set_kick_component(kick);
        self.motion.velocity_y = self.config.wall_jump_velocity();
    }

    fn log(&self, message: fmt::Arguments<'_>) {
        if self.config.print_debug_logs && cfg!(debug_assertions) {
            log::debug!("{message}");
        }
    }
}

/// Gravity step with the fall speed floored at one second of free fall.
fn fall(velocity_y: f32, gravity: f32, dt: f32) -> f32 {
    (velocity_y - gravity * dt).max(-gravity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::RawInput;
    use crate::physics::ScriptedBody;

    const DT: f32 = 1.0 / 60.0;

    fn platformer(config: ControllerConfig) -> PlatformerController<ScriptedBody> {
        PlatformerController::new(config, ScriptedBody::default()).unwrap()
    }

    fn land(controller: &mut PlatformerController<ScriptedBody>) {
        controller.body_mut().set_contacts(CollisionFlags::BELOW);
        controller.advance(&RawInput::idle(), DT);
        assert_eq!(controller.state(), ControllerState::Grounded);
    }

    #[test]
    fn starts_in_air_with_stale_air_time() {
        let controller = platformer(ControllerConfig::default());

        assert_eq!(controller.state(), ControllerState::InAir);
        assert_eq!(controller.air_time(), 30.0);
        assert!(!controller.air_jump_available());
    }

    #[test]
    fn reconfigure_keeps_old_config_on_error() {
        let mut controller = platformer(ControllerConfig::default());

        let bad = ControllerConfig {
            variable_jump_cut: 0.0,
            movement_speed: 3.0,
            ..Default::default()
        };
        assert!(matches!(
            controller.reconfigure(bad),
            Err(ConfigError::ZeroVariableJumpCut)
        ));
        assert_eq!(controller.movement_speed(), 8.0);

        let walk = ControllerConfig {
            movement_speed: 3.0,
            ..Default::default()
        };
        controller.reconfigure(walk).unwrap();
        assert_eq!(controller.movement_speed(), 3.0);
    }

    #[test]
    fn grounded_jump_launches_at_exact_velocity() {
        let config = ControllerConfig::default();
        let expected = 2.0 * config.gravity * config.jump_height;
        let mut controller = platformer(config);
        land(&mut controller);

        controller.advance(&RawInput::idle().with_jump_down(), DT);

        assert_eq!(controller.state(), ControllerState::InAir);
        let vy = controller.velocity_y();
        assert!((vy * vy - expected).abs() < 1e-3);
    }

    #[test]
    fn grounded_pins_vertical_velocity_and_refreshes_air_jump() {
        let mut controller = platformer(ControllerConfig::default());
        land(&mut controller);
        controller.advance(&RawInput::idle(), DT);

        assert_eq!(controller.velocity_y(), -1.0);
        assert_eq!(controller.air_time(), 0.0);
        assert!(controller.air_jump_available());
    }

    #[test]
    fn leaving_ground_without_contact_falls() {
        let mut controller = platformer(ControllerConfig::default());
        land(&mut controller);

        controller.body_mut().set_contacts(CollisionFlags::empty());
        controller.advance(&RawInput::idle(), DT);

        assert_eq!(controller.state(), ControllerState::InAir);
        assert_eq!(controller.last_distinct_state(), ControllerState::Grounded);
    }

    #[test]
    fn fall_speed_is_capped_at_gravity() {
        let mut controller = platformer(ControllerConfig::default());

        for _ in 0..200 {
            controller.advance(&RawInput::idle(), DT);
        }

        assert_eq!(controller.velocity_y(), -40.0);
    }

    #[test]
    fn variable_jump_halves_rising_velocity() {
        let mut controller = platformer(ControllerConfig::default());
        land(&mut controller);
        controller.body_mut().set_contacts(CollisionFlags::empty());

        controller.advance(&RawInput::idle().with_jump_down(), DT);
        controller.advance(&RawInput::idle(), DT);
        let rising = controller.velocity_y();
        assert!(rising > 0.0);

        controller.advance(&RawInput::idle().with_jump_up(), DT);
        let expected = (rising - 40.0 * DT) / 2.0;
        assert!((controller.velocity_y() - expected).abs() < 1e-4);
    }

    #[test]
    fn release_while_falling_keeps_velocity() {
        let mut controller = platformer(ControllerConfig::default());
        controller.advance(&RawInput::idle().with_jump_down(), DT);
        let falling = controller.velocity_y();
        assert!(falling < 0.0);

        controller.advance(&RawInput::idle().with_jump_up(), DT);
        assert!((controller.velocity_y() - (falling - 40.0 * DT)).abs() < 1e-5);
    }

    #[test]
    fn air_jump_is_used_once() {
        let config = ControllerConfig {
            can_air_jump: true,
            ..Default::default()
        };
        let mut controller = platformer(config);
        land(&mut controller);
        controller.body_mut().set_contacts(CollisionFlags::empty());

        controller.advance(&RawInput::idle().with_jump_down(), DT);
        controller.advance(&RawInput::idle().with_jump_up(), DT);
        assert!(controller.air_jump_available());

        for _ in 0..30 {
            controller.advance(&RawInput::idle(), DT);
        }
        controller.advance(&RawInput::idle().with_jump_down(), DT);
        assert!(!controller.air_jump_available());
        assert!(controller.velocity_y() > 0.0);

        controller.advance(&RawInput::idle().with_jump_up(), DT);
        for _ in 0..30 {
            controller.advance(&RawInput::idle(), DT);
        }
        let before = controller.velocity_y();
        controller.advance(&RawInput::idle().with_jump_down(), DT);
        assert!(controller.velocity_y() < before);
    }

    #[test]
    fn wall_hug_requires_air_time() {
        let config = ControllerConfig {
            can_wall_hug: true,
            ..Default::default()
        };
        let mut controller = platformer(config);
        land(&mut controller);

        controller.body_mut().set_contacts(CollisionFlags::SIDES);
        controller.advance(&RawInput::axes(1.0, 0.0), DT);
        assert_eq!(controller.state(), ControllerState::InAir);

        controller.advance(&RawInput::axes(1.0, 0.0), DT);
        assert_eq!(controller.state(), ControllerState::InAir);

        let mut frames = 0;
        while controller.state() == ControllerState::InAir && frames < 20 {
            controller.advance(&RawInput::axes(1.0, 0.0), DT);
            frames += 1;
        }
        assert!((7..=9).contains(&frames), "hugged after {frames} frames");
        assert_eq!(controller.state(), ControllerState::WallHugging);
        assert_eq!(controller.velocity_y(), 0.0);
        assert_eq!(controller.wall_jump_direction(), MovementDirection::Left);
    }

    #[test]
    fn wall_hug_slides_at_reduced_gravity() {
        let config = ControllerConfig {
            can_wall_hug: true,
            ..Default::default()
        };
        let mut controller = platformer(config);
        controller.body_mut().set_contacts(CollisionFlags::SIDES);
        controller.advance(&RawInput::axes(1.0, 0.0), DT);
        assert_eq!(controller.state(), ControllerState::WallHugging);

        for _ in 0..120 {
            controller.advance(&RawInput::axes(1.0, 0.0), DT);
        }

        assert_eq!(controller.velocity_y(), -5.0);
        assert_eq!(controller.lateral().x, 1.0);
        assert_eq!(controller.air_time(), 0.0);
    }

    #[test]
    fn wall_jump_kicks_away_and_ignores_input() {
        let config = ControllerConfig {
            can_wall_hug: true,
            ..Default::default()
        };
        let expected_vy = (2.0 * config.gravity * config.wall_jump_height).sqrt();
        let mut controller = platformer(config);

        controller.body_mut().set_contacts(CollisionFlags::SIDES);
        controller.advance(&RawInput::axes(1.0, 0.0), DT);
        assert_eq!(controller.state(), ControllerState::WallHugging);
        assert_eq!(controller.wall_jump_direction(), MovementDirection::Left);

        controller.body_mut().set_contacts(CollisionFlags::empty());
        controller.advance(&RawInput::axes(1.0, 0.0).with_jump_down(), DT);
        assert_eq!(controller.state(), ControllerState::WallJumping);
        assert_eq!(controller.lateral().x, -8.0);
        assert!((controller.velocity_y() - expected_vy).abs() < 1e-5);
        assert_eq!(controller.motion.wall_jump_timer, 1.0);

        for _ in 0..30 {
            controller.advance(&RawInput::axes(1.0, 0.0), DT);
            assert_eq!(controller.lateral().x, -8.0);
        }
        assert_eq!(controller.state(), ControllerState::WallJumping);
    }

    #[test]
    fn wall_jump_times_out_into_air() {
        let config = ControllerConfig {
            can_wall_hug: true,
            wall_jump_time: 0.09,
            ..Default::default()
        };
        let mut controller = platformer(config);
        controller.body_mut().set_contacts(CollisionFlags::SIDES);
        controller.advance(&RawInput::idle(), DT);
        controller.body_mut().set_contacts(CollisionFlags::empty());
        controller.advance(&RawInput::idle().with_jump_down(), DT);
        assert_eq!(controller.state(), ControllerState::WallJumping);

        for _ in 0..5 {
            controller.advance(&RawInput::idle(), DT);
        }
        assert_eq!(controller.state(), ControllerState::WallJumping);

        controller.advance(&RawInput::idle(), DT);
        assert_eq!(controller.state(), ControllerState::InAir);
    }

    #[test]
    fn wall_jump_into_another_wall_hugs_again() {
        let config = ControllerConfig {
            can_wall_hug: true,
            ..Default::default()
        };
        let mut controller = platformer(config);
        controller.body_mut().set_contacts(CollisionFlags::SIDES);
        controller.advance(&RawInput::axes(1.0, 0.0), DT);
        controller.body_mut().set_contacts(CollisionFlags::empty());
        controller.advance(&RawInput::idle().with_jump_down(), DT);
        assert_eq!(controller.state(), ControllerState::WallJumping);

        controller.body_mut().queue_contacts(CollisionFlags::SIDES);
        controller.advance(&RawInput::idle(), DT);

        assert_eq!(controller.state(), ControllerState::WallHugging);
        assert_eq!(controller.wall_jump_direction(), MovementDirection::Right);
    }

    #[test]
    fn wall_hug_drops_off_when_wall_ends() {
        let config = ControllerConfig {
            can_wall_hug: true,
            ..Default::default()
        };
        let mut controller = platformer(config);
        controller.body_mut().set_contacts(CollisionFlags::SIDES);
        controller.advance(&RawInput::idle(), DT);
        assert_eq!(controller.state(), ControllerState::WallHugging);

        controller.body_mut().set_contacts(CollisionFlags::empty());
        controller.advance(&RawInput::idle(), DT);
        assert_eq!(controller.state(), ControllerState::InAir);
        assert_eq!(controller.last_distinct_state(), ControllerState::WallHugging);

        // coyote window after dropping off: the jump becomes a wall jump
        controller.advance(&RawInput::idle().with_jump_down(), DT);
        assert_eq!(controller.state(), ControllerState::WallJumping);
    }

    #[test]
    fn no_grace_jump_right_after_wall_jump() {
        let config = ControllerConfig {
            can_wall_hug: true,
            wall_jump_time: 0.0,
            ..Default::default()
        };
        let mut controller = platformer(config);
        controller.body_mut().set_contacts(CollisionFlags::SIDES);
        controller.advance(&RawInput::idle(), DT);
        controller.body_mut().set_contacts(CollisionFlags::empty());
        controller.advance(&RawInput::idle().with_jump_down(), DT);
        controller.advance(&RawInput::idle().with_jump_up(), DT);
        assert_eq!(controller.state(), ControllerState::InAir);
        assert_eq!(controller.last_distinct_state(), ControllerState::WallJumping);
        assert!(controller.air_time() < controller.config.jump_grace_time());

        let before = controller.velocity_y();
        controller.advance(&RawInput::idle().with_jump_down(), DT);
        assert_eq!(controller.state(), ControllerState::InAir);
        assert!(controller.velocity_y() < before);
    }

    #[test]
    fn zero_dt_frames_are_idempotent() {
        let mut controller = platformer(ControllerConfig::default());
        land(&mut controller);
        let input = RawInput::axes(0.5, 0.0);
        controller.advance(&input, 0.0);

        let state = controller.state();
        let lateral = controller.lateral();
        let vy = controller.velocity_y();

        for _ in 0..10 {
            controller.advance(&input, 0.0);
            assert_eq!(controller.state(), state);
            assert_eq!(controller.lateral(), lateral);
            assert_eq!(controller.velocity_y(), vy);
        }
    }

    #[test]
    fn reconfigure_validates() {
        let mut controller = platformer(ControllerConfig::default());
        let bad = ControllerConfig {
            variable_jump_cut: 0.0,
            ..Default::default()
        };

        assert!(controller.reconfigure(bad).is_err());
        assert_eq!(controller.config.variable_jump_cut, 2.0);
        assert!(PlatformerController::new(
            ControllerConfig {
                variable_jump_cut: 0.0,
                ..Default::default()
            },
            ScriptedBody::default(),
        )
        .is_err());
    }

    #[test]
    fn first_person_moves_along_orientation() {
        let mut controller =
            FirstPersonController::new(ControllerConfig::default(), ScriptedBody::default())
                .unwrap();
        controller.set_orientation(Orientation::from_yaw_degrees(90.0));

        controller.advance(&RawInput::axes(0.0, 1.0), DT);

        assert_eq!(controller.lateral().forward, 8.0);
        let velocity = controller.velocity();
        assert!((velocity.x - 8.0).abs() < 1e-4);
        assert!(velocity.z.abs() < 1e-4);
        assert!(controller.body().last_move().unwrap().x > 0.0);
    }
}
