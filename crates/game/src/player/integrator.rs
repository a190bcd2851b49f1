use glam::Vec3;

use crate::physics::{CollisionFlags, CollisionQuery};

use super::{ControllerConfig, ControllerState, LateralAxes, Orientation};

/// Turns the current velocity into a frame displacement and hands it to
/// the collision backend.
///
/// Every axis advances by `v*dt + 0.5*a*dt²`, with `a` being
/// `movement_speed` laterally and `gravity` vertically, whatever the state.
#[derive(Debug, Clone, Copy)]
pub struct MovementIntegrator {
    pub movement_speed: f32,
    pub gravity: f32,
    pub wall_hug_gravity: f32,
    pub orientation: Orientation,
}

impl MovementIntegrator {
    pub fn new(config: &ControllerConfig, orientation: Orientation) -> Self {
        Self {
            movement_speed: config.movement_speed,
            gravity: config.gravity,
            wall_hug_gravity: config.wall_hug_gravity,
            orientation,
        }
    }

    pub fn displacement<L: LateralAxes>(&self, lateral: &L, velocity_y: f32, dt: f32) -> Vec3 {
        let lateral_move = lateral.map_onto(&self.orientation, |velocity| {
            kinematic_step(velocity, self.movement_speed, dt)
        });
        let vertical_move = self.orientation.up() * kinematic_step(velocity_y, self.gravity, dt);

        lateral_move + vertical_move
    }

    pub fn integrate<L: LateralAxes, Q: CollisionQuery + ?Sized>(
        &self,
        body: &mut Q,
        state: ControllerState,
        lateral: &L,
        velocity_y: f32,
        dt: f32,
    ) -> CollisionFlags {
        let position = body.position();
        let flags = body.move_by(self.displacement(lateral, velocity_y, dt), dt);

        // a gravity-free hug lets the collision solver walk the body up the wall
        if state == ControllerState::WallHugging && self.wall_hug_gravity == 0.0 {
            body.set_position(position);
        }

        flags
    }
}

pub fn kinematic_step(velocity: f32, acceleration: f32, dt: f32) -> f32 {
    velocity * dt + 0.5 * acceleration * (dt * dt)
}
