use rapier3d::prelude::RigidBodyHandle;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("variable_jump_cut must be non-zero")]
    ZeroVariableJumpCut,
    #[error("{field} must be finite")]
    NonFinite { field: &'static str },
    #[error("{field} must not be negative")]
    Negative { field: &'static str },
    #[error("rigid body {handle:?} does not exist or has no collider")]
    MissingBody { handle: RigidBodyHandle },
}

/// Tuning for a movement controller. Distances are in world units, times in
/// seconds, except `jump_grace_frames` which counts 60 Hz frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub movement_speed: f32,
    pub movement_acceleration: f32,
    pub gravity: f32,

    pub jump_height: f32,
    pub jump_grace_frames: u32,
    pub variable_jump: bool,
    pub variable_jump_cut: f32,

    pub can_air_jump: bool,

    pub can_wall_hug: bool,
    pub wall_hug_gravity: f32,
    pub wall_hug_required_airtime: f32,

    pub can_wall_jump: bool,
    pub wall_jump_height: f32,
    pub wall_jump_time: f32,

    pub ground_stick: f32,

    pub print_debug_logs: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            movement_speed: 8.0,
            movement_acceleration: 20.0,
            gravity: 40.0,

            jump_height: 2.0,
            jump_grace_frames: 5,
            variable_jump: true,
            variable_jump_cut: 2.0,

            can_air_jump: false,

            can_wall_hug: false,
            wall_hug_gravity: 5.0,
            wall_hug_required_airtime: 0.15,

            can_wall_jump: true,
            wall_jump_height: 1.0,
            wall_jump_time: 1.0,

            ground_stick: 1.0,

            print_debug_logs: false,
        }
    }
}

impl ControllerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.variable_jump_cut == 0.0 {
            return Err(ConfigError::ZeroVariableJumpCut);
        }

        let fields = [
            ("movement_speed", self.movement_speed),
            ("movement_acceleration", self.movement_acceleration),
            ("gravity", self.gravity),
            ("jump_height", self.jump_height),
            ("variable_jump_cut", self.variable_jump_cut),
            ("wall_hug_gravity", self.wall_hug_gravity),
            ("wall_hug_required_airtime", self.wall_hug_required_airtime),
            ("wall_jump_height", self.wall_jump_height),
            ("wall_jump_time", self.wall_jump_time),
            ("ground_stick", self.ground_stick),
        ];

        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
            if value < 0.0 {
                return Err(ConfigError::Negative { field });
            }
        }

        Ok(())
    }

    pub fn jump_grace_time(&self) -> f32 {
        self.jump_grace_frames as f32 / 60.0
    }

    pub fn jump_velocity(&self) -> f32 {
        launch_velocity(self.gravity, self.jump_height)
    }

    pub fn wall_jump_velocity(&self) -> f32 {
        launch_velocity(self.gravity, self.wall_jump_height)
    }
}

/// Initial upward speed that peaks at `height` under `gravity`.
fn launch_velocity(gravity: f32, height: f32) -> f32 {
    (2.0 * gravity * height).sqrt()
}
