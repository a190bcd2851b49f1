use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerState {
    Grounded,
    InAir,
    WallHugging,
    WallJumping,
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Grounded => "Grounded",
            Self::InAir => "InAir",
            Self::WallHugging => "WallHugging",
            Self::WallJumping => "WallJumping",
        };
        f.write_str(name)
    }
}

/// Side a wall jump kicks towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementDirection {
    Left,
    Right,
    None,
}

impl MovementDirection {
    /// Direction that pushes away from a wall approached with `velocity`.
    pub fn away_from(velocity: f32) -> Self {
        if velocity > 0.0 { Self::Left } else { Self::Right }
    }

    pub fn kick_velocity(self, speed: f32) -> f32 {
        match self {
            Self::Right => speed,
            Self::Left | Self::None => -speed,
        }
    }
}

/// Everything the state machine carries from one frame to the next.
#[derive(Debug, Clone)]
pub struct MotionState<L> {
    pub state: ControllerState,
    pub previous_state: ControllerState,
    pub last_distinct_state: ControllerState,

    pub lateral: L,
    pub velocity_y: f32,

    pub jump_grace_time: f32,
    pub air_time: f32,
    pub air_jump_available: bool,

    pub wall_jump_direction: MovementDirection,
    pub wall_jump_timer: f32,
}

impl<L: Default> Default for MotionState<L> {
    fn default() -> Self {
        Self {
            state: ControllerState::InAir,
            previous_state: ControllerState::InAir,
            last_distinct_state: ControllerState::InAir,
            lateral: L::default(),
            velocity_y: 0.0,
            jump_grace_time: 0.0,
            air_time: 30.0,
            air_jump_available: false,
            wall_jump_direction: MovementDirection::Right,
            wall_jump_timer: 0.0,
        }
    }
}
