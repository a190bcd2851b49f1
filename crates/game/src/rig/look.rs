use glam::{Quat, Vec2};

use crate::player::Orientation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorLock {
    #[default]
    Free,
    Locked,
}

/// Per-frame look input. Deltas are in device units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LookInput {
    pub escape: bool,
    pub primary_click: bool,
    pub mouse_delta: Vec2,
    pub stick: Vec2,
}

/// First-person turn/look angles, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookRig {
    pub look_angle_limit: f32,
    pub mouse_sensitivity: f32,
    pub stick_sensitivity: f32,
    turn_angle: f32,
    look_angle: f32,
    cursor: CursorLock,
}

impl Default for LookRig {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl LookRig {
    pub fn new(turn_angle: f32) -> Self {
        Self {
            look_angle_limit: 80.0,
            mouse_sensitivity: 3.0,
            stick_sensitivity: 3.0,
            turn_angle,
            look_angle: 0.0,
            cursor: CursorLock::Free,
        }
    }

    pub fn update(&mut self, input: &LookInput) {
        if input.escape {
            self.cursor = CursorLock::Free;
        } else if input.primary_click {
            self.cursor = CursorLock::Locked;
        }

        // the mouse only steers while captured; the stick always does
        if self.cursor == CursorLock::Locked {
            self.turn_angle += input.mouse_delta.x * self.mouse_sensitivity;
            self.look_angle -= input.mouse_delta.y * self.mouse_sensitivity;
        }

        self.turn_angle += input.stick.x * self.stick_sensitivity;
        self.look_angle -= input.stick.y * self.stick_sensitivity;

        self.look_angle = self
            .look_angle
            .clamp(-self.look_angle_limit, self.look_angle_limit);
    }

    pub fn cursor(&self) -> CursorLock {
        self.cursor
    }

    pub fn turn_angle(&self) -> f32 {
        self.turn_angle
    }

    pub fn look_angle(&self) -> f32 {
        self.look_angle
    }

    /// Body yaw to feed into the movement controller.
    pub fn orientation(&self) -> Orientation {
        Orientation::from_yaw_degrees(self.turn_angle)
    }

    /// Camera rotation: body yaw, then pitch about the local right axis.
    pub fn view_rotation(&self) -> Quat {
        self.orientation().rotation() * Quat::from_rotation_x(self.look_angle.to_radians())
    }
}
