use std::fmt;

use glam::{Quat, Vec2, Vec3};

use crate::input::InputSnapshot;

/// Snap threshold for the 2D decay towards zero.
const STOP_SPEED: f32 = 0.1;

/// Yaw of the body the controller moves. Right is +X and forward is +Z at
/// zero yaw; up is always +Y.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Orientation {
    yaw: f32,
}

impl Orientation {
    pub const IDENTITY: Self = Self { yaw: 0.0 };

    pub fn from_yaw(yaw: f32) -> Self {
        Self { yaw }
    }

    pub fn from_yaw_degrees(degrees: f32) -> Self {
        Self::from_yaw(degrees.to_radians())
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    pub fn right(&self) -> Vec3 {
        self.rotation() * Vec3::X
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::Z
    }

    pub fn up(&self) -> Vec3 {
        Vec3::Y
    }
}

/// Horizontal velocity layout of a controller variant.
pub trait LateralAxes: Copy + Default + fmt::Debug {
    type Input: Copy + Default + fmt::Debug;

    fn read_input(snapshot: &InputSnapshot) -> Self::Input;

    /// Grounded and airborne rule.
    fn track_input(&mut self, input: Self::Input, speed: f32, acceleration: f32, dt: f32);

    /// Wall-hug rule: velocity is the raw input, unscaled.
    fn follow_input(&mut self, input: Self::Input);

    /// Component that decides and receives the wall-jump kick.
    fn kick_component(&self) -> f32;

    fn set_kick_component(&mut self, value: f32);

    /// Sum of all lateral components.
    fn combined(&self) -> f32;

    /// Maps each lateral component through `step` onto its world axis.
    fn map_onto(&self, orientation: &Orientation, step: impl Fn(f32) -> f32) -> Vec3;
}

/// Side-scroller: a single lateral axis along `right`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Planar {
    pub x: f32,
}

impl LateralAxes for Planar {
    type Input = f32;

    fn read_input(snapshot: &InputSnapshot) -> f32 {
        snapshot.horizontal()
    }

    fn track_input(&mut self, input: f32, speed: f32, acceleration: f32, dt: f32) {
        if input > 0.0 {
            self.x = (self.x + acceleration * dt).min(speed);
        } else if input < 0.0 {
            self.x = (self.x - acceleration * dt).max(-speed);
        } else {
            self.x = lerp(self.x, 0.0, (dt * acceleration * 2.0).clamp(0.0, 1.0));

            if self.x.abs() < STOP_SPEED {
                self.x = 0.0;
            }
        }
    }

    fn follow_input(&mut self, input: f32) {
        self.x = input;
    }

    fn kick_component(&self) -> f32 {
        self.x
    }

    fn set_kick_component(&mut self, value: f32) {
        self.x = value;
    }

    fn combined(&self) -> f32 {
        self.x
    }

    fn map_onto(&self, orientation: &Orientation, step: impl Fn(f32) -> f32) -> Vec3 {
        orientation.right() * step(self.x)
    }
}

/// Free 3D movement: forward and right axes, set directly from input.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Spatial {
    pub forward: f32,
    pub right: f32,
}

impl LateralAxes for Spatial {
    /// `x` is right, `y` is forward.
    type Input = Vec2;

    fn read_input(snapshot: &InputSnapshot) -> Vec2 {
        Vec2::new(snapshot.horizontal(), snapshot.vertical())
    }

    fn track_input(&mut self, input: Vec2, speed: f32, _acceleration: f32, _dt: f32) {
        self.forward = input.y * speed;
        self.right = input.x * speed;
    }

    fn follow_input(&mut self, input: Vec2) {
        self.forward = input.y;
        self.right = input.x;
    }

    fn kick_component(&self) -> f32 {
        self.forward
    }

    fn set_kick_component(&mut self, value: f32) {
        self.forward = value;
    }

    fn combined(&self) -> f32 {
        self.forward + self.right
    }

    fn map_onto(&self, orientation: &Orientation, step: impl Fn(f32) -> f32) -> Vec3 {
        orientation.forward() * step(self.forward) + orientation.right() * step(self.right)
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
