use crate::physics::CollisionQuery;
use crate::player::{Controller, LateralAxes};

/// Speed below which the controller counts as standing still.
const IDLE_SPEED: f32 = 0.1;

/// Toggles a controller between walking and running speed. Standing still
/// drops it back to walking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunWalkToggle {
    pub walk_speed: f32,
    pub run_speed: f32,
}

impl Default for RunWalkToggle {
    fn default() -> Self {
        Self {
            walk_speed: 3.0,
            run_speed: 8.0,
        }
    }
}

impl RunWalkToggle {
    pub fn update<L: LateralAxes, Q: CollisionQuery>(
        &self,
        toggle_pressed: bool,
        controller: &mut Controller<L, Q>,
    ) {
        if toggle_pressed {
            let speed = if controller.movement_speed() > self.walk_speed {
                self.walk_speed
            } else {
                self.run_speed
            };
            controller.set_movement_speed(speed);
        } else if controller.lateral().combined().abs() < IDLE_SPEED {
            controller.set_movement_speed(self.walk_speed);
        }
    }
}
