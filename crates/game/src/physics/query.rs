use bitflags::bitflags;
use glam::Vec3;

bitflags! {
    /// Surfaces touched while attempting a move.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CollisionFlags: u8 {
        const BELOW = 1 << 0;
        const SIDES = 1 << 1;
        const ABOVE = 1 << 2;
    }
}

/// Character collision engine driven by the controller.
///
/// `move_by` applies the constrained movement to the body and reports what
/// was touched. Implementations must not call back into the controller.
pub trait CollisionQuery {
    fn position(&self) -> Vec3;

    fn set_position(&mut self, position: Vec3);

    fn move_by(&mut self, displacement: Vec3, dt: f32) -> CollisionFlags;
}
