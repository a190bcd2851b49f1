use glam::Vec3;
use rapier3d::control::{
    CharacterAutostep, CharacterCollision, CharacterLength, KinematicCharacterController,
};
use rapier3d::prelude::*;

use crate::player::ConfigError;

use super::{CollisionFlags, CollisionQuery, PhysicsWorld};

/// Minimum |normal.y| for a contact to count as floor or ceiling.
const SURFACE_NORMAL_THRESHOLD: f32 = 0.7;

/// Rapier-backed collision query for a single kinematic character.
pub struct CharacterBody {
    world: PhysicsWorld,
    handle: RigidBodyHandle,
    shape: SharedShape,
    character_controller: KinematicCharacterController,
    grounded: bool,
}

impl CharacterBody {
    /// Adds a character body to `world` and takes ownership of the world.
    pub fn spawn(mut world: PhysicsWorld, position: Vec3, radius: f32, height: f32) -> Self {
        let handle = world.add_character(position, radius, height);
        world.step();

        Self {
            world,
            handle,
            shape: SharedShape::cylinder(height / 2.0, radius),
            character_controller: default_character_controller(),
            grounded: false,
        }
    }

    /// Drives an existing body. Fails if the handle has no body or the body
    /// has no collider to sweep with.
    pub fn attach(
        mut world: PhysicsWorld,
        handle: RigidBodyHandle,
        radius: f32,
        height: f32,
    ) -> Result<Self, ConfigError> {
        if !world.has_collider(handle) {
            return Err(ConfigError::MissingBody { handle });
        }
        world.step();

        Ok(Self {
            world,
            handle,
            shape: SharedShape::cylinder(height / 2.0, radius),
            character_controller: default_character_controller(),
            grounded: false,
        })
    }

    pub fn handle(&self) -> RigidBodyHandle {
        self.handle
    }

    /// Whether the last move ended resting on a floor.
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }
}

impl CollisionQuery for CharacterBody {
    fn position(&self) -> Vec3 {
        self.world.body_position(self.handle).unwrap_or(Vec3::ZERO)
    }

    fn set_position(&mut self, position: Vec3) {
        self.world.set_body_position(self.handle, position);
    }

    fn move_by(&mut self, displacement: Vec3, dt: f32) -> CollisionFlags {
        let Some(pose) = self.world.body_pose(self.handle) else {
            return CollisionFlags::empty();
        };

        // pushing into a floor we already rest on lets the sweep sink the body;
        // snap_to_ground keeps it in contact instead
        let mut desired = Vector::new(displacement.x, displacement.y, displacement.z);
        if self.grounded && desired.y < 0.0 {
            desired.y = 0.0;
        }

        let mut flags = CollisionFlags::empty();
        let movement = self.world.move_character(
            &self.character_controller,
            self.handle,
            &self.shape,
            pose,
            desired,
            dt,
            |collision| flags |= classify_contact(&collision),
        );

        self.grounded = movement.grounded;
        if movement.grounded {
            flags |= CollisionFlags::BELOW;
        }

        let t = movement.translation;
        let start = self.position();
        self.world
            .set_body_position(self.handle, start + Vec3::new(t.x, t.y, t.z));

        flags
    }
}

fn default_character_controller() -> KinematicCharacterController {
    let mut character_controller = KinematicCharacterController::default();
    character_controller.offset = CharacterLength::Absolute(0.02);
    character_controller.up = Vector::Y;
    character_controller.max_slope_climb_angle = 50_f32.to_radians();
    character_controller.min_slope_slide_angle = 35_f32.to_radians();
    character_controller.snap_to_ground = Some(CharacterLength::Absolute(0.2));
    character_controller.autostep = Some(CharacterAutostep {
        max_height: CharacterLength::Absolute(0.35),
        min_width: CharacterLength::Absolute(0.15),
        include_dynamic_bodies: false,
    });
    character_controller
}

// normal1 points out of the character towards the obstacle.
fn classify_contact(collision: &CharacterCollision) -> CollisionFlags {
    classify_normal(-collision.hit.normal1.y)
}

fn classify_normal(up_component: f32) -> CollisionFlags {
    if up_component > SURFACE_NORMAL_THRESHOLD {
        CollisionFlags::BELOW
    } else if up_component < -SURFACE_NORMAL_THRESHOLD {
        CollisionFlags::ABOVE
    } else {
        CollisionFlags::SIDES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normals_map_to_surfaces() {
        assert_eq!(classify_normal(1.0), CollisionFlags::BELOW);
        assert_eq!(classify_normal(0.8), CollisionFlags::BELOW);
        assert_eq!(classify_normal(0.0), CollisionFlags::SIDES);
        assert_eq!(classify_normal(0.5), CollisionFlags::SIDES);
        assert_eq!(classify_normal(-1.0), CollisionFlags::ABOVE);
    }

    #[test]
    fn attach_rejects_unknown_handle() {
        let mut other = PhysicsWorld::new();
        let foreign = other.add_character(Vec3::ZERO, 0.3, 1.8);

        let result = CharacterBody::attach(PhysicsWorld::new(), foreign, 0.3, 1.8);
        assert!(matches!(result, Err(ConfigError::MissingBody { .. })));
    }

    #[test]
    fn attach_accepts_existing_character() {
        let mut world = PhysicsWorld::new();
        let handle = world.add_character(Vec3::new(0.0, 3.0, 0.0), 0.3, 1.8);

        let body = CharacterBody::attach(world, handle, 0.3, 1.8).unwrap();
        assert_eq!(body.handle(), handle);
        assert!((body.position().y - 3.0).abs() < 1e-5);
    }
}
