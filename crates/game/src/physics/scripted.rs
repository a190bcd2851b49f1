use std::collections::VecDeque;

use glam::Vec3;

use super::{CollisionFlags, CollisionQuery};

/// Collision backend without geometry: moves are applied verbatim and the
/// reported contacts come from a script. Queued one-frame contacts are
/// consumed first, then the persistent contact set is reported.
#[derive(Debug, Clone)]
pub struct ScriptedBody {
    position: Vec3,
    queued: VecDeque<CollisionFlags>,
    contacts: CollisionFlags,
    moves: Vec<Vec3>,
}

impl Default for ScriptedBody {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl ScriptedBody {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            queued: VecDeque::new(),
            contacts: CollisionFlags::empty(),
            moves: Vec::new(),
        }
    }

    pub fn with_contacts(mut self, contacts: CollisionFlags) -> Self {
        self.contacts = contacts;
        self
    }

    pub fn set_contacts(&mut self, contacts: CollisionFlags) {
        self.contacts = contacts;
    }

    pub fn queue_contacts(&mut self, contacts: CollisionFlags) {
        self.queued.push_back(contacts);
    }

    pub fn moves(&self) -> &[Vec3] {
        &self.moves
    }

    pub fn last_move(&self) -> Option<Vec3> {
        self.moves.last().copied()
    }
}

impl CollisionQuery for ScriptedBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn move_by(&mut self, displacement: Vec3, _dt: f32) -> CollisionFlags {
        self.position += displacement;
        self.moves.push(displacement);
        self.queued.pop_front().unwrap_or(self.contacts)
    }
}
