use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelBlockKind {
    Floor,
    Wall,
    Ledge,
}

/// Axis-aligned static box.
#[derive(Debug, Clone)]
pub struct LevelBlock {
    pub kind: LevelBlockKind,
    pub position: Vec3,
    pub half_extents: Vec3,
}

impl LevelBlock {
    pub fn floor(position: Vec3, half_size: f32) -> Self {
        Self {
            kind: LevelBlockKind::Floor,
            position,
            half_extents: Vec3::new(half_size, 0.1, half_size),
        }
    }

    /// Wall whose base sits on `base` and that spans `height` upwards.
    pub fn wall(base: Vec3, height: f32, depth: f32) -> Self {
        Self {
            kind: LevelBlockKind::Wall,
            position: base + Vec3::Y * (height / 2.0),
            half_extents: Vec3::new(0.25, height / 2.0, depth / 2.0),
        }
    }

    pub fn ledge(position: Vec3, half_extents: Vec3) -> Self {
        Self {
            kind: LevelBlockKind::Ledge,
            position,
            half_extents,
        }
    }

    pub fn top(&self) -> f32 {
        self.position.y + self.half_extents.y
    }
}
