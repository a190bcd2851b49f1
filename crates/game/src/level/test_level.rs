use glam::Vec3;

use crate::physics::PhysicsWorld;

use super::{LevelBlock, LevelBlockKind};

/// Small side-scrolling course: a floor, a shaft between two tall walls for
/// wall jumps, and a row of ledges at increasing heights.
pub struct TestLevel {
    blocks: Vec<LevelBlock>,
}

impl Default for TestLevel {
    fn default() -> Self {
        Self::new()
    }
}

impl TestLevel {
    const FLOOR_SIZE: f32 = 50.0;
    const FLOOR_Y: f32 = 0.0;
    const WALL_HEIGHT: f32 = 12.0;
    const WALL_DEPTH: f32 = 6.0;
    const SHAFT_LEFT: f32 = 6.0;
    const SHAFT_RIGHT: f32 = 9.0;

    pub fn new() -> Self {
        let mut blocks = vec![LevelBlock::floor(
            Vec3::new(0.0, Self::FLOOR_Y, 0.0),
            Self::FLOOR_SIZE,
        )];

        Self::add_shaft(&mut blocks);
        Self::add_ledges(&mut blocks);

        Self { blocks }
    }

    fn add_shaft(blocks: &mut Vec<LevelBlock>) {
        let floor_top = Self::FLOOR_Y + 0.1;

        for x in [Self::SHAFT_LEFT, Self::SHAFT_RIGHT] {
            blocks.push(LevelBlock::wall(
                Vec3::new(x, floor_top, 0.0),
                Self::WALL_HEIGHT,
                Self::WALL_DEPTH,
            ));
        }
    }

    fn add_ledges(blocks: &mut Vec<LevelBlock>) {
        for i in 0..4 {
            let step = i as f32;
            blocks.push(LevelBlock::ledge(
                Vec3::new(-4.0 - 3.0 * step, 0.6 + 0.8 * step, 0.0),
                Vec3::new(1.0, 0.25, 2.0),
            ));
        }
    }

    pub fn blocks(&self) -> &[LevelBlock] {
        &self.blocks
    }

    pub fn walls(&self) -> impl Iterator<Item = &LevelBlock> {
        self.blocks
            .iter()
            .filter(|block| block.kind == LevelBlockKind::Wall)
    }

    /// Start position above the floor, left of the wall shaft.
    pub fn spawn_point(&self) -> Vec3 {
        Vec3::new(0.0, Self::FLOOR_Y + 2.0, 0.0)
    }

    pub fn build(&self, physics: &mut PhysicsWorld) {
        for block in &self.blocks {
            physics.add_static_box(block.position, block.half_extents);
        }
    }
}
