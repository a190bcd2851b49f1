mod blocks;
mod test_level;

pub use blocks::{LevelBlock, LevelBlockKind};
pub use test_level::TestLevel;
