mod tick;

pub use tick::{FixedTimestep, FrameTick, SimulationLoop};
