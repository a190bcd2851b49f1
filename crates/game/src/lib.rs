pub mod input;
pub mod level;
pub mod physics;
pub mod player;
pub mod rig;
pub mod simulation;

pub use input::{Axis, InputProvider, InputSnapshot, JumpLatch, RawInput};
pub use level::TestLevel;
pub use physics::{CharacterBody, CollisionFlags, CollisionQuery, PhysicsWorld, ScriptedBody};
pub use player::{
    ConfigError, Controller, ControllerConfig, ControllerState, FirstPersonController,
    LateralAxes, MovementDirection, MovementIntegrator, Orientation, Planar, PlatformerController,
    Spatial,
};
pub use rig::{LookInput, LookRig, RunWalkToggle};
pub use simulation::{FixedTimestep, FrameTick, SimulationLoop};
