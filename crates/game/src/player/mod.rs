mod config;
mod controller;
mod integrator;
mod lateral;
mod state;

pub use config::{ConfigError, ControllerConfig};
pub use controller::{Controller, FirstPersonController, PlatformerController};
pub use integrator::{MovementIntegrator, kinematic_step};
pub use lateral::{LateralAxes, Orientation, Planar, Spatial};
pub use state::{ControllerState, MotionState, MovementDirection};
