mod look;
mod run_walk;

pub use look::{CursorLock, LookInput, LookRig};
pub use run_walk::RunWalkToggle;
