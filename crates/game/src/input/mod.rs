mod provider;
mod snapshot;

pub use provider::{Axis, InputProvider, RawInput};
pub use snapshot::{DEADZONE, InputSnapshot, JumpEdge, JumpLatch};
