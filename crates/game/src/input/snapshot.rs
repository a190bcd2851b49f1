use super::{Axis, InputProvider};

pub const DEADZONE: f32 = 0.2;

/// Edge produced by one latch step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpEdge {
    None,
    Pressed,
    Released,
}

/// Held/released latch for the jump button. A press only registers from
/// `Idle` and a release only from `Held`, so each edge fires exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JumpLatch {
    #[default]
    Idle,
    Held,
}

impl JumpLatch {
    pub fn step(self, down: bool, up: bool) -> (Self, JumpEdge) {
        match self {
            Self::Idle if down => (Self::Held, JumpEdge::Pressed),
            Self::Held if up => (Self::Idle, JumpEdge::Released),
            latch => (latch, JumpEdge::None),
        }
    }
}

/// Deadzone-filtered input for a single frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    horizontal: f32,
    vertical: f32,
    pressed_jump: bool,
    released_jump: bool,
    latch: JumpLatch,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update<P: InputProvider + ?Sized>(&mut self, provider: &P) {
        self.horizontal = filter_deadzone(provider.axis(Axis::Horizontal));
        self.vertical = filter_deadzone(provider.axis(Axis::Vertical));

        let (latch, edge) = self.latch.step(provider.jump_down(), provider.jump_up());
        self.latch = latch;
        self.pressed_jump = edge == JumpEdge::Pressed;
        self.released_jump = edge == JumpEdge::Released;
    }

    pub fn horizontal(&self) -> f32 {
        self.horizontal
    }

    pub fn vertical(&self) -> f32 {
        self.vertical
    }

    pub fn pressed_jump(&self) -> bool {
        self.pressed_jump
    }

    pub fn released_jump(&self) -> bool {
        self.released_jump
    }

    pub fn holding_jump(&self) -> bool {
        self.latch == JumpLatch::Held
    }
}

fn filter_deadzone(value: f32) -> f32 {
    if value.abs() >= DEADZONE { value } else { 0.0 }
}
