/// Named lateral axes polled once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Source of raw per-frame input. Axis values are expected in [-1, 1];
/// `jump_down` / `jump_up` are the button edges reported by the backend.
pub trait InputProvider {
    fn axis(&self, axis: Axis) -> f32;
    fn jump_down(&self) -> bool;
    fn jump_up(&self) -> bool;
}

/// Plain input frame, used for scripted playback and by hosts that poll
/// their own devices.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawInput {
    pub horizontal: f32,
    pub vertical: f32,
    pub jump_down: bool,
    pub jump_up: bool,
}

impl RawInput {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn axes(horizontal: f32, vertical: f32) -> Self {
        Self {
            horizontal,
            vertical,
            ..Self::default()
        }
    }

    pub fn with_jump_down(mut self) -> Self {
        self.jump_down = true;
        self
    }

    pub fn with_jump_up(mut self) -> Self {
        self.jump_up = true;
        self
    }
}

impl InputProvider for RawInput {
    fn axis(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }

    fn jump_down(&self) -> bool {
        self.jump_down
    }

    fn jump_up(&self) -> bool {
        self.jump_up
    }
}
