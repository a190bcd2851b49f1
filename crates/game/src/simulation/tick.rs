/// Longest frame the accumulator will absorb, to avoid a spiral of death
/// after a stall.
const MAX_FRAME_TIME: f32 = 0.25;

pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(tick_rate: u32) -> Self {
        Self {
            dt: 1.0 / tick_rate as f32,
            accumulator: 0.0,
        }
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn accumulate(&mut self, delta: f32) {
        self.accumulator += delta.clamp(0.0, MAX_FRAME_TIME);
    }

    pub fn consume_tick(&mut self) -> bool {
        if self.accumulator >= self.dt {
            self.accumulator -= self.dt;
            true
        } else {
            false
        }
    }
}

/// One fixed simulation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    pub index: u64,
    pub dt: f32,
}

/// Turns variable frame times into fixed ticks for a controller.
pub struct SimulationLoop {
    timestep: FixedTimestep,
    ticks: u64,
}

impl SimulationLoop {
    pub fn new(tick_rate: u32) -> Self {
        Self {
            timestep: FixedTimestep::new(tick_rate),
            ticks: 0,
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Runs `on_tick` once per whole tick contained in `delta` plus any
    /// leftover from earlier frames. Returns the number of ticks run.
    pub fn update<F>(&mut self, delta: f32, mut on_tick: F) -> u32
    where
        F: FnMut(FrameTick),
    {
        self.timestep.accumulate(delta);

        let mut ticks_run = 0;
        while self.timestep.consume_tick() {
            on_tick(FrameTick {
                index: self.ticks,
                dt: self.timestep.dt(),
            });
            self.ticks += 1;
            ticks_run += 1;
        }

        ticks_run
    }
}
