//! Fixed timestep accumulator
//!
//! Turns real elapsed time into a whole number of logic ticks per frame.

/// Longest frame delta accepted, in seconds
const MAX_FRAME_SECONDS: f32 = 0.25;

#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f32,
    max_substeps: u32,
    accumulator: f32,
    /// Ticks thrown away because a frame hit the substep cap
    pub dropped_ticks: u64,
}

impl FixedTimestep {
    pub fn new(logic_rate: u32, max_substeps: u32) -> Self {
        Self {
            step: 1.0 / logic_rate.max(1) as f32,
            max_substeps: max_substeps.max(1),
            accumulator: 0.0,
            dropped_ticks: 0,
        }
    }

    /// Feed a frame's elapsed seconds and get the number of ticks to run.
    ///
    /// At most `max_substeps` ticks are returned; any backlog beyond that is
    /// discarded so a stalled frame cannot snowball.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_SECONDS);

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_substeps {
            self.accumulator -= self.step;
            ticks += 1;
        }

        if self.accumulator >= self.step {
            let backlog = (self.accumulator / self.step) as u64;
            self.dropped_ticks += backlog;
            log::debug!("Dropping {backlog} tick(s) of backlog");
            self.accumulator %= self.step;
        }
        ticks
    }
}
