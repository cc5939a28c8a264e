use std::time::Instant;

/// Wall-clock source for per-frame delta time.
///
/// Ticks are seconds since the clock was created. The previous tick starts at
/// zero, so the first delta covers everything since creation.
#[derive(Debug, Clone)]
pub struct Clock {
    start: Instant,
    previous_ticks: f32,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            previous_ticks: 0.0,
        }
    }

    pub fn tick(&mut self) -> f32 {
        let ticks = self.start.elapsed().as_secs_f32();
        self.advance_to(ticks)
    }

    /// Moves the clock to `ticks` and returns the delta, never negative.
    pub fn advance_to(&mut self, ticks: f32) -> f32 {
        let delta_time = ticks - self.previous_ticks;

        if delta_time >= 0.0 {
            self.previous_ticks = ticks;
            delta_time
        } else {
            0.0
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.previous_ticks
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
