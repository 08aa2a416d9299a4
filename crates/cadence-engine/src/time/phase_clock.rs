use std::time::Instant;

/// Stopwatch for one loop phase.
///
/// The runtime keeps two of these (frame and fixed) and reads them with the
/// same `now` so both phases see a consistent timestamp per iteration.
/// Timestamps are passed in rather than sampled so tests can drive the clock
/// with synthetic instants.
#[derive(Debug, Copy, Clone)]
pub struct PhaseClock {
    started: Instant,
    fired: u64,
}

impl PhaseClock {
    pub fn new(now: Instant) -> Self {
        Self { started: now, fired: 0 }
    }

    /// Seconds elapsed since the last reset. Never negative.
    #[inline]
    pub fn elapsed(&self, now: Instant) -> f32 {
        now.saturating_duration_since(self.started).as_secs_f32()
    }

    /// Restarts the stopwatch at `now` and counts one firing.
    #[inline]
    pub fn reset(&mut self, now: Instant) {
        self.started = now;
        self.fired = self.fired.wrapping_add(1);
    }

    /// Restarts the stopwatch without counting a firing (used when the loop starts).
    #[inline]
    pub fn rebase(&mut self, now: Instant) {
        self.started = now;
    }

    /// Number of times the phase fired since construction.
    #[inline]
    pub fn fired(&self) -> u64 {
        self.fired
    }
}

impl Default for PhaseClock {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}
