/// Desired update rates and the fixed-step fluctuation tolerance.
///
/// Intervals are stored in seconds. An interval of `0` has a different meaning
/// per phase:
/// - frame phase: uncapped, fires on every loop iteration
/// - fixed phase: disabled, never fires
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rates {
    frame_interval: f32,
    fixed_interval: f32,
    fluctuation_tolerance: f32,
}

impl Rates {
    /// 250 Hz frame cap.
    pub const DEFAULT_FRAME_INTERVAL: f32 = 0.004;
    /// 50 Hz fixed step.
    pub const DEFAULT_FIXED_INTERVAL: f32 = 0.02;
    pub const DEFAULT_FLUCTUATION_TOLERANCE: f32 = 0.1;

    /// Sets the frame-rate cap in Hz. `0` removes the cap; the sign is ignored.
    pub fn set_update_rate(&mut self, hz: f32) {
        self.frame_interval = interval_for(hz);
    }

    /// Sets the fixed update rate in Hz. `0` disables fixed updates; the sign is ignored.
    pub fn set_fixed_update_rate(&mut self, hz: f32) {
        self.fixed_interval = interval_for(hz);
        if self.fixed_interval == 0.0 {
            log::warn!("fixed updates disabled (fixed update rate set to 0)");
        }
    }

    /// Sets the fraction by which a fixed-step delta may exceed the desired
    /// interval before it is clamped. Negative input is treated as `0`.
    pub fn set_fluctuation_tolerance(&mut self, tolerance: f32) {
        self.fluctuation_tolerance = tolerance.max(0.0);
    }

    /// Frame-rate cap in Hz; `0` when uncapped.
    pub fn update_rate(&self) -> f32 {
        rate_for(self.frame_interval)
    }

    /// Fixed update rate in Hz; `0` when disabled.
    pub fn fixed_update_rate(&self) -> f32 {
        rate_for(self.fixed_interval)
    }

    #[inline]
    pub fn frame_interval(&self) -> f32 {
        self.frame_interval
    }

    #[inline]
    pub fn fixed_interval(&self) -> f32 {
        self.fixed_interval
    }

    #[inline]
    pub fn fluctuation_tolerance(&self) -> f32 {
        self.fluctuation_tolerance
    }

    #[inline]
    pub fn fixed_enabled(&self) -> bool {
        self.fixed_interval != 0.0
    }

    /// Whether the frame phase fires after `elapsed` seconds.
    #[inline]
    pub fn frame_due(&self, elapsed: f32) -> bool {
        self.frame_interval == 0.0 || elapsed > self.frame_interval
    }

    /// The delta handed to fixed hooks after `elapsed` seconds, or `None` when
    /// the fixed phase does not fire.
    ///
    /// The delta never exceeds `fixed_interval * (1 + tolerance)`.
    pub fn fixed_step(&self, elapsed: f32) -> Option<f32> {
        if !self.fixed_enabled() || elapsed <= self.fixed_interval {
            return None;
        }
        let ceiling = self.fixed_interval * (1.0 + self.fluctuation_tolerance);
        Some(ceiling.min(elapsed))
    }
}

impl Default for Rates {
    fn default() -> Self {
        Self {
            frame_interval: Self::DEFAULT_FRAME_INTERVAL,
            fixed_interval: Self::DEFAULT_FIXED_INTERVAL,
            fluctuation_tolerance: Self::DEFAULT_FLUCTUATION_TOLERANCE,
        }
    }
}

fn interval_for(hz: f32) -> f32 {
    if hz == 0.0 { 0.0 } else { 1.0 / hz.abs() }
}

fn rate_for(interval: f32) -> f32 {
    if interval == 0.0 { 0.0 } else { 1.0 / interval }
}
