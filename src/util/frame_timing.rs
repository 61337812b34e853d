use web_time::Instant;

/// Wall-clock frame timer.
///
/// Produces the per-frame elapsed time used for camera movement and the
/// total time since start used for object rotation, and keeps a smoothed
/// FPS for diagnostics.
pub struct FrameClock {
    /// Clock start
    start: Instant,
    /// Seconds since `start` at the previous tick
    last: f32,
    /// Upper bound on a single frame's elapsed time (None = unclamped)
    max_delta: Option<f32>,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameClock {
    /// Start a clock now. `max_delta` bounds a single frame's elapsed time.
    #[must_use]
    pub fn new(max_delta: Option<f32>) -> Self {
        Self {
            start: Instant::now(),
            last: 0.0,
            max_delta,
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Advance using the wall clock. Returns the elapsed seconds.
    pub fn tick(&mut self) -> f32 {
        let now = self.start.elapsed().as_secs_f32();
        self.tick_at(now)
    }

    /// Advance to `now` seconds since start. Returns the elapsed seconds,
    /// never negative and bounded by `max_delta` when set.
    pub fn tick_at(&mut self, now: f32) -> f32 {
        let mut elapsed = (now - self.last).max(0.0);
        self.last = self.last.max(now);

        if let Some(max) = self.max_delta {
            elapsed = elapsed.min(max);
        }

        if elapsed > 0.0 {
            let instant_fps = 1.0 / elapsed;
            self.smoothed_fps =
                self.smoothed_fps * (1.0 - self.smoothing) + instant_fps * self.smoothing;
        }
        elapsed
    }

    /// Seconds since the clock started, as of the last tick.
    #[must_use]
    pub fn total(&self) -> f32 {
        self.last
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_difference_between_ticks() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.tick_at(0.5), 0.5);
        assert!((clock.tick_at(0.75) - 0.25).abs() < 1e-6);
        assert_eq!(clock.total(), 0.75);
    }

    #[test]
    fn unclamped_by_default() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.tick_at(30.0), 30.0);
    }

    #[test]
    fn stall_is_clamped_when_configured() {
        let mut clock = FrameClock::new(Some(0.1));
        assert_eq!(clock.tick_at(30.0), 0.1);
        // Total time still tracks the wall clock so rotations stay in sync.
        assert_eq!(clock.total(), 30.0);
    }

    #[test]
    fn backwards_time_yields_zero() {
        let mut clock = FrameClock::default();
        let _ = clock.tick_at(2.0);
        assert_eq!(clock.tick_at(1.0), 0.0);
        assert_eq!(clock.total(), 2.0);
    }

    #[test]
    fn fps_moves_toward_frame_rate() {
        let mut clock = FrameClock::default();
        for i in 1..=200 {
            let _ = clock.tick_at(i as f32 / 30.0);
        }
        assert!((clock.fps() - 30.0).abs() < 1.0);
    }
}
