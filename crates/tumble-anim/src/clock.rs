/// Tracks animation time: a monotonic frame counter and elapsed milliseconds.
///
/// The clock never reads wall time. Whoever owns the driver decides how long
/// each frame lasts, which keeps headless runs and tests deterministic.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    frame: u64,
    elapsed_ms: f64,
    last_delta_ms: f64,
}

impl FrameClock {
    /// Create a new clock at frame 0, time 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by one frame of `delta_ms`. Returns the new frame number.
    pub fn advance(&mut self, delta_ms: f64) -> u64 {
        self.frame += 1;
        self.elapsed_ms += delta_ms;
        self.last_delta_ms = delta_ms;
        self.frame
    }

    /// Return the current frame number.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Total elapsed milliseconds since the clock was created.
    pub fn now_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Duration of the most recent frame in milliseconds.
    pub fn last_delta_ms(&self) -> f64 {
        self.last_delta_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_initial_state() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.now_ms(), 0.0);
    }

    #[test]
    fn clock_advance_accumulates() {
        let mut clock = FrameClock::new();
        clock.advance(16.0);
        clock.advance(16.0);
        let frame = clock.advance(8.0);
        assert_eq!(frame, 3);
        assert!((clock.now_ms() - 40.0).abs() < f64::EPSILON);
        assert!((clock.last_delta_ms() - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn clock_zero_delta_still_counts_frames() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        assert_eq!(clock.frame(), 1);
        assert_eq!(clock.now_ms(), 0.0);
    }
}
