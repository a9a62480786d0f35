use std::time::{Duration, Instant};

/// Frame timing snapshot handed to each frame callback.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Seconds since the loop started.
    pub elapsed: f64,
    /// Seconds since the previous frame; zero on the first frame.
    pub delta: f32,
    /// Monotonic frame counter, starting at zero.
    pub frame_index: u64,
}

/// Monotonic elapsed-time clock anchored at loop start.
///
/// Readings never go backwards: an instant earlier than the anchor reads as
/// zero.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    start: Instant,
}

impl Clock {
    pub fn start(now: Instant) -> Self {
        Self { start: now }
    }

    pub fn started_at(&self) -> Instant {
        self.start
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.start)
    }

    pub fn elapsed_secs(&self, now: Instant) -> f64 {
        self.elapsed(now).as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_measures_from_start() {
        let t0 = Instant::now();
        let clock = Clock::start(t0);
        assert_eq!(clock.elapsed(t0), Duration::ZERO);
        assert_eq!(
            clock.elapsed(t0 + Duration::from_millis(1500)),
            Duration::from_millis(1500)
        );
        assert_eq!(clock.elapsed_secs(t0 + Duration::from_secs(10)), 10.0);
    }

    #[test]
    fn earlier_instants_read_as_zero() {
        let t0 = Instant::now() + Duration::from_secs(5);
        let clock = Clock::start(t0);
        assert_eq!(clock.elapsed(t0 - Duration::from_secs(1)), Duration::ZERO);
    }
}
