use std::time::{Duration, Instant};

/// Supplies the instants at which frames should run.
///
/// The desktop shell drives the loop from redraw events instead; sources are
/// for headless runs where frames follow a simulated clock.
pub trait FrameSource {
    /// Instant for the next frame, or `None` when the source is exhausted.
    fn next_frame(&mut self) -> Option<Instant>;
}

/// Frames at a fixed interval starting at `start`.
#[derive(Debug, Clone)]
pub struct FixedRateSource {
    start: Instant,
    interval: Duration,
    index: u32,
    remaining: Option<u64>,
}

impl FixedRateSource {
    /// Unbounded source; the first frame lands on `start`.
    pub fn new(start: Instant, interval: Duration) -> Self {
        Self {
            start,
            interval,
            index: 0,
            remaining: None,
        }
    }

    /// Source at `fps` frames per second. Non-positive rates fall back to 60.
    pub fn from_fps(start: Instant, fps: f64) -> Self {
        let fps = if fps.is_finite() && fps > 0.0 { fps } else { 60.0 };
        Self::new(start, Duration::from_secs_f64(1.0 / fps))
    }

    /// Limit the source to `n` more frames.
    pub fn take_frames(mut self, n: u64) -> Self {
        self.remaining = Some(n);
        self
    }
}

impl FrameSource for FixedRateSource {
    fn next_frame(&mut self) -> Option<Instant> {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return None;
            }
            *remaining -= 1;
        }
        let at = self.start + self.interval * self.index;
        self.index = self.index.saturating_add(1);
        Some(at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yields_evenly_spaced_instants() {
        let t0 = Instant::now();
        let mut source = FixedRateSource::new(t0, Duration::from_millis(20)).take_frames(3);
        assert_eq!(source.next_frame(), Some(t0));
        assert_eq!(source.next_frame(), Some(t0 + Duration::from_millis(20)));
        assert_eq!(source.next_frame(), Some(t0 + Duration::from_millis(40)));
        assert_eq!(source.next_frame(), None);
    }

    #[test]
    fn bad_fps_falls_back() {
        let t0 = Instant::now();
        let mut source = FixedRateSource::from_fps(t0, 0.0);
        source.next_frame();
        let second = source.next_frame().unwrap();
        assert_eq!(second - t0, Duration::from_secs_f64(1.0 / 60.0));
    }
}
