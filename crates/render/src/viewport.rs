/// Upper bound on the device pixel ratio a renderer applies.
///
/// High-density displays report 3x or more; rendering at that density costs
/// fill rate for little visible gain.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

/// Clamp a host device pixel ratio to [`MAX_PIXEL_RATIO`].
pub fn capped_pixel_ratio(device_pixel_ratio: f64) -> f64 {
    device_pixel_ratio.min(MAX_PIXEL_RATIO)
}

/// Pixel dimensions of a drawing buffer for a logical size and pixel ratio.
pub fn drawing_buffer_size(width: u32, height: u32, pixel_ratio: f64) -> (u32, u32) {
    let scale = |v: u32| (v as f64 * pixel_ratio).floor() as u32;
    (scale(width), scale(height))
}

/// Logical size of the display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// True when either dimension is zero, e.g. a minimised window.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Display for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_ratio_is_capped_at_two() {
        assert_eq!(capped_pixel_ratio(0.0), 0.0);
        assert_eq!(capped_pixel_ratio(1.0), 1.0);
        assert_eq!(capped_pixel_ratio(1.5), 1.5);
        assert_eq!(capped_pixel_ratio(2.0), 2.0);
        assert_eq!(capped_pixel_ratio(3.0), 2.0);
        assert_eq!(capped_pixel_ratio(4.25), 2.0);
    }

    #[test]
    fn pixel_ratio_sweep_matches_min() {
        for i in 0..=80 {
            let dpr = i as f64 * 0.05;
            assert_eq!(capped_pixel_ratio(dpr), dpr.min(2.0));
        }
    }

    #[test]
    fn drawing_buffer_scales_and_floors() {
        assert_eq!(drawing_buffer_size(1920, 1080, 2.0), (3840, 2160));
        assert_eq!(drawing_buffer_size(1001, 333, 1.5), (1501, 499));
        assert_eq!(drawing_buffer_size(800, 600, 1.0), (800, 600));
    }

    #[test]
    fn aspect_and_emptiness() {
        let v = Viewport::new(1920, 1080);
        assert_eq!(v.aspect(), 1920.0 / 1080.0);
        assert!(!v.is_empty());
        assert!(Viewport::new(0, 720).is_empty());
        assert_eq!(v.to_string(), "1920x1080");
    }
}
