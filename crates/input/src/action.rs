/// Mouse button held during a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragButton {
    Primary,
    Middle,
    Secondary,
}

/// A pointer gesture the orbit controls understand.
///
/// The desktop shell produces these from window events; tests build them
/// directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerGesture {
    /// Orbit around the target by a pointer delta in logical pixels.
    Rotate { dx: f32, dy: f32 },
    /// Slide camera and target together by a pointer delta in logical pixels.
    Pan { dx: f32, dy: f32 },
    /// Move towards (positive) or away from (negative) the target.
    Zoom { steps: f32 },
}

impl PointerGesture {
    /// Gesture for a drag with the given button held.
    pub fn from_drag(button: DragButton, dx: f32, dy: f32) -> Self {
        match button {
            DragButton::Primary => PointerGesture::Rotate { dx, dy },
            DragButton::Secondary => PointerGesture::Pan { dx, dy },
            // Dragging down moves away, dragging up moves closer.
            DragButton::Middle => PointerGesture::Zoom {
                steps: if dy == 0.0 { 0.0 } else { -dy.signum() },
            },
        }
    }

    /// Gesture for a scroll wheel delta in lines; scrolling up zooms in.
    pub fn from_wheel(lines: f32) -> Self {
        PointerGesture::Zoom { steps: lines }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_drag_rotates() {
        assert_eq!(
            PointerGesture::from_drag(DragButton::Primary, 3.0, -2.0),
            PointerGesture::Rotate { dx: 3.0, dy: -2.0 }
        );
    }

    #[test]
    fn secondary_drag_pans() {
        assert!(matches!(
            PointerGesture::from_drag(DragButton::Secondary, 1.0, 1.0),
            PointerGesture::Pan { .. }
        ));
    }

    #[test]
    fn middle_drag_zooms_by_direction() {
        assert_eq!(
            PointerGesture::from_drag(DragButton::Middle, 0.0, 12.0),
            PointerGesture::Zoom { steps: -1.0 }
        );
        assert_eq!(
            PointerGesture::from_drag(DragButton::Middle, 5.0, 0.0),
            PointerGesture::Zoom { steps: 0.0 }
        );
    }

    #[test]
    fn wheel_passes_lines_through() {
        assert_eq!(
            PointerGesture::from_wheel(2.0),
            PointerGesture::Zoom { steps: 2.0 }
        );
    }
}
