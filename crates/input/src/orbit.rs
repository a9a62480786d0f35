use crate::action::PointerGesture;
use glam::Vec3;
use lightlab_render::PerspectiveCamera;
use std::f32::consts::{PI, TAU};

const EPS: f32 = 1e-6;

/// Orbit camera controls with optional inertial damping.
///
/// Gestures accumulate into pending deltas; [`OrbitControls::update`] applies
/// them once per frame. With damping enabled each update applies
/// `damping_factor` of the pending delta and keeps the rest, so motion eases
/// out over several frames.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Polar angle limits in radians, measured from +Y.
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
    pan_offset: Vec3,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            enable_damping: false,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            pan_offset: Vec3::ZERO,
        }
    }
}

impl OrbitControls {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    pub fn with_damping(mut self, factor: f32) -> Self {
        self.enable_damping = true;
        self.damping_factor = factor;
        self
    }

    /// Queue an orbit by a pointer delta. A drag across the full viewport
    /// height turns a full circle.
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        self.delta_theta -= TAU * dx / h * self.rotate_speed;
        self.delta_phi -= TAU * dy / h * self.rotate_speed;
    }

    /// Queue a pan so that the point under the cursor follows it.
    pub fn pan(&mut self, dx: f32, dy: f32, camera: &PerspectiveCamera, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        let offset = camera.position - self.target;
        let target_distance = offset.length() * (camera.fov_degrees.to_radians() * 0.5).tan();

        let forward = (self.target - camera.position).normalize_or_zero();
        let right = forward.cross(camera.up).normalize_or_zero();
        let up = right.cross(forward);

        let left = -right * (2.0 * dx * target_distance / h) * self.pan_speed;
        let upward = up * (2.0 * dy * target_distance / h) * self.pan_speed;
        self.pan_offset += left + upward;
    }

    /// Queue a dolly; positive steps move towards the target.
    pub fn zoom(&mut self, steps: f32) {
        self.scale *= 0.95_f32.powf(self.zoom_speed * steps);
    }

    pub fn apply(&mut self, gesture: PointerGesture, camera: &PerspectiveCamera, viewport_height: f32) {
        match gesture {
            PointerGesture::Rotate { dx, dy } => self.rotate(dx, dy, viewport_height),
            PointerGesture::Pan { dx, dy } => self.pan(dx, dy, camera, viewport_height),
            PointerGesture::Zoom { steps } => self.zoom(steps),
        }
    }

    /// True while queued motion remains to be applied.
    pub fn is_settling(&self) -> bool {
        self.delta_theta.abs() > EPS
            || self.delta_phi.abs() > EPS
            || self.pan_offset.length_squared() > EPS * EPS
            || (self.scale - 1.0).abs() > EPS
    }

    /// Apply pending motion to the camera. Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let previous_position = camera.position;
        let previous_target = self.target;

        let offset = camera.position - self.target;
        let mut radius = offset.length();
        let (mut theta, mut phi) = if radius > EPS {
            (offset.x.atan2(offset.z), (offset.y / radius).clamp(-1.0, 1.0).acos())
        } else {
            (0.0, PI * 0.5)
        };

        let factor = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };

        theta += self.delta_theta * factor;
        phi += self.delta_phi * factor;
        phi = phi.clamp(
            self.min_polar_angle.max(EPS),
            self.max_polar_angle.min(PI - EPS),
        );

        radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);
        self.target += self.pan_offset * factor;

        let sin_phi = phi.sin();
        let new_offset = Vec3::new(
            radius * sin_phi * theta.sin(),
            radius * phi.cos(),
            radius * sin_phi * theta.cos(),
        );
        camera.position = self.target + new_offset;
        camera.look_at(self.target);

        if self.enable_damping {
            self.delta_theta *= 1.0 - self.damping_factor;
            self.delta_phi *= 1.0 - self.damping_factor;
            self.pan_offset *= 1.0 - self.damping_factor;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        let moved = camera.position.distance_squared(previous_position) > EPS
            || self.target.distance_squared(previous_target) > EPS;
        if moved {
            tracing::trace!(
                x = camera.position.x,
                y = camera.position.y,
                z = camera.position.z,
                "orbit camera moved"
            );
        }
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::default()
    }

    #[test]
    fn idle_update_keeps_camera_in_place() {
        let mut cam = camera();
        let start = cam.position;
        let mut controls = OrbitControls::new(Vec3::ZERO);
        assert!(!controls.update(&mut cam));
        assert!((cam.position - start).length() < 1e-5);
    }

    #[test]
    fn quarter_height_drag_turns_a_quarter() {
        let mut cam = camera();
        cam.position = Vec3::new(0.0, 0.0, 2.0);
        let mut controls = OrbitControls::new(Vec3::ZERO);
        controls.rotate(200.0, 0.0, 800.0);
        assert!(controls.update(&mut cam));
        // theta goes from 0 to -pi/2: the camera swings from +Z to -X.
        assert!((cam.position - Vec3::new(-2.0, 0.0, 0.0)).length() < 1e-4);
        assert_eq!(cam.target, Vec3::ZERO);
    }

    #[test]
    fn orbit_preserves_distance() {
        let mut cam = camera();
        let distance = cam.position.length();
        let mut controls = OrbitControls::new(Vec3::ZERO);
        controls.rotate(37.0, -12.0, 600.0);
        controls.update(&mut cam);
        assert!((cam.position.length() - distance).abs() < 1e-4);
    }

    #[test]
    fn polar_angle_is_clamped_short_of_the_pole() {
        let mut cam = camera();
        let mut controls = OrbitControls::new(Vec3::ZERO);
        controls.rotate(0.0, 10_000.0, 100.0);
        controls.update(&mut cam);
        assert!(cam.position.y > 0.0);
        assert!(cam.position.x.is_finite() && cam.position.z.is_finite());
    }

    #[test]
    fn damping_eases_towards_full_rotation() {
        let mut damped_cam = camera();
        damped_cam.position = Vec3::new(0.0, 0.0, 2.0);
        let mut damped = OrbitControls::new(Vec3::ZERO).with_damping(0.05);
        damped.rotate(100.0, 0.0, 800.0);

        assert!(damped.update(&mut damped_cam));
        let first_step = damped_cam.position.x.atan2(damped_cam.position.z);
        // Only the damping factor of the pending delta is applied per frame.
        let full = -TAU * 100.0 / 800.0;
        assert!((first_step - full * 0.05).abs() < 1e-4);

        for _ in 0..500 {
            damped.update(&mut damped_cam);
        }
        assert!(!damped.is_settling());
        let settled = damped_cam.position.x.atan2(damped_cam.position.z);
        assert!((settled - full).abs() < 1e-3);
    }

    #[test]
    fn zoom_in_shortens_distance() {
        let mut cam = camera();
        let before = cam.position.length();
        let mut controls = OrbitControls::new(Vec3::ZERO);
        controls.zoom(1.0);
        controls.update(&mut cam);
        assert!((cam.position.length() - before * 0.95).abs() < 1e-4);
    }

    #[test]
    fn zoom_respects_distance_limits() {
        let mut cam = camera();
        let mut controls = OrbitControls::new(Vec3::ZERO);
        controls.min_distance = 1.0;
        controls.zoom(200.0);
        controls.update(&mut cam);
        assert!((cam.position.length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn pan_moves_target_and_camera_together() {
        let mut cam = camera();
        let mut controls = OrbitControls::new(Vec3::ZERO);
        let before = cam.position - controls.target;
        controls.apply(PointerGesture::Pan { dx: 50.0, dy: 0.0 }, &cam, 600.0);
        assert!(controls.update(&mut cam));
        assert_ne!(controls.target, Vec3::ZERO);
        let after = cam.position - controls.target;
        assert!((after - before).length() < 1e-4);
        assert_eq!(cam.target, controls.target);
    }
}
