use glam::{Mat4, Vec3};

/// Perspective camera aimed at a target point.
///
/// The projection matrix is cached; after changing `fov_degrees`, `aspect`,
/// `near` or `far`, call [`PerspectiveCamera::update_projection_matrix`].
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    projection: Mat4,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(75.0, 16.0 / 9.0, 0.1, 100.0)
    }
}

impl PerspectiveCamera {
    pub fn new(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            position: Vec3::new(1.0, 1.0, 2.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_degrees,
            aspect,
            near,
            far,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Recompute the cached projection from the current parameters.
    pub fn update_projection_matrix(&mut self) {
        self.projection =
            Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far);
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }
}
