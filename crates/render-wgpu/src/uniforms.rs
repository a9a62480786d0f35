use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use lightlab_render::PerspectiveCamera;
use lightlab_scene::{LightKind, Material, Node, SceneGraph};

/// Lights the lit shader can evaluate per frame.
pub(crate) const MAX_LIGHTS: usize = 8;

/// Light kind codes, matched in the lit shader.
pub(crate) mod kind {
    pub const AMBIENT: f32 = 0.0;
    pub const DIRECTIONAL: f32 = 1.0;
    pub const HEMISPHERE: f32 = 2.0;
    pub const POINT: f32 = 3.0;
    pub const SPOT: f32 = 4.0;
    pub const RECT_AREA: f32 = 5.0;
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
}

impl CameraUniform {
    pub fn from_camera(camera: &PerspectiveCamera) -> Self {
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            eye: camera.position.extend(1.0).to_array(),
        }
    }
}

/// One light as the shader sees it.
///
/// `color.w` holds the kind code; the other lanes depend on the kind:
/// `position.w` is the range cutoff, `direction.w` the cosine of the outer
/// spot angle, and `params` carries the spot inner cosine and decay, the
/// rect-area size, or the hemisphere ground radiance.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct GpuLight {
    pub color: [f32; 4],
    pub position: [f32; 4],
    pub direction: [f32; 4],
    pub params: [f32; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct LightsUniform {
    pub count: [u32; 4],
    pub items: [GpuLight; MAX_LIGHTS],
}

/// Pack the enabled lights of `scene`. Disabled lights are left out, not
/// zeroed, so they contribute nothing. Lights past [`MAX_LIGHTS`] are dropped.
pub(crate) fn pack_lights(scene: &SceneGraph) -> LightsUniform {
    let mut uniform = LightsUniform::zeroed();
    let mut count = 0;
    for (_, node, light) in scene.lights() {
        if !light.enabled {
            continue;
        }
        if count == MAX_LIGHTS {
            tracing::warn!(max = MAX_LIGHTS, "too many lights, dropping the rest");
            break;
        }
        let position = node.transform.position;
        let [r, g, b] = light.radiance();
        let mut gpu = GpuLight {
            color: [r, g, b, kind::AMBIENT],
            position: position.extend(0.0).to_array(),
            direction: [0.0; 4],
            params: [0.0; 4],
        };
        match light.kind {
            LightKind::Ambient => {}
            LightKind::Directional { target } => {
                gpu.color[3] = kind::DIRECTIONAL;
                gpu.direction = aim(position, target).extend(0.0).to_array();
            }
            LightKind::Hemisphere { ground_color } => {
                gpu.color[3] = kind::HEMISPHERE;
                // The node position is the sky direction.
                gpu.direction = position.normalize_or(Vec3::Y).extend(0.0).to_array();
                let [gr, gg, gb] = ground_color.to_linear();
                gpu.params = [
                    gr * light.intensity,
                    gg * light.intensity,
                    gb * light.intensity,
                    0.0,
                ];
            }
            LightKind::Point { distance, decay } => {
                gpu.color[3] = kind::POINT;
                gpu.position[3] = distance;
                gpu.params = [0.0, decay, 0.0, 0.0];
            }
            LightKind::Spot {
                target,
                distance,
                angle,
                penumbra,
                decay,
            } => {
                gpu.color[3] = kind::SPOT;
                gpu.position[3] = distance;
                gpu.direction = aim(position, target).extend(angle.cos()).to_array();
                let inner = angle * (1.0 - penumbra.clamp(0.0, 1.0));
                gpu.params = [inner.cos(), decay, 0.0, 0.0];
            }
            LightKind::RectArea {
                width,
                height,
                target,
            } => {
                gpu.color[3] = kind::RECT_AREA;
                gpu.direction = aim(position, target).extend(0.0).to_array();
                gpu.params = [width, height, 0.0, 0.0];
            }
        }
        uniform.items[count] = gpu;
        count += 1;
    }
    uniform.count[0] = count as u32;
    uniform
}

fn aim(from: Vec3, to: Vec3) -> Vec3 {
    (to - from).normalize_or(Vec3::NEG_Y)
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct InstanceData {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    /// x: 1 for unlit materials, y: roughness.
    pub params: [f32; 4],
}

impl InstanceData {
    pub fn new(node: &Node, material: &Material) -> Self {
        let model: Mat4 = node.transform.matrix();
        let [r, g, b] = material.color().to_linear();
        let roughness = match *material {
            Material::Physical { roughness, .. } => roughness,
            Material::Matcap { .. } => 1.0,
        };
        Self {
            model: model.to_cols_array_2d(),
            color: [r, g, b, 1.0],
            params: [
                if material.is_lit() { 0.0 } else { 1.0 },
                roughness,
                0.0,
                0.0,
            ],
        }
    }
}
