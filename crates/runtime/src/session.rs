use crate::clock::FrameTime;
use glam::Vec3;
use lightlab_common::{Color, NodeId};
use lightlab_input::{OrbitControls, PointerGesture};
use lightlab_render::{PerspectiveCamera, RenderError, Renderer, Viewport, capped_pixel_ratio};
use lightlab_scene::{DemoRig, SceneGraph, demo};
use lightlab_tools::{DebugPanel, PanelAction, PanelError};

const FOV_DEGREES: f32 = 75.0;
const NEAR: f32 = 0.1;
const FAR: f32 = 100.0;
const DAMPING_FACTOR: f32 = 0.05;

/// Everything one running demo owns: scene, camera, controls, renderer and
/// the current viewport.
///
/// Resize handling and frames both go through `&mut self`, so a resize can
/// never interleave with a frame in progress.
pub struct Session<R: Renderer> {
    scene: SceneGraph,
    rig: DemoRig,
    panel: DebugPanel,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    renderer: R,
    viewport: Viewport,
    device_pixel_ratio: f64,
}

impl<R: Renderer> Session<R> {
    /// Build the demo scene for `viewport` and size `renderer` to match.
    ///
    /// The floor plane takes the initial viewport dimensions and keeps them
    /// across later resizes.
    pub fn new(renderer: R, viewport: Viewport, device_pixel_ratio: f64) -> Self {
        let (scene, rig) = demo::build((viewport.width as f32, viewport.height as f32));
        let panel = DebugPanel::for_demo(&rig);
        let aspect = if viewport.is_empty() {
            1.0
        } else {
            viewport.aspect()
        };
        let camera = PerspectiveCamera::new(FOV_DEGREES, aspect, NEAR, FAR);
        let controls = OrbitControls::new(Vec3::ZERO).with_damping(DAMPING_FACTOR);

        let mut session = Self {
            scene,
            rig,
            panel,
            camera,
            controls,
            renderer,
            viewport,
            device_pixel_ratio,
        };
        session.renderer.set_size(viewport.width, viewport.height);
        session
            .renderer
            .set_pixel_ratio(capped_pixel_ratio(device_pixel_ratio));
        tracing::info!(
            viewport = %viewport,
            device_pixel_ratio,
            nodes = session.scene.len(),
            "session created"
        );
        session
    }

    /// Apply a new viewport size and device pixel ratio.
    ///
    /// Zero-area sizes are ignored and leave all state untouched. Returns
    /// whether the resize was applied.
    pub fn on_resize(&mut self, width: u32, height: u32, device_pixel_ratio: f64) -> bool {
        let viewport = Viewport::new(width, height);
        if viewport.is_empty() {
            tracing::debug!(viewport = %viewport, "ignoring zero-area resize");
            return false;
        }

        self.viewport = viewport;
        self.device_pixel_ratio = device_pixel_ratio;
        self.camera.set_aspect(viewport.aspect());
        self.camera.update_projection_matrix();
        self.renderer.set_size(width, height);
        self.renderer
            .set_pixel_ratio(capped_pixel_ratio(device_pixel_ratio));
        tracing::debug!(
            viewport = %viewport,
            device_pixel_ratio,
            pixel_ratio = self.renderer.pixel_ratio(),
            "viewport resized"
        );
        true
    }

    /// Advance the scene to `time`, step the controls and render.
    pub fn frame(&mut self, time: FrameTime) -> Result<R::Output, RenderError> {
        self.scene.animate(time.elapsed);
        self.controls.update(&mut self.camera);
        self.renderer.render(&self.scene, &self.camera)
    }

    /// Feed a pointer gesture to the orbit controls.
    pub fn apply_gesture(&mut self, gesture: PointerGesture) {
        self.controls
            .apply(gesture, &self.camera, self.viewport.height as f32);
    }

    pub fn set_light_intensity(&mut self, light: NodeId, value: f32) -> Result<f32, PanelError> {
        self.panel.set_intensity(&mut self.scene, light, value)
    }

    pub fn set_light_color(&mut self, light: NodeId, color: Color) -> Result<(), PanelError> {
        self.panel.set_color(&mut self.scene, light, color)
    }

    pub fn trigger(&mut self, action: PanelAction) {
        self.panel.trigger(&mut self.scene, action);
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.scene
    }

    pub fn rig(&self) -> &DemoRig {
        &self.rig
    }

    pub fn panel(&self) -> &DebugPanel {
        &self.panel
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut OrbitControls {
        &mut self.controls
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Device pixel ratio as reported by the host, before capping.
    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }
}
