use crate::camera::PerspectiveCamera;
use crate::viewport::drawing_buffer_size;
use lightlab_scene::{NodeKind, SceneGraph};
use std::fmt::Write;

/// Errors a renderer can return from [`Renderer::render`].
///
/// The frame loop treats every variant as fatal.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("surface error: {0}")]
    Surface(String),
    #[error("GPU out of memory")]
    OutOfMemory,
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the scene and a camera, then produces output. It never
/// mutates the scene.
pub trait Renderer {
    /// The output type produced by one frame.
    type Output;

    /// Set the logical output size.
    fn set_size(&mut self, width: u32, height: u32);

    /// Logical output size as last set.
    fn size(&self) -> (u32, u32);

    /// Set the device pixel ratio used to size the drawing buffer.
    fn set_pixel_ratio(&mut self, ratio: f64);

    fn pixel_ratio(&self) -> f64;

    /// Physical size of the drawing buffer: logical size times pixel ratio.
    fn drawing_buffer_size(&self) -> (u32, u32) {
        let (width, height) = self.size();
        drawing_buffer_size(width, height, self.pixel_ratio())
    }

    /// Size of the pixels actually rendered: the drawing buffer, at least
    /// one pixel on each axis.
    fn render_target_size(&self) -> (u32, u32) {
        let (width, height) = self.drawing_buffer_size();
        (width.max(1), height.max(1))
    }

    /// Render one frame of the scene as seen by the camera.
    fn render(
        &mut self,
        scene: &SceneGraph,
        camera: &PerspectiveCamera,
    ) -> Result<Self::Output, RenderError>;
}

/// Headless renderer producing a text report per frame.
///
/// Useful for CLI output, logging, and testing the frame loop without a GPU.
#[derive(Debug)]
pub struct DebugTextRenderer {
    width: u32,
    height: u32,
    pixel_ratio: f64,
    frames: u64,
}

impl Default for DebugTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            pixel_ratio: 1.0,
            frames: 0,
        }
    }

    /// Number of frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_pixel_ratio(&mut self, ratio: f64) {
        self.pixel_ratio = ratio;
    }

    fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    fn render(
        &mut self,
        scene: &SceneGraph,
        camera: &PerspectiveCamera,
    ) -> Result<String, RenderError> {
        let (buffer_w, buffer_h) = self.render_target_size();

        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "=== Frame {} ({}x{} @{:.2} -> {}x{}) ===",
            self.frames, self.width, self.height, self.pixel_ratio, buffer_w, buffer_h
        );
        let _ = writeln!(
            out,
            "Camera: pos=({:.2}, {:.2}, {:.2}) target=({:.2}, {:.2}, {:.2}) fov={:.0} aspect={:.3}",
            camera.position.x,
            camera.position.y,
            camera.position.z,
            camera.target.x,
            camera.target.y,
            camera.target.z,
            camera.fov_degrees,
            camera.aspect
        );

        for (id, node) in scene.nodes() {
            match &node.kind {
                NodeKind::Mesh(mesh) => {
                    let r = node.transform.rotation;
                    let _ = writeln!(
                        out,
                        "  [{id}] mesh {} ({}) rot=({:.3}, {:.3}, {:.3})",
                        node.name,
                        mesh.primitive.label(),
                        r.x,
                        r.y,
                        r.z
                    );
                }
                NodeKind::Light(light) => {
                    let _ = writeln!(
                        out,
                        "  [{id}] light {} ({}) {} x{:.2}{}",
                        node.name,
                        light.kind.label(),
                        light.color,
                        light.intensity,
                        if light.enabled { "" } else { " [off]" }
                    );
                }
                NodeKind::Helper(_) if node.visible => {
                    let _ = writeln!(out, "  [{id}] helper {}", node.name);
                }
                NodeKind::Helper(_) => {}
            }
        }

        self.frames += 1;
        tracing::trace!(frame = self.frames, "debug frame rendered");
        Ok(out)
    }
}
