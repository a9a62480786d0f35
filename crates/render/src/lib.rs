//! Rendering Adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers never mutate the scene graph.
//! - Camera aspect equals viewport width / height once a resize is applied.
//! - The applied pixel ratio never exceeds [`MAX_PIXEL_RATIO`].

mod camera;
mod renderer;
mod viewport;

pub use camera::PerspectiveCamera;
pub use renderer::{DebugTextRenderer, RenderError, Renderer};
pub use viewport::{MAX_PIXEL_RATIO, Viewport, capped_pixel_ratio, drawing_buffer_size};
