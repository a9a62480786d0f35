//! wgpu render backend: lit primitives, light helper lines, and a scaled
//! drawing buffer.
//!
//! # Invariants
//! - The renderer never mutates the scene.
//! - Disabled lights are excluded from shading; hidden helpers are not drawn.
//! - The drawing buffer is the logical size times the applied pixel ratio,
//!   independent of the window surface size.

mod context;
mod gpu;
mod helpers;
mod mesh;
mod shaders;
mod uniforms;

pub use context::InitError;
pub use gpu::{SurfaceFrame, WgpuRenderer};
