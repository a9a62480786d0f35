//! Scene graph: meshes, lights, light helpers and time-driven spin animation.
//!
//! # Invariants
//! - Nodes are only added at startup; the frame loop never changes structure.
//! - Runtime edits are limited to flags, colors, intensities and transforms.
//! - Spin animation is a pure function of elapsed time, never of frame count.

pub mod demo;
mod graph;
mod light;
mod mesh;
mod toggle;

pub use demo::DemoRig;
pub use graph::{Node, NodeKind, SceneGraph, Spin};
pub use light::{Helper, Light, LightKind};
pub use mesh::{Material, Mesh, Primitive};
pub use toggle::{HelperToggle, LightToggle};
