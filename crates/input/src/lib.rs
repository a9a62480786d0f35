//! Input: pointer gestures mapped to orbit-camera actions.
//!
//! # Invariants
//! - Raw window events are translated into [`PointerGesture`]s before they
//!   reach the controls, so the controls never see platform types.
//! - Controls only touch the camera inside [`OrbitControls::update`].

pub mod action;
mod orbit;

pub use action::{DragButton, PointerGesture};
pub use orbit::OrbitControls;
