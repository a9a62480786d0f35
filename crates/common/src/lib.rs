//! Shared types and utilities for the lightlab workspace.

mod color;
mod types;

pub use color::{Color, ColorError};
pub use types::{NodeId, Transform};
