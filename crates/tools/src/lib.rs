//! Developer Tooling: debug panel model and scene inspector.
//!
//! # Invariants
//! - The panel writes straight into bound scene fields; the only validation
//!   is the declared numeric range and step of each control.
//! - Panel actions go through the scene's toggle capabilities.

mod inspector;
mod panel;

pub use inspector::{SceneInspector, SceneSummary};
pub use panel::{Binding, Control, DebugPanel, NumericRange, PanelAction, PanelError};
