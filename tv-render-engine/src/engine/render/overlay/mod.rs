//! On-screen indicators rendered into a texture sampled by the CRT screen.

/// Indicator visibility and auto-hide timers.
pub mod model;

/// Render target, UI tree and the per-frame update system.
pub mod ui;

pub use ui::{Overlay, OverlayTarget};
