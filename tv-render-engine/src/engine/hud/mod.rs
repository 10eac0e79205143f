//! Developer panel for native builds.
//!
//! Toggled with `H`. Shows and nudges the camera pose, manages camera
//! bookmarks and flips the environment layers. Web builds drive the same
//! store actions through the RPC bridge instead.

use bevy::prelude::*;

/// Buttons, bookmark list and readouts.
#[cfg(not(target_arch = "wasm32"))]
pub mod panel;

/// Text entry for renaming a bookmark.
pub mod rename;

pub use rename::RenameEntry;

/// Whether the panel (and the FPS counter) is shown.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelVisibility(pub bool);
