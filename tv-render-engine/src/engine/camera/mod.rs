//! Camera rig for looking around the TV set.
//!
//! An orbit rig with smoothed motion, plus named views (default, TV
//! close-up, bookmarks) reached through cinematic transitions.

/// Viewport camera resource, rig maths and the input controller system.
pub mod viewport_camera;

/// `ViewRequest` events and how they resolve to a camera pose.
pub mod views;

pub use viewport_camera::{MainCamera, ViewportCamera};
pub use views::ViewRequest;
