//! Diagnostics systems shared by both platforms.

/// FPS tracking and notification systems for performance monitoring.
///
/// Sends frame rate updates to the page via RPC and updates the native
/// counter shown with the panel.
pub mod fps_tracking;
