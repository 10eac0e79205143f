//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, system ordering
//! and plugin initialisation for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with the screen material, JSON manifest loading,
/// the RPC bridge and platform-specific panels.
pub mod app_setup;

/// Application state machine and the runtime system sets.
pub mod app_state;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
