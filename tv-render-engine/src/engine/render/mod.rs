//! Rendering of the TV screen surface.
//!
//! The screen is a standard PBR material extended with a CRT compositing
//! shader. Its inputs are the video texture written by the media backend
//! and an overlay texture drawn by an offscreen UI camera.

/// Offscreen indicator overlay (channel number, volume, no signal, buffering).
///
/// A dedicated 2D camera renders a Bevy UI tree into an image that the screen
/// material samples.
pub mod overlay;

/// CRT screen material extension and its per-frame uniform sync.
pub mod screen_material;
