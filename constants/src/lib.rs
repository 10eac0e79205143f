//! Shared configuration for the TV showcase.
//!
//! Everything here is fixed at compile time. Values that a deployment may
//! want to override (media paths, channel map) are only defaults for the
//! runtime `tv_manifest.json`.

pub mod camera;
pub mod media;
pub mod scene;
pub mod screen;
pub mod timing;
