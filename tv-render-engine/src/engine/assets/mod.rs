//! Runtime asset definitions.

/// JSON manifest naming the model, the power-on clips and the channel map.
pub mod tv_manifest;

pub use tv_manifest::TvManifest;
