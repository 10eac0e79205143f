//! The TV model and its set dressing.
//!
//! Loads the glTF scene, resolves the named parts the rest of the engine
//! needs, and keeps layer visibility and the setup slide in step with the
//! store.

/// Setup slide animation driven by the glTF clip.
pub mod animation;

/// Node-name table mapping scene nodes to environment layers.
///
/// Built once; the first matching rule wins.
pub mod classification;

/// Layer visibility sync.
pub mod layers;

/// Ambient, key and fill lights plus the clear colour.
pub mod lighting;

/// Scene spawning and the `SceneIndex` of named parts.
pub mod tv_model;

pub use tv_model::SceneIndex;
