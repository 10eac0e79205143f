//! Start-up loading: read the TV manifest and build everything that
//! depends on it, then wait for the model before the app enters
//! `AppState::Running`.

/// Full-window logo shown while loading.
pub mod loading_screen;

/// Manifest loading and the one-time scene, media and material setup.
pub mod manifest_loader;

/// Loading progress tracking resource for state transitions.
pub mod progress;
