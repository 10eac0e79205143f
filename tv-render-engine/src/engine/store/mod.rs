//! Channel and power state store.
//!
//! A single `ChannelStore` resource holds everything the TV, the overlay
//! and the panels read: phase, channel, volume, layer flags and camera
//! bookmarks. Mutations go through named actions and are published once
//! per frame as a `StoreChanged` diff.

/// Camera bookmarks with export/import.
pub mod bookmarks;

/// Change broadcasting and store housekeeping systems.
pub mod broadcast;

/// Progressive channel number entry.
pub mod channel_entry;

/// The store resource and its actions.
pub mod channel_store;

/// Environment layer flags.
pub mod layers;

/// Power and playback phases.
pub mod phase;

/// Platform bookmark persistence (localStorage or a JSON file).
pub mod persistence;

pub mod volume;

pub use broadcast::StoreChanged;
pub use channel_store::ChannelStore;
pub use phase::Phase;
