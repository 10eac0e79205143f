//! The TV controller: phase state machine, power easing and screen
//! parameters, plus the systems that connect it to the store and the
//! media backend.

/// Phase state machine reacting to store diffs, media events and time.
pub mod controller;

/// Power-on/off easing.
pub mod power;

/// Numeric screen state mirrored into the CRT material.
pub mod screen_params;

/// Bevy systems driving the controller.
pub mod systems;

/// Cancellable phase deadlines.
pub mod timers;

use bevy::prelude::*;

pub use controller::{ClipSequence, TvController};

/// Resource owning the single controller instance.
#[derive(Resource, Deref, DerefMut)]
pub struct Tv(pub TvController);
