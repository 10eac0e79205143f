//! Keyboard shortcuts, scene clicks and the remote click sound.

/// One-shot remote click audio.
pub mod click_sound;

/// Remote-control and camera shortcuts.
pub mod keyboard;

/// Click-to-zoom and the mobile tap cycle.
pub mod pointer;
