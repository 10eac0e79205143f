use bevy::prelude::*;

use super::click_sound::{ClickSound, play_click};
use crate::engine::camera::ViewRequest;
use crate::engine::hud::{PanelVisibility, RenameEntry};
use crate::engine::store::{ChannelStore, Phase};

/// A remote-control or camera shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    TogglePanel,
    DefaultView,
    JumpToBookmark(usize),
    ToggleMute,
    ToggleAnimation,
    TogglePower,
    VolumeUp,
    VolumeDown,
    NextChannel,
    PrevChannel,
    Digit(u8),
}

/// Side effects of a key beyond the store mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KeyOutcome {
    pub click: bool,
    pub view: Option<ViewRequest>,
    pub toggle_panel: bool,
}

fn digit_of(key: KeyCode) -> Option<u8> {
    use KeyCode::*;
    let digit = match key {
        Digit0 | Numpad0 => 0,
        Digit1 | Numpad1 => 1,
        Digit2 | Numpad2 => 2,
        Digit3 | Numpad3 => 3,
        Digit4 | Numpad4 => 4,
        Digit5 | Numpad5 => 5,
        Digit6 | Numpad6 => 6,
        Digit7 | Numpad7 => 7,
        Digit8 | Numpad8 => 8,
        Digit9 | Numpad9 => 9,
        _ => return None,
    };
    Some(digit)
}

pub fn key_action(key: KeyCode, ctrl: bool) -> Option<KeyAction> {
    if let Some(digit) = digit_of(key) {
        return match (ctrl, digit) {
            (true, 1..=9) => Some(KeyAction::JumpToBookmark(usize::from(digit) - 1)),
            (true, _) => None,
            (false, _) => Some(KeyAction::Digit(digit)),
        };
    }

    let action = match key {
        KeyCode::KeyH => KeyAction::TogglePanel,
        KeyCode::Space => KeyAction::DefaultView,
        KeyCode::KeyM => KeyAction::ToggleMute,
        KeyCode::KeyL => KeyAction::ToggleAnimation,
        KeyCode::KeyO => KeyAction::TogglePower,
        KeyCode::Equal | KeyCode::NumpadAdd => KeyAction::VolumeUp,
        KeyCode::Minus | KeyCode::NumpadSubtract => KeyAction::VolumeDown,
        KeyCode::ArrowUp => KeyAction::NextChannel,
        KeyCode::ArrowDown => KeyAction::PrevChannel,
        _ => return None,
    };
    Some(action)
}

/// Apply a shortcut to the store. Volume keys need the TV on, channel keys
/// need channels mode; otherwise the key does nothing.
pub fn apply_key_action(action: KeyAction, store: &mut ChannelStore, now: f64) -> KeyOutcome {
    let mut outcome = KeyOutcome::default();
    match action {
        KeyAction::TogglePanel => outcome.toggle_panel = true,
        KeyAction::DefaultView => outcome.view = Some(ViewRequest::Default),
        KeyAction::JumpToBookmark(index) => {
            if store.bookmarks.get(index).is_some() {
                outcome.view = Some(ViewRequest::Bookmark(index));
            }
        }
        KeyAction::ToggleMute => store.toggle_mute(),
        KeyAction::ToggleAnimation => store.toggle_animation(),
        KeyAction::TogglePower => {
            outcome.click = true;
            store.toggle_power();
        }
        KeyAction::VolumeUp | KeyAction::VolumeDown if !store.phase.is_off() => {
            outcome.click = true;
            if action == KeyAction::VolumeUp {
                store.volume_up();
            } else {
                store.volume_down();
            }
        }
        KeyAction::NextChannel if store.phase == Phase::Channels => {
            outcome.click = true;
            store.next_channel();
        }
        KeyAction::PrevChannel if store.phase == Phase::Channels => {
            outcome.click = true;
            store.prev_channel();
        }
        KeyAction::Digit(digit) if store.phase == Phase::Channels => {
            outcome.click = true;
            store.enter_channel_digit(digit, now);
        }
        _ => {}
    }
    outcome
}

pub fn keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut store: ResMut<ChannelStore>,
    mut panel: ResMut<PanelVisibility>,
    mut views: EventWriter<ViewRequest>,
    rename: Res<RenameEntry>,
    click: Option<Res<ClickSound>>,
    mut commands: Commands,
    time: Res<Time>,
) {
    if rename.is_active() {
        return;
    }
    let ctrl = keyboard.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight]);
    let now = time.elapsed_secs_f64();

    for key in keyboard.get_just_pressed() {
        let Some(action) = key_action(*key, ctrl) else {
            continue;
        };
        let outcome = apply_key_action(action, &mut store, now);
        if outcome.click {
            play_click(&mut commands, click.as_deref());
        }
        if let Some(view) = outcome.view {
            views.write(view);
        }
        if outcome.toggle_panel {
            panel.0 = !panel.0;
        }
    }
}
