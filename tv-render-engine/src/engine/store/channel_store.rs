use std::collections::BTreeMap;

use bevy::prelude::*;
use constants::media::{DEFAULT_CHANNELS, INITIAL_CHANNEL};
use constants::timing::INITIAL_VOLUME;
use serde::Serialize;

use super::bookmarks::{BookmarkError, BookmarkSet};
use super::channel_entry::{ChannelEntry, EntryOutcome};
use super::layers::{EnvironmentLayer, LayerVisibility};
use super::phase::Phase;
use super::volume::step_volume;

/// Central TV state. Input, RPC and the HUD mutate it through the named
/// actions below; the controller and overlay observe it through
/// `StoreChanged` diffs.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ChannelStore {
    pub phase: Phase,
    pub tv_on: bool,

    pub current_channel: u32,
    pub channels: BTreeMap<u32, String>,
    pub no_signal: bool,
    pub buffering: bool,
    pub entry: ChannelEntry,

    pub volume: f32,
    pub is_muted: bool,
    // Bumped on every action so the overlay re-shows at a pinned bound.
    pub volume_up_count: u32,
    pub volume_down_count: u32,
    pub muted_count: u32,
    pub volume_displayed: bool,

    pub animation_playing: bool,
    pub layers: LayerVisibility,
    pub bookmarks: BookmarkSet,
}

impl Default for ChannelStore {
    fn default() -> Self {
        let channels = DEFAULT_CHANNELS
            .iter()
            .map(|(number, source)| (*number, source.to_string()))
            .collect();
        Self::new(channels)
    }
}

impl ChannelStore {
    pub fn new(channels: BTreeMap<u32, String>) -> Self {
        Self {
            phase: Phase::Off,
            tv_on: false,
            current_channel: INITIAL_CHANNEL,
            channels,
            no_signal: false,
            buffering: false,
            entry: ChannelEntry::default(),
            volume: INITIAL_VOLUME,
            is_muted: true,
            volume_up_count: 0,
            volume_down_count: 0,
            muted_count: 0,
            volume_displayed: false,
            animation_playing: false,
            layers: LayerVisibility::default(),
            bookmarks: BookmarkSet::default(),
        }
    }

    pub fn toggle_power(&mut self) {
        self.tv_on = !self.tv_on;
    }

    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub fn set_no_signal(&mut self, no_signal: bool) {
        self.no_signal = no_signal;
    }

    pub fn set_buffering(&mut self, buffering: bool) {
        self.buffering = buffering;
    }

    pub fn set_channel(&mut self, channel: u32) {
        self.current_channel = channel;
        self.no_signal = false;
        self.entry.clear();
    }

    pub fn source_for(&self, channel: u32) -> Option<&str> {
        self.channels.get(&channel).map(String::as_str)
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Tune the next channel number, wrapping to the lowest.
    pub fn next_channel(&mut self) {
        let next = self
            .channels
            .range(self.current_channel.saturating_add(1)..)
            .next()
            .or_else(|| self.channels.iter().next())
            .map(|(number, _)| *number);
        if let Some(next) = next {
            self.set_channel(next);
        }
    }

    /// Tune the previous channel number, wrapping to the highest.
    pub fn prev_channel(&mut self) {
        let prev = self
            .channels
            .range(..self.current_channel)
            .next_back()
            .or_else(|| self.channels.iter().next_back())
            .map(|(number, _)| *number);
        if let Some(prev) = prev {
            self.set_channel(prev);
        }
    }

    pub fn enter_channel_digit(&mut self, digit: u8, now: f64) -> EntryOutcome {
        let outcome = self.entry.push_digit(digit, now);
        if let EntryOutcome::Commit(channel) = outcome {
            self.set_channel(channel);
        }
        outcome
    }

    /// Commit a partial entry whose idle timeout has elapsed.
    pub fn poll_channel_entry(&mut self, now: f64) -> Option<u32> {
        let channel = self.entry.poll(now)?;
        self.set_channel(channel);
        Some(channel)
    }

    pub fn volume_up(&mut self) {
        self.volume = step_volume(self.volume, 1);
        self.is_muted = false;
        self.volume_up_count += 1;
    }

    pub fn volume_down(&mut self) {
        self.volume = step_volume(self.volume, -1);
        self.is_muted = false;
        self.volume_down_count += 1;
    }

    pub fn toggle_mute(&mut self) {
        self.is_muted = !self.is_muted;
        self.muted_count += 1;
    }

    pub fn set_volume_displayed(&mut self, displayed: bool) {
        self.volume_displayed = displayed;
    }

    pub fn toggle_animation(&mut self) {
        self.animation_playing = !self.animation_playing;
    }

    pub fn toggle_layer(&mut self, layer: EnvironmentLayer) {
        self.layers.toggle(layer);
    }

    pub fn toggle_environment(&mut self) {
        self.layers.toggle_environment();
    }

    pub fn save_bookmark(
        &mut self,
        name: impl Into<String>,
        position: Vec3,
        target: Vec3,
    ) -> usize {
        self.bookmarks.save(name, position, target)
    }

    pub fn rename_bookmark(&mut self, index: usize, name: &str) -> Result<(), BookmarkError> {
        self.bookmarks.rename(index, name)
    }

    pub fn delete_bookmark(&mut self, index: usize) -> Result<(), BookmarkError> {
        self.bookmarks.delete(index).map(|_| ())
    }

    pub fn set_default_bookmark(&mut self, index: Option<usize>) -> Result<(), BookmarkError> {
        self.bookmarks.set_default(index)
    }

    pub fn update_bookmark(
        &mut self,
        index: usize,
        position: Vec3,
        target: Vec3,
    ) -> Result<(), BookmarkError> {
        self.bookmarks.update(index, position, target)
    }

    pub fn export_bookmarks(&self) -> Result<String, BookmarkError> {
        self.bookmarks.to_json()
    }

    /// Replace all bookmarks from an exported document. On error the
    /// current bookmarks stay untouched.
    pub fn import_bookmarks(&mut self, json: &str) -> Result<(), BookmarkError> {
        self.bookmarks = BookmarkSet::from_json(json)?;
        Ok(())
    }

    /// Serializable view handed to the web frontend.
    pub fn view(&self) -> StoreView<'_> {
        StoreView {
            phase: self.phase,
            tv_on: self.tv_on,
            current_channel: self.current_channel,
            channels: &self.channels,
            in_progress_channel_number: self.entry.in_progress(),
            no_signal: self.no_signal,
            buffering: self.buffering,
            volume: self.volume,
            is_muted: self.is_muted,
            animation_playing: self.animation_playing,
            env_visible: self.layers.environment_visible(),
            layers: &self.layers,
            bookmarks: &self.bookmarks,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreView<'a> {
    pub phase: Phase,
    pub tv_on: bool,
    pub current_channel: u32,
    pub channels: &'a BTreeMap<u32, String>,
    pub in_progress_channel_number: &'a str,
    pub no_signal: bool,
    pub buffering: bool,
    pub volume: f32,
    pub is_muted: bool,
    pub animation_playing: bool,
    pub env_visible: bool,
    pub layers: &'a LayerVisibility,
    pub bookmarks: &'a BookmarkSet,
}
