use constants::screen::{CHANNEL_NUMBER_WIDTH, VOLUME_BAR_SEGMENTS};
use constants::timing::OVERLAY_HIDE_SECS;

use crate::engine::store::{ChannelStore, Phase, StoreChanged};

/// Volume indicator contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeIndicator {
    Muted,
    Level { filled: usize },
}

/// What the overlay shows this frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayFrame {
    pub channel: Option<String>,
    pub volume: Option<VolumeIndicator>,
    pub no_signal: Option<String>,
    pub buffering: bool,
}

/// Auto-hide bookkeeping for the on-screen indicators.
///
/// Each indicator keeps its own deadline. The volume indicator belongs to
/// every phase except `off` and only appears after a volume or mute
/// action; the channel indicators belong to channels mode.
#[derive(Debug, Clone, Default)]
pub struct OverlayModel {
    channel_until: Option<f64>,
    volume_until: Option<f64>,
}

impl OverlayModel {
    pub fn on_store_changed(&mut self, change: &StoreChanged, now: f64) {
        let (previous, current) = (&change.previous, &change.current);

        if current.phase != Phase::Channels {
            self.channel_until = None;
        } else if previous.phase != Phase::Channels
            || change.changed(|s| s.current_channel)
            || change.changed(|s| s.entry.in_progress().to_owned())
        {
            self.channel_until = Some(now + OVERLAY_HIDE_SECS);
        }

        if current.phase.is_off() {
            self.volume_until = None;
        } else if !previous.phase.is_off() && volume_action(previous, current) {
            self.volume_until = Some(now + OVERLAY_HIDE_SECS);
        }
    }

    pub fn volume_visible(&self, now: f64) -> bool {
        self.volume_until.is_some_and(|until| now < until)
    }

    pub fn channel_visible(&self, now: f64) -> bool {
        self.channel_until.is_some_and(|until| now < until)
    }

    pub fn frame(&self, store: &ChannelStore, now: f64) -> OverlayFrame {
        let in_channels = store.phase == Phase::Channels;
        let volume_shown = !store.phase.is_off() && self.volume_visible(now);

        OverlayFrame {
            channel: (in_channels && self.channel_visible(now)).then(|| channel_label(store)),
            volume: volume_shown.then(|| volume_indicator(store)),
            no_signal: (in_channels && store.no_signal).then(|| no_signal_text(store)),
            buffering: in_channels && store.buffering && !volume_shown,
        }
    }
}

fn volume_action(previous: &ChannelStore, current: &ChannelStore) -> bool {
    previous.volume != current.volume
        || previous.is_muted != current.is_muted
        || previous.volume_up_count != current.volume_up_count
        || previous.volume_down_count != current.volume_down_count
        || previous.muted_count != current.muted_count
}

/// Three characters: the digits being typed padded with `-`, otherwise the
/// tuned channel padded with `0`.
pub fn channel_label(store: &ChannelStore) -> String {
    let typed = store.entry.in_progress();
    if typed.is_empty() {
        format!("{:0>width$}", store.current_channel, width = CHANNEL_NUMBER_WIDTH)
    } else {
        format!("{:->width$}", typed, width = CHANNEL_NUMBER_WIDTH)
    }
}

pub fn volume_indicator(store: &ChannelStore) -> VolumeIndicator {
    if store.is_muted {
        VolumeIndicator::Muted
    } else {
        VolumeIndicator::Level {
            filled: filled_segments(store.volume),
        }
    }
}

/// Lit bar segments, rounding partial segments up.
pub fn filled_segments(volume: f32) -> usize {
    let hundredths = (volume.clamp(0.0, 1.0) * 100.0).round() as usize;
    (hundredths * VOLUME_BAR_SEGMENTS).div_ceil(100)
}

pub fn no_signal_text(store: &ChannelStore) -> String {
    format!("NO SIGNAL\nTRY CHANNELS 1-{}", store.channel_count())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(previous: &ChannelStore, current: &ChannelStore) -> StoreChanged {
        StoreChanged {
            previous: previous.clone(),
            current: current.clone(),
        }
    }

    fn in_phase(phase: Phase) -> ChannelStore {
        let mut store = ChannelStore::default();
        store.tv_on = !phase.is_off();
        store.set_phase(phase);
        store
    }

    #[test]
    fn channel_label_padding() {
        let mut store = ChannelStore::default();
        store.set_channel(7);
        assert_eq!(channel_label(&store), "007");

        store.enter_channel_digit(4, 0.0);
        assert_eq!(channel_label(&store), "--4");
        store.enter_channel_digit(2, 0.1);
        assert_eq!(channel_label(&store), "-42");
    }

    #[test]
    fn volume_segments_round_up() {
        assert_eq!(filled_segments(0.0), 0);
        assert_eq!(filled_segments(0.05), 1);
        assert_eq!(filled_segments(0.5), 10);
        assert_eq!(filled_segments(0.51), 11);
        assert_eq!(filled_segments(1.0), VOLUME_BAR_SEGMENTS);
    }

    #[test]
    fn volume_shows_only_after_an_action_and_hides_after_two_seconds() {
        let mut model = OverlayModel::default();
        let off = ChannelStore::default();
        let mut intro = in_phase(Phase::Intro);

        // Powering on does not flash the volume.
        model.on_store_changed(&change(&off, &intro), 0.0);
        assert!(model.frame(&intro, 0.1).volume.is_none());

        let before = intro.clone();
        intro.volume_up();
        model.on_store_changed(&change(&before, &intro), 1.0);
        assert_eq!(
            model.frame(&intro, 1.5).volume,
            Some(VolumeIndicator::Level { filled: 11 })
        );
        assert!(model.frame(&intro, 3.0).volume.is_none());
    }

    #[test]
    fn pinned_volume_still_reshows() {
        let mut model = OverlayModel::default();
        let mut store = in_phase(Phase::Channels);
        store.volume = 1.0;
        store.is_muted = false;

        let before = store.clone();
        store.volume_up();
        assert_eq!(store.volume, 1.0);
        model.on_store_changed(&change(&before, &store), 0.0);
        assert!(model.volume_visible(1.0));
    }

    #[test]
    fn muted_volume_has_no_bar() {
        let mut model = OverlayModel::default();
        let mut store = in_phase(Phase::Channels);
        store.is_muted = false;
        let before = store.clone();
        store.toggle_mute();
        model.on_store_changed(&change(&before, &store), 0.0);
        assert_eq!(model.frame(&store, 0.5).volume, Some(VolumeIndicator::Muted));
    }

    #[test]
    fn channel_number_hides_two_seconds_after_channels_mode_starts() {
        let mut model = OverlayModel::default();
        let orange = in_phase(Phase::Orange2);
        let channels = in_phase(Phase::Channels);

        model.on_store_changed(&change(&orange, &channels), 10.0);
        assert_eq!(model.frame(&channels, 11.9).channel.as_deref(), Some("001"));
        assert!(model.frame(&channels, 12.0).channel.is_none());
        assert!(model.frame(&channels, 12.5).channel.is_none());

        let mut tuned = channels.clone();
        tuned.next_channel();
        model.on_store_changed(&change(&channels, &tuned), 20.0);
        assert_eq!(model.frame(&tuned, 21.9).channel.as_deref(), Some("002"));
        assert!(model.frame(&tuned, 22.0).channel.is_none());
    }

    #[test]
    fn channel_indicators_only_in_channels_mode() {
        let model = OverlayModel::default();
        let mut store = in_phase(Phase::Intro);
        store.no_signal = true;
        store.buffering = true;
        assert_eq!(model.frame(&store, 0.0), OverlayFrame::default());

        store.set_phase(Phase::Channels);
        let frame = model.frame(&store, 0.0);
        assert_eq!(frame.no_signal.as_deref(), Some("NO SIGNAL\nTRY CHANNELS 1-3"));
        assert!(frame.buffering);
    }

    #[test]
    fn buffering_yields_to_volume() {
        let mut model = OverlayModel::default();
        let mut store = in_phase(Phase::Channels);
        store.buffering = true;

        let before = store.clone();
        store.volume_down();
        model.on_store_changed(&change(&before, &store), 0.0);
        assert!(!model.frame(&store, 1.0).buffering);
        assert!(model.frame(&store, 2.5).buffering);
    }

    #[test]
    fn power_off_hides_everything() {
        let mut model = OverlayModel::default();
        let mut store = in_phase(Phase::Channels);
        let before = store.clone();
        store.volume_up();
        model.on_store_changed(&change(&before, &store), 0.0);

        let off = in_phase(Phase::Off);
        model.on_store_changed(&change(&store, &off), 0.5);
        assert!(!model.volume_visible(0.6));
        assert!(!model.channel_visible(0.6));
    }
}
