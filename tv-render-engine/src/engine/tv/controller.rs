use bevy::log::{debug, info};
use constants::media::{BRIDGE_CLIPS, INTRO_CLIP};
use constants::screen::{
    BRIGHTNESS_DIM, BRIGHTNESS_FULL, EMISSIVE_DIM, EMISSIVE_FULL, STATIC_BURST, STATIC_IDLE,
    STATIC_TUNING, VIDEO_FLIP_Y,
};
use constants::timing::{POWER_OFF_COLLAPSE_SECS, STATIC_BURST_SECS};

use super::power::PowerLevel;
use super::screen_params::ScreenParams;
use super::timers::PhaseTimers;
use crate::engine::media::{MediaCommand, MediaEvent, MediaEventKind, PlaybackToken};
use crate::engine::store::{ChannelStore, Phase, StoreChanged};

/// Clips of the power-on sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipSequence {
    pub intro: String,
    pub bridges: [String; 2],
}

impl Default for ClipSequence {
    fn default() -> Self {
        Self {
            intro: INTRO_CLIP.to_string(),
            bridges: BRIDGE_CLIPS.map(String::from),
        }
    }
}

/// What the current load was for; decides how its play result is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlayContext {
    Intro,
    Bridge,
    ChannelsEntry,
    ChannelSwitch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerAction {
    PlayBridge(usize),
    EnterChannels,
    FinishPowerOff,
}

/// Drives the TV through off, intro, glitch, bridging clips and channel
/// playback.
///
/// Inputs are store diffs, media events and the frame tick. Outputs are
/// media commands (drained by the backend owner), writes to the shader
/// parameters and writes to the store's phase, no-signal and buffering
/// flags.
#[derive(Debug)]
pub struct TvController {
    clips: ClipSequence,
    screen: ScreenParams,
    power: PowerLevel,
    timers: PhaseTimers<TimerAction>,
    token: PlaybackToken,
    pending: Option<PlayContext>,
    commands: Vec<MediaCommand>,
}

impl TvController {
    pub fn new(clips: ClipSequence) -> Self {
        Self {
            clips,
            screen: ScreenParams::default(),
            power: PowerLevel::default(),
            timers: PhaseTimers::default(),
            token: PlaybackToken::default(),
            pending: None,
            commands: Vec::new(),
        }
    }

    pub fn screen(&self) -> &ScreenParams {
        &self.screen
    }

    pub fn token(&self) -> PlaybackToken {
        self.token
    }

    pub fn drain_commands(&mut self) -> Vec<MediaCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn on_store_changed(&mut self, change: &StoreChanged, store: &mut ChannelStore, now: f64) {
        if change.changed(|s| s.tv_on) {
            if change.current.tv_on {
                self.start_intro(store);
            } else {
                self.turn_off(store, now);
            }
            return;
        }

        if !change.current.phase.is_off() {
            if change.changed(|s| s.is_muted) {
                self.commands.push(MediaCommand::SetMuted(change.current.is_muted));
            }
            if change.changed(|s| s.volume) {
                self.commands.push(MediaCommand::SetVolume(change.current.volume));
            }
        }

        if change.current.phase == Phase::Channels && change.changed(|s| s.current_channel) {
            self.switch_channel(change.current.current_channel, store);
        }
    }

    pub fn on_media_event(&mut self, event: MediaEvent, store: &mut ChannelStore, now: f64) {
        if event.token != self.token {
            debug!("Dropping stale media event {:?}", event);
            return;
        }

        match event.kind {
            MediaEventKind::PlayResolved => self.play_resolved(store),
            MediaEventKind::PlayRejected(reason) => {
                info!("Playback rejected in {}: {}", store.phase.as_str(), reason);
                self.play_rejected(store);
            }
            MediaEventKind::Ended => self.clip_ended(store, now),
            MediaEventKind::Waiting => {
                if store.phase == Phase::Channels {
                    store.set_buffering(true);
                }
            }
            MediaEventKind::Playing => {
                if store.phase == Phase::Intro {
                    self.screen.set_no_signal(false);
                }
                store.set_buffering(false);
            }
            MediaEventKind::Error(reason) => {
                info!("Media error in {}: {}", store.phase.as_str(), reason);
                if store.phase == Phase::Intro {
                    self.enter_channels(store);
                }
            }
        }
    }

    /// Per-frame update: shader clock, power easing and due phase timers.
    pub fn tick(&mut self, now: f64, delta_secs: f32, store: &mut ChannelStore) {
        self.screen.time += delta_secs;
        self.screen.power = self.power.step(delta_secs);

        for action in self.timers.take_due(now) {
            match action {
                TimerAction::PlayBridge(index) => self.play_bridge(index, store),
                TimerAction::EnterChannels => self.enter_channels(store),
                TimerAction::FinishPowerOff => self.finish_power_off(),
            }
        }
    }

    fn start_intro(&mut self, store: &mut ChannelStore) {
        self.timers.cancel_all();
        self.power.snap(0.0);
        self.power.set_target(1.0);
        self.screen.power = 0.0;
        self.screen.set_lighting(BRIGHTNESS_FULL, EMISSIVE_FULL);
        self.screen.set_no_signal(true);
        self.screen.static_amount = STATIC_IDLE;
        self.screen.flip_y = VIDEO_FLIP_Y;
        store.set_phase(Phase::Intro);

        self.commands.push(MediaCommand::SetMuted(store.is_muted));
        self.commands.push(MediaCommand::SetVolume(store.volume));
        let intro = self.clips.intro.clone();
        self.load(intro, PlayContext::Intro);
    }

    fn turn_off(&mut self, store: &mut ChannelStore, now: f64) {
        self.timers.cancel_all();
        self.power.set_target(0.0);
        self.invalidate_playback();
        store.set_phase(Phase::Off);
        store.set_no_signal(false);
        store.set_buffering(false);
        self.timers
            .schedule(now + POWER_OFF_COLLAPSE_SECS, TimerAction::FinishPowerOff);
    }

    fn finish_power_off(&mut self) {
        self.commands.push(MediaCommand::Clear);
        self.screen.flip_y = VIDEO_FLIP_Y;
        self.screen.blank();
        self.power.snap(0.0);
    }

    fn enter_channels(&mut self, store: &mut ChannelStore) {
        self.timers.cancel_all();
        self.screen.set_lighting(BRIGHTNESS_FULL, EMISSIVE_FULL);
        store.set_phase(Phase::Channels);
        store.set_buffering(false);
        self.screen.flip_y = VIDEO_FLIP_Y;
        self.screen.static_amount = STATIC_IDLE;
        self.screen.set_no_signal(true);

        match store.source_for(store.current_channel).map(str::to_string) {
            Some(source) => self.load(source, PlayContext::ChannelsEntry),
            None => {
                self.invalidate_playback();
                store.set_no_signal(true);
            }
        }
    }

    fn play_bridge(&mut self, index: usize, store: &mut ChannelStore) {
        let phase = if index == 0 { Phase::Orange1 } else { Phase::Orange2 };
        store.set_phase(phase);
        self.screen.set_lighting(BRIGHTNESS_DIM, EMISSIVE_DIM);
        self.screen.static_amount = STATIC_IDLE;
        self.screen.set_no_signal(true);

        let source = self.clips.bridges[index.min(1)].clone();
        self.load(source, PlayContext::Bridge);
    }

    fn glitch_then(&mut self, next: TimerAction, store: &mut ChannelStore, now: f64) {
        store.set_phase(Phase::Glitch);
        self.screen.set_no_signal(true);
        self.screen.static_amount = STATIC_BURST;
        self.timers.schedule(now + STATIC_BURST_SECS, next);
    }

    fn switch_channel(&mut self, channel: u32, store: &mut ChannelStore) {
        self.screen.set_no_signal(true);
        let Some(source) = store.source_for(channel).map(str::to_string) else {
            store.set_no_signal(true);
            self.invalidate_playback();
            self.commands.push(MediaCommand::Pause);
            return;
        };

        self.screen.static_amount = STATIC_TUNING;
        store.set_no_signal(false);
        self.load(source, PlayContext::ChannelSwitch);
    }

    fn clip_ended(&mut self, store: &mut ChannelStore, now: f64) {
        match store.phase {
            Phase::Intro => self.glitch_then(TimerAction::PlayBridge(0), store, now),
            Phase::Orange1 => self.glitch_then(TimerAction::PlayBridge(1), store, now),
            Phase::Orange2 => self.glitch_then(TimerAction::EnterChannels, store, now),
            Phase::Channels => store.next_channel(),
            Phase::Off | Phase::Glitch => {}
        }
    }

    fn play_resolved(&mut self, store: &mut ChannelStore) {
        match self.pending {
            // The intro clears no-signal on its `playing` event instead.
            Some(PlayContext::Intro) | None => {}
            Some(PlayContext::Bridge) => self.screen.set_no_signal(false),
            Some(PlayContext::ChannelsEntry) => {
                self.screen.set_no_signal(false);
                store.set_no_signal(false);
            }
            Some(PlayContext::ChannelSwitch) => {
                self.screen.set_no_signal(false);
                self.screen.static_amount = STATIC_IDLE;
            }
        }
    }

    fn play_rejected(&mut self, store: &mut ChannelStore) {
        match self.pending {
            Some(PlayContext::Intro) | Some(PlayContext::Bridge) => self.enter_channels(store),
            Some(PlayContext::ChannelsEntry) => {
                self.screen.set_no_signal(true);
                store.set_no_signal(true);
            }
            Some(PlayContext::ChannelSwitch) => {
                self.screen.set_no_signal(true);
                self.screen.static_amount = STATIC_IDLE;
                store.set_no_signal(true);
            }
            None => {}
        }
    }

    fn load(&mut self, source: String, context: PlayContext) {
        self.token = self.token.next();
        self.pending = Some(context);
        self.commands.push(MediaCommand::Load {
            token: self.token,
            source,
        });
        self.commands.push(MediaCommand::Play { token: self.token });
    }

    // Results of the current load become stale.
    fn invalidate_playback(&mut self) {
        self.token = self.token.next();
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::media::MediaError;
    use approx::assert_relative_eq;

    const FRAME: f32 = 1.0 / 60.0;

    struct Harness {
        tv: TvController,
        store: ChannelStore,
        now: f64,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                tv: TvController::new(ClipSequence::default()),
                store: ChannelStore::default(),
                now: 0.0,
            }
        }

        fn mutate(&mut self, action: impl FnOnce(&mut ChannelStore)) {
            let previous = self.store.clone();
            action(&mut self.store);
            let change = StoreChanged {
                previous,
                current: self.store.clone(),
            };
            self.tv.on_store_changed(&change, &mut self.store, self.now);
        }

        fn media(&mut self, kind: MediaEventKind) {
            let event = MediaEvent::new(self.tv.token(), kind);
            self.tv.on_media_event(event, &mut self.store, self.now);
        }

        fn advance(&mut self, secs: f64) {
            self.advance_to(self.now + secs);
        }

        fn advance_to(&mut self, target: f64) {
            while self.now < target {
                let next = (self.now + FRAME as f64).min(target);
                let dt = (next - self.now) as f32;
                self.now = next;
                self.tv.tick(self.now, dt, &mut self.store);
            }
        }

        fn loaded_sources(&mut self) -> Vec<String> {
            self.tv
                .drain_commands()
                .into_iter()
                .filter_map(|command| match command {
                    MediaCommand::Load { source, .. } => Some(source),
                    _ => None,
                })
                .collect()
        }

        fn power_on(&mut self) {
            self.mutate(ChannelStore::toggle_power);
        }

        fn reach_channels(&mut self) {
            self.power_on();
            self.media(MediaEventKind::PlayRejected(MediaError::Rejected("autoplay".into())));
            self.tv.drain_commands();
        }
    }

    #[test]
    fn power_on_loads_the_intro_with_no_signal() {
        let mut h = Harness::new();
        h.power_on();
        assert_eq!(h.store.phase, Phase::Intro);
        assert!(h.tv.screen().shows_no_signal());
        assert_eq!(h.loaded_sources(), vec![INTRO_CLIP.to_string()]);

        h.media(MediaEventKind::Playing);
        assert!(!h.tv.screen().shows_no_signal());

        h.advance(0.5);
        assert_relative_eq!(h.tv.screen().power, 1.0);
    }

    #[test]
    fn intro_sequence_walks_through_glitches_to_channels() {
        let mut h = Harness::new();
        h.power_on();
        h.tv.drain_commands();

        let mut phases = Vec::new();
        let mut loads = Vec::new();
        for _ in 0..3 {
            h.media(MediaEventKind::PlayResolved);
            h.media(MediaEventKind::Ended);
            phases.push(h.store.phase);
            assert_relative_eq!(h.tv.screen().static_amount, STATIC_BURST);

            // Exactly one burst: nothing happens before it elapses.
            let burst_end = h.now + STATIC_BURST_SECS;
            h.advance(STATIC_BURST_SECS - 0.05);
            assert_eq!(h.store.phase, Phase::Glitch);
            h.advance_to(burst_end);
            phases.push(h.store.phase);
            loads.extend(h.loaded_sources());
        }

        assert_eq!(
            phases,
            vec![
                Phase::Glitch,
                Phase::Orange1,
                Phase::Glitch,
                Phase::Orange2,
                Phase::Glitch,
                Phase::Channels,
            ]
        );
        assert_eq!(
            loads,
            vec![
                BRIDGE_CLIPS[0].to_string(),
                BRIDGE_CLIPS[1].to_string(),
                "videos/ch1.mp4".to_string(),
            ]
        );
    }

    #[test]
    fn bridging_clips_play_dimmed() {
        let mut h = Harness::new();
        h.power_on();
        h.media(MediaEventKind::Ended);
        h.advance(STATIC_BURST_SECS);
        assert_eq!(h.store.phase, Phase::Orange1);
        assert_relative_eq!(h.tv.screen().brightness, BRIGHTNESS_DIM);
        assert_relative_eq!(h.tv.screen().emissive_intensity, EMISSIVE_DIM);

        h.media(MediaEventKind::PlayResolved);
        assert!(!h.tv.screen().shows_no_signal());
    }

    #[test]
    fn intro_rejection_skips_straight_to_channels() {
        let mut h = Harness::new();
        h.power_on();
        h.tv.drain_commands();
        h.media(MediaEventKind::PlayRejected(MediaError::Rejected("autoplay".into())));
        assert_eq!(h.store.phase, Phase::Channels);
        assert_eq!(h.loaded_sources(), vec!["videos/ch1.mp4".to_string()]);
    }

    #[test]
    fn bridge_rejection_also_skips_to_channels() {
        let mut h = Harness::new();
        h.power_on();
        h.media(MediaEventKind::Ended);
        h.advance(STATIC_BURST_SECS);
        h.media(MediaEventKind::PlayRejected(MediaError::Rejected("decode".into())));
        assert_eq!(h.store.phase, Phase::Channels);
    }

    #[test]
    fn intro_error_event_skips_to_channels() {
        let mut h = Harness::new();
        h.power_on();
        h.media(MediaEventKind::Error(MediaError::SourceUnavailable("intro".into())));
        assert_eq!(h.store.phase, Phase::Channels);
    }

    #[test]
    fn power_off_collapses_from_every_phase() {
        let setups: Vec<fn(&mut Harness)> = vec![
            |_| {},
            |h| h.power_on(),
            |h| {
                h.power_on();
                h.media(MediaEventKind::Ended);
            },
            |h| {
                h.power_on();
                h.media(MediaEventKind::Ended);
                h.advance(STATIC_BURST_SECS);
            },
            |h| h.reach_channels(),
        ];

        for setup in setups {
            let mut h = Harness::new();
            setup(&mut h);
            h.advance(0.2);
            if !h.store.tv_on {
                h.power_on();
                h.advance(0.2);
            }

            h.mutate(ChannelStore::toggle_power);
            assert_eq!(h.store.phase, Phase::Off);

            h.advance(POWER_OFF_COLLAPSE_SECS);
            assert_eq!(h.store.phase, Phase::Off);
            assert_eq!(h.tv.screen().power, 0.0);
            assert_eq!(h.tv.screen().brightness, 0.0);
            assert!(h.tv.drain_commands().contains(&MediaCommand::Clear));

            // Nothing scheduled by the old phase survives.
            h.advance(5.0);
            assert_eq!(h.store.phase, Phase::Off);
        }
    }

    #[test]
    fn stale_events_after_power_off_are_ignored() {
        let mut h = Harness::new();
        h.power_on();
        let intro_token = h.tv.token();
        h.mutate(ChannelStore::toggle_power);

        h.tv.on_media_event(
            MediaEvent::new(intro_token, MediaEventKind::Ended),
            &mut h.store,
            h.now,
        );
        h.advance(1.0);
        assert_eq!(h.store.phase, Phase::Off);
    }

    #[test]
    fn channel_change_tunes_with_static() {
        let mut h = Harness::new();
        h.reach_channels();
        h.mutate(ChannelStore::next_channel);
        assert_relative_eq!(h.tv.screen().static_amount, STATIC_TUNING);
        assert_eq!(h.loaded_sources(), vec!["videos/ch2.mp4".to_string()]);

        h.media(MediaEventKind::PlayResolved);
        assert!(!h.tv.screen().shows_no_signal());
        assert_relative_eq!(h.tv.screen().static_amount, STATIC_IDLE);
    }

    #[test]
    fn channel_rejection_shows_no_signal_and_keeps_running() {
        let mut h = Harness::new();
        h.reach_channels();
        h.mutate(ChannelStore::next_channel);
        h.media(MediaEventKind::PlayRejected(MediaError::Rejected("network".into())));
        assert!(h.store.no_signal);
        assert_eq!(h.store.phase, Phase::Channels);
        h.tv.drain_commands();

        h.mutate(ChannelStore::next_channel);
        assert!(!h.store.no_signal);
        assert_eq!(h.loaded_sources(), vec!["videos/ch3.mp4".to_string()]);
    }

    #[test]
    fn unknown_channel_pauses_with_no_signal() {
        let mut h = Harness::new();
        h.reach_channels();
        h.mutate(|s| s.set_channel(42));
        assert!(h.store.no_signal);
        assert!(h.tv.drain_commands().contains(&MediaCommand::Pause));
    }

    #[test]
    fn ended_in_channels_advances_the_channel() {
        let mut h = Harness::new();
        h.reach_channels();
        h.media(MediaEventKind::Ended);
        assert_eq!(h.store.current_channel, 2);
    }

    #[test]
    fn buffering_follows_waiting_and_playing() {
        let mut h = Harness::new();
        h.reach_channels();
        h.media(MediaEventKind::Waiting);
        assert!(h.store.buffering);
        h.media(MediaEventKind::Playing);
        assert!(!h.store.buffering);
    }

    #[test]
    fn volume_is_forwarded_only_while_on() {
        let mut h = Harness::new();
        h.mutate(ChannelStore::volume_down);
        assert!(h.tv.drain_commands().is_empty());

        h.reach_channels();
        h.mutate(ChannelStore::toggle_mute);
        h.mutate(ChannelStore::volume_up);
        let commands = h.tv.drain_commands();
        assert!(commands.contains(&MediaCommand::SetMuted(true)));
        assert!(commands.contains(&MediaCommand::SetVolume(0.5)));
    }
}
