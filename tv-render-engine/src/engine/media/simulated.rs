use std::path::PathBuf;

use bevy::prelude::*;

use super::{MediaBackend, MediaCommand, MediaError, MediaEvent, MediaEventKind, PlaybackToken};

// 75% SMPTE colour bars.
const BARS: [[u8; 3]; 7] = [
    [191, 191, 191],
    [191, 191, 0],
    [0, 191, 191],
    [0, 191, 0],
    [191, 0, 191],
    [191, 0, 0],
    [0, 0, 191],
];

/// Native stand-in for a video element.
///
/// A source "exists" when the file is present under the asset root. Playing
/// it shows an animated colour-bar card for `clip_secs`, then reports
/// `Ended`. Missing files reject the play request.
pub struct SimulatedBackend {
    root: PathBuf,
    clip_secs: f32,
    token: PlaybackToken,
    loaded: Option<Result<String, MediaError>>,
    playing: bool,
    elapsed: f32,
    muted: bool,
    volume: f32,
    frame_dirty: bool,
    events: Vec<MediaEvent>,
}

impl SimulatedBackend {
    pub fn new(root: impl Into<PathBuf>, clip_secs: f32) -> Self {
        Self {
            root: root.into(),
            clip_secs: clip_secs.max(0.1),
            token: PlaybackToken::default(),
            loaded: None,
            playing: false,
            elapsed: 0.0,
            muted: true,
            volume: 1.0,
            frame_dirty: true,
            events: Vec::new(),
        }
    }

    fn emit(&mut self, kind: MediaEventKind) {
        self.events.push(MediaEvent::new(self.token, kind));
    }

    fn progress(&self) -> f32 {
        (self.elapsed / self.clip_secs).clamp(0.0, 1.0)
    }

    // Different clips show differently rotated bars.
    fn bar_shift(&self) -> usize {
        match &self.loaded {
            Some(Ok(source)) => source.bytes().map(usize::from).sum::<usize>() % BARS.len(),
            _ => 0,
        }
    }
}

impl MediaBackend for SimulatedBackend {
    fn apply(&mut self, command: MediaCommand) {
        match command {
            MediaCommand::Load { token, source } => {
                self.token = token;
                self.playing = false;
                self.elapsed = 0.0;
                self.frame_dirty = true;
                let path = self.root.join(&source);
                self.loaded = Some(if path.is_file() {
                    Ok(source)
                } else {
                    Err(MediaError::SourceUnavailable(path.display().to_string()))
                });
            }
            MediaCommand::Play { token } => {
                if token != self.token {
                    return;
                }
                match self.loaded.clone() {
                    Some(Ok(_)) => {
                        self.playing = true;
                        self.emit(MediaEventKind::PlayResolved);
                        self.emit(MediaEventKind::Playing);
                    }
                    Some(Err(error)) => self.emit(MediaEventKind::PlayRejected(error)),
                    None => self.emit(MediaEventKind::PlayRejected(MediaError::Rejected(
                        "no source loaded".into(),
                    ))),
                }
            }
            MediaCommand::Pause => self.playing = false,
            MediaCommand::Clear => {
                self.loaded = None;
                self.playing = false;
                self.elapsed = 0.0;
                self.frame_dirty = true;
            }
            MediaCommand::SetMuted(muted) => self.muted = muted,
            MediaCommand::SetVolume(volume) => self.volume = volume,
        }
        trace!("Simulated audio: volume {:.2}, muted {}", self.volume, self.muted);
    }

    fn tick(&mut self, delta_secs: f32) {
        if !self.playing {
            return;
        }
        self.elapsed += delta_secs;
        self.frame_dirty = true;
        if self.elapsed >= self.clip_secs {
            self.playing = false;
            self.emit(MediaEventKind::Ended);
        }
    }

    fn poll_events(&mut self) -> Vec<MediaEvent> {
        std::mem::take(&mut self.events)
    }

    fn has_new_frame(&self) -> bool {
        self.frame_dirty
    }

    fn upload_frame(&mut self, image: &mut Image) -> bool {
        let width = image.width();
        let height = image.height();
        let showing = matches!(self.loaded, Some(Ok(_)));
        let progress = self.progress();
        let shift = self.bar_shift();

        let Some(data) = image.data.as_mut() else {
            return false;
        };

        for (index, pixel) in data.chunks_exact_mut(4).enumerate() {
            let x = index as u32 % width;
            let y = index as u32 / width;
            let rgba = if showing {
                test_card_pixel(x, y, width, height, progress, shift)
            } else {
                [0, 0, 0, 255]
            };
            pixel.copy_from_slice(&rgba);
        }

        self.frame_dirty = false;
        true
    }
}

/// Colour bars with a progress sweep along the bottom edge.
pub fn test_card_pixel(
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    progress: f32,
    shift: usize,
) -> [u8; 4] {
    let width = width.max(1);
    let height = height.max(1);

    if y >= height - height / 10 {
        let swept = (x as f32) < progress * width as f32;
        let level = if swept { 235 } else { 16 };
        return [level, level, level, 255];
    }

    let bar = (x as usize * BARS.len() / width as usize + shift) % BARS.len();
    let [r, g, b] = BARS[bar];
    [r, g, b, 255]
}
