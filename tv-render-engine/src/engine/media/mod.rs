//! Video playback behind a small command/event contract.
//!
//! The TV controller never touches a video element directly. It emits
//! `MediaCommand`s and receives `MediaEvent`s tagged with the
//! `PlaybackToken` of the load they belong to, so callbacks from a
//! superseded clip can be recognised and dropped.

/// Colour-bar playback simulation for native builds.
#[cfg(not(target_arch = "wasm32"))]
pub mod simulated;

/// Hidden `<video>` element driven through web-sys.
#[cfg(target_arch = "wasm32")]
pub mod web_video;

use bevy::prelude::*;
use thiserror::Error;

/// Identifies one load of the video source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PlaybackToken(pub u64);

impl PlaybackToken {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MediaError {
    #[error("media source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("playback rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MediaCommand {
    /// Swap the source. Later events carry `token`.
    Load { token: PlaybackToken, source: String },
    /// Attempt playback; answered by `PlayResolved` or `PlayRejected`.
    Play { token: PlaybackToken },
    Pause,
    /// Stop and release the current source.
    Clear,
    SetMuted(bool),
    SetVolume(f32),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MediaEventKind {
    PlayResolved,
    PlayRejected(MediaError),
    Ended,
    Waiting,
    Playing,
    Error(MediaError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaEvent {
    pub token: PlaybackToken,
    pub kind: MediaEventKind,
}

impl MediaEvent {
    pub fn new(token: PlaybackToken, kind: MediaEventKind) -> Self {
        Self { token, kind }
    }
}

/// A video source the controller can drive.
pub trait MediaBackend {
    fn apply(&mut self, command: MediaCommand);

    /// Advance internal clocks. Backends fed by the platform ignore it.
    fn tick(&mut self, _delta_secs: f32) {}

    /// Events gathered since the last call, oldest first.
    fn poll_events(&mut self) -> Vec<MediaEvent>;

    /// Whether a frame newer than the last upload is available.
    fn has_new_frame(&self) -> bool;

    /// Copy the current frame into `image`. Returns false when nothing
    /// was written.
    fn upload_frame(&mut self, image: &mut Image) -> bool;
}

/// Non-send resource holding the platform backend.
pub struct VideoPlayer(pub Box<dyn MediaBackend>);

/// The video texture sampled by the screen material.
#[derive(Resource, Clone)]
pub struct VideoTexture(pub Handle<Image>);

impl VideoTexture {
    /// Black CPU-writable image; the web backend resizes it to the clip.
    pub fn create(images: &mut Assets<Image>) -> Self {
        use bevy::render::render_asset::RenderAssetUsages;
        use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
        use constants::media::{TEST_CARD_HEIGHT, TEST_CARD_WIDTH};

        let image = Image::new_fill(
            Extent3d {
                width: TEST_CARD_WIDTH,
                height: TEST_CARD_HEIGHT,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            &[0, 0, 0, 255],
            TextureFormat::Rgba8UnormSrgb,
            RenderAssetUsages::default(),
        );
        Self(images.add(image))
    }
}

impl VideoPlayer {
    /// `clip_secs` only matters for the simulated backend.
    pub fn new(clip_secs: f32) -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let _ = clip_secs;
            Self(Box::new(web_video::WebVideoBackend::new()))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            use bevy::asset::io::file::FileAssetReader;

            let root = FileAssetReader::get_base_path().join("assets");
            Self(Box::new(simulated::SimulatedBackend::new(root, clip_secs)))
        }
    }
}
