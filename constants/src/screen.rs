/// Scanline count across the screen height.
pub const SCAN_COUNT: f32 = 400.0;

/// Scanline darkening strength.
pub const SCAN_INTENSITY: f32 = 0.12;

/// Barrel distortion factor.
pub const DISTORTION: f32 = 0.003;

/// Light static always present on a live picture.
pub const STATIC_IDLE: f32 = 0.04;

/// Static while a new channel is tuning.
pub const STATIC_TUNING: f32 = 0.3;

/// Static during the burst between clips.
pub const STATIC_BURST: f32 = 0.5;

/// Base colour scalar for full-brightness playback.
pub const BRIGHTNESS_FULL: f32 = 1.0;

/// Base colour scalar while the bridging clips play.
pub const BRIGHTNESS_DIM: f32 = 0.35;

/// Emissive intensity for full-brightness playback.
pub const EMISSIVE_FULL: f32 = 0.5;

/// Emissive intensity while the bridging clips play.
pub const EMISSIVE_DIM: f32 = 0.15;

/// Video frames are uploaded top row first, so no flip is needed.
pub const VIDEO_FLIP_Y: f32 = 0.0;

/// Screen material roughness.
pub const SCREEN_ROUGHNESS: f32 = 0.4;

/// Overlay render target size.
pub const OVERLAY_WIDTH: u32 = 800;
pub const OVERLAY_HEIGHT: u32 = 600;

/// Segments in the volume bar.
pub const VOLUME_BAR_SEGMENTS: usize = 20;

/// Characters shown for the channel number.
pub const CHANNEL_NUMBER_WIDTH: usize = 3;

/// Overlay font size in render target pixels.
pub const OVERLAY_FONT_SIZE: f32 = 30.0;

/// WGSL source of the CRT screen extension.
pub const SCREEN_SHADER_PATH: &str = "shaders/tv_screen.wgsl";
