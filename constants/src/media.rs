/// Runtime manifest loaded from the asset directory during startup.
pub const MANIFEST_PATH: &str = "tv_manifest.json";

/// glTF model containing the TV, its stand and the set dressing.
pub const MODEL_PATH: &str = "models/lucki-tv.glb";

/// Clip played straight after power-on.
pub const INTRO_CLIP: &str = "videos/intro.mov";

/// Bridging clips played between the intro and channel playback.
pub const BRIDGE_CLIPS: [&str; 2] = ["videos/orangeclip1.mp4", "videos/orangeclip2.mp4"];

/// Default channel number to clip mapping.
pub const DEFAULT_CHANNELS: &[(u32, &str)] = &[
    (1, "videos/ch1.mp4"),
    (2, "videos/ch2.mp4"),
    (3, "videos/ch3.mp4"),
];

/// Channel tuned when the store is created.
pub const INITIAL_CHANNEL: u32 = 1;

/// Remote control click played on channel, volume and power keys.
pub const CLICK_SOUND: &str = "sounds/remote-click.ogg";

/// Logo shown over the window while the model loads.
pub const LOADING_LOGO: &str = "logo.gif";

/// Font used by the on-screen overlay.
pub const OVERLAY_FONT: &str = "fonts/retro-tv-font.otf";

/// Length of a clip when the native backend simulates playback.
pub const SIMULATED_CLIP_SECS: f32 = 8.0;

/// Resolution of the simulated test card.
pub const TEST_CARD_WIDTH: u32 = 320;
pub const TEST_CARD_HEIGHT: u32 = 240;

/// localStorage keys (wasm) for camera bookmarks.
pub const BOOKMARK_SLOTS_KEY: &str = "lucki-tv-camera-slots";
pub const BOOKMARK_DEFAULT_KEY: &str = "lucki-tv-default-slot";

/// Bookmark store of native builds, the counterpart of localStorage.
pub const BOOKMARK_STORE_FILE: &str = "lucki-tv-camera-slots.json";

/// Export/import file written and read by the camera panel.
pub const BOOKMARK_FILE: &str = "camera-positions.json";
