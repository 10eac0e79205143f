/// Static burst between two clips of the power-on sequence.
pub const STATIC_BURST_SECS: f64 = 0.6;

/// Time the power-off collapse plays before the video is released.
pub const POWER_OFF_COLLAPSE_SECS: f64 = 0.4;

/// Power level change per second while easing on or off (~285ms full travel).
pub const POWER_RATE_PER_SEC: f32 = 3.5;

/// Distance at which the power level snaps onto its target.
pub const POWER_SNAP_EPSILON: f32 = 0.001;

/// Idle time after which a partial channel number is committed.
pub const CHANNEL_ENTRY_TIMEOUT_SECS: f64 = 2.0;

/// Digits that commit a channel number immediately.
pub const CHANNEL_ENTRY_MAX_DIGITS: usize = 3;

/// Default auto-hide for overlay indicators.
pub const OVERLAY_HIDE_SECS: f64 = 2.0;

/// Volume change per key press.
pub const VOLUME_STEP: f32 = 0.05;

/// Volume when the store is created.
pub const INITIAL_VOLUME: f32 = 0.5;

/// Interval between `fps_update` notifications.
pub const FPS_NOTIFY_INTERVAL_SECS: f32 = 0.5;
