use bevy::math::Vec3;

/// Position and look-at target pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPreset {
    pub position: Vec3,
    pub target: Vec3,
}

pub const DESKTOP_DEFAULT: CameraPreset = CameraPreset {
    position: Vec3::new(12.02, 3.64, -26.01),
    target: Vec3::new(12.04, 3.72, -35.65),
};

pub const DESKTOP_TV_CLOSE_UP: CameraPreset = CameraPreset {
    position: Vec3::new(12.03, 5.34, -29.99),
    target: Vec3::new(12.05, 5.42, -39.63),
};

pub const MOBILE_DEFAULT: CameraPreset = CameraPreset {
    position: Vec3::new(12.87, 6.86, -24.93),
    target: Vec3::new(11.02, -1.02, -63.88),
};

pub const MOBILE_TV_CLOSE_UP: CameraPreset = CameraPreset {
    position: Vec3::new(12.61, 6.86, -27.82),
    target: Vec3::new(10.76, -1.02, -66.77),
};

/// Vertical field of view in degrees.
pub const FOV_DEGREES: f32 = 45.0;

/// Orbit distance limits.
pub const MIN_DISTANCE: f32 = 0.5;
pub const MAX_DISTANCE: f32 = 100.0;

/// Smoothing time for regular movement.
pub const SMOOTH_TIME_SECS: f32 = 0.25;

/// Smoothing time for `go to view` transitions.
pub const CINEMATIC_SMOOTH_TIME_SECS: f32 = 1.2;

/// Delay before the regular smoothing is restored after a transition.
pub const CINEMATIC_RESTORE_SECS: f32 = 1.5;

/// Keyboard movement speeds in units per second.
pub const WALK_SPEED: f32 = 3.0;
pub const WALK_SPEED_FAST: f32 = 8.0;

/// Radians per pixel of mouse drag while orbiting.
pub const ORBIT_SENSITIVITY: f32 = 0.005;

/// Units per pixel of mouse drag while trucking, scaled by distance.
pub const TRUCK_SENSITIVITY: f32 = 0.0015;

/// Fractional distance change per wheel line.
pub const DOLLY_STEP: f32 = 0.1;

/// Window aspect ratio below which the mobile presets apply.
pub const MOBILE_ASPECT_THRESHOLD: f32 = 1.0;

/// Per-click change of one pose axis from the panel, and the Shift-click
/// fine step.
pub const POSE_NUDGE_STEP: f32 = 0.1;
pub const POSE_NUDGE_STEP_FINE: f32 = 0.01;
