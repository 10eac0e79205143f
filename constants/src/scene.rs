/// Node that groups every mesh of the TV set.
pub const TV_NODE_NAME: &str = "tv";

/// glTF material name of the screen surface.
pub const SCREEN_MATERIAL_NAME: &str = "TVScreen";

/// Casing materials tinted black on load.
pub const CASING_MATERIAL_NAMES: &[&str] = &["TVfront", "Electronics plastic", "White"];

/// Empty whose X translation drives the setup slide animation.
pub const ANIMATION_DRIVER_NAME: &str = "MODEL__EMPTY";

/// Multiplier applied to the driver displacement for the setup slide.
pub const SETUP_SLIDE_FACTOR: f32 = 2.0;

/// Root nodes with these prefixes are environment, not part of the TV setup.
pub const ENVIRONMENT_PREFIXES: &[&str] = &[
    "Bottom_light",
    "Bottom light",
    "pipe",
    "Cylinder",
    "Cube",
    "Plane",
    "dc36a",
    "Empty",
    "BezierCurve",
];

/// Per-layer name prefixes.
pub const LIGHT_BAR_PREFIXES: &[&str] = &["Bottom_light_bars", "Bottom light bars"];
pub const PIPE_PREFIXES: &[&str] = &["pipe"];
pub const CYLINDER_PREFIXES: &[&str] = &["Cylinder"];
pub const CUBE_PREFIXES: &[&str] = &["Cube"];
pub const PLANE_PREFIXES: &[&str] = &["Plane"];
pub const CURVE_PREFIXES: &[&str] = &["BezierCurve"];

/// Substrings that must all appear in a guitar strap node name.
pub const GUITAR_STRAP_PARTS: &[&str] = &["Guitar", "strap"];

/// Environment nodes not covered by a layer; they follow the master toggle.
pub const EXTRA_ENVIRONMENT_PREFIXES: &[&str] = &["dc36a", "Empty", "Bottom_light", "Bottom light"];
