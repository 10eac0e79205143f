use constants::screen::{DISTORTION, SCAN_COUNT, SCAN_INTENSITY, VIDEO_FLIP_Y};

/// Numeric state of the CRT screen, copied into the material every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenParams {
    pub time: f32,
    pub scan_count: f32,
    pub scan_intensity: f32,
    pub static_amount: f32,
    pub no_signal: f32,
    pub distortion: f32,
    pub flip_y: f32,
    pub power: f32,
    /// Base colour scalar of the screen surface.
    pub brightness: f32,
    pub emissive_intensity: f32,
}

impl Default for ScreenParams {
    /// A dark tube: no picture, no glow, no static.
    fn default() -> Self {
        Self {
            time: 0.0,
            scan_count: SCAN_COUNT,
            scan_intensity: SCAN_INTENSITY,
            static_amount: 0.0,
            no_signal: 0.0,
            distortion: DISTORTION,
            flip_y: VIDEO_FLIP_Y,
            power: 0.0,
            brightness: 0.0,
            emissive_intensity: 0.0,
        }
    }
}

impl ScreenParams {
    pub fn set_no_signal(&mut self, on: bool) {
        self.no_signal = if on { 1.0 } else { 0.0 };
    }

    pub fn shows_no_signal(&self) -> bool {
        self.no_signal > 0.5
    }

    pub fn set_lighting(&mut self, brightness: f32, emissive_intensity: f32) {
        self.brightness = brightness;
        self.emissive_intensity = emissive_intensity;
    }

    /// Zero everything the power-off collapse leaves behind.
    pub fn blank(&mut self) {
        self.brightness = 0.0;
        self.emissive_intensity = 0.0;
        self.no_signal = 0.0;
        self.static_amount = 0.0;
        self.power = 0.0;
    }
}
