use constants::timing::{POWER_RATE_PER_SEC, POWER_SNAP_EPSILON};

/// Tube power level, eased toward its target at a fixed rate.
///
/// Intermediate values drive the vertical then horizontal collapse mask
/// in the screen shader.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PowerLevel {
    current: f32,
    target: f32,
}

impl PowerLevel {
    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target.clamp(0.0, 1.0);
    }

    /// Jump straight to `level` and stay there.
    pub fn snap(&mut self, level: f32) {
        self.current = level.clamp(0.0, 1.0);
        self.target = self.current;
    }

    pub fn step(&mut self, delta_secs: f32) -> f32 {
        let diff = self.target - self.current;
        if diff.abs() > POWER_SNAP_EPSILON {
            let step = delta_secs * POWER_RATE_PER_SEC;
            self.current += diff.signum() * diff.abs().min(step);
        } else {
            self.current = self.target;
        }
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn eases_at_a_fixed_rate() {
        let mut power = PowerLevel::default();
        power.set_target(1.0);
        assert_relative_eq!(power.step(0.1), 0.35, epsilon = 1e-6);
        assert_relative_eq!(power.step(0.1), 0.70, epsilon = 1e-6);
        assert_relative_eq!(power.step(0.1), 1.0, epsilon = 1e-6);
        assert_relative_eq!(power.step(0.1), 1.0);
    }

    #[test]
    fn never_overshoots() {
        let mut power = PowerLevel::default();
        power.snap(1.0);
        power.set_target(0.0);
        power.step(10.0);
        assert_eq!(power.current(), 0.0);
    }

    #[test]
    fn snaps_inside_the_epsilon() {
        let mut power = PowerLevel::default();
        power.snap(0.9995);
        power.set_target(1.0);
        assert_eq!(power.step(0.0), 1.0);
    }
}
