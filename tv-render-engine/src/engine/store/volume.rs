use constants::timing::VOLUME_STEP;

/// Step a volume by `direction` increments, clamped to [0, 1].
///
/// The result is rounded to two decimals so repeated steps never drift
/// (0.1 + 0.05 * 2 lands on exactly 0.2).
pub fn step_volume(volume: f32, direction: i8) -> f32 {
    let next = volume + VOLUME_STEP * f32::from(direction);
    ((next * 100.0).round() / 100.0).clamp(0.0, 1.0)
}
