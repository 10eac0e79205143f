use bevy::input::mouse::{AccumulatedMouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::camera::{
    CINEMATIC_RESTORE_SECS, CINEMATIC_SMOOTH_TIME_SECS, DESKTOP_DEFAULT, DOLLY_STEP, FOV_DEGREES,
    MAX_DISTANCE, MIN_DISTANCE, MOBILE_ASPECT_THRESHOLD, ORBIT_SENSITIVITY, SMOOTH_TIME_SECS,
    TRUCK_SENSITIVITY, WALK_SPEED, WALK_SPEED_FAST,
};

use crate::engine::hud::RenameEntry;

// Keeps the orbit away from the poles.
const POLAR_EPSILON: f32 = 1e-3;
const SETTLE_EPSILON: f32 = 1e-4;

#[derive(Component)]
pub struct MainCamera;

/// Orbit rig around a look-at target.
///
/// Input moves the goal (`position`, `target`); the rendered pose follows it
/// with critically damped smoothing.
#[derive(Resource, Debug, Clone)]
pub struct ViewportCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub current_position: Vec3,
    pub current_target: Vec3,
    pub smooth_time: f32,
    position_velocity: Vec3,
    target_velocity: Vec3,
    restore_smooth_at: Option<f32>,
}

impl Default for ViewportCamera {
    fn default() -> Self {
        Self::new(DESKTOP_DEFAULT.position, DESKTOP_DEFAULT.target)
    }
}

impl ViewportCamera {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            current_position: position,
            current_target: target,
            smooth_time: SMOOTH_TIME_SECS,
            position_velocity: Vec3::ZERO,
            target_velocity: Vec3::ZERO,
            restore_smooth_at: None,
        }
    }

    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    pub fn set_look_at(&mut self, position: Vec3, target: Vec3, smooth: bool) {
        self.position = position;
        self.target = target;
        if !smooth {
            self.current_position = position;
            self.current_target = target;
            self.position_velocity = Vec3::ZERO;
            self.target_velocity = Vec3::ZERO;
        }
    }

    /// Slow transition to a view; the regular smoothing comes back after a
    /// fixed delay.
    pub fn go_to_view(&mut self, position: Vec3, target: Vec3, now: f32) {
        self.smooth_time = CINEMATIC_SMOOTH_TIME_SECS;
        self.restore_smooth_at = Some(now + CINEMATIC_RESTORE_SECS);
        self.set_look_at(position, target, true);
    }

    /// Rotate the position around the target. Positive azimuth turns
    /// counter-clockwise seen from above; positive polar tilts towards the
    /// ground.
    pub fn orbit(&mut self, delta_azimuth: f32, delta_polar: f32) {
        let offset = self.position - self.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return;
        }
        let azimuth = offset.x.atan2(offset.z) + delta_azimuth;
        let polar = ((offset.y / radius).clamp(-1.0, 1.0).acos() + delta_polar)
            .clamp(POLAR_EPSILON, std::f32::consts::PI - POLAR_EPSILON);

        self.position = self.target
            + radius
                * Vec3::new(
                    polar.sin() * azimuth.sin(),
                    polar.cos(),
                    polar.sin() * azimuth.cos(),
                );
    }

    /// Move position and target together along the view's right and up
    /// axes.
    pub fn truck(&mut self, right: f32, up: f32) {
        let (right_axis, up_axis) = self.screen_axes();
        let delta = right_axis * right + up_axis * up;
        self.position += delta;
        self.target += delta;
    }

    /// Move position and target together along the horizontal view
    /// direction.
    pub fn forward(&mut self, distance: f32) {
        let (right_axis, _) = self.screen_axes();
        let delta = Vec3::Y.cross(right_axis).normalize_or_zero() * distance;
        self.position += delta;
        self.target += delta;
    }

    /// Scale the orbit distance, clamped to the allowed range.
    pub fn dolly(&mut self, factor: f32) {
        let offset = self.position - self.target;
        let distance = (offset.length() * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
        self.position = self.target + offset.normalize_or_zero() * distance;
    }

    /// Advance the smoothing; returns the pose to render.
    pub fn update(&mut self, now: f32, delta_secs: f32) -> (Vec3, Vec3) {
        if self.restore_smooth_at.is_some_and(|at| now >= at) {
            self.restore_smooth_at = None;
            self.smooth_time = SMOOTH_TIME_SECS;
        }

        self.current_position = smooth_damp(
            self.current_position,
            self.position,
            &mut self.position_velocity,
            self.smooth_time,
            delta_secs,
        );
        self.current_target = smooth_damp(
            self.current_target,
            self.target,
            &mut self.target_velocity,
            self.smooth_time,
            delta_secs,
        );
        (self.current_position, self.current_target)
    }

    fn screen_axes(&self) -> (Vec3, Vec3) {
        let forward = (self.target - self.position).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward).normalize_or_zero();
        (right, up)
    }
}

/// Critically damped spring towards `goal`.
pub fn smooth_damp(
    current: Vec3,
    goal: Vec3,
    velocity: &mut Vec3,
    smooth_time: f32,
    delta_secs: f32,
) -> Vec3 {
    if delta_secs <= 0.0 {
        return current;
    }
    let omega = 2.0 / smooth_time.max(1e-4);
    let x = omega * delta_secs;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - goal;
    let temp = (*velocity + omega * change) * delta_secs;
    *velocity = (*velocity - omega * temp) * decay;
    let output = goal + (change + temp) * decay;

    // Overshoot or close enough: settle on the goal.
    if (goal - current).dot(output - goal) > 0.0 || output.distance(goal) < SETTLE_EPSILON {
        *velocity = Vec3::ZERO;
        return goal;
    }
    output
}

pub fn is_mobile_aspect(width: f32, height: f32) -> bool {
    height > 0.0 && width / height < MOBILE_ASPECT_THRESHOLD
}

pub fn window_is_mobile(windows: &Query<&Window, With<PrimaryWindow>>) -> bool {
    windows
        .single()
        .map(|window| is_mobile_aspect(window.width(), window.height()))
        .unwrap_or(false)
}

pub fn spawn_main_camera(commands: &mut Commands) {
    let camera = ViewportCamera::default();
    commands.spawn((
        MainCamera,
        Name::new("MainCamera"),
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: FOV_DEGREES.to_radians(),
            ..default()
        }),
        Transform::from_translation(camera.current_position)
            .looking_at(camera.current_target, Vec3::Y),
        IsDefaultUiCamera,
    ));
    commands.insert_resource(camera);
}

/// Mouse orbit/truck/dolly and WASD movement.
#[allow(clippy::too_many_arguments)]
pub fn camera_controller(
    mut rig: ResMut<ViewportCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    keyboard: Res<ButtonInput<KeyCode>>,
    rename: Res<RenameEntry>,
    ui: Query<&Interaction>,
    time: Res<Time>,
) {
    // The HUD panel owns the pointer while hovered.
    let over_ui = ui.iter().any(|interaction| *interaction != Interaction::None);

    let delta = mouse_motion.delta;
    if !over_ui && delta != Vec2::ZERO {
        if mouse_button.pressed(MouseButton::Left) {
            rig.orbit(-delta.x * ORBIT_SENSITIVITY, -delta.y * ORBIT_SENSITIVITY);
        } else if mouse_button.pressed(MouseButton::Right) {
            let scale = TRUCK_SENSITIVITY * rig.distance();
            rig.truck(-delta.x * scale, delta.y * scale);
        }
    }

    let mut scroll = 0.0;
    for event in scroll_events.read() {
        scroll += match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y * 0.05,
        };
    }
    if !over_ui && scroll.abs() > f32::EPSILON {
        rig.dolly((1.0 - DOLLY_STEP).powf(scroll));
    }

    if rename.is_active() {
        return;
    }

    let speed = if keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]) {
        WALK_SPEED_FAST
    } else {
        WALK_SPEED
    } * time.delta_secs();

    if keyboard.pressed(KeyCode::KeyW) { rig.forward(speed); }
    if keyboard.pressed(KeyCode::KeyS) { rig.forward(-speed); }
    if keyboard.pressed(KeyCode::KeyA) { rig.truck(-speed, 0.0); }
    if keyboard.pressed(KeyCode::KeyD) { rig.truck(speed, 0.0); }
    if keyboard.pressed(KeyCode::KeyE) { rig.truck(0.0, speed); } // Up
    if keyboard.pressed(KeyCode::KeyQ) { rig.truck(0.0, -speed); } // Down
}

pub fn update_camera_transform(
    mut rig: ResMut<ViewportCamera>,
    mut cameras: Query<&mut Transform, With<MainCamera>>,
    time: Res<Time>,
) {
    let (position, target) = rig.update(time.elapsed_secs(), time.delta_secs());
    if let Ok(mut transform) = cameras.single_mut() {
        *transform = Transform::from_translation(position).looking_at(target, Vec3::Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rig() -> ViewportCamera {
        ViewportCamera::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO)
    }

    #[test]
    fn orbit_keeps_distance_and_target() {
        let mut rig = rig();
        rig.orbit(std::f32::consts::FRAC_PI_2, 0.0);
        assert_relative_eq!(rig.distance(), 10.0, epsilon = 1e-4);
        assert_relative_eq!(rig.position.x, 10.0, epsilon = 1e-4);
        assert_eq!(rig.target, Vec3::ZERO);
    }

    #[test]
    fn orbit_stops_short_of_the_pole() {
        let mut rig = rig();
        rig.orbit(0.0, -10.0);
        assert!(rig.position.y < 10.0);
        assert!(rig.position.y > 9.99);
        assert_relative_eq!(rig.distance(), 10.0, epsilon = 1e-4);
    }

    #[test]
    fn dolly_is_clamped() {
        let mut rig = rig();
        rig.dolly(0.01);
        assert_relative_eq!(rig.distance(), MIN_DISTANCE, epsilon = 1e-5);
        rig.dolly(1000.0);
        assert_relative_eq!(rig.distance(), MAX_DISTANCE, epsilon = 1e-3);
    }

    #[test]
    fn truck_and_forward_move_both_points() {
        let mut rig = rig();
        rig.truck(1.0, 2.0);
        // Looking down -Z: right is +X, up is +Y.
        assert_relative_eq!(rig.position.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(rig.target.y, 2.0, epsilon = 1e-5);

        let before = rig.distance();
        rig.forward(3.0);
        assert_relative_eq!(rig.position.z, 7.0, epsilon = 1e-5);
        assert_relative_eq!(rig.target.z, -3.0, epsilon = 1e-5);
        assert_relative_eq!(rig.distance(), before, epsilon = 1e-5);
    }

    #[test]
    fn smoothing_converges_without_overshoot() {
        let mut rig = rig();
        rig.set_look_at(Vec3::new(5.0, 0.0, 10.0), Vec3::new(5.0, 0.0, 0.0), true);
        let mut last_x = 0.0;
        for frame in 1..=240 {
            let (position, _) = rig.update(frame as f32 / 60.0, 1.0 / 60.0);
            assert!(position.x >= last_x && position.x <= 5.0);
            last_x = position.x;
        }
        assert_relative_eq!(last_x, 5.0, epsilon = 1e-3);
    }

    #[test]
    fn cinematic_smoothing_is_restored() {
        let mut rig = rig();
        rig.go_to_view(Vec3::new(1.0, 1.0, 1.0), Vec3::ZERO, 10.0);
        assert_eq!(rig.smooth_time, CINEMATIC_SMOOTH_TIME_SECS);
        rig.update(11.0, 0.016);
        assert_eq!(rig.smooth_time, CINEMATIC_SMOOTH_TIME_SECS);
        rig.update(11.5, 0.016);
        assert_eq!(rig.smooth_time, SMOOTH_TIME_SECS);
    }

    #[test]
    fn mobile_means_portrait() {
        assert!(is_mobile_aspect(390.0, 844.0));
        assert!(!is_mobile_aspect(1280.0, 720.0));
        assert!(!is_mobile_aspect(800.0, 800.0));
        assert!(!is_mobile_aspect(800.0, 0.0));
    }
}
