use bevy::picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings};
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, SystemCursorIcon};
use bevy::winit::cursor::CursorIcon;

use crate::engine::camera::viewport_camera::is_mobile_aspect;
use crate::engine::camera::{MainCamera, ViewRequest};
use crate::engine::scene::SceneIndex;
use crate::engine::store::ChannelStore;

/// Pointer travel in pixels below which a press-release counts as a click
/// rather than an orbit drag.
const CLICK_SLOP: f32 = 6.0;

/// Step of the mobile tap cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TapStep {
    #[default]
    ZoomIn,
    PowerOn,
    PowerOff,
    ZoomOut,
}

/// Run one tap of the mobile cycle: zoom to the TV, power on, power off,
/// back to the default view.
pub fn advance_tap(step: TapStep, store: &mut ChannelStore) -> (TapStep, Option<ViewRequest>) {
    match step {
        TapStep::ZoomIn => (TapStep::PowerOn, Some(ViewRequest::Tv)),
        TapStep::PowerOn => {
            store.toggle_power();
            (TapStep::PowerOff, None)
        }
        TapStep::PowerOff => {
            if store.tv_on {
                store.toggle_power();
            }
            (TapStep::ZoomOut, None)
        }
        TapStep::ZoomOut => (TapStep::ZoomIn, Some(ViewRequest::Default)),
    }
}

pub fn is_descendant_of(
    entity: Entity,
    ancestor: Entity,
    parent_of: impl Fn(Entity) -> Option<Entity>,
) -> bool {
    let mut current = Some(entity);
    while let Some(node) = current {
        if node == ancestor {
            return true;
        }
        current = parent_of(node);
    }
    false
}

/// Closest mesh under the screen position, if any.
fn pick(
    position: Vec2,
    cameras: &Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    ray_cast: &mut MeshRayCast,
) -> Option<Entity> {
    let (camera, camera_transform) = cameras.single().ok()?;
    let ray = camera.viewport_to_world(camera_transform, position).ok()?;
    ray_cast
        .cast_ray(ray, &MeshRayCastSettings::default())
        .first()
        .map(|(entity, _)| *entity)
}

fn hits_tv(entity: Entity, index: Option<&SceneIndex>, parents: &Query<&ChildOf>) -> bool {
    let Some(tv) = index.and_then(|index| index.tv) else {
        return false;
    };
    is_descendant_of(entity, tv, |e| parents.get(e).ok().map(ChildOf::parent))
}

/// Clicking the TV zooms to it on desktop. On mobile every tap on the
/// model advances the tap cycle.
#[allow(clippy::too_many_arguments)]
pub fn handle_scene_clicks(
    mouse_button: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut ray_cast: MeshRayCast,
    index: Option<Res<SceneIndex>>,
    parents: Query<&ChildOf>,
    ui: Query<&Interaction>,
    mut store: ResMut<ChannelStore>,
    mut views: EventWriter<ViewRequest>,
    mut pressed_at: Local<Option<Vec2>>,
    mut tap_step: Local<TapStep>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    if ui.iter().any(|interaction| *interaction != Interaction::None) {
        return;
    }

    let mut click = None;
    if mouse_button.just_pressed(MouseButton::Left) {
        *pressed_at = window.cursor_position();
    }
    if mouse_button.just_released(MouseButton::Left) {
        if let (Some(start), Some(end)) = (pressed_at.take(), window.cursor_position()) {
            if start.distance(end) < CLICK_SLOP {
                click = Some(end);
            }
        }
    }
    for touch in touches.iter_just_released() {
        if touch.distance().length() < CLICK_SLOP {
            click = Some(touch.position());
        }
    }

    let Some(position) = click else {
        return;
    };
    let Some(hit) = pick(position, &cameras, &mut ray_cast) else {
        return;
    };

    if is_mobile_aspect(window.width(), window.height()) {
        let (next, view) = advance_tap(*tap_step, &mut store);
        *tap_step = next;
        if let Some(view) = view {
            views.write(view);
        }
    } else if hits_tv(hit, index.as_deref(), &parents) {
        views.write(ViewRequest::Tv);
    }
}

/// Pointer cursor while hovering the TV.
pub fn tv_hover_cursor(
    mut commands: Commands,
    mut cursor_moved: EventReader<CursorMoved>,
    windows: Query<(Entity, &Window), With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut ray_cast: MeshRayCast,
    index: Option<Res<SceneIndex>>,
    parents: Query<&ChildOf>,
    mut hovering: Local<bool>,
) {
    let Some(position) = cursor_moved.read().last().map(|moved| moved.position) else {
        return;
    };
    let Ok((window_entity, _)) = windows.single() else {
        return;
    };

    let over_tv = pick(position, &cameras, &mut ray_cast)
        .is_some_and(|hit| hits_tv(hit, index.as_deref(), &parents));
    if over_tv == *hovering {
        return;
    }
    *hovering = over_tv;

    let icon = if over_tv { SystemCursorIcon::Pointer } else { SystemCursorIcon::Default };
    commands.entity(window_entity).insert(CursorIcon::from(icon));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tap_cycle_runs_zoom_power_power_zoom() {
        let mut store = ChannelStore::default();
        let mut step = TapStep::default();
        let mut views = Vec::new();

        for _ in 0..4 {
            let (next, view) = advance_tap(step, &mut store);
            step = next;
            views.push(view);
            if next == TapStep::PowerOff {
                assert!(store.tv_on);
            }
        }

        assert_eq!(views, vec![Some(ViewRequest::Tv), None, None, Some(ViewRequest::Default)]);
        assert_eq!(step, TapStep::ZoomIn);
        assert!(!store.tv_on);
    }

    #[test]
    fn power_off_tap_leaves_a_dark_tv_alone() {
        let mut store = ChannelStore::default();
        let (next, _) = advance_tap(TapStep::PowerOff, &mut store);
        assert_eq!(next, TapStep::ZoomOut);
        assert!(!store.tv_on);
    }

    #[test]
    fn descendant_walks_the_parent_chain() {
        let tv = Entity::from_raw(1);
        let casing = Entity::from_raw(2);
        let knob = Entity::from_raw(3);
        let lamp = Entity::from_raw(4);
        let parent_of = |e: Entity| match e.index() {
            3 => Some(casing),
            2 => Some(tv),
            _ => None,
        };

        assert!(is_descendant_of(knob, tv, parent_of));
        assert!(is_descendant_of(tv, tv, parent_of));
        assert!(!is_descendant_of(lamp, tv, parent_of));
    }
}
