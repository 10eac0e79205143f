use bevy::prelude::*;
use constants::scene::SETUP_SLIDE_FACTOR;

use super::tv_model::SceneIndex;
use crate::engine::store::ChannelStore;

/// X offset applied to the setup nodes for a driver displacement.
pub fn slide_offset(start_x: f32, driver_x: f32) -> f32 {
    (driver_x - start_x) * SETUP_SLIDE_FACTOR
}

/// Start the setup clip from its first frame, or stop it.
pub fn sync_setup_animation(
    store: Res<ChannelStore>,
    index: Option<Res<SceneIndex>>,
    mut players: Query<&mut AnimationPlayer>,
    mut applied: Local<bool>,
) {
    let Some(index) = index else {
        return;
    };
    if *applied == store.animation_playing {
        return;
    }
    *applied = store.animation_playing;

    let Some(animation) = index.animation else {
        return;
    };
    let Ok(mut player) = players.get_mut(animation.player) else {
        return;
    };
    if store.animation_playing {
        player.start(animation.node);
        info!("Setup animation started");
    } else {
        player.stop(animation.node);
    }
}

/// Slide the setup nodes by twice the driver's travel while the animation
/// runs, and put them back when it stops.
pub fn apply_setup_slide(
    store: Res<ChannelStore>,
    index: Option<Res<SceneIndex>>,
    mut transforms: Query<&mut Transform>,
    mut start_x: Local<Option<f32>>,
) {
    let Some(index) = index else {
        return;
    };

    if store.animation_playing {
        let Some(driver) = index.driver else {
            return;
        };
        let Ok(driver_x) = transforms.get(driver).map(|t| t.translation.x) else {
            return;
        };
        let offset = slide_offset(*start_x.get_or_insert(driver_x), driver_x);
        for node in &index.setup_nodes {
            if let Ok(mut transform) = transforms.get_mut(node.entity) {
                transform.translation.x = node.original_x + offset;
            }
        }
    } else if start_x.take().is_some() {
        for node in &index.setup_nodes {
            if let Ok(mut transform) = transforms.get_mut(node.entity) {
                transform.translation.x = node.original_x;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn offset_doubles_driver_travel() {
        assert_relative_eq!(slide_offset(-8.7621, -8.7621), 0.0);
        assert_relative_eq!(slide_offset(-8.7621, -6.7621), 4.0, epsilon = 1e-5);
        assert_relative_eq!(slide_offset(0.0, -1.5), -3.0);
    }
}
