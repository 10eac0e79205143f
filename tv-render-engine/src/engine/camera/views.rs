use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::camera::{
    CameraPreset, DESKTOP_DEFAULT, DESKTOP_TV_CLOSE_UP, MOBILE_DEFAULT, MOBILE_TV_CLOSE_UP,
};

use super::viewport_camera::{ViewportCamera, window_is_mobile};
use crate::engine::store::ChannelStore;
use crate::engine::store::bookmarks::BookmarkSet;

/// Request for a camera move. Named views use the cinematic transition,
/// an explicit pose is applied at once.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum ViewRequest {
    /// The default bookmark, or the built-in default view.
    Default,
    /// Close-up of the TV.
    Tv,
    Bookmark(usize),
    Pose { position: Vec3, target: Vec3 },
}

impl ViewRequest {
    /// `"default"`, `"tv"` or a bookmark index.
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "default" => Some(Self::Default),
            "tv" => Some(Self::Tv),
            other => other.parse().ok().map(Self::Bookmark),
        }
    }
}

pub fn resolve_view(
    request: ViewRequest,
    bookmarks: &BookmarkSet,
    mobile: bool,
) -> Option<CameraPreset> {
    let from_bookmark = |index: usize| {
        bookmarks.get(index).map(|slot| CameraPreset {
            position: slot.position.into(),
            target: slot.target.into(),
        })
    };

    match request {
        ViewRequest::Default => bookmarks
            .default_index()
            .and_then(from_bookmark)
            .or(Some(if mobile { MOBILE_DEFAULT } else { DESKTOP_DEFAULT })),
        ViewRequest::Tv => Some(if mobile { MOBILE_TV_CLOSE_UP } else { DESKTOP_TV_CLOSE_UP }),
        ViewRequest::Bookmark(index) => from_bookmark(index),
        ViewRequest::Pose { position, target } => Some(CameraPreset { position, target }),
    }
}

pub fn apply_view_requests(
    mut requests: EventReader<ViewRequest>,
    mut rig: ResMut<ViewportCamera>,
    store: Res<ChannelStore>,
    windows: Query<&Window, With<PrimaryWindow>>,
    time: Res<Time>,
) {
    for request in requests.read() {
        if let ViewRequest::Pose { position, target } = *request {
            rig.set_look_at(position, target, false);
            continue;
        }
        let mobile = window_is_mobile(&windows);
        match resolve_view(*request, &store.bookmarks, mobile) {
            Some(view) => rig.go_to_view(view.position, view.target, time.elapsed_secs()),
            None => debug!("Ignoring view request {:?}", request),
        }
    }
}

/// Jump to the device's built-in default view once the scene is up. Mobile
/// starts with the setup animation running.
pub fn apply_startup_view(
    mut rig: ResMut<ViewportCamera>,
    mut store: ResMut<ChannelStore>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let mobile = window_is_mobile(&windows);
    let view = if mobile { MOBILE_DEFAULT } else { DESKTOP_DEFAULT };
    rig.set_look_at(view.position, view.target, false);
    if mobile {
        store.toggle_animation();
    }
    info!("Startup view: {}", if mobile { "mobile" } else { "desktop" });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_view_prefers_the_default_bookmark() {
        let mut bookmarks = BookmarkSet::default();
        assert_eq!(resolve_view(ViewRequest::Default, &bookmarks, false), Some(DESKTOP_DEFAULT));
        assert_eq!(resolve_view(ViewRequest::Default, &bookmarks, true), Some(MOBILE_DEFAULT));

        let index = bookmarks.save("Desk", Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO);
        bookmarks.set_default(Some(index)).unwrap();
        let view = resolve_view(ViewRequest::Default, &bookmarks, true).unwrap();
        assert_eq!(view.position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn tv_and_bookmark_views() {
        let mut bookmarks = BookmarkSet::default();
        assert_eq!(resolve_view(ViewRequest::Tv, &bookmarks, false), Some(DESKTOP_TV_CLOSE_UP));
        assert_eq!(resolve_view(ViewRequest::Tv, &bookmarks, true), Some(MOBILE_TV_CLOSE_UP));
        assert_eq!(resolve_view(ViewRequest::Bookmark(0), &bookmarks, false), None);

        bookmarks.save("Side", Vec3::X, Vec3::Y);
        let view = resolve_view(ViewRequest::Bookmark(0), &bookmarks, false).unwrap();
        assert_eq!(view.target, Vec3::Y);
    }

    #[test]
    fn pose_requests_jump_without_smoothing() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<ViewRequest>()
            .init_resource::<ChannelStore>()
            .insert_resource(ViewportCamera::default())
            .add_systems(Update, apply_view_requests);

        let position = Vec3::new(1.0, 2.0, 3.0);
        let target = Vec3::new(0.5, 0.0, -1.0);
        app.world_mut().send_event(ViewRequest::Pose { position, target });
        app.update();

        let rig = app.world().resource::<ViewportCamera>();
        assert_eq!(rig.current_position, position);
        assert_eq!(rig.current_target, target);
        assert_eq!(rig.smooth_time, constants::camera::SMOOTH_TIME_SECS);
    }

    #[test]
    fn parse_view_keys() {
        assert_eq!(ViewRequest::parse("default"), Some(ViewRequest::Default));
        assert_eq!(ViewRequest::parse("tv"), Some(ViewRequest::Tv));
        assert_eq!(ViewRequest::parse("2"), Some(ViewRequest::Bookmark(2)));
        assert_eq!(ViewRequest::parse("kitchen"), None);
    }
}
