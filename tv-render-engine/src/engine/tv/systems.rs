use bevy::prelude::*;

use super::Tv;
use crate::engine::media::{VideoPlayer, VideoTexture};
use crate::engine::store::{ChannelStore, StoreChanged};

/// Feed store diffs, media events and the frame tick into the controller,
/// then hand its commands to the backend.
pub fn drive_tv_controller(
    mut tv: ResMut<Tv>,
    mut store: ResMut<ChannelStore>,
    mut changes: EventReader<StoreChanged>,
    mut player: NonSendMut<VideoPlayer>,
    time: Res<Time>,
) {
    let now = time.elapsed_secs_f64();
    let store = &mut *store;

    for change in changes.read() {
        tv.on_store_changed(change, store, now);
    }

    player.0.tick(time.delta_secs());
    for event in player.0.poll_events() {
        tv.on_media_event(event, store, now);
    }

    tv.tick(now, time.delta_secs(), store);

    for command in tv.drain_commands() {
        debug!("Media command: {:?}", command);
        player.0.apply(command);
    }
}

pub fn upload_video_frame(
    mut player: NonSendMut<VideoPlayer>,
    video: Option<Res<VideoTexture>>,
    mut images: ResMut<Assets<Image>>,
) {
    let Some(video) = video else {
        return;
    };
    if !player.0.has_new_frame() {
        return;
    }
    if let Some(image) = images.get_mut(&video.0) {
        player.0.upload_frame(image);
    }
}
