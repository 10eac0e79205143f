use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::media::MANIFEST_PATH;

use super::progress::LoadingProgress;
use crate::engine::assets::TvManifest;
use crate::engine::media::{VideoPlayer, VideoTexture};
use crate::engine::render::overlay::OverlayTarget;
use crate::engine::render::screen_material::{
    ScreenMaterial, TvScreenMaterial, create_screen_material,
};
use crate::engine::scene::tv_model::{TvModel, spawn_tv_scene};
use crate::engine::store::ChannelStore;
use crate::engine::tv::{Tv, TvController};

#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<TvManifest>>,
}

// Start the loading process
pub fn start_loading(mut manifest_loader: ResMut<ManifestLoader>, asset_server: Res<AssetServer>) {
    println!("Loading TV manifest: {}", MANIFEST_PATH);
    manifest_loader.handle = Some(asset_server.load(MANIFEST_PATH));
}

/// Wait for the manifest, then configure the store, the controller, the
/// media backend and the screen material, and spawn the model.
///
/// A manifest that fails to load is replaced by the compiled-in defaults.
#[allow(clippy::too_many_arguments)]
pub fn load_manifest_system(
    mut loading_progress: ResMut<LoadingProgress>,
    manifest_loader: Res<ManifestLoader>,
    manifests: Res<Assets<TvManifest>>,
    asset_server: Res<AssetServer>,
    overlay: Option<Res<OverlayTarget>>,
    mut store: ResMut<ChannelStore>,
    mut images: ResMut<Assets<Image>>,
    mut materials: ResMut<Assets<TvScreenMaterial>>,
    mut commands: Commands,
) {
    if loading_progress.manifest_loaded {
        return;
    }
    let Some(handle) = manifest_loader.handle.as_ref() else {
        return;
    };
    let Some(overlay) = overlay else {
        return;
    };

    let manifest = match manifests.get(handle) {
        Some(manifest) => manifest.clone(),
        None => match asset_server.load_state(handle.id()) {
            LoadState::Failed(e) => {
                warn!("Using built-in TV configuration, {} failed: {}", MANIFEST_PATH, e);
                TvManifest::default()
            }
            _ => return,
        },
    };

    println!("✓ Manifest loaded: {} channels", manifest.channels.len());
    loading_progress.manifest_loaded = true;

    store.channels = manifest.channels.clone();
    commands.insert_resource(Tv(TvController::new(manifest.clip_sequence())));

    let clip_secs = manifest.simulated_clip_secs;
    commands.queue(move |world: &mut World| {
        world.insert_non_send_resource(VideoPlayer::new(clip_secs));
    });

    let video = VideoTexture::create(&mut images);
    let screen = create_screen_material(&mut materials, video.0.clone(), overlay.0.clone());
    commands.insert_resource(video);
    commands.insert_resource(ScreenMaterial(screen));

    spawn_tv_scene(&mut commands, &asset_server, &manifest);
    loading_progress.scene_requested = true;

    commands.insert_resource(manifest);
}

/// A model that fails to load never reports ready; carry on without it.
pub fn watch_model_load(
    mut loading_progress: ResMut<LoadingProgress>,
    model: Option<Res<TvModel>>,
    asset_server: Res<AssetServer>,
) {
    if loading_progress.scene_ready {
        return;
    }
    let Some(model) = model else {
        return;
    };
    if let LoadState::Failed(e) = asset_server.load_state(model.gltf.id()) {
        warn!("TV model failed to load, continuing without it: {}", e);
        loading_progress.scene_ready = true;
    }
}

pub fn loading_complete(loading_progress: Res<LoadingProgress>) -> bool {
    loading_progress.is_complete()
}
