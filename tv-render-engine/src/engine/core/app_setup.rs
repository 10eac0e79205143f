use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::engine::assets::TvManifest;
use crate::engine::camera::ViewRequest;
use crate::engine::camera::viewport_camera::{
    camera_controller, spawn_main_camera, update_camera_transform,
};
use crate::engine::camera::views::{apply_startup_view, apply_view_requests};
use crate::engine::core::app_state::{AppState, FpsText, TvSet, transition_to_running};
use crate::engine::core::window_config::create_window_config;
use crate::engine::hud::{PanelVisibility, RenameEntry};
use crate::engine::input::click_sound::load_click_sound;
use crate::engine::input::keyboard::keyboard_shortcuts;
use crate::engine::input::pointer::{handle_scene_clicks, tv_hover_cursor};
use crate::engine::loading::loading_screen::{despawn_loading_screen, spawn_loading_screen};
use crate::engine::loading::manifest_loader::{
    ManifestLoader, load_manifest_system, loading_complete, start_loading, watch_model_load,
};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::render::overlay::Overlay;
use crate::engine::render::overlay::ui::{spawn_overlay_ui, update_overlay};
use crate::engine::render::screen_material::{TvScreenMaterial, sync_screen_material};
use crate::engine::scene::animation::{apply_setup_slide, sync_setup_animation};
use crate::engine::scene::layers::sync_layer_visibility;
use crate::engine::scene::lighting::spawn_lighting;
use crate::engine::store::broadcast::{
    broadcast_store_changes, commit_idle_channel_entry, load_persisted_bookmarks,
    persist_bookmarks,
};
use crate::engine::store::persistence::BookmarkPersistence;
use crate::engine::store::{ChannelStore, StoreChanged};
use crate::engine::systems::fps_tracking::{fps_notification_system, fps_text_update_system};
use crate::engine::tv::systems::{drive_tv_controller, upload_video_frame};
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::hud::panel::{
    hud_button_interaction, rebuild_bookmark_list, reflect_rename_state, reflect_toggle_state,
    rename_button_interaction, spawn_hud_panel, sync_panel_visibility, type_bookmark_name,
    update_bookmark_labels, update_camera_readout,
};

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(MaterialPlugin::<TvScreenMaterial>::default())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers TvManifest as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<TvManifest>::new(&["json"]))
        .add_plugins(WebRpcPlugin);

    // Initialise resources early
    app.init_resource::<LoadingProgress>()
        .init_resource::<ManifestLoader>()
        .init_resource::<ChannelStore>()
        .init_resource::<Overlay>()
        .init_resource::<PanelVisibility>()
        .init_resource::<RenameEntry>()
        .init_resource::<BookmarkPersistence>()
        .add_event::<StoreChanged>()
        .add_event::<ViewRequest>();

    app.configure_sets(
        Update,
        (TvSet::Input, TvSet::Store, TvSet::Controller, TvSet::Render)
            .chain()
            .run_if(in_state(AppState::Running)),
    );

    // State-based system scheduling
    app.add_systems(
        Startup,
        (
            setup,
            spawn_loading_screen,
            spawn_overlay_ui,
            load_click_sound,
            start_loading,
        )
            .chain(),
    )
    .add_systems(
        Update,
        (
            load_manifest_system,
            watch_model_load,
            transition_to_running.run_if(loading_complete),
        )
            .chain()
            .run_if(in_state(AppState::Loading)),
    )
    .add_systems(
        OnEnter(AppState::Running),
        (despawn_loading_screen, load_persisted_bookmarks, apply_startup_view).chain(),
    );

    app.add_systems(
        Update,
        (
            keyboard_shortcuts,
            handle_scene_clicks,
            tv_hover_cursor,
            camera_controller,
        )
            .in_set(TvSet::Input),
    )
    .add_systems(
        Update,
        (commit_idle_channel_entry, broadcast_store_changes)
            .chain()
            .in_set(TvSet::Store),
    )
    .add_systems(
        Update,
        (
            drive_tv_controller,
            persist_bookmarks,
            apply_view_requests,
            sync_setup_animation,
        )
            .in_set(TvSet::Controller),
    )
    .add_systems(
        Update,
        (
            update_overlay,
            sync_screen_material,
            upload_video_frame,
            sync_layer_visibility,
            apply_setup_slide,
            update_camera_transform,
            fps_notification_system,
            fps_text_update_system,
        )
            .in_set(TvSet::Render),
    );

    // Developer panel only for native builds.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Startup, spawn_hud_panel)
            .add_systems(
                Update,
                (
                    hud_button_interaction,
                    rename_button_interaction,
                    type_bookmark_name,
                )
                    .in_set(TvSet::Input),
            )
            .add_systems(
                Update,
                (
                    sync_panel_visibility,
                    update_camera_readout,
                    (rebuild_bookmark_list, update_bookmark_labels).chain(),
                    reflect_toggle_state,
                    reflect_rename_state,
                )
                    .in_set(TvSet::Render),
            );
    }

    app
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands) {
    println!("=== LUCKI TV ===");

    spawn_main_camera(&mut commands);
    spawn_lighting(&mut commands);

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
    }
}

/// FPS counter, shown together with the panel.
#[cfg(not(target_arch = "wasm32"))]
fn create_native_overlays(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1., 0., 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                Visibility::Hidden,
                FpsText,
            ));
        });
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
