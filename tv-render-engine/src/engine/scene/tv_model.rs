use bevy::gltf::{Gltf, GltfMaterialName};
use bevy::prelude::*;
use bevy::scene::SceneInstanceReady;
use constants::scene::{
    ANIMATION_DRIVER_NAME, CASING_MATERIAL_NAMES, SCREEN_MATERIAL_NAME, TV_NODE_NAME,
};

use super::classification::{LayerClassifier, NodeClass, is_setup_node};
use crate::engine::assets::TvManifest;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::render::screen_material::ScreenMaterial;

#[derive(Component)]
pub struct TvSceneRoot;

/// Handle of the whole glTF document, used to reach its animation clips.
#[derive(Resource, Clone)]
pub struct TvModel {
    pub gltf: Handle<Gltf>,
}

#[derive(Debug, Clone, Copy)]
pub struct SetupNode {
    pub entity: Entity,
    pub original_x: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct SetupAnimation {
    pub player: Entity,
    pub node: AnimationNodeIndex,
}

/// Named parts of the loaded model, resolved once when the scene is ready.
///
/// Missing parts stay `None` (or empty) and the features that need them
/// do nothing.
#[derive(Resource, Debug, Default)]
pub struct SceneIndex {
    pub tv: Option<Entity>,
    pub screen: Option<Entity>,
    pub driver: Option<Entity>,
    pub setup_nodes: Vec<SetupNode>,
    pub layer_nodes: Vec<(Entity, NodeClass)>,
    pub animation: Option<SetupAnimation>,
}

pub fn spawn_tv_scene(
    commands: &mut Commands,
    asset_server: &AssetServer,
    manifest: &TvManifest,
) {
    let gltf = asset_server.load(manifest.model.clone());
    let scene: Handle<Scene> = asset_server.load(manifest.scene_path());
    commands.insert_resource(TvModel { gltf });

    commands
        .spawn((TvSceneRoot, Name::new("TvScene"), SceneRoot(scene)))
        .observe(index_tv_scene);
}

/// Children of the scene root, skipping the unnamed wrapper the glTF
/// loader puts around the document's root nodes.
fn gltf_root_nodes(
    root: Entity,
    children: &Query<&Children>,
    names: &Query<&Name>,
) -> Vec<Entity> {
    let top = children.get(root).map(|c| c.to_vec()).unwrap_or_default();
    match top.as_slice() {
        [wrapper] if !names.contains(*wrapper) => {
            children.get(*wrapper).map(|c| c.to_vec()).unwrap_or_default()
        }
        _ => top,
    }
}

#[allow(clippy::too_many_arguments)]
pub fn index_tv_scene(
    trigger: Trigger<SceneInstanceReady>,
    mut commands: Commands,
    children: Query<&Children>,
    names: Query<&Name>,
    transforms: Query<&Transform>,
    surfaces: Query<(&GltfMaterialName, &MeshMaterial3d<StandardMaterial>)>,
    players: Query<(), With<AnimationPlayer>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut graphs: ResMut<Assets<AnimationGraph>>,
    gltfs: Res<Assets<Gltf>>,
    model: Option<Res<TvModel>>,
    screen_material: Option<Res<ScreenMaterial>>,
    mut loading_progress: ResMut<LoadingProgress>,
) {
    let root = trigger.target();
    let classifier = LayerClassifier::default();
    let mut index = SceneIndex::default();
    let mut player = None;

    for entity in children.iter_descendants(root) {
        if let Ok(name) = names.get(entity) {
            let name = name.as_str();
            if name == TV_NODE_NAME && index.tv.is_none() {
                index.tv = Some(entity);
            }
            if name == ANIMATION_DRIVER_NAME && index.driver.is_none() {
                index.driver = Some(entity);
            }
            if let Some(class) = classifier.classify(name) {
                index.layer_nodes.push((entity, class));
            }
        }

        if let Ok((material_name, material)) = surfaces.get(entity) {
            if material_name.0 == SCREEN_MATERIAL_NAME {
                index.screen.get_or_insert(entity);
            } else if CASING_MATERIAL_NAMES.contains(&material_name.0.as_str()) {
                if let Some(casing) = materials.get_mut(&material.0) {
                    casing.base_color = Color::BLACK;
                }
            }
        }

        if player.is_none() && players.contains(entity) {
            player = Some(entity);
        }
    }

    for entity in gltf_root_nodes(root, &children, &names) {
        let Ok(name) = names.get(entity) else {
            continue;
        };
        if !is_setup_node(name.as_str()) {
            continue;
        }
        if let Ok(transform) = transforms.get(entity) {
            index.setup_nodes.push(SetupNode {
                entity,
                original_x: transform.translation.x,
            });
        }
    }

    let clip = model
        .as_ref()
        .and_then(|model| gltfs.get(&model.gltf))
        .and_then(|gltf| gltf.animations.first().cloned());
    if let (Some(player), Some(clip)) = (player, clip) {
        let (graph, node) = AnimationGraph::from_clip(clip);
        commands
            .entity(player)
            .insert(AnimationGraphHandle(graphs.add(graph)));
        index.animation = Some(SetupAnimation { player, node });
    }

    match (index.screen, screen_material) {
        (Some(screen), Some(material)) => {
            commands
                .entity(screen)
                .remove::<MeshMaterial3d<StandardMaterial>>()
                .insert(MeshMaterial3d(material.0.clone()));
        }
        (None, _) => warn!(
            "No mesh uses the '{}' material, the screen stays dark",
            SCREEN_MATERIAL_NAME
        ),
        (Some(_), None) => warn!("Screen material not created before the scene was ready"),
    }
    if index.tv.is_none() {
        warn!("No '{}' node in the model, click-to-zoom is disabled", TV_NODE_NAME);
    }

    println!(
        "✓ TV scene ready: {} setup nodes, {} layer nodes, animation {}",
        index.setup_nodes.len(),
        index.layer_nodes.len(),
        if index.animation.is_some() { "found" } else { "missing" }
    );
    commands.insert_resource(index);
    loading_progress.scene_ready = true;
}
