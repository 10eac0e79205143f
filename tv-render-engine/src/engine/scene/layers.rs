use bevy::prelude::*;

use super::classification::NodeClass;
use super::tv_model::SceneIndex;
use crate::engine::store::ChannelStore;
use crate::engine::store::layers::LayerVisibility;

pub fn node_visible(layers: &LayerVisibility, class: NodeClass) -> bool {
    match class {
        NodeClass::Layer(layer) => layers.is_visible(layer),
        NodeClass::ExtraEnvironment => layers.environment_visible(),
    }
}

/// Mirror the store's layer flags onto the classified scene nodes.
pub fn sync_layer_visibility(
    store: Res<ChannelStore>,
    index: Option<Res<SceneIndex>>,
    mut visibility: Query<&mut Visibility>,
) {
    let Some(index) = index else {
        return;
    };
    if !store.is_changed() && !index.is_changed() {
        return;
    }

    for (entity, class) in &index.layer_nodes {
        if let Ok(mut current) = visibility.get_mut(*entity) {
            let wanted = if node_visible(&store.layers, *class) {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            };
            current.set_if_neq(wanted);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::store::layers::EnvironmentLayer;

    #[test]
    fn extra_environment_follows_master_flag_only() {
        let mut layers = LayerVisibility::default();
        layers.toggle(EnvironmentLayer::Pipes);
        assert!(node_visible(&layers, NodeClass::Layer(EnvironmentLayer::Pipes)));
        assert!(!node_visible(&layers, NodeClass::ExtraEnvironment));

        layers.toggle_environment();
        assert!(node_visible(&layers, NodeClass::ExtraEnvironment));
        assert!(node_visible(&layers, NodeClass::Layer(EnvironmentLayer::Curves)));
    }
}
