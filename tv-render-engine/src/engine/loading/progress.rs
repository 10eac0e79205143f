use bevy::prelude::*;

/// Loading milestones checked before entering `AppState::Running`.
#[derive(Resource, Default, Debug)]
pub struct LoadingProgress {
    pub manifest_loaded: bool,
    pub scene_requested: bool,
    /// The model finished spawning, or failed and will not arrive.
    pub scene_ready: bool,
}

impl LoadingProgress {
    pub fn is_complete(&self) -> bool {
        self.manifest_loaded && self.scene_requested && self.scene_ready
    }
}
