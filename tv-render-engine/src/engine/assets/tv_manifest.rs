use std::collections::BTreeMap;

use bevy::prelude::*;
use constants::media::{BRIDGE_CLIPS, DEFAULT_CHANNELS, INTRO_CLIP, MODEL_PATH, SIMULATED_CLIP_SECS};
use serde::{Deserialize, Serialize};

use crate::engine::tv::ClipSequence;

/// Runtime configuration read from `tv_manifest.json`.
///
/// Every field is optional in the file and falls back to the compiled-in
/// default, so an empty object is a valid manifest.
#[derive(Asset, Resource, Debug, Clone, PartialEq, Serialize, Deserialize, TypePath)]
#[serde(default)]
pub struct TvManifest {
    pub model: String,
    pub intro: String,
    pub bridges: [String; 2],
    /// Channel number to clip path. JSON object keys are the numbers.
    pub channels: BTreeMap<u32, String>,
    pub simulated_clip_secs: f32,
}

impl Default for TvManifest {
    fn default() -> Self {
        Self {
            model: MODEL_PATH.to_string(),
            intro: INTRO_CLIP.to_string(),
            bridges: BRIDGE_CLIPS.map(String::from),
            channels: DEFAULT_CHANNELS
                .iter()
                .map(|(number, source)| (*number, source.to_string()))
                .collect(),
            simulated_clip_secs: SIMULATED_CLIP_SECS,
        }
    }
}

impl TvManifest {
    pub fn clip_sequence(&self) -> ClipSequence {
        ClipSequence {
            intro: self.intro.clone(),
            bridges: self.bridges.clone(),
        }
    }

    /// glTF scene path of the model's first scene.
    pub fn scene_path(&self) -> String {
        format!("{}#Scene0", self.model)
    }
}
