use serde::{Deserialize, Serialize};

/// Individually toggleable groups of set dressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EnvironmentLayer {
    LightBars,
    Pipes,
    Cylinders,
    Cubes,
    Planes,
    GuitarStrap,
    Curves,
}

impl EnvironmentLayer {
    pub const ALL: [Self; 7] = [
        Self::LightBars,
        Self::Pipes,
        Self::Cylinders,
        Self::Cubes,
        Self::Planes,
        Self::GuitarStrap,
        Self::Curves,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::LightBars => "lightBars",
            Self::Pipes => "pipes",
            Self::Cylinders => "cylinders",
            Self::Cubes => "cubes",
            Self::Planes => "planes",
            Self::GuitarStrap => "guitarStrap",
            Self::Curves => "curves",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::LightBars => "Light Bars",
            Self::Pipes => "Pipes",
            Self::Cylinders => "Cylinders",
            Self::Cubes => "Cubes",
            Self::Planes => "Planes",
            Self::GuitarStrap => "Guitar Strap",
            Self::Curves => "Curves",
        }
    }

    /// Convert the frontend key (`"lightBars"`, ...) to a layer.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|layer| layer.key() == key)
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Visibility of every environment layer plus the master environment flag.
///
/// The master toggle overwrites all layer flags. Toggling a single layer
/// leaves the master flag as it was.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayerVisibility {
    flags: [bool; EnvironmentLayer::ALL.len()],
    environment_visible: bool,
}

impl LayerVisibility {
    pub fn is_visible(&self, layer: EnvironmentLayer) -> bool {
        self.flags[layer.index()]
    }

    pub fn environment_visible(&self) -> bool {
        self.environment_visible
    }

    pub fn toggle(&mut self, layer: EnvironmentLayer) {
        let flag = &mut self.flags[layer.index()];
        *flag = !*flag;
    }

    pub fn toggle_environment(&mut self) {
        self.environment_visible = !self.environment_visible;
        self.flags = [self.environment_visible; EnvironmentLayer::ALL.len()];
    }

    pub fn iter(&self) -> impl Iterator<Item = (EnvironmentLayer, bool)> + '_ {
        EnvironmentLayer::ALL
            .into_iter()
            .map(|layer| (layer, self.is_visible(layer)))
    }
}

impl Serialize for LayerVisibility {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(EnvironmentLayer::ALL.len()))?;
        for (layer, visible) in self.iter() {
            map.serialize_entry(layer.key(), &visible)?;
        }
        map.end()
    }
}
