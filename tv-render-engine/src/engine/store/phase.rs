use serde::{Deserialize, Serialize};

/// Playback and power stage of the TV.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    #[default]
    Off,
    Intro,
    Glitch,
    #[serde(rename = "orange-1")]
    Orange1,
    #[serde(rename = "orange-2")]
    Orange2,
    Channels,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Intro => "intro",
            Self::Glitch => "glitch",
            Self::Orange1 => "orange-1",
            Self::Orange2 => "orange-2",
            Self::Channels => "channels",
        }
    }

    pub fn is_off(&self) -> bool {
        *self == Self::Off
    }
}
