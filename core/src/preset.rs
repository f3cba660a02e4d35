use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Named difficulty profiles, the seed is always supplied by the caller.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Preset {
    /// Display order.
    pub const ALL: [Preset; 3] = [Preset::Easy, Preset::Medium, Preset::Hard];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    pub const fn config(self, seed: i64) -> Config {
        use Preset::*;
        match self {
            Easy => Config::new(8, 8, 10, seed),
            Medium => Config::new(16, 16, 40, seed),
            Hard => Config::new(16, 30, 99, seed),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = BoardError;

    fn from_str(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name() == name)
            .ok_or_else(|| {
                log::warn!("Unknown preset {:?}", name);
                BoardError::UnknownPreset
            })
    }
}

/// Preset names in display order.
pub fn presets() -> [&'static str; 3] {
    Preset::ALL.map(Preset::name)
}

pub fn preset_config(name: &str, seed: i64) -> Result<Config> {
    Ok(name.parse::<Preset>()?.config(seed))
}
