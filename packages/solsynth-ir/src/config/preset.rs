//! Presets
//!
//! A preset fills every section; builder closures and YAML overrides then
//! replace whole sections.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// CI smoke runs: short chromosomes, shallow trees, uniform constants
    Fast,

    /// Default search settings
    #[default]
    Balanced,

    /// Long searches: deeper trees, strict jump handling
    Thorough,

    /// User-defined (YAML or builder); starts from balanced values
    Custom,
}

impl Preset {
    pub const ALL: [Preset; 4] = [Preset::Fast, Preset::Balanced, Preset::Thorough, Preset::Custom];

    /// Case-insensitive name lookup
    pub fn from_str(s: &str) -> Result<Self, String> {
        let wanted = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|preset| preset.as_str() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(Preset::as_str).collect();
                format!("Unknown preset '{}'. Valid presets: {}", s, names.join(", "))
            })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Balanced => "balanced",
            Self::Thorough => "thorough",
            Self::Custom => "custom",
        }
    }

    /// Whether unmatched `break` / `continue` only warn under this preset
    pub fn forgives_syntax(&self) -> bool {
        !matches!(self, Self::Thorough)
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
