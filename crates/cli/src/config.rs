use anyhow::{Context, Result};
use extract::{RecognizerConfig, Vocabulary};
use geocode::GeocoderConfig;
use network::{MergePolicy, Palette};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub vocabulary: Vocabulary,
    pub palette: Palette,
    pub geocoder: GeocoderConfig,
    pub recognizer: RecognizerConfig,
    pub merge_policy: MergePolicy,
}

impl AppConfig {
    /// Defaults, or the JSON file at `path` layered over them
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config: {:?}", path))?;

        serde_json::from_str(&content).context(format!("Failed to parse config: {:?}", path))
    }
}
