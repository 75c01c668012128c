use serde::{Deserialize, Serialize};

use crate::normalizer::normalize_key;

/// Word lists that drive band detection and location certainty
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Band names, matched case-insensitively
    pub bands: Vec<String>,
    /// Greek nouns whose presence in a sentence marks its places as certain
    pub location_indicators: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            bands: [
                "rotting christ",
                "necromantia",
                "varathron",
                "septicflesh",
                "thou art lord",
                "astarte",
                "zemial",
                "kawir",
                "naer mataron",
                "mortify",
                "nightfall",
                "horror of sadist",
                "dark nova",
            ]
            .map(String::from)
            .to_vec(),
            location_indicators: [
                "πόλη",
                "χωριό",
                "νησί",
                "όρος",
                "βουνό",
                "ποταμός",
                "λίμνη",
                "χώρα",
                "πολιτεία",
                "περιοχή",
                "δήμος",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

impl Vocabulary {
    pub fn new(bands: Vec<String>, location_indicators: Vec<String>) -> Self {
        Self {
            bands,
            location_indicators,
        }
    }

    pub fn is_band(&self, name: &str) -> bool {
        let key = normalize_key(name);
        !key.is_empty() && self.bands.iter().any(|band| normalize_key(band) == key)
    }

    pub fn has_location_indicator(&self, sentence: &str) -> bool {
        let lowered = sentence.to_lowercase();
        self.location_indicators
            .iter()
            .map(|indicator| indicator.trim().to_lowercase())
            .filter(|indicator| !indicator.is_empty())
            .any(|indicator| lowered.contains(&indicator))
    }
}
