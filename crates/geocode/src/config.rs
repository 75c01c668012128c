use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub cache: bool,
    /// Places the offline geocoder accepts
    pub known_places: Vec<String>,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: "location_verifier".to_string(),
            timeout_secs: 5,
            cache: true,
            known_places: [
                "Αθήνα",
                "Αθήνας",
                "Athens",
                "Θεσσαλονίκη",
                "Thessaloniki",
                "Πάτρα",
                "Λάρισα",
                "Ηράκλειο",
                "Ελλάδα",
                "Greece",
                "Κρήτη",
                "Crete",
                "Όλυμπος",
                "Εξάρχεια",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

impl GeocoderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
