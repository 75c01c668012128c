use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashSet;

use crate::Geocoder;

/// Offline geocoder over a fixed list of place names
#[derive(Debug, Clone, Default)]
pub struct StaticGeocoder {
    places: HashSet<String>,
}

impl StaticGeocoder {
    pub fn new<I, S>(places: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            places: places
                .into_iter()
                .map(|p| p.as_ref().trim().to_lowercase())
                .collect(),
        }
    }
}

#[async_trait]
impl Geocoder for StaticGeocoder {
    async fn resolve(&self, name: &str) -> Result<bool> {
        Ok(self.places.contains(&name.trim().to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_case_insensitive_lookup() {
        let geocoder = StaticGeocoder::new(["Αθήνα", "Crete"]);

        assert!(geocoder.resolve("ΑΘΉΝΑ").await.unwrap());
        assert!(geocoder.resolve(" crete ").await.unwrap());
        assert!(!geocoder.resolve("Varathron").await.unwrap());
    }
}
