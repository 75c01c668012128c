pub mod config;
pub mod nominatim;
pub mod static_places;
pub mod verifier;

pub use config::GeocoderConfig;
pub use nominatim::NominatimGeocoder;
pub use static_places::StaticGeocoder;
pub use verifier::{LocationVerifier, VerifierStats};

use anyhow::Result;
use async_trait::async_trait;

/// Resolves a free-text name to "is a real place" or not
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn resolve(&self, name: &str) -> Result<bool>;
}

/// Build a verifier from config. `offline` swaps Nominatim for the static place list.
pub fn build_verifier(config: &GeocoderConfig, offline: bool) -> Result<LocationVerifier> {
    let geocoder: Box<dyn Geocoder> = if offline {
        Box::new(StaticGeocoder::new(config.known_places.iter()))
    } else {
        Box::new(NominatimGeocoder::from_config(config)?)
    };

    Ok(LocationVerifier::new(geocoder, config.timeout()).with_cache(config.cache))
}
