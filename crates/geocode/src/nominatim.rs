use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

use crate::Geocoder;
use crate::config::GeocoderConfig;

/// Geocoder backed by the Nominatim search API
#[derive(Clone)]
pub struct NominatimGeocoder {
    base_url: String,
    client: reqwest::Client,
}

impl NominatimGeocoder {
    pub fn new(base_url: String, user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .context("Failed to build geocoding HTTP client")?;

        Ok(Self { base_url, client })
    }

    pub fn from_config(config: &GeocoderConfig) -> Result<Self> {
        Self::new(config.base_url.clone(), &config.user_agent, config.timeout())
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn resolve(&self, name: &str) -> Result<bool> {
        let url = format!("{}/search", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .get(&url)
            .query(&[("q", name), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .context("Failed to send geocoding request")?;

        if !response.status().is_success() {
            anyhow::bail!("Geocoding request failed: {}", response.status());
        }

        let places: Vec<serde_json::Value> = response
            .json()
            .await
            .context("Failed to parse geocoding response")?;

        Ok(!places.is_empty())
    }
}
