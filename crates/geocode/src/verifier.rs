use dashmap::DashMap;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

use crate::Geocoder;

/// Decides whether a name is a real place.
///
/// Any failure, including a timeout, counts as "not a location". Transient
/// network problems are therefore indistinguishable from a negative lookup;
/// they are logged at `warn` and never retried.
pub struct LocationVerifier {
    geocoder: Box<dyn Geocoder>,
    timeout: Duration,
    cache: Option<DashMap<String, bool>>,

    lookups: AtomicUsize,
    cache_hits: AtomicUsize,
    failures: AtomicUsize,
}

impl LocationVerifier {
    pub fn new(geocoder: Box<dyn Geocoder>, timeout: Duration) -> Self {
        Self {
            geocoder,
            timeout,
            cache: Some(DashMap::new()),
            lookups: AtomicUsize::new(0),
            cache_hits: AtomicUsize::new(0),
            failures: AtomicUsize::new(0),
        }
    }

    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache = enabled.then(DashMap::new);
        self
    }

    pub async fn verify(&self, name: &str) -> bool {
        let key = cache_key(name);

        if let Some(cache) = &self.cache {
            if let Some(found) = cache.get(&key) {
                self.cache_hits.fetch_add(1, Ordering::Relaxed);
                return *found.value();
            }
        }

        self.lookups.fetch_add(1, Ordering::Relaxed);

        let found = match tokio::time::timeout(self.timeout, self.geocoder.resolve(name)).await {
            Ok(Ok(found)) => {
                debug!(name, found, "Geocoded");
                found
            }
            Ok(Err(e)) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                let timed_out = e
                    .chain()
                    .filter_map(|cause| cause.downcast_ref::<reqwest::Error>())
                    .any(|cause| cause.is_timeout());
                warn!(name, timed_out, error = %e, "Geocoding failed, treating as not a location");
                return false;
            }
            Err(_) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                warn!(
                    name,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Geocoding timed out, treating as not a location"
                );
                return false;
            }
        };

        // Failures return early above and are never cached
        if let Some(cache) = &self.cache {
            cache.insert(key, found);
        }

        found
    }

    pub fn stats(&self) -> VerifierStats {
        VerifierStats {
            lookups: self.lookups.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

/// Lowercased, whitespace collapsed
fn cache_key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VerifierStats {
    pub lookups: usize,
    pub cache_hits: usize,
    pub failures: usize,
}
