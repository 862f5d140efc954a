//! Place-name resolution via the Nominatim search API.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Fallback coordinate when a place cannot be resolved (New Delhi).
pub const DEFAULT_COORDINATE: (f64, f64) = (28.6139, 77.2090);

/// Per-request timeout for geocode lookups.
const GEOCODE_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = "AstroAssist/1.0";

/// How a place string was turned into a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GeocodeOutcome {
    /// The geocoder returned a match.
    Resolved { latitude: f64, longitude: f64 },
    /// Lookup failed or returned nothing; the fixed default was used.
    Defaulted { latitude: f64, longitude: f64 },
}

impl GeocodeOutcome {
    pub fn coordinate(&self) -> (f64, f64) {
        match *self {
            Self::Resolved {
                latitude,
                longitude,
            }
            | Self::Defaulted {
                latitude,
                longitude,
            } => (latitude, longitude),
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, Self::Defaulted { .. })
    }
}

/// Resolves free-text place names to coordinates.
///
/// Implementations must always yield a usable coordinate: a failed lookup
/// degrades to the fixed default rather than failing the registration.
#[async_trait]
pub trait PlaceResolver: Send + Sync {
    async fn resolve(&self, place: &str) -> GeocodeOutcome;
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

/// Nominatim-backed resolver.
pub struct Geocoder {
    client: reqwest::Client,
    url: String,
}

impl Geocoder {
    pub fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    /// First-match lookup. Any transport, decode, or parse failure is a
    /// `None`; the caller substitutes the default.
    async fn lookup(&self, place: &str) -> Option<(f64, f64)> {
        let resp = self
            .client
            .get(&self.url)
            .query(&[("q", place), ("format", "json"), ("limit", "1")])
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .timeout(GEOCODE_TIMEOUT)
            .send()
            .await
            .ok()?;
        let hits: Vec<SearchHit> = resp.json().await.ok()?;
        let hit = hits.first()?;
        Some((hit.lat.parse().ok()?, hit.lon.parse().ok()?))
    }
}

#[async_trait]
impl PlaceResolver for Geocoder {
    async fn resolve(&self, place: &str) -> GeocodeOutcome {
        match self.lookup(place).await {
            Some((latitude, longitude)) => GeocodeOutcome::Resolved {
                latitude,
                longitude,
            },
            None => {
                tracing::warn!(place, "geocode lookup failed, using default coordinate");
                let (latitude, longitude) = DEFAULT_COORDINATE;
                GeocodeOutcome::Defaulted {
                    latitude,
                    longitude,
                }
            }
        }
    }
}
