//! Client for the remote chart-computation service.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{Datelike, Local, Timelike, Utc};
use secrecy::{ExposeSecret, SecretString};

use crate::astro::types::{BirthPayload, ChartSnapshot, DasaInfo, Fetched, PlanetTable};
use crate::error::GatewayError;

/// Per-request timeout for chart computations.
const GATEWAY_TIMEOUT: Duration = Duration::from_secs(15);

/// Named endpoints of the computation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Extended planetary positions (sign, house, nakshatra, pada).
    ExtendedPlanets,
    /// Vimsottari major/sub period information.
    VimsottariDasa,
    /// Tenth-harmonic divisional chart (career).
    D10Chart,
    /// Ninth-harmonic divisional chart (marriage).
    NavamsaChart,
    /// Thirtieth-harmonic divisional chart (health).
    D30Chart,
    /// Auspicious-window lookup.
    AbhijitMuhurat,
}

impl Endpoint {
    /// URL path of this endpoint on the computation service.
    pub fn path(&self) -> &'static str {
        match self {
            Self::ExtendedPlanets => "/planets/extended",
            Self::VimsottariDasa => "/vimsottari/dasa-information",
            Self::D10Chart => "/d10-chart-info",
            Self::NavamsaChart => "/navamsa-chart-info",
            Self::D30Chart => "/d30-chart-info",
            Self::AbhijitMuhurat => "/abhijit-muhurat",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Issues chart-computation calls.
///
/// The trait seam keeps the dialogue pipeline testable without the network;
/// every outcome crosses this boundary as `Ok(body)` or a tagged
/// `GatewayError`, never a panic.
#[async_trait]
pub trait ChartProvider: Send + Sync {
    async fn fetch(
        &self,
        endpoint: Endpoint,
        payload: &serde_json::Value,
    ) -> Result<serde_json::Value, GatewayError>;
}

/// reqwest-backed provider for the hosted computation service.
pub struct AstroGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: SecretString,
}

impl AstroGateway {
    pub fn new(base_url: String, api_key: SecretString) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }
}

#[async_trait]
impl ChartProvider for AstroGateway {
    async fn fetch(
        &self,
        endpoint: Endpoint,
        payload: &serde_json::Value,
    ) -> Result<serde_json::Value, GatewayError> {
        let resp = self
            .client
            .post(self.endpoint_url(endpoint))
            .header("x-api-key", self.api_key.expose_secret())
            .json(payload)
            .timeout(GATEWAY_TIMEOUT)
            .send()
            .await
            .map_err(|e| GatewayError::Http {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(GatewayError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        resp.json().await.map_err(|e| GatewayError::Decode {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })
    }
}

/// A "current moment" sub-payload for period lookups.
pub fn event_data_now() -> serde_json::Value {
    let now = Local::now();
    serde_json::json!({
        "year": now.year(),
        "month": now.month(),
        "date": now.day(),
        "hours": now.hour(),
        "minutes": now.minute(),
        "seconds": 0,
    })
}

/// Fetch the full snapshot for a birth payload: extended planets plus the
/// current-period document.
///
/// Each lookup degrades to a `Fetched::Failed` marker so registration runs
/// to completion on partial data.
pub async fn fetch_chart(provider: &dyn ChartProvider, payload: &BirthPayload) -> ChartSnapshot {
    let base = payload.to_json();

    let planets = match provider.fetch(Endpoint::ExtendedPlanets, &base).await {
        Ok(doc) => match serde_json::from_value::<PlanetTable>(doc) {
            Ok(table) => Fetched::Ok { data: table },
            Err(e) => Fetched::Failed {
                reason: format!("decode: {e}"),
            },
        },
        Err(e) => {
            tracing::warn!(error = %e, "extended planets lookup failed");
            Fetched::Failed {
                reason: e.to_string(),
            }
        }
    };

    let mut dasa_body = base.clone();
    if let Some(obj) = dasa_body.as_object_mut() {
        obj.insert("event_data".to_string(), event_data_now());
    }
    let dasa = match provider.fetch(Endpoint::VimsottariDasa, &dasa_body).await {
        Ok(doc) => match serde_json::from_value::<DasaInfo>(doc) {
            Ok(info) => Fetched::Ok { data: info },
            Err(e) => Fetched::Failed {
                reason: format!("decode: {e}"),
            },
        },
        Err(e) => {
            tracing::warn!(error = %e, "dasa lookup failed");
            Fetched::Failed {
                reason: e.to_string(),
            }
        }
    };

    ChartSnapshot {
        planets,
        dasa,
        fetched_at: Utc::now(),
    }
}
