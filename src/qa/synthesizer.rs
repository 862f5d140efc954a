//! Category-templated answers rendered from the cached chart.

use chrono::{Datelike, Local};

use crate::astro::gateway::{ChartProvider, Endpoint};
use crate::astro::types::{ChartSnapshot, PlanetPosition};
use crate::qa::classifier::QuestionCategory;
use crate::store::ChartRecord;

/// Placeholder for any field missing from the cached documents.
const NA: &str = "N/A";

/// Payload for the auspicious-window endpoint: the current day plus the
/// stored birth coordinates.
fn timing_payload(latitude: f64, longitude: f64, timezone: f64) -> serde_json::Value {
    let today = Local::now();
    serde_json::json!({
        "year": today.year(),
        "month": today.month(),
        "date": today.day(),
        "latitude": latitude,
        "longitude": longitude,
        "timezone": timezone,
    })
}

/// Answer a classified question from a cached record.
///
/// Categories with a supplementary endpoint consult the provider first —
/// divisional charts with the stored birth payload, timing with the
/// current-moment payload. The reply itself renders from the cached
/// snapshot; the supplementary outcome is logged. Reads only, never
/// mutates the record.
pub async fn answer(
    provider: &dyn ChartProvider,
    record: &ChartRecord,
    category: QuestionCategory,
) -> String {
    if let Some(endpoint) = category.endpoint() {
        let payload = match endpoint {
            Endpoint::AbhijitMuhurat => timing_payload(
                record.profile.payload.latitude,
                record.profile.payload.longitude,
                record.profile.payload.timezone,
            ),
            _ => record.profile.payload.to_json(),
        };
        match provider.fetch(endpoint, &payload).await {
            Ok(_) => tracing::debug!(%category, %endpoint, "supplementary lookup ok"),
            Err(e) => {
                tracing::debug!(%category, %endpoint, error = %e, "supplementary lookup failed");
            }
        }
    }

    render(category, &record.snapshot)
}

/// Render the category template from the cached snapshot. Missing fields
/// become "N/A" rather than aborting the reply.
pub fn render(category: QuestionCategory, snapshot: &ChartSnapshot) -> String {
    let maha = snapshot.maha_lord().unwrap_or(NA);
    match category {
        QuestionCategory::Career => {
            let sun = snapshot.planet("Sun");
            format!(
                "📊 CAREER\n\nSun: {} in House {}\nCurrent Dasa: {}\nGood for professional growth.",
                sign(sun),
                house(sun),
                maha,
            )
        }
        QuestionCategory::Marriage => {
            let venus = snapshot.planet("Venus");
            format!(
                "💑 MARRIAGE\n\nVenus: {} in House {}\nCurrent Dasa: {}\nMarriage timing depends on transits.",
                sign(venus),
                house(venus),
                maha,
            )
        }
        QuestionCategory::Health => {
            let moon = snapshot.planet("Moon");
            format!(
                "🏥 HEALTH\n\nMoon: {}\nCheck 6th/8th houses for concerns.",
                sign(moon),
            )
        }
        QuestionCategory::Timing | QuestionCategory::General => {
            let moon = snapshot.planet("Moon");
            format!(
                "✨ GENERAL\n\nNakshatra: {}\nMoon: {}\nCurrent Dasa: {}",
                nakshatra(moon),
                sign(moon),
                maha,
            )
        }
    }
}

fn sign(planet: Option<&PlanetPosition>) -> &str {
    planet
        .and_then(|p| p.zodiac_sign_name.as_deref())
        .unwrap_or(NA)
}

fn nakshatra(planet: Option<&PlanetPosition>) -> &str {
    planet
        .and_then(|p| p.nakshatra_name.as_deref())
        .unwrap_or(NA)
}

fn house(planet: Option<&PlanetPosition>) -> String {
    planet
        .and_then(|p| p.house_number)
        .map(|h| h.to_string())
        .unwrap_or_else(|| NA.to_string())
}
