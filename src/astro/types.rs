//! Wire types for the chart-computation service.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed computation settings sent with every birth payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSettings {
    pub observation_point: String,
    pub ayanamsha: String,
    pub language: String,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            observation_point: "topocentric".to_string(),
            ayanamsha: "lahiri".to_string(),
            language: "en".to_string(),
        }
    }
}

/// Canonical computation payload derived from the user's birth details.
///
/// Field names match the remote wire format (`date` is the day of month).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthPayload {
    pub year: i32,
    pub month: u32,
    pub date: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: f64,
    pub settings: ChartSettings,
}

impl BirthPayload {
    /// JSON body for the computation service.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Position of one celestial body in the extended-planets document.
///
/// Every field is optional: the synthesizer substitutes a placeholder for
/// anything the remote left out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanetPosition {
    #[serde(default)]
    pub zodiac_sign_name: Option<String>,
    #[serde(default)]
    pub house_number: Option<i64>,
    #[serde(default)]
    pub nakshatra_name: Option<String>,
    #[serde(default)]
    pub nakshatra_pada: Option<i64>,
}

/// The extended-planets document: body name → position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanetTable {
    #[serde(default)]
    pub output: HashMap<String, PlanetPosition>,
}

/// One period entry from the dasa document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DasaPeriod {
    #[serde(rename = "Lord", default)]
    pub lord: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

/// Major/sub period document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DasaInfo {
    #[serde(default)]
    pub maha_dasa: DasaPeriod,
    #[serde(default)]
    pub antar_dasa: DasaPeriod,
}

/// Outcome of a single remote fetch, kept alongside cached data so that
/// consumers branch on partial results explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Fetched<T> {
    Ok { data: T },
    Failed { reason: String },
}

impl<T> Fetched<T> {
    /// The fetched data, if the lookup succeeded.
    pub fn ok(&self) -> Option<&T> {
        match self {
            Self::Ok { data } => Some(data),
            Self::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Structured chart data fetched at registration time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub planets: Fetched<PlanetTable>,
    pub dasa: Fetched<DasaInfo>,
    pub fetched_at: DateTime<Utc>,
}

impl ChartSnapshot {
    /// Position of a body by name, if the planets lookup succeeded and the
    /// document carries it.
    pub fn planet(&self, name: &str) -> Option<&PlanetPosition> {
        self.planets.ok().and_then(|table| table.output.get(name))
    }

    /// Ruler of the current major period.
    pub fn maha_lord(&self) -> Option<&str> {
        self.dasa.ok().and_then(|d| d.maha_dasa.lord.as_deref())
    }

    /// End time of the current major period.
    pub fn maha_end(&self) -> Option<&str> {
        self.dasa.ok().and_then(|d| d.maha_dasa.end_time.as_deref())
    }

    /// Ruler of the current sub period.
    pub fn antar_lord(&self) -> Option<&str> {
        self.dasa.ok().and_then(|d| d.antar_dasa.lord.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payload() -> BirthPayload {
        BirthPayload {
            year: 1990,
            month: 8,
            date: 15,
            hours: 14,
            minutes: 30,
            seconds: 0,
            latitude: 28.6139,
            longitude: 77.2090,
            timezone: 5.5,
            settings: ChartSettings::default(),
        }
    }

    #[test]
    fn payload_wire_shape() {
        let json = sample_payload().to_json();
        assert_eq!(json["year"], 1990);
        assert_eq!(json["date"], 15);
        assert_eq!(json["hours"], 14);
        assert_eq!(json["timezone"], 5.5);
        assert_eq!(json["settings"]["observation_point"], "topocentric");
        assert_eq!(json["settings"]["ayanamsha"], "lahiri");
        assert_eq!(json["settings"]["language"], "en");
    }

    #[test]
    fn planet_table_tolerates_missing_fields() {
        let doc = serde_json::json!({
            "output": {
                "Moon": { "zodiac_sign_name": "Taurus" },
                "Sun": {}
            }
        });
        let table: PlanetTable = serde_json::from_value(doc).unwrap();
        let moon = &table.output["Moon"];
        assert_eq!(moon.zodiac_sign_name.as_deref(), Some("Taurus"));
        assert_eq!(moon.house_number, None);
        assert!(table.output["Sun"].zodiac_sign_name.is_none());
    }

    #[test]
    fn dasa_wire_names() {
        let doc = serde_json::json!({
            "maha_dasa": { "Lord": "Jupiter", "end_time": "2031-04-12 08:00:00" },
            "antar_dasa": { "Lord": "Saturn" }
        });
        let dasa: DasaInfo = serde_json::from_value(doc).unwrap();
        assert_eq!(dasa.maha_dasa.lord.as_deref(), Some("Jupiter"));
        assert_eq!(dasa.antar_dasa.lord.as_deref(), Some("Saturn"));
        assert_eq!(dasa.antar_dasa.end_time, None);
    }

    #[test]
    fn snapshot_accessors_on_failed_fetch() {
        let snapshot = ChartSnapshot {
            planets: Fetched::Failed {
                reason: "timeout".into(),
            },
            dasa: Fetched::Failed {
                reason: "timeout".into(),
            },
            fetched_at: Utc::now(),
        };
        assert!(snapshot.planet("Moon").is_none());
        assert!(snapshot.maha_lord().is_none());
        assert!(snapshot.planets.is_failed());
    }

    #[test]
    fn fetched_serde_is_tagged() {
        let ok: Fetched<DasaInfo> = Fetched::Ok {
            data: DasaInfo::default(),
        };
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["status"], "ok");

        let failed: Fetched<DasaInfo> = Fetched::Failed {
            reason: "boom".into(),
        };
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["reason"], "boom");
    }
}
