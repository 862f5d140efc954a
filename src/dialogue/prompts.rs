//! Fixed prompt and reply text for the dialogue.

use crate::astro::types::ChartSnapshot;
use crate::dialogue::state::DialogueStep;

pub const NAME_PROMPT: &str = "Hi! What's your name?";
pub const DOB_PROMPT: &str = "DOB (DD-MM-YYYY)?";
pub const TIME_PROMPT: &str = "Time of birth (HH:MM)?";
pub const PLACE_PROMPT: &str = "Place of birth (City, Country)?";
pub const FETCHING: &str = "⏳ Fetching data...";
pub const REGISTER_FIRST: &str = "/start to register";

pub const DOB_REPROMPT: &str = "That date didn't parse. DOB (DD-MM-YYYY)?";
pub const TIME_REPROMPT: &str = "That time didn't parse. Time of birth (HH:MM or HH:MM AM/PM)?";

/// Short confirmation used when the planets document is a failure marker.
pub const SUMMARY_FALLBACK: &str = "✅ Data registered! Ask questions now.";

/// Prompt emitted on entering a collection step.
pub fn prompt_for(step: DialogueStep) -> Option<&'static str> {
    match step {
        DialogueStep::CollectingName => Some(NAME_PROMPT),
        DialogueStep::CollectingDob => Some(DOB_PROMPT),
        DialogueStep::CollectingTime => Some(TIME_PROMPT),
        DialogueStep::CollectingPlace => Some(PLACE_PROMPT),
        DialogueStep::Idle | DialogueStep::Complete => None,
    }
}

/// Registration summary rendered from the freshly fetched snapshot.
///
/// Falls back to the short confirmation when the planets lookup failed;
/// individual missing fields degrade to "N/A".
pub fn registration_summary(snapshot: &ChartSnapshot) -> String {
    let Some(planets) = snapshot.planets.ok() else {
        return SUMMARY_FALLBACK.to_string();
    };

    let moon = planets.output.get("Moon");
    let ascendant = planets.output.get("Ascendant");

    let nakshatra = moon
        .and_then(|m| m.nakshatra_name.as_deref())
        .unwrap_or("N/A");
    let pada = moon
        .and_then(|m| m.nakshatra_pada)
        .map(|p| p.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let ascendant_sign = ascendant
        .and_then(|a| a.zodiac_sign_name.as_deref())
        .unwrap_or("N/A");
    let moon_sign = moon
        .and_then(|m| m.zodiac_sign_name.as_deref())
        .unwrap_or("N/A");
    let maha = snapshot.maha_lord().unwrap_or("N/A");
    // Period end times come back as "YYYY-MM-DD HH:MM:SS"; show the date.
    let maha_end: String = snapshot
        .maha_end()
        .map(|end| end.chars().take(10).collect())
        .unwrap_or_else(|| "N/A".to_string());
    let antar = snapshot.antar_lord().unwrap_or("N/A");

    format!(
        "✅ Birth chart registered!\n\n\
         🌟 Nakshatra: {nakshatra} (Pada {pada})\n\
         🔮 Ascendant: {ascendant_sign}\n\
         🌙 Moon Sign: {moon_sign}\n\n\
         ⏳ Current Dasa:\n  Maha: {maha} (till {maha_end})\n  Antar: {antar}\n\n\
         💬 Ask: career, marriage, health, timing"
    )
}
