//! Birth-data normalization — free-text date/time/place into the canonical
//! computation payload.

use crate::astro::geocode::{GeocodeOutcome, PlaceResolver};
use crate::astro::types::{BirthPayload, ChartSettings};
use crate::error::ValidationError;

/// Fixed timezone offset applied to every payload (IST).
pub const TIMEZONE_OFFSET: f64 = 5.5;

/// Parse a `DD-MM-YYYY` date string into (day, month, year).
pub fn parse_date(input: &str) -> Result<(u32, u32, i32), ValidationError> {
    let bad = || ValidationError::BadDate {
        input: input.to_string(),
    };

    let mut parts = input.trim().split('-');
    let day: u32 = parts
        .next()
        .and_then(|p| p.trim().parse().ok())
        .ok_or_else(bad)?;
    let month: u32 = parts
        .next()
        .and_then(|p| p.trim().parse().ok())
        .ok_or_else(bad)?;
    let year: i32 = parts
        .next()
        .and_then(|p| p.trim().parse().ok())
        .ok_or_else(bad)?;
    if parts.next().is_some() {
        return Err(bad());
    }
    if !(1..=31).contains(&day) || !(1..=12).contains(&month) {
        return Err(bad());
    }
    Ok((day, month, year))
}

/// Parse a time string into (hour, minute), 24-hour.
///
/// An AM/PM marker selects 12-hour interpretation; otherwise the text is
/// split on `:` with an absent minute field meaning zero.
pub fn parse_time(input: &str) -> Result<(u32, u32), ValidationError> {
    let bad = || ValidationError::BadTime {
        input: input.to_string(),
    };

    let trimmed = input.trim();
    let upper = trimmed.to_uppercase();

    if upper.contains("AM") || upper.contains("PM") {
        let is_pm = upper.contains("PM");
        let digits = upper.replace("AM", "").replace("PM", "").replace(' ', "");
        let (hour, minute) = split_clock(&digits).ok_or_else(bad)?;
        if !(1..=12).contains(&hour) || minute > 59 {
            return Err(bad());
        }
        let hour = match (hour, is_pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, false) => h,
            (h, true) => h + 12,
        };
        Ok((hour, minute))
    } else {
        let (hour, minute) = split_clock(trimmed).ok_or_else(bad)?;
        if hour > 23 || minute > 59 {
            return Err(bad());
        }
        Ok((hour, minute))
    }
}

fn split_clock(text: &str) -> Option<(u32, u32)> {
    let mut parts = text.splitn(2, ':');
    let hour = parts.next()?.trim().parse().ok()?;
    let minute = match parts.next() {
        Some(p) => p.trim().parse().ok()?,
        None => 0,
    };
    Some((hour, minute))
}

/// Assemble the canonical payload from the collected birth details.
///
/// Place resolution goes through the resolver, which degrades to the fixed
/// default coordinate on its own; the returned outcome records which case
/// occurred.
pub async fn build_payload(
    dob: &str,
    time: &str,
    place: &str,
    resolver: &dyn PlaceResolver,
) -> Result<(BirthPayload, GeocodeOutcome), ValidationError> {
    let (day, month, year) = parse_date(dob)?;
    let (hours, minutes) = parse_time(time)?;
    let outcome = resolver.resolve(place).await;
    let (latitude, longitude) = outcome.coordinate();

    let payload = BirthPayload {
        year,
        month,
        date: day,
        hours,
        minutes,
        seconds: 0,
        latitude,
        longitude,
        timezone: TIMEZONE_OFFSET,
        settings: ChartSettings::default(),
    };
    Ok((payload, outcome))
}
