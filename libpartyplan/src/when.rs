//! Date parsing for event and reminder dates typed on the command line
//!
//! Accepts:
//! - RFC 3339 timestamps: "2030-06-01T18:00:00Z", "2030-06-01T18:00:00+02:00"
//! - Calendar dates in UTC: "2030-06-01 18:00", "2030-06-01"
//! - Offsets from now: "3d", "2h 30m", "+1week", "in 5 days"

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

use crate::{PartyPlanError, Result};

pub fn parse_when(input: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return Err(PartyPlanError::InvalidInput(
            "Date cannot be empty".to_string(),
        ));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }

    let offset = input
        .strip_prefix("in ")
        .or_else(|| input.strip_prefix('+'))
        .unwrap_or(input)
        .trim();

    let duration = humantime::parse_duration(offset).map_err(|_| {
        PartyPlanError::InvalidInput(format!(
            "Could not parse date '{}'. Use RFC 3339, YYYY-MM-DD [HH:MM], or an offset like 3d",
            input
        ))
    })?;

    let offset = Duration::from_std(duration)
        .map_err(|_| PartyPlanError::InvalidInput("Date offset out of range".to_string()))?;

    now.checked_add_signed(offset)
        .ok_or_else(|| PartyPlanError::InvalidInput("Date offset out of range".to_string()))
}
