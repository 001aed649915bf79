//! Normalise calendar provider payloads into busy intervals.
//!
//! Two input shapes are accepted:
//!
//! - a plain JSON array of `{start, end}` timestamp pairs, and
//! - a Google Calendar `events.list` response (or its bare `items` array), where
//!   each event carries `start`/`end` objects with either `dateTime` or an
//!   all-day `date`.
//!
//! Timestamps without an offset are read as wall-clock time in the caller's
//! timezone (or the event's own `timeZone`, when present).

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::dst::{resolve_local, DstPolicy};
use crate::error::{Result, SlotError};
use crate::interval::BusyInterval;

#[derive(Deserialize)]
struct RawInterval {
    start: String,
    end: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleEvent {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    transparency: Option<String>,
    start: EventTime,
    end: EventTime,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventTime {
    #[serde(default)]
    date_time: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    time_zone: Option<String>,
}

/// Parse a timestamp into a UTC instant.
///
/// Accepts RFC 3339 (`2026-03-02T09:00:00+09:00`) and naive local time
/// (`2026-03-02T09:00:00`, seconds optional), which is interpreted in `tz`.
///
/// # Errors
/// Returns `SlotError::CalendarPayload` if the string matches neither form.
pub fn parse_instant(s: &str, tz: Tz) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .map_err(|e| SlotError::CalendarPayload(format!("invalid datetime '{}': {}", s, e)))?;
    resolve_local(naive, tz, DstPolicy::ShiftForward)
        .ok_or_else(|| SlotError::CalendarPayload(format!("unresolvable local time '{}' in {}", s, tz)))
}

/// Parse a JSON array of `{start, end}` pairs into busy intervals.
///
/// # Errors
/// Returns `SlotError::CalendarPayload` on malformed JSON or timestamps.
pub fn busy_from_json(json: &str, tz: Tz) -> Result<Vec<BusyInterval>> {
    let raw: Vec<RawInterval> = serde_json::from_str(json)
        .map_err(|e| SlotError::CalendarPayload(format!("invalid busy JSON: {}", e)))?;

    raw.into_iter()
        .map(|r| -> Result<BusyInterval> {
            Ok(BusyInterval::new(parse_instant(&r.start, tz)?, parse_instant(&r.end, tz)?))
        })
        .collect()
}

/// Parse a Google Calendar `events.list` payload into busy intervals.
///
/// Cancelled events and events marked `transparent` (shown as free) are
/// skipped. All-day events block from midnight of `start.date` to midnight of
/// `end.date` (exclusive, as Google reports it) in `tz`.
///
/// # Errors
/// Returns `SlotError::CalendarPayload` if the payload or any event time is malformed.
pub fn busy_from_google_events(json: &str, tz: Tz) -> Result<Vec<BusyInterval>> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| SlotError::CalendarPayload(format!("invalid events JSON: {}", e)))?;

    let items = match value {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut map) => map.remove("items").unwrap_or(Value::Array(Vec::new())),
        other => {
            return Err(SlotError::CalendarPayload(format!(
                "expected an events object or array, got {}",
                other
            )))
        }
    };
    let events: Vec<GoogleEvent> = serde_json::from_value(items)
        .map_err(|e| SlotError::CalendarPayload(format!("invalid event: {}", e)))?;

    let mut busy = Vec::with_capacity(events.len());
    for event in events {
        if event.status.as_deref() == Some("cancelled")
            || event.transparency.as_deref() == Some("transparent")
        {
            debug!("skipping event that does not block time");
            continue;
        }
        let start = event_instant(&event.start, tz)?;
        let end = event_instant(&event.end, tz)?;
        busy.push(BusyInterval::new(start, end));
    }
    Ok(busy)
}

fn event_instant(time: &EventTime, default_tz: Tz) -> Result<DateTime<Utc>> {
    let tz = match time.time_zone.as_deref() {
        Some(name) => name
            .parse::<Tz>()
            .map_err(|_| SlotError::InvalidTimezone(name.to_string()))?,
        None => default_tz,
    };

    if let Some(dt) = time.date_time.as_deref() {
        return parse_instant(dt, tz);
    }
    if let Some(date) = time.date.as_deref() {
        let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|e| SlotError::CalendarPayload(format!("invalid date '{}': {}", date, e)))?;
        return resolve_local(day.and_time(NaiveTime::MIN), tz, DstPolicy::ShiftForward)
            .ok_or_else(|| SlotError::CalendarPayload(format!("unresolvable midnight on {} in {}", date, tz)));
    }
    Err(SlotError::CalendarPayload(
        "event time has neither dateTime nor date".to_string(),
    ))
}
