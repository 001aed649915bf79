//! WASM bindings for slot-engine.
//!
//! Exposes the availability search, conflict checks, and calendar payload
//! normalisation to the JavaScript front-end via `wasm-bindgen`. All complex
//! types cross the boundary as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir frontend/src/lib/slot-engine/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use slot_engine::{BusyInterval, SearchWindow, Slot};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

/// Timestamps are rendered with the offset of the requested timezone so the
/// front-end can display them without conversion.
#[derive(Serialize)]
struct SlotDto {
    start: String,
    end: String,
    duration_minutes: i64,
}

impl SlotDto {
    fn new(slot: &Slot, tz: Tz) -> Self {
        Self {
            start: local(slot.start, tz),
            end: local(slot.end, tz),
            duration_minutes: slot.duration_minutes,
        }
    }
}

#[derive(Serialize)]
struct SlotListDto {
    count: usize,
    slots: Vec<SlotDto>,
}

#[derive(Serialize)]
struct ConflictDto {
    start: String,
    end: String,
    overlap_minutes: i64,
}

#[derive(Serialize)]
struct CheckDto {
    free: bool,
    conflicts: Vec<ConflictDto>,
}

#[derive(Serialize)]
struct BusyDto {
    start: String,
    end: String,
}

/// A proposed interview: start timestamp plus length.
#[derive(Deserialize)]
struct ProposedInput {
    start: String,
    duration_minutes: i64,
    #[serde(default)]
    timezone: Option<String>,
}

fn local(at: DateTime<Utc>, tz: Tz) -> String {
    at.with_timezone(&tz).to_rfc3339()
}

fn parse_timezone(name: &str) -> Result<Tz, String> {
    name.parse::<Tz>()
        .map_err(|_| format!("Invalid timezone: {}", name))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

// ---------------------------------------------------------------------------
// JSON-in / JSON-out implementations (testable off-wasm)
// ---------------------------------------------------------------------------

fn find_slots_json(busy_json: &str, window_json: &str) -> Result<String, String> {
    let window: SearchWindow = serde_json::from_str(window_json)
        .map_err(|e| format!("Invalid window JSON: {}", e))?;
    let busy = slot_engine::busy_from_json(busy_json, window.timezone).map_err(|e| e.to_string())?;

    let slots = slot_engine::find_slots(&busy, &window).map_err(|e| e.to_string())?;

    to_json(&SlotListDto {
        count: slots.len(),
        slots: slots.iter().map(|s| SlotDto::new(s, window.timezone)).collect(),
    })
}

fn check_conflicts_json(proposed_json: &str, busy_json: &str) -> Result<String, String> {
    let proposed: ProposedInput = serde_json::from_str(proposed_json)
        .map_err(|e| format!("Invalid proposal JSON: {}", e))?;
    let tz = match proposed.timezone.as_deref() {
        Some(name) => parse_timezone(name)?,
        None => Tz::UTC,
    };
    let start = slot_engine::parse_instant(&proposed.start, tz).map_err(|e| e.to_string())?;
    let slot = Slot::new(start, proposed.duration_minutes).map_err(|e| e.to_string())?;
    let busy = slot_engine::busy_from_json(busy_json, tz).map_err(|e| e.to_string())?;

    let conflicts = slot_engine::find_conflicts(&slot, &busy);

    to_json(&CheckDto {
        free: conflicts.is_empty(),
        conflicts: conflicts
            .iter()
            .map(|c| ConflictDto {
                start: local(c.busy.start, tz),
                end: local(c.busy.end, tz),
                overlap_minutes: c.overlap_minutes,
            })
            .collect(),
    })
}

fn busy_from_google_json(events_json: &str, timezone: &str) -> Result<String, String> {
    let tz = parse_timezone(timezone)?;
    let busy: Vec<BusyInterval> =
        slot_engine::busy_from_google_events(events_json, tz).map_err(|e| e.to_string())?;

    let dtos: Vec<BusyDto> = busy
        .iter()
        .map(|b| BusyDto {
            start: local(b.start, tz),
            end: local(b.end, tz),
        })
        .collect();
    to_json(&dtos)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Find free interview slots.
///
/// `busy_json` is a JSON array of `{start, end}` objects. `window_json` is a
/// search window: `{start_date, end_date, duration_minutes}` plus optional
/// `business_hours_start`, `business_hours_end`, `step_minutes`, `timezone`.
/// Returns `{count, slots: [{start, end, duration_minutes}]}`.
#[wasm_bindgen(js_name = "findSlots")]
pub fn find_slots(busy_json: &str, window_json: &str) -> Result<String, JsValue> {
    find_slots_json(busy_json, window_json).map_err(|e| JsValue::from_str(&e))
}

/// Check a proposed interview `{start, duration_minutes, timezone?}` against
/// busy intervals. Returns `{free, conflicts: [{start, end, overlap_minutes}]}`.
#[wasm_bindgen(js_name = "findConflicts")]
pub fn find_conflicts(proposed_json: &str, busy_json: &str) -> Result<String, JsValue> {
    check_conflicts_json(proposed_json, busy_json).map_err(|e| JsValue::from_str(&e))
}

/// Convert a Google Calendar `events.list` payload into `{start, end}` busy intervals.
#[wasm_bindgen(js_name = "busyFromGoogleEvents")]
pub fn busy_from_google_events(events_json: &str, timezone: &str) -> Result<String, JsValue> {
    busy_from_google_json(events_json, timezone).map_err(|e| JsValue::from_str(&e))
}
