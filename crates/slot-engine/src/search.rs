//! Availability search: fixed-duration free slots inside business hours.
//!
//! For each day in the window, candidate starts are generated from the opening
//! hour in `step_minutes` increments. A candidate is kept when it fits before
//! closing time and overlaps no busy interval. Busy intervals are never merged;
//! a candidate is rejected if it overlaps any of them, so overlapping calendar
//! entries need no special handling.
//!
//! The search is a pure function of its inputs. Output order is day-major,
//! then chronological within the day.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, trace};

use crate::error::Result;
use crate::interval::{overlaps, BusyInterval, Slot};
use crate::window::SearchWindow;

/// Find every available slot of `window.duration_minutes` within business hours.
///
/// # Errors
/// Returns `SlotError::InvalidWindow` if any window precondition is violated.
/// No slots are produced in that case.
pub fn find_slots(busy: &[BusyInterval], window: &SearchWindow) -> Result<Vec<Slot>> {
    window.validate()?;

    // A duration too large to represent cannot fit in any business day.
    let Some(duration) = Duration::try_minutes(window.duration_minutes) else {
        debug!(duration = window.duration_minutes, "duration exceeds every day, no slots");
        return Ok(Vec::new());
    };
    // An unrepresentable step leaves only the first candidate of each day.
    let step = Duration::try_minutes(window.step_minutes);
    let mut slots = Vec::new();

    for day in window.days() {
        let Some((day_start, day_end)) = window.business_hours(day) else {
            debug!(%day, tz = %window.timezone, "business hours unresolvable, skipping day");
            continue;
        };

        // Only intervals touching this day's business hours can reject a candidate.
        let relevant: Vec<&BusyInterval> = busy
            .iter()
            .filter(|b| overlaps(day_start, day_end, b))
            .collect();

        let before = slots.len();
        let mut candidate = Some(day_start);
        while let Some(start) = candidate {
            let Some(end) = start
                .checked_add_signed(duration)
                .filter(|end| *end <= day_end)
            else {
                break;
            };
            if is_available(start, end, &relevant) {
                slots.push(Slot {
                    start,
                    end,
                    duration_minutes: window.duration_minutes,
                });
            } else {
                trace!(%start, "candidate overlaps a busy interval");
            }
            candidate = step.and_then(|step| start.checked_add_signed(step));
        }

        debug!(
            %day,
            busy = relevant.len(),
            found = slots.len() - before,
            "searched day"
        );
    }

    Ok(slots)
}

/// Find the earliest available slot, if any.
///
/// # Errors
/// Same as [`find_slots`].
pub fn find_first_slot(busy: &[BusyInterval], window: &SearchWindow) -> Result<Option<Slot>> {
    Ok(find_slots(busy, window)?.into_iter().next())
}

fn is_available(start: DateTime<Utc>, end: DateTime<Utc>, busy: &[&BusyInterval]) -> bool {
    !busy.iter().any(|b| overlaps(start, end, b))
}
