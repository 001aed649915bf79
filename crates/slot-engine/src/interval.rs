//! Busy intervals, slots, and the half-open overlap test shared by every search.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// A time range already occupied on a calendar, `[start, end)`.
///
/// Supplied by the calendar collaborator. Intervals are not validated and may
/// overlap each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BusyInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }
}

/// A free period of fixed duration, `[start, start + duration_minutes)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
}

impl Slot {
    /// A slot of `duration_minutes` starting at `start`.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidInterview` if the duration is not positive or
    /// the end falls outside the representable range.
    pub fn new(start: DateTime<Utc>, duration_minutes: i64) -> Result<Self> {
        if duration_minutes <= 0 {
            return Err(SlotError::InvalidInterview(format!(
                "duration_minutes must be positive, got {}",
                duration_minutes
            )));
        }
        let end = Duration::try_minutes(duration_minutes)
            .and_then(|d| start.checked_add_signed(d))
            .ok_or_else(|| {
                SlotError::InvalidInterview(format!(
                    "duration_minutes {} is out of range",
                    duration_minutes
                ))
            })?;
        Ok(Self {
            start,
            end,
            duration_minutes,
        })
    }

    /// Whether this slot shares any instant with `busy`.
    ///
    /// Two ranges overlap iff `slot.start < busy.end && slot.end > busy.start`.
    /// Ranges that only touch at an endpoint do not overlap.
    pub fn overlaps(&self, busy: &BusyInterval) -> bool {
        overlaps(self.start, self.end, busy)
    }
}

#[inline]
pub(crate) fn overlaps(start: DateTime<Utc>, end: DateTime<Utc>, busy: &BusyInterval) -> bool {
    start < busy.end && end > busy.start
}
