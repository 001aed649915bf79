//! Search window parameters and their preconditions.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::dst::{resolve_local, DstPolicy};
use crate::error::{Result, SlotError};

pub const DEFAULT_BUSINESS_HOURS_START: u32 = 9;
pub const DEFAULT_BUSINESS_HOURS_END: u32 = 18;
pub const DEFAULT_STEP_MINUTES: i64 = 30;

/// Upper bound on `end_date - start_date`, in days.
pub const MAX_SEARCH_DAYS: i64 = 366;

/// Query parameters for an availability search.
///
/// Dates are calendar days in `timezone`; `end_date` is exclusive. Business
/// hours are whole wall-clock hours, with `24` meaning the following midnight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_minutes: i64,
    #[serde(default = "default_hours_start")]
    pub business_hours_start: u32,
    #[serde(default = "default_hours_end")]
    pub business_hours_end: u32,
    #[serde(default = "default_step")]
    pub step_minutes: i64,
    #[serde(default = "default_timezone")]
    pub timezone: Tz,
}

fn default_hours_start() -> u32 {
    DEFAULT_BUSINESS_HOURS_START
}

fn default_hours_end() -> u32 {
    DEFAULT_BUSINESS_HOURS_END
}

fn default_step() -> i64 {
    DEFAULT_STEP_MINUTES
}

fn default_timezone() -> Tz {
    Tz::UTC
}

impl SearchWindow {
    /// A window over `[start_date, end_date)` with default business hours
    /// (09–18), a 30 minute step, and UTC.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate, duration_minutes: i64) -> Self {
        Self {
            start_date,
            end_date,
            duration_minutes,
            business_hours_start: DEFAULT_BUSINESS_HOURS_START,
            business_hours_end: DEFAULT_BUSINESS_HOURS_END,
            step_minutes: DEFAULT_STEP_MINUTES,
            timezone: Tz::UTC,
        }
    }

    pub fn with_business_hours(mut self, start: u32, end: u32) -> Self {
        self.business_hours_start = start;
        self.business_hours_end = end;
        self
    }

    pub fn with_step(mut self, step_minutes: i64) -> Self {
        self.step_minutes = step_minutes;
        self
    }

    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    /// Check every window precondition.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidWindow` naming the first violated precondition.
    pub fn validate(&self) -> Result<()> {
        if self.duration_minutes <= 0 {
            return Err(SlotError::InvalidWindow(format!(
                "duration_minutes must be positive, got {}",
                self.duration_minutes
            )));
        }
        if self.step_minutes <= 0 {
            return Err(SlotError::InvalidWindow(format!(
                "step_minutes must be positive, got {}",
                self.step_minutes
            )));
        }
        if self.end_date <= self.start_date {
            return Err(SlotError::InvalidWindow(format!(
                "end_date {} must be after start_date {}",
                self.end_date, self.start_date
            )));
        }
        let start = self.business_hours_start;
        let end = self.business_hours_end;
        if start == 0 || start >= end || end > 24 {
            return Err(SlotError::InvalidWindow(format!(
                "business hours must satisfy 0 < start < end <= 24, got {}..{}",
                start, end
            )));
        }
        let days = self.day_count();
        if days > MAX_SEARCH_DAYS {
            return Err(SlotError::InvalidWindow(format!(
                "window spans {} days, more than the {} day limit",
                days, MAX_SEARCH_DAYS
            )));
        }
        Ok(())
    }

    /// Number of calendar days searched.
    pub fn day_count(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    /// Calendar days in `[start_date, end_date)`.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start_date
            .iter_days()
            .take_while(move |d| *d < self.end_date)
    }

    /// Business-hours bounds of `day` as UTC instants.
    ///
    /// Returns `None` when a boundary cannot be resolved in the window's
    /// timezone, or when a DST shift collapses the range.
    pub fn business_hours(&self, day: NaiveDate) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let midnight = day.and_time(NaiveTime::MIN);
        let hours = |h: u32| midnight.checked_add_signed(Duration::hours(i64::from(h)));
        let open = hours(self.business_hours_start)?;
        let close = hours(self.business_hours_end)?;

        let day_start = resolve_local(open, self.timezone, DstPolicy::ShiftForward)?;
        let day_end = resolve_local(close, self.timezone, DstPolicy::ShiftForward)?;
        (day_start < day_end).then_some((day_start, day_end))
    }
}
