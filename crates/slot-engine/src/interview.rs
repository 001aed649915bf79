//! Calendar event bodies for booking and rescheduling interviews.
//!
//! The bodies serialize to the Google Calendar `events` resource shape. Sending
//! them (and the `sendUpdates` flag) is the calendar client's job.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::interval::Slot;

pub const DEFAULT_INTERVIEW_MINUTES: i64 = 60;

/// Email reminder one day ahead.
pub const EMAIL_REMINDER_MINUTES: i64 = 24 * 60;
pub const POPUP_REMINDER_MINUTES: i64 = 30;

/// The applicant being invited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applicant {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    pub date_time: String,
    pub time_zone: String,
}

impl EventDateTime {
    fn new(at: DateTime<Utc>, tz: Tz) -> Self {
        Self {
            date_time: at.with_timezone(&tz).to_rfc3339(),
            time_zone: tz.name().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderOverride {
    pub method: String,
    pub minutes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminders {
    pub use_default: bool,
    pub overrides: Vec<ReminderOverride>,
}

impl Default for Reminders {
    fn default() -> Self {
        Self {
            use_default: false,
            overrides: vec![
                ReminderOverride {
                    method: "email".to_string(),
                    minutes: EMAIL_REMINDER_MINUTES,
                },
                ReminderOverride {
                    method: "popup".to_string(),
                    minutes: POPUP_REMINDER_MINUTES,
                },
            ],
        }
    }
}

/// Body of a new interview event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewEvent {
    pub summary: String,
    pub description: String,
    pub start: EventDateTime,
    pub end: EventDateTime,
    pub attendees: Vec<Attendee>,
    pub reminders: Reminders,
}

impl InterviewEvent {
    /// Build the event for `applicant` occupying `slot`, rendered in `tz`.
    ///
    /// When `description` is `None` or blank, it lists the applicant's name and email.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidInterview` for a blank name or email, or a
    /// non-positive slot duration.
    pub fn new(applicant: &Applicant, slot: &Slot, tz: Tz, description: Option<&str>) -> Result<Self> {
        if applicant.name.trim().is_empty() {
            return Err(SlotError::InvalidInterview("applicant name is empty".to_string()));
        }
        if applicant.email.trim().is_empty() {
            return Err(SlotError::InvalidInterview("applicant email is empty".to_string()));
        }
        if slot.duration_minutes <= 0 {
            return Err(SlotError::InvalidInterview(format!(
                "duration_minutes must be positive, got {}",
                slot.duration_minutes
            )));
        }

        let description = match description.map(str::trim) {
            Some(d) if !d.is_empty() => d.to_string(),
            _ => format!("応募者: {}\nメール: {}", applicant.name, applicant.email),
        };

        Ok(Self {
            summary: format!("面接: {}", applicant.name),
            description,
            start: EventDateTime::new(slot.start, tz),
            end: EventDateTime::new(slot.end, tz),
            attendees: vec![Attendee {
                email: applicant.email.clone(),
            }],
            reminders: Reminders::default(),
        })
    }
}

/// Partial body for rescheduling or re-describing an existing event.
///
/// Absent fields leave the stored event untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InterviewUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<EventDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<EventDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl InterviewUpdate {
    /// Build an update. A new `start` without `duration_minutes` keeps the
    /// default interview length; the duration is ignored when `start` is `None`.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidInterview` when a new start comes with a
    /// non-positive or out-of-range duration.
    pub fn reschedule(
        start: Option<DateTime<Utc>>,
        duration_minutes: Option<i64>,
        description: Option<&str>,
        tz: Tz,
    ) -> Result<Self> {
        let mut update = Self {
            description: description
                .filter(|d| !d.trim().is_empty())
                .map(str::to_string),
            ..Self::default()
        };
        if let Some(start) = start {
            let slot = Slot::new(start, duration_minutes.unwrap_or(DEFAULT_INTERVIEW_MINUTES))?;
            update.start = Some(EventDateTime::new(slot.start, tz));
            update.end = Some(EventDateTime::new(slot.end, tz));
        }
        Ok(update)
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.description.is_none()
    }
}
