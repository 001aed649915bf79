//! # slot-engine
//!
//! Deterministic interview slot search for recruiting calendars.
//!
//! Given the busy intervals reported by a calendar provider and a search
//! window, the engine lists every fixed-duration slot inside business hours
//! that overlaps none of them. The search is a pure function: identical inputs
//! always produce identical, identically ordered output.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use slot_engine::{find_slots, SearchWindow};
//!
//! let window = SearchWindow::new(
//!     NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
//!     NaiveDate::from_ymd_opt(2026, 3, 3).unwrap(),
//!     60,
//! );
//! let slots = find_slots(&[], &window).unwrap();
//! assert_eq!(slots.len(), 17);
//! ```
//!
//! ## Modules
//!
//! - [`search`] — availability search over a window of days
//! - [`window`] — search window parameters and validation
//! - [`interval`] — busy intervals, slots, the overlap test
//! - [`dst`] — wall-clock to instant resolution across DST transitions
//! - [`conflict`] — check a proposed interview time against busy intervals
//! - [`calendar`] — calendar provider payloads → busy intervals
//! - [`interview`] — calendar event bodies for booking and rescheduling
//! - [`extract`] — model output → interview questions and applicant evaluations
//! - [`error`] — Error types

pub mod calendar;
pub mod conflict;
pub mod dst;
pub mod error;
pub mod extract;
pub mod interval;
pub mod interview;
pub mod search;
pub mod window;

pub use calendar::{busy_from_google_events, busy_from_json, parse_instant};
pub use conflict::{find_conflicts, is_free, Conflict};
pub use error::{ParseError, SlotError};
pub use extract::{
    extract_json_block, parse_evaluation, parse_questions, CategoryScore, EvaluationResult,
    InterviewQuestion,
};
pub use interval::{BusyInterval, Slot};
pub use interview::{Applicant, InterviewEvent, InterviewUpdate};
pub use search::{find_first_slot, find_slots};
pub use window::{SearchWindow, MAX_SEARCH_DAYS};
