//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    /// A `SearchWindow` precondition was violated. Raised before any slot is generated.
    #[error("Invalid search window: {0}")]
    InvalidWindow(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// The calendar provider payload could not be turned into busy intervals.
    #[error("Invalid calendar payload: {0}")]
    CalendarPayload(String),

    #[error("Invalid interview request: {0}")]
    InvalidInterview(String),
}

/// Errors from the model-output adapter.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Nothing resembling JSON was left after fence extraction.
    #[error("no JSON content in model output")]
    NoJson,

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Valid JSON, but not the expected structure.
    #[error("unexpected response shape: {0}")]
    Shape(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;
