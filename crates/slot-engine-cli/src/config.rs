//! Optional TOML defaults for the `slots` CLI.
//!
//! ```toml
//! [search]
//! business_hours_start = 9
//! business_hours_end = 18
//! step_minutes = 30
//! duration_minutes = 60
//! timezone = "Asia/Tokyo"
//!
//! [interview]
//! timezone = "Asia/Tokyo"
//! default_duration_minutes = 60
//! ```
//!
//! Command-line flags override file values; file values override the built-in defaults.

use std::path::Path;

use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub search: SearchDefaults,
    pub interview: InterviewDefaults,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchDefaults {
    pub business_hours_start: u32,
    pub business_hours_end: u32,
    pub step_minutes: i64,
    pub duration_minutes: i64,
    pub timezone: Tz,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            business_hours_start: slot_engine::window::DEFAULT_BUSINESS_HOURS_START,
            business_hours_end: slot_engine::window::DEFAULT_BUSINESS_HOURS_END,
            step_minutes: slot_engine::window::DEFAULT_STEP_MINUTES,
            duration_minutes: slot_engine::interview::DEFAULT_INTERVIEW_MINUTES,
            timezone: Tz::UTC,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InterviewDefaults {
    pub timezone: Tz,
    pub default_duration_minutes: i64,
}

impl Default for InterviewDefaults {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::Asia::Tokyo,
            default_duration_minutes: slot_engine::interview::DEFAULT_INTERVIEW_MINUTES,
        }
    }
}

impl CliConfig {
    /// Load from `path`, or return built-in defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&raw).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = CliConfig::from_toml("").unwrap();
        assert_eq!(cfg.search.business_hours_start, 9);
        assert_eq!(cfg.search.business_hours_end, 18);
        assert_eq!(cfg.search.step_minutes, 30);
        assert_eq!(cfg.search.timezone, Tz::UTC);
        assert_eq!(cfg.interview.timezone, chrono_tz::Asia::Tokyo);
    }

    #[test]
    fn partial_tables_keep_remaining_defaults() {
        let cfg = CliConfig::from_toml(
            "[search]\nbusiness_hours_start = 10\ntimezone = \"Europe/Berlin\"\n",
        )
        .unwrap();
        assert_eq!(cfg.search.business_hours_start, 10);
        assert_eq!(cfg.search.business_hours_end, 18);
        assert_eq!(cfg.search.timezone, chrono_tz::Europe::Berlin);
        assert_eq!(cfg.interview.default_duration_minutes, 60);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(CliConfig::from_toml("[search]\nbusiness_hours = 9\n").is_err());
    }
}
