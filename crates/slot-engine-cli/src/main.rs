//! `slots` CLI — interview availability search and calendar helpers.
//!
//! ## Usage
//!
//! ```sh
//! # Free 60-minute slots on weekdays of a week, busy times from a file
//! slots find --start-date 2026-03-02 --end-date 2026-03-07 -i busy.json
//!
//! # Busy times straight from a Google Calendar events.list response
//! slots find --start-date 2026-03-02 --end-date 2026-03-04 --google -i events.json \
//!     --timezone Asia/Tokyo --duration 45
//!
//! # Does a proposed interview clash with anything?
//! slots check --start 2026-03-02T10:00:00+09:00 -i busy.json
//!
//! # Calendar event body for booking an applicant
//! slots event --name "Sato Hana" --email hana@example.com --start 2026-03-02T10:00:00+09:00
//!
//! # Interview questions out of raw model output (stdin)
//! slots questions --limit 5 < response.txt
//!
//! # Applicant evaluation out of raw model output
//! slots evaluate -i evaluation.txt
//! ```
//!
//! Busy-time input (`-i`) is a JSON array of `{start, end}` pairs, or a Google
//! Calendar payload with `--google`. Without `-i` the calendar is treated as empty.

mod config;

use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use serde::Serialize;
use slot_engine::{
    Applicant, BusyInterval, Conflict, InterviewEvent, InterviewUpdate, SearchWindow, Slot,
};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::CliConfig;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Interview slot search over busy calendars"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML file with search and interview defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List free slots inside business hours
    Find {
        /// First day searched (YYYY-MM-DD)
        #[arg(long)]
        start_date: NaiveDate,
        /// Day after the last day searched (YYYY-MM-DD, exclusive)
        #[arg(long)]
        end_date: NaiveDate,
        /// Slot length in minutes
        #[arg(long)]
        duration: Option<i64>,
        /// Minutes between candidate starts
        #[arg(long)]
        step: Option<i64>,
        /// Opening hour (1-23)
        #[arg(long)]
        hours_start: Option<u32>,
        /// Closing hour (2-24)
        #[arg(long)]
        hours_end: Option<u32>,
        /// IANA timezone for dates and business hours
        #[arg(long)]
        timezone: Option<String>,
        /// Busy intervals file ("-" for stdin)
        #[arg(short, long)]
        input: Option<String>,
        /// Treat the input as a Google Calendar events payload
        #[arg(long)]
        google: bool,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Report busy intervals overlapping a proposed interview
    Check {
        /// Proposed start (RFC 3339, or local time in --timezone)
        #[arg(long)]
        start: String,
        #[arg(long)]
        duration: Option<i64>,
        #[arg(long)]
        timezone: Option<String>,
        /// Busy intervals file ("-" for stdin)
        #[arg(short, long)]
        input: Option<String>,
        #[arg(long)]
        google: bool,
    },
    /// Build the calendar event body for an interview
    Event {
        /// Applicant name
        #[arg(long)]
        name: String,
        /// Applicant email, added as attendee
        #[arg(long)]
        email: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        duration: Option<i64>,
        #[arg(long)]
        description: Option<String>,
        /// Timezone the event is rendered in
        #[arg(long)]
        timezone: Option<String>,
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Build the partial update body for rescheduling an interview
    Reschedule {
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        duration: Option<i64>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        timezone: Option<String>,
    },
    /// Extract interview questions from raw model output
    Questions {
        /// Model output file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Maximum number of questions kept
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Extract an applicant evaluation from raw model output
    Evaluate {
        /// Model output file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

#[derive(Serialize)]
struct SlotList<'a> {
    count: usize,
    slots: &'a [Slot],
}

#[derive(Serialize)]
struct CheckReport<'a> {
    free: bool,
    conflicts: &'a [Conflict],
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose, cli.log_json);

    let config = CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Find {
            start_date,
            end_date,
            duration,
            step,
            hours_start,
            hours_end,
            timezone,
            input,
            google,
            output,
        } => {
            let defaults = &config.search;
            let tz = resolve_timezone(timezone.as_deref(), defaults.timezone)?;
            let window = SearchWindow::new(
                start_date,
                end_date,
                duration.unwrap_or(defaults.duration_minutes),
            )
            .with_business_hours(
                hours_start.unwrap_or(defaults.business_hours_start),
                hours_end.unwrap_or(defaults.business_hours_end),
            )
            .with_step(step.unwrap_or(defaults.step_minutes))
            .with_timezone(tz);

            let busy = read_busy(input.as_deref(), google, tz)?;
            let slots = slot_engine::find_slots(&busy, &window).context("Slot search failed")?;
            info!(
                days = window.day_count(),
                busy = busy.len(),
                found = slots.len(),
                "slot search complete"
            );

            let list = SlotList {
                count: slots.len(),
                slots: &slots,
            };
            write_output(output.as_deref(), &list)?;
        }
        Commands::Check {
            start,
            duration,
            timezone,
            input,
            google,
        } => {
            let tz = resolve_timezone(timezone.as_deref(), config.search.timezone)?;
            let proposed = Slot::new(
                parse_start(&start, tz)?,
                duration.unwrap_or(config.interview.default_duration_minutes),
            )
            .context("Invalid proposed interview")?;
            let busy = read_busy(input.as_deref(), google, tz)?;

            let conflicts = slot_engine::find_conflicts(&proposed, &busy);
            let report = CheckReport {
                free: conflicts.is_empty(),
                conflicts: &conflicts,
            };
            write_output(None, &report)?;
        }
        Commands::Event {
            name,
            email,
            start,
            duration,
            description,
            timezone,
            output,
        } => {
            let tz = resolve_timezone(timezone.as_deref(), config.interview.timezone)?;
            let slot = Slot::new(
                parse_start(&start, tz)?,
                duration.unwrap_or(config.interview.default_duration_minutes),
            )
            .context("Failed to build interview event")?;
            let applicant = Applicant { name, email };
            let event = InterviewEvent::new(&applicant, &slot, tz, description.as_deref())
                .context("Failed to build interview event")?;
            write_output(output.as_deref(), &event)?;
        }
        Commands::Reschedule {
            start,
            duration,
            description,
            timezone,
        } => {
            let tz = resolve_timezone(timezone.as_deref(), config.interview.timezone)?;
            let start = start.as_deref().map(|s| parse_start(s, tz)).transpose()?;
            let update = InterviewUpdate::reschedule(
                start,
                duration.or(Some(config.interview.default_duration_minutes)),
                description.as_deref(),
                tz,
            )
            .context("Failed to build interview update")?;
            if update.is_empty() {
                anyhow::bail!("Nothing to update: pass --start and/or --description");
            }
            write_output(None, &update)?;
        }
        Commands::Questions { input, limit } => {
            let raw = read_input(input.as_deref())?;
            let questions = slot_engine::parse_questions(&raw, limit)
                .context("Failed to extract interview questions")?;
            debug!(count = questions.len(), "parsed questions");
            write_output(None, &questions)?;
        }
        Commands::Evaluate { input } => {
            let raw = read_input(input.as_deref())?;
            let evaluation = slot_engine::parse_evaluation(&raw)
                .context("Failed to extract applicant evaluation")?;
            debug!(total = evaluation.total_score, "parsed evaluation");
            write_output(None, &evaluation)?;
        }
    }

    Ok(())
}

fn init_logger(verbose: bool, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("slot_engine=debug,slots=debug,warn")
        } else {
            EnvFilter::new("slot_engine=info,slots=info")
        }
    });

    let registry = tracing_subscriber::registry().with(filter);
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false);
    if json {
        registry.with(layer.json()).init();
    } else {
        registry.with(layer.compact()).init();
    }
}

fn resolve_timezone(name: Option<&str>, fallback: Tz) -> Result<Tz> {
    match name {
        Some(name) => name
            .parse::<Tz>()
            .map_err(|_| anyhow::anyhow!("Unknown timezone: '{}'", name)),
        None => Ok(fallback),
    }
}

fn parse_start(raw: &str, tz: Tz) -> Result<DateTime<Utc>> {
    slot_engine::parse_instant(raw, tz).with_context(|| format!("Invalid start time: {}", raw))
}

/// Busy intervals from `path`, "-" for stdin, or none.
fn read_busy(path: Option<&str>, google: bool, tz: Tz) -> Result<Vec<BusyInterval>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let raw = read_input((path != "-").then_some(path))?;
    let busy = if google {
        slot_engine::busy_from_google_events(&raw, tz)
    } else {
        slot_engine::busy_from_json(&raw, tz)
    };
    busy.context("Failed to read busy intervals")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

/// Pretty JSON of `value`, to `path` or stdout, newline-terminated.
fn write_output<T: Serialize>(path: Option<&str>, value: &T) -> Result<()> {
    let mut json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    json.push('\n');
    match path {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("Failed to write file: {}", path))
        }
        None => io::stdout()
            .write_all(json.as_bytes())
            .context("Failed to write to stdout"),
    }
}
