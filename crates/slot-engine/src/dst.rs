//! Resolving wall-clock business hours to instants across DST transitions.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

/// Policy for local times that fall inside a DST gap.
///
/// Folds (a local time that occurs twice) always resolve to the earlier instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DstPolicy {
    /// Nonexistent local times resolve to nothing.
    Skip,
    /// Shift to the same reading one hour later, which exists after a
    /// spring-forward gap.
    #[default]
    ShiftForward,
    /// Keep the wall-clock reading and interpret it with the offset in force
    /// just before the gap.
    WallClock,
}

/// Resolve a local wall-clock reading in `tz` to a UTC instant.
pub fn resolve_local(naive: NaiveDateTime, tz: Tz, policy: DstPolicy) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => match policy {
            DstPolicy::Skip => None,
            DstPolicy::ShiftForward => tz
                .from_local_datetime(&(naive + Duration::hours(1)))
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
            DstPolicy::WallClock => {
                // The offset two hours earlier predates any real-world gap.
                let before = tz
                    .from_local_datetime(&(naive - Duration::hours(2)))
                    .earliest()?;
                let offset = before.offset().fix();
                offset
                    .from_local_datetime(&naive)
                    .single()
                    .map(|dt| dt.with_timezone(&Utc))
            }
        },
    }
}
