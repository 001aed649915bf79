//! Check a proposed interview time against existing busy intervals.
//!
//! Uses the same half-open test as the search: a busy interval that ends
//! exactly when the proposal starts (or starts when it ends) is NOT a conflict.

use serde::{Deserialize, Serialize};

use crate::interval::{BusyInterval, Slot};

/// A busy interval that overlaps a proposed slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub busy: BusyInterval,
    pub overlap_minutes: i64,
}

/// Find every busy interval overlapping `proposed`, in input order.
///
/// The overlap duration is `min(slot.end, busy.end) - max(slot.start, busy.start)`.
pub fn find_conflicts(proposed: &Slot, busy: &[BusyInterval]) -> Vec<Conflict> {
    busy.iter()
        .filter(|b| proposed.overlaps(b))
        .map(|b| {
            let overlap_start = proposed.start.max(b.start);
            let overlap_end = proposed.end.min(b.end);
            Conflict {
                busy: *b,
                overlap_minutes: (overlap_end - overlap_start).num_minutes(),
            }
        })
        .collect()
}

/// Whether `proposed` overlaps none of `busy`.
pub fn is_free(proposed: &Slot, busy: &[BusyInterval]) -> bool {
    !busy.iter().any(|b| proposed.overlaps(b))
}
