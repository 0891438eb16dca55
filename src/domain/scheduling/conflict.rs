//! Conflict checker: decides whether a candidate slot is bookable against a
//! therapist's declared availability and existing sessions.
//!
//! Pure functions so the booking handler (and any future batch validator)
//! can run them over whatever it fetched, without further I/O.

use super::{AvailabilityWindow, Session, TimeSlot};

/// True when at least one window fully contains the candidate. The first
/// containing window settles it; later windows are not consulted.
pub fn within_availability(slot: &TimeSlot, windows: &[AvailabilityWindow]) -> bool {
    windows.iter().any(|w| w.contains(slot))
}

/// Returns the first existing session whose interval intersects the
/// candidate. Cancelled sessions no longer occupy the calendar and are
/// skipped; every other status blocks, including pending-payment holds.
pub fn first_conflict<'a>(slot: &TimeSlot, existing: &'a [Session]) -> Option<&'a Session> {
    existing
        .iter()
        .filter(|s| s.status().blocks_booking())
        .find(|s| s.slot().overlaps(slot))
}

/// Combined decision: contained in a window and free of conflicts.
pub fn is_bookable(slot: &TimeSlot, windows: &[AvailabilityWindow], existing: &[Session]) -> bool {
    within_availability(slot, windows) && first_conflict(slot, existing).is_none()
}
