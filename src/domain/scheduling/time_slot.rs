//! Time slot value object: a start instant plus a positive duration.

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, ValidationError};

/// The interval `[start, start + duration)` occupied by a session.
///
/// Overlap is half-open: a slot ending exactly when another starts does not
/// intersect it, so back-to-back sessions are always allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    start: Timestamp,
    duration_minutes: u32,
}

impl TimeSlot {
    /// Creates a slot. Zero or negative durations are a usage error, not a
    /// conflict, and are rejected here before any lookup happens.
    pub fn new(start: Timestamp, duration_minutes: i64) -> Result<Self, ValidationError> {
        if duration_minutes <= 0 {
            return Err(ValidationError::not_positive(
                "duration_minutes",
                duration_minutes,
            ));
        }
        Ok(Self {
            start,
            duration_minutes: duration_minutes as u32,
        })
    }

    /// Start instant.
    pub fn start(&self) -> Timestamp {
        self.start
    }

    /// Duration in minutes.
    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    /// Exclusive end instant.
    pub fn end(&self) -> Timestamp {
        self.start.plus_minutes(self.duration_minutes as i64)
    }

    /// Half-open interval intersection:
    /// `self.start < other.end && self.end > other.start`.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start.is_before(&other.end()) && self.end().is_after(&other.start)
    }

    /// Day of week the slot starts on.
    pub fn weekday(&self) -> Weekday {
        self.start.weekday()
    }

    /// Time of day the slot starts at.
    pub fn start_time(&self) -> NaiveTime {
        self.start.time_of_day()
    }

    /// Time of day the slot ends at. Meaningless when the slot crosses
    /// midnight; callers must check `crosses_midnight` first.
    pub fn end_time(&self) -> NaiveTime {
        self.end().time_of_day()
    }

    /// A slot spilling into the next day can never sit inside a single-day
    /// availability window.
    pub fn crosses_midnight(&self) -> bool {
        !self.start.same_day_as(&self.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use proptest::prelude::*;

    fn at(s: &str) -> Timestamp {
        Timestamp::from_datetime(
            DateTime::parse_from_rfc3339(s)
                .unwrap()
                .with_timezone(&Utc),
        )
    }

    fn slot(s: &str, minutes: i64) -> TimeSlot {
        TimeSlot::new(at(s), minutes).unwrap()
    }

    #[test]
    fn rejects_zero_duration() {
        assert!(TimeSlot::new(at("2025-03-03T09:00:00Z"), 0).is_err());
    }

    #[test]
    fn rejects_negative_duration() {
        assert!(TimeSlot::new(at("2025-03-03T09:00:00Z"), -30).is_err());
    }

    #[test]
    fn end_is_start_plus_duration() {
        let s = slot("2025-03-03T09:00:00Z", 60);
        assert_eq!(s.end(), at("2025-03-03T10:00:00Z"));
    }

    #[test]
    fn overlapping_slots_intersect() {
        let existing = slot("2025-03-03T10:00:00Z", 60);
        let candidate = slot("2025-03-03T10:30:00Z", 60);
        assert!(candidate.overlaps(&existing));
        assert!(existing.overlaps(&candidate));
    }

    #[test]
    fn back_to_back_slots_do_not_intersect() {
        let existing = slot("2025-03-03T10:00:00Z", 60);
        let after = slot("2025-03-03T11:00:00Z", 60);
        let before = slot("2025-03-03T09:00:00Z", 60);
        assert!(!after.overlaps(&existing));
        assert!(!before.overlaps(&existing));
    }

    #[test]
    fn containment_is_an_overlap() {
        let outer = slot("2025-03-03T09:00:00Z", 180);
        let inner = slot("2025-03-03T10:00:00Z", 30);
        assert!(inner.overlaps(&outer));
        assert!(outer.overlaps(&inner));
    }

    #[test]
    fn detects_midnight_crossing() {
        assert!(slot("2025-03-03T23:30:00Z", 60).crosses_midnight());
        assert!(!slot("2025-03-03T22:30:00Z", 90).crosses_midnight());
    }

    proptest! {
        /// Overlap matches the half-open formula for arbitrary offsets.
        #[test]
        fn overlap_matches_interval_arithmetic(
            a_offset in 0i64..10_000,
            a_len in 1i64..600,
            b_offset in 0i64..10_000,
            b_len in 1i64..600,
        ) {
            let base = at("2025-03-03T00:00:00Z");
            let a = TimeSlot::new(base.plus_minutes(a_offset), a_len).unwrap();
            let b = TimeSlot::new(base.plus_minutes(b_offset), b_len).unwrap();

            let expected = a_offset < b_offset + b_len && a_offset + a_len > b_offset;
            prop_assert_eq!(a.overlaps(&b), expected);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        /// A slot sharing a boundary instant never overlaps.
        #[test]
        fn touching_slots_never_overlap(offset in 0i64..10_000, len in 1i64..600) {
            let base = at("2025-03-03T00:00:00Z");
            let first = TimeSlot::new(base.plus_minutes(offset), len).unwrap();
            let second = TimeSlot::new(first.end(), len).unwrap();
            prop_assert!(!first.overlaps(&second));
        }
    }
}
