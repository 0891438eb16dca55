//! Weekly recurring availability window declared by a therapist.

use chrono::{NaiveTime, Weekday};

use crate::domain::foundation::ValidationError;

use super::TimeSlot;

/// One recurring slot in a therapist's weekly calendar.
///
/// Owned by the therapist service; the orchestrator only reads these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityWindow {
    weekday: Weekday,
    start: NaiveTime,
    end: NaiveTime,
}

impl AvailabilityWindow {
    /// Creates a window, requiring `start < end`.
    pub fn new(weekday: Weekday, start: NaiveTime, end: NaiveTime) -> Result<Self, ValidationError> {
        if start >= end {
            return Err(ValidationError::invalid_format(
                "availability_window",
                format!("start {} must be before end {}", start, end),
            ));
        }
        Ok(Self {
            weekday,
            start,
            end,
        })
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// True when the whole candidate interval sits inside this window
    /// (inclusive at both bounds). Partial overlap is not enough, and a
    /// slot crossing midnight can never be contained.
    pub fn contains(&self, slot: &TimeSlot) -> bool {
        if slot.weekday() != self.weekday || slot.crosses_midnight() {
            return false;
        }
        self.start <= slot.start_time() && slot.end_time() <= self.end
    }
}
