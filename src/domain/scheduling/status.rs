//! SessionStatus enum for tracking the session lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a therapy session.
///
/// Transitions are monotonic: `PendingPayment -> Scheduled -> Completed`,
/// with `Scheduled -> Cancelled` as the only other legal edge. A pending
/// session cannot be cancelled or completed directly; terminal sessions are
/// retained for audit and refund lookup, never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    #[default]
    PendingPayment,
    Scheduled,
    Completed,
    Cancelled,
}

impl SessionStatus {
    /// Validates a transition from this status to another.
    pub fn can_transition_to(&self, target: &SessionStatus) -> bool {
        use SessionStatus::*;
        matches!(
            (self, target),
            (PendingPayment, Scheduled) | (Scheduled, Completed) | (Scheduled, Cancelled)
        )
    }

    /// Returns true once no further transition is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Completed | SessionStatus::Cancelled)
    }

    /// Returns true if a session in this status occupies the therapist's
    /// calendar for conflict purposes. Cancelled slots are free again.
    pub fn blocks_booking(&self) -> bool {
        !matches!(self, SessionStatus::Cancelled)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::PendingPayment => "PENDING_PAYMENT",
            SessionStatus::Scheduled => "SCHEDULED",
            SessionStatus::Completed => "COMPLETED",
            SessionStatus::Cancelled => "CANCELLED",
        };
        write!(f, "{}", s)
    }
}
