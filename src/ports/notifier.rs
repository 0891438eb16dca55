//! Notifier port.
//!
//! Best-effort delivery of user-facing messages through the notification
//! service. Orchestrator operations never fail because a notification did
//! not go out: callers log errors and move on.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::foundation::DomainError;

/// Port over the notification service.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Hand a notification to the delivery pipeline. Implementations may
    /// return before the message is actually delivered.
    async fn send(&self, notification: Notification) -> Result<(), DomainError>;
}

/// A user-facing message tied to some entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// User the message is addressed to (patient or therapist).
    pub recipient: Uuid,

    /// Human-readable message body.
    pub message: String,

    /// Message category for client-side rendering.
    pub kind: NotificationKind,

    /// Entity the message refers to (session id here).
    pub related_entity: Uuid,
}

/// Categories of session notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    SessionConfirmed,
    SessionCancelled,
    SessionCompleted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifier_is_object_safe() {
        fn _accepts_dyn(_notifier: &dyn Notifier) {}
    }

    #[test]
    fn kind_serializes_to_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&NotificationKind::SessionConfirmed).unwrap(),
            "\"SESSION_CONFIRMED\""
        );
    }
}
