//! Recording in-memory notifier.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{Notification, Notifier};

/// Notifier that records every message it is handed. Tests inspect the
/// recorded log; `fail_next` injects a delivery failure.
#[derive(Default)]
pub struct InMemoryNotifier {
    sent: Mutex<Vec<Notification>>,
    fail_next: Mutex<bool>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `send` call fail.
    pub fn fail_next(&self) {
        *self.fail_next.lock().unwrap() = true;
    }

    /// Snapshot of everything sent so far.
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for InMemoryNotifier {
    async fn send(&self, notification: Notification) -> Result<(), DomainError> {
        let mut fail = self.fail_next.lock().unwrap();
        if *fail {
            *fail = false;
            return Err(DomainError::new(
                ErrorCode::UpstreamFailure,
                "Notification delivery failed",
            ));
        }
        self.sent.lock().unwrap().push(notification);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::NotificationKind;
    use uuid::Uuid;

    fn notification() -> Notification {
        Notification {
            recipient: Uuid::new_v4(),
            message: "Your session is confirmed".to_string(),
            kind: NotificationKind::SessionConfirmed,
            related_entity: Uuid::new_v4(),
        }
    }

    #[tokio::test]
    async fn records_sent_notifications() {
        let notifier = InMemoryNotifier::new();
        notifier.send(notification()).await.unwrap();
        notifier.send(notification()).await.unwrap();
        assert_eq!(notifier.sent().len(), 2);
    }

    #[tokio::test]
    async fn fail_next_fails_exactly_once() {
        let notifier = InMemoryNotifier::new();
        notifier.fail_next();
        assert!(notifier.send(notification()).await.is_err());
        assert!(notifier.send(notification()).await.is_ok());
        assert_eq!(notifier.sent().len(), 1);
    }
}
