//! CompleteSessionHandler - closes out a session whose slot has elapsed.

use std::sync::Arc;

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::scheduling::{SchedulingError, Session};
use crate::ports::{Notification, NotificationKind, Notifier, SessionStore};

/// Command to mark a session completed.
#[derive(Debug, Clone)]
pub struct CompleteSessionCommand {
    pub session_id: SessionId,
}

/// Handler for completing sessions.
pub struct CompleteSessionHandler {
    store: Arc<dyn SessionStore>,
    notifier: Arc<dyn Notifier>,
}

impl CompleteSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    pub async fn handle(&self, cmd: CompleteSessionCommand) -> Result<Session, SchedulingError> {
        let mut session = self
            .store
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(SchedulingError::NotFound(cmd.session_id))?;

        session.complete(Timestamp::now())?;
        self.store.update(&session).await?;

        tracing::info!(session_id = %session.id(), "Session completed");

        let notification = Notification {
            recipient: *session.patient_id().as_uuid(),
            message: "Thank you for attending your session".to_string(),
            kind: NotificationKind::SessionCompleted,
            related_entity: *session.id().as_uuid(),
        };
        if let Err(e) = self.notifier.send(notification).await {
            tracing::warn!(session_id = %session.id(), error = %e, "Completion notice failed");
        }

        Ok(session)
    }
}
