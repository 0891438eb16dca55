//! AttachNoteHandler - records the therapist's note on a session.

use std::sync::Arc;

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::scheduling::{SchedulingError, Session};
use crate::ports::SessionStore;

/// Command to attach a therapist note.
#[derive(Debug, Clone)]
pub struct AttachNoteCommand {
    pub session_id: SessionId,
    pub note: String,
}

/// Handler for attaching notes. The note may land any time after the
/// session's start instant, whatever the lifecycle state.
pub struct AttachNoteHandler {
    store: Arc<dyn SessionStore>,
}

impl AttachNoteHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: AttachNoteCommand) -> Result<Session, SchedulingError> {
        let mut session = self
            .store
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(SchedulingError::NotFound(cmd.session_id))?;

        session.attach_note(cmd.note, Timestamp::now())?;
        self.store.update(&session).await?;

        tracing::debug!(session_id = %session.id(), "Note attached");

        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySessionStore;
    use crate::domain::foundation::{PatientId, TherapistId};
    use crate::domain::scheduling::{Modality, TimeSlot};
    use chrono::{DateTime, Utc};

    fn session(start: &str) -> Session {
        let dt = DateTime::parse_from_rfc3339(start).unwrap().with_timezone(&Utc);
        Session::book(
            SessionId::new(),
            TherapistId::new(),
            PatientId::new(),
            TimeSlot::new(Timestamp::from_datetime(dt), 60).unwrap(),
            Modality::InPerson,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn attaches_note_once_the_session_has_started() {
        let store = Arc::new(InMemorySessionStore::new());
        let s = session("2025-03-03T10:00:00Z");
        store.save(&s).await.unwrap();

        let handler = AttachNoteHandler::new(store.clone());
        let updated = handler
            .handle(AttachNoteCommand {
                session_id: *s.id(),
                note: "Good progress on exposure exercises".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(
            updated.therapist_note(),
            Some("Good progress on exposure exercises")
        );
        let stored = store.find_by_id(s.id()).await.unwrap().unwrap();
        assert!(stored.therapist_note().is_some());
    }

    #[tokio::test]
    async fn note_is_allowed_regardless_of_lifecycle_state() {
        let store = Arc::new(InMemorySessionStore::new());
        // Still PendingPayment, but the start instant has passed.
        let s = session("2025-03-03T10:00:00Z");
        store.save(&s).await.unwrap();

        let handler = AttachNoteHandler::new(store);
        let result = handler
            .handle(AttachNoteCommand {
                session_id: *s.id(),
                note: "Note".to_string(),
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn too_early_before_the_session_starts() {
        let store = Arc::new(InMemorySessionStore::new());
        let s = session("2099-01-04T10:00:00Z");
        store.save(&s).await.unwrap();

        let handler = AttachNoteHandler::new(store);
        let result = handler
            .handle(AttachNoteCommand {
                session_id: *s.id(),
                note: "Too keen".to_string(),
            })
            .await;

        assert!(matches!(result, Err(SchedulingError::TooEarly(_))));
    }

    #[tokio::test]
    async fn rejects_blank_note() {
        let store = Arc::new(InMemorySessionStore::new());
        let s = session("2025-03-03T10:00:00Z");
        store.save(&s).await.unwrap();

        let handler = AttachNoteHandler::new(store);
        let result = handler
            .handle(AttachNoteCommand {
                session_id: *s.id(),
                note: "   ".to_string(),
            })
            .await;

        assert!(matches!(
            result,
            Err(SchedulingError::ValidationFailed { .. })
        ));
    }

    #[tokio::test]
    async fn fails_for_unknown_session() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = AttachNoteHandler::new(store);
        let result = handler
            .handle(AttachNoteCommand {
                session_id: SessionId::new(),
                note: "Note".to_string(),
            })
            .await;
        assert!(matches!(result, Err(SchedulingError::NotFound(_))));
    }
}
