//! GetSessionHandler - fetch a single session by id.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::scheduling::{SchedulingError, Session};
use crate::ports::SessionStore;

#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub session_id: SessionId,
}

pub struct GetSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl GetSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetSessionQuery) -> Result<Session, SchedulingError> {
        self.store
            .find_by_id(&query.session_id)
            .await?
            .ok_or(SchedulingError::NotFound(query.session_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySessionStore;
    use crate::domain::foundation::{PatientId, TherapistId, Timestamp};
    use crate::domain::scheduling::{Modality, TimeSlot};
    use chrono::{DateTime, Utc};

    #[tokio::test]
    async fn returns_the_stored_session() {
        let store = Arc::new(InMemorySessionStore::new());
        let dt = DateTime::parse_from_rfc3339("2025-03-03T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let session = Session::book(
            SessionId::new(),
            TherapistId::new(),
            PatientId::new(),
            TimeSlot::new(Timestamp::from_datetime(dt), 60).unwrap(),
            Modality::Online,
        )
        .unwrap();
        store.save(&session).await.unwrap();

        let handler = GetSessionHandler::new(store);
        let found = handler
            .handle(GetSessionQuery {
                session_id: *session.id(),
            })
            .await
            .unwrap();

        assert_eq!(found, session);
    }

    #[tokio::test]
    async fn fails_for_unknown_session() {
        let handler = GetSessionHandler::new(Arc::new(InMemorySessionStore::new()));
        let result = handler
            .handle(GetSessionQuery {
                session_id: SessionId::new(),
            })
            .await;
        assert!(matches!(result, Err(SchedulingError::NotFound(_))));
    }
}
