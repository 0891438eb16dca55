//! In-memory implementation of SessionStore.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, PatientId, SessionId, TherapistId};
use crate::domain::scheduling::{Session, TimeSlot};
use crate::ports::SessionStore;

/// HashMap-backed session store.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions.
    pub fn len(&self) -> usize {
        self.sessions.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        self.sessions
            .write()
            .unwrap()
            .insert(*session.id(), session.clone());
        Ok(())
    }

    async fn update(&self, session: &Session) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().unwrap();
        if !sessions.contains_key(session.id()) {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", session.id()),
            ));
        }
        sessions.insert(*session.id(), session.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        Ok(self.sessions.read().unwrap().get(id).cloned())
    }

    async fn find_by_therapist(
        &self,
        id: &TherapistId,
    ) -> Result<Vec<Session>, DomainError> {
        let mut found: Vec<Session> = self
            .sessions
            .read()
            .unwrap()
            .values()
            .filter(|s| s.therapist_id() == id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.updated_at().cmp(a.updated_at()));
        Ok(found)
    }

    async fn find_by_patient(&self, id: &PatientId) -> Result<Vec<Session>, DomainError> {
        let mut found: Vec<Session> = self
            .sessions
            .read()
            .unwrap()
            .values()
            .filter(|s| s.patient_id() == id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.updated_at().cmp(a.updated_at()));
        Ok(found)
    }

    async fn find_overlapping(
        &self,
        therapist: &TherapistId,
        slot: &TimeSlot,
    ) -> Result<Vec<Session>, DomainError> {
        Ok(self
            .sessions
            .read()
            .unwrap()
            .values()
            .filter(|s| s.therapist_id() == therapist && s.slot().overlaps(slot))
            .cloned()
            .collect())
    }
}
