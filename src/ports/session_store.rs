//! Session store port.
//!
//! Persistence contract for `Session` aggregates. The store is the only
//! resource the orchestrator mutates; implementations must provide
//! read-your-writes consistency per session id.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PatientId, SessionId, TherapistId};
use crate::domain::scheduling::{Session, TimeSlot};

/// Repository port for session persistence.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist a new session.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, session: &Session) -> Result<(), DomainError>;

    /// Persist changes to an existing session.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, session: &Session) -> Result<(), DomainError>;

    /// Find a session by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError>;

    /// All sessions for a therapist, most recently updated first.
    async fn find_by_therapist(&self, id: &TherapistId)
        -> Result<Vec<Session>, DomainError>;

    /// All sessions for a patient, most recently updated first.
    async fn find_by_patient(&self, id: &PatientId) -> Result<Vec<Session>, DomainError>;

    /// Sessions of a therapist whose interval intersects the candidate slot
    /// (half-open intersection). Status filtering is the caller's concern.
    async fn find_overlapping(
        &self,
        therapist: &TherapistId,
        slot: &TimeSlot,
    ) -> Result<Vec<Session>, DomainError>;
}
