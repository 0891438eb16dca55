//! ListSessionsHandler - sessions by therapist or by patient.

use std::sync::Arc;

use crate::domain::foundation::{PatientId, TherapistId};
use crate::domain::scheduling::{SchedulingError, Session};
use crate::ports::SessionStore;

/// Handler for listing sessions. Results come back most recently updated
/// first.
pub struct ListSessionsHandler {
    store: Arc<dyn SessionStore>,
}

impl ListSessionsHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn by_therapist(
        &self,
        therapist: &TherapistId,
    ) -> Result<Vec<Session>, SchedulingError> {
        Ok(self.store.find_by_therapist(therapist).await?)
    }

    pub async fn by_patient(&self, patient: &PatientId) -> Result<Vec<Session>, SchedulingError> {
        Ok(self.store.find_by_patient(patient).await?)
    }
}
