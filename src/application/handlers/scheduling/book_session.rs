//! BookSessionHandler - creates a session awaiting payment.

use std::sync::Arc;

use crate::domain::foundation::{PatientId, SessionId, TherapistId, Timestamp};
use crate::domain::scheduling::conflict;
use crate::domain::scheduling::{Modality, SchedulingError, Session, TimeSlot};
use crate::ports::{SessionStore, TherapistDirectory};

use super::booking_lock::TherapistLocks;

/// Command to book a session slot.
#[derive(Debug, Clone)]
pub struct BookSessionCommand {
    pub therapist_id: TherapistId,
    pub patient_id: PatientId,
    pub start: Timestamp,
    pub duration_minutes: i64,
    pub modality: Modality,
}

/// Handler for booking sessions.
///
/// The conflict check and the save run under the therapist's booking lock so
/// two concurrent requests for the same therapist cannot both pass the
/// check.
pub struct BookSessionHandler {
    store: Arc<dyn SessionStore>,
    directory: Arc<dyn TherapistDirectory>,
    locks: Arc<TherapistLocks>,
}

impl BookSessionHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        directory: Arc<dyn TherapistDirectory>,
        locks: Arc<TherapistLocks>,
    ) -> Self {
        Self {
            store,
            directory,
            locks,
        }
    }

    pub async fn handle(&self, cmd: BookSessionCommand) -> Result<Session, SchedulingError> {
        // 1. Validate the slot
        let slot = TimeSlot::new(cmd.start, cmd.duration_minutes)?;

        // 2. Serialize bookings per therapist
        let lock = self.locks.lock_for(&cmd.therapist_id);
        let _guard = lock.lock().await;

        // 3. The slot must sit inside a published availability window
        let windows = self.directory.availability_windows(&cmd.therapist_id).await?;
        if !conflict::within_availability(&slot, &windows) {
            tracing::info!(
                therapist_id = %cmd.therapist_id,
                start = %slot.start().as_datetime(),
                "Booking rejected: outside availability"
            );
            return Err(SchedulingError::SlotUnavailable);
        }

        // 4. It must not overlap a session that still holds the slot
        let existing = self
            .store
            .find_overlapping(&cmd.therapist_id, &slot)
            .await?;
        if let Some(taken) = conflict::first_conflict(&slot, &existing) {
            tracing::info!(
                therapist_id = %cmd.therapist_id,
                conflicting_session = %taken.id(),
                "Booking rejected: slot already taken"
            );
            return Err(SchedulingError::SlotUnavailable);
        }

        // 5. Create and persist the pending session
        let session = Session::book(
            SessionId::new(),
            cmd.therapist_id,
            cmd.patient_id,
            slot,
            cmd.modality,
        )?;
        self.store.save(&session).await?;

        tracing::info!(
            session_id = %session.id(),
            therapist_id = %cmd.therapist_id,
            "Session booked, awaiting payment"
        );

        Ok(session)
    }
}
