//! Session aggregate entity.
//!
//! A session is one appointment between a patient and a therapist. Its
//! lifecycle state only moves through the aggregate methods here; the
//! orchestration handlers decide *when* to call them, this type decides
//! *whether* the transition is legal.
//!
//! # Invariants
//!
//! - duration is positive (enforced by `TimeSlot`)
//! - a video link is present iff the modality is online
//! - state transitions follow the `SessionStatus` machine, never twice,
//!   never out of order
//! - terminal sessions are kept for audit and refund lookup

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, ErrorCode, PatientId, SessionId, TherapistId, Timestamp, ValidationError,
};

use super::{Modality, SessionStatus, TimeSlot, VideoLink};

/// A scheduled therapy appointment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    therapist_id: TherapistId,
    patient_id: PatientId,
    slot: TimeSlot,
    modality: Modality,
    status: SessionStatus,
    video_link: Option<VideoLink>,
    recording_url: Option<String>,
    therapist_note: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Session {
    /// Creates a new session awaiting payment. Online sessions get a
    /// synthesized meeting link derived from the session id.
    pub fn book(
        id: SessionId,
        therapist_id: TherapistId,
        patient_id: PatientId,
        slot: TimeSlot,
        modality: Modality,
    ) -> Result<Self, ValidationError> {
        let video_link = modality
            .requires_video_link()
            .then(|| VideoLink::for_session(&id));

        let now = Timestamp::now();
        Ok(Self {
            id,
            therapist_id,
            patient_id,
            slot,
            modality,
            status: SessionStatus::PendingPayment,
            video_link,
            recording_url: None,
            therapist_note: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a session from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SessionId,
        therapist_id: TherapistId,
        patient_id: PatientId,
        slot: TimeSlot,
        modality: Modality,
        status: SessionStatus,
        video_link: Option<VideoLink>,
        recording_url: Option<String>,
        therapist_note: Option<String>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            therapist_id,
            patient_id,
            slot,
            modality,
            status,
            video_link,
            recording_url,
            therapist_note,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn therapist_id(&self) -> &TherapistId {
        &self.therapist_id
    }

    pub fn patient_id(&self) -> &PatientId {
        &self.patient_id
    }

    pub fn slot(&self) -> &TimeSlot {
        &self.slot
    }

    pub fn modality(&self) -> Modality {
        self.modality
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn video_link(&self) -> Option<&VideoLink> {
        self.video_link.as_ref()
    }

    pub fn recording_url(&self) -> Option<&str> {
        self.recording_url.as_deref()
    }

    pub fn therapist_note(&self) -> Option<&str> {
        self.therapist_note.as_deref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Payment verified: the session becomes scheduled.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless the current state is `PendingPayment`
    pub fn confirm(&mut self) -> Result<(), DomainError> {
        self.transition_to(SessionStatus::Scheduled)
    }

    /// Cancels a scheduled session. The caller is responsible for issuing
    /// the refund afterwards.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless the current state is `Scheduled`
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        self.transition_to(SessionStatus::Cancelled)
    }

    /// Marks a scheduled session as completed once its end instant has
    /// passed.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless the current state is `Scheduled`
    /// - `TooEarly` while `now` is before `start + duration`
    pub fn complete(&mut self, now: Timestamp) -> Result<(), DomainError> {
        if self.status != SessionStatus::Scheduled {
            return Err(self.transition_error(SessionStatus::Completed));
        }
        if now.is_before(&self.slot.end()) {
            return Err(DomainError::new(
                ErrorCode::TooEarly,
                format!("Session {} has not finished yet", self.id),
            ));
        }
        self.status = SessionStatus::Completed;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Attaches the therapist's free-text note. Allowed in any lifecycle
    /// state once the session's start instant has passed; the looseness is
    /// deliberate so a note can land mid-session.
    ///
    /// # Errors
    ///
    /// - `TooEarly` while `now` is before the start instant
    /// - `ValidationFailed` for a blank note
    pub fn attach_note(&mut self, note: String, now: Timestamp) -> Result<(), DomainError> {
        if note.trim().is_empty() {
            return Err(ValidationError::empty_field("note").into());
        }
        if now.is_before(&self.slot.start()) {
            return Err(DomainError::new(
                ErrorCode::TooEarly,
                format!("Session {} has not started yet", self.id),
            ));
        }
        self.therapist_note = Some(note);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    fn transition_to(&mut self, target: SessionStatus) -> Result<(), DomainError> {
        if !self.status.can_transition_to(&target) {
            return Err(self.transition_error(target));
        }
        self.status = target;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    fn transition_error(&self, target: SessionStatus) -> DomainError {
        DomainError::new(
            ErrorCode::InvalidStateTransition,
            format!("Cannot move session from {} to {}", self.status, target),
        )
        .with_detail("session_id", self.id.to_string())
    }
}
