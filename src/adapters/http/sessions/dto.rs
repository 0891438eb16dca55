//! HTTP DTOs for session endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent
//! evolution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::handlers::scheduling::PreviewPriceResult;
use crate::domain::scheduling::{Modality, Session, SessionStatus};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to book a session slot.
#[derive(Debug, Clone, Deserialize)]
pub struct BookSessionRequest {
    pub therapist_id: Uuid,
    pub patient_id: Uuid,
    pub start: DateTime<Utc>,
    pub duration_minutes: i64,
    pub modality: Modality,
}

/// Request to confirm a pending session against a payment.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmSessionRequest {
    pub payment_id: Uuid,
}

/// Request to cancel a scheduled session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CancelSessionRequest {
    #[serde(default)]
    pub reason: Option<String>,
}

/// Request to attach the therapist's note.
#[derive(Debug, Clone, Deserialize)]
pub struct AttachNoteRequest {
    pub note: String,
}

/// Query parameters for a price preview.
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewPriceParams {
    pub therapist_id: Uuid,
    pub duration_minutes: i64,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Full session view for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub id: Uuid,
    pub therapist_id: Uuid,
    pub patient_id: Uuid,
    pub start: String,
    pub duration_minutes: u32,
    pub modality: Modality,
    pub status: SessionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recording_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub therapist_note: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        Self {
            id: *session.id().as_uuid(),
            therapist_id: *session.therapist_id().as_uuid(),
            patient_id: *session.patient_id().as_uuid(),
            start: session.slot().start().as_datetime().to_rfc3339(),
            duration_minutes: session.slot().duration_minutes(),
            modality: session.modality(),
            status: session.status(),
            video_link: session.video_link().map(|l| l.as_str().to_string()),
            recording_url: session.recording_url().map(str::to_string),
            therapist_note: session.therapist_note().map(str::to_string),
            created_at: session.created_at().as_datetime().to_rfc3339(),
            updated_at: session.updated_at().as_datetime().to_rfc3339(),
        }
    }
}

/// Price quote response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewPriceResponse {
    pub hourly_rate: f64,
    pub duration_minutes: i64,
    pub price: f64,
}

impl From<PreviewPriceResult> for PreviewPriceResponse {
    fn from(result: PreviewPriceResult) -> Self {
        Self {
            hourly_rate: result.hourly_rate,
            duration_minutes: result.duration_minutes,
            price: result.price,
        }
    }
}
