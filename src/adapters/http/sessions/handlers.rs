//! HTTP handlers for session endpoints.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

use crate::adapters::http::error::scheduling_error_response;
use crate::application::handlers::scheduling::{
    AttachNoteCommand, AttachNoteHandler, BookSessionCommand, BookSessionHandler,
    CancelSessionCommand, CancelSessionHandler, CompleteSessionCommand, CompleteSessionHandler,
    ConfirmSessionCommand, ConfirmSessionHandler, GetSessionHandler, GetSessionQuery,
    ListSessionsHandler, PreviewPriceHandler, PreviewPriceQuery,
};
use crate::domain::foundation::{PatientId, PaymentId, SessionId, TherapistId, Timestamp};

use super::dto::{
    AttachNoteRequest, BookSessionRequest, CancelSessionRequest, ConfirmSessionRequest,
    PreviewPriceParams, PreviewPriceResponse, SessionResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SessionHandlers {
    pub book: Arc<BookSessionHandler>,
    pub confirm: Arc<ConfirmSessionHandler>,
    pub cancel: Arc<CancelSessionHandler>,
    pub complete: Arc<CompleteSessionHandler>,
    pub attach_note: Arc<AttachNoteHandler>,
    pub get: Arc<GetSessionHandler>,
    pub list: Arc<ListSessionsHandler>,
    pub preview_price: Arc<PreviewPriceHandler>,
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/sessions - book a session slot
pub async fn book_session(
    State(handlers): State<SessionHandlers>,
    Json(req): Json<BookSessionRequest>,
) -> Response {
    let cmd = BookSessionCommand {
        therapist_id: TherapistId::from_uuid(req.therapist_id),
        patient_id: PatientId::from_uuid(req.patient_id),
        start: Timestamp::from_datetime(req.start),
        duration_minutes: req.duration_minutes,
        modality: req.modality,
    };

    match handlers.book.handle(cmd).await {
        Ok(session) => {
            (StatusCode::CREATED, Json(SessionResponse::from(&session))).into_response()
        }
        Err(e) => scheduling_error_response(e),
    }
}

/// POST /api/sessions/:id/confirm - confirm against a payment
pub async fn confirm_session(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<ConfirmSessionRequest>,
) -> Response {
    let cmd = ConfirmSessionCommand {
        session_id: SessionId::from_uuid(session_id),
        payment_id: PaymentId::from_uuid(req.payment_id),
    };

    match handlers.confirm.handle(cmd).await {
        Ok(session) => (StatusCode::OK, Json(SessionResponse::from(&session))).into_response(),
        Err(e) => scheduling_error_response(e),
    }
}

/// POST /api/sessions/:id/cancel - cancel and refund
pub async fn cancel_session(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<CancelSessionRequest>,
) -> Response {
    let cmd = CancelSessionCommand {
        session_id: SessionId::from_uuid(session_id),
        reason: req.reason,
    };

    match handlers.cancel.handle(cmd).await {
        Ok(session) => (StatusCode::OK, Json(SessionResponse::from(&session))).into_response(),
        Err(e) => scheduling_error_response(e),
    }
}

/// POST /api/sessions/:id/complete - close out an elapsed session
pub async fn complete_session(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<Uuid>,
) -> Response {
    let cmd = CompleteSessionCommand {
        session_id: SessionId::from_uuid(session_id),
    };

    match handlers.complete.handle(cmd).await {
        Ok(session) => (StatusCode::OK, Json(SessionResponse::from(&session))).into_response(),
        Err(e) => scheduling_error_response(e),
    }
}

/// PUT /api/sessions/:id/note - attach the therapist's note
pub async fn attach_note(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<AttachNoteRequest>,
) -> Response {
    let cmd = AttachNoteCommand {
        session_id: SessionId::from_uuid(session_id),
        note: req.note,
    };

    match handlers.attach_note.handle(cmd).await {
        Ok(session) => (StatusCode::OK, Json(SessionResponse::from(&session))).into_response(),
        Err(e) => scheduling_error_response(e),
    }
}

/// GET /api/sessions/:id - session details
pub async fn get_session(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<Uuid>,
) -> Response {
    let query = GetSessionQuery {
        session_id: SessionId::from_uuid(session_id),
    };

    match handlers.get.handle(query).await {
        Ok(session) => (StatusCode::OK, Json(SessionResponse::from(&session))).into_response(),
        Err(e) => scheduling_error_response(e),
    }
}

/// GET /api/sessions/therapist/:id - a therapist's sessions
pub async fn list_by_therapist(
    State(handlers): State<SessionHandlers>,
    Path(therapist_id): Path<Uuid>,
) -> Response {
    let therapist = TherapistId::from_uuid(therapist_id);
    match handlers.list.by_therapist(&therapist).await {
        Ok(sessions) => {
            let body: Vec<SessionResponse> = sessions.iter().map(SessionResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => scheduling_error_response(e),
    }
}

/// GET /api/sessions/patient/:id - a patient's sessions
pub async fn list_by_patient(
    State(handlers): State<SessionHandlers>,
    Path(patient_id): Path<Uuid>,
) -> Response {
    let patient = PatientId::from_uuid(patient_id);
    match handlers.list.by_patient(&patient).await {
        Ok(sessions) => {
            let body: Vec<SessionResponse> = sessions.iter().map(SessionResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => scheduling_error_response(e),
    }
}

/// GET /api/sessions/preview-price - quote a prospective session
pub async fn preview_price(
    State(handlers): State<SessionHandlers>,
    Query(params): Query<PreviewPriceParams>,
) -> Response {
    let query = PreviewPriceQuery {
        therapist_id: TherapistId::from_uuid(params.therapist_id),
        duration_minutes: params.duration_minutes,
    };

    match handlers.preview_price.handle(query).await {
        Ok(result) => {
            (StatusCode::OK, Json(PreviewPriceResponse::from(result))).into_response()
        }
        Err(e) => scheduling_error_response(e),
    }
}
