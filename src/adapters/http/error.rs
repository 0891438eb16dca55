//! Mapping from scheduling errors to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::scheduling::SchedulingError;

/// Standard error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }
}

/// Status code for a scheduling error.
pub fn status_for(error: &SchedulingError) -> StatusCode {
    match error {
        SchedulingError::NotFound(_)
        | SchedulingError::RateUnavailable(_)
        | SchedulingError::PaymentLinkMissing(_) => StatusCode::NOT_FOUND,
        SchedulingError::SlotUnavailable
        | SchedulingError::InvalidState(_)
        | SchedulingError::TooEarly(_) => StatusCode::CONFLICT,
        SchedulingError::PaymentNotSuccessful(_) => StatusCode::PAYMENT_REQUIRED,
        SchedulingError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
        SchedulingError::RefundFailed(_) | SchedulingError::Upstream(_) => StatusCode::BAD_GATEWAY,
        SchedulingError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Build the full error response for a scheduling error.
pub fn scheduling_error_response(error: SchedulingError) -> Response {
    let status = status_for(&error);
    if status.is_server_error() {
        tracing::error!(error = %error, "Request failed");
    }
    let body = ErrorResponse::new(error.code().to_string(), error.message());
    (status, Json(body)).into_response()
}
