//! Scheduling-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, SessionId, TherapistId, ValidationError};
use crate::ports::PaymentStatus;

/// Failures of the session lifecycle operations.
#[derive(Debug, Clone, PartialEq)]
pub enum SchedulingError {
    /// Session was not found.
    NotFound(SessionId),
    /// The therapist directory has no hourly rate for this therapist.
    RateUnavailable(TherapistId),
    /// The requested slot is outside availability or already taken.
    SlotUnavailable,
    /// Operation attempted from a state that forbids it.
    InvalidState(String),
    /// The referenced payment did not succeed.
    PaymentNotSuccessful(PaymentStatus),
    /// No payment is linked to the session.
    PaymentLinkMissing(SessionId),
    /// The payment service did not acknowledge the refund. The session is
    /// already cancelled at this point; reconciliation is manual.
    RefundFailed(String),
    /// The session has not reached the instant the operation requires.
    TooEarly(String),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// A collaborator call failed or returned an unexpected shape.
    Upstream(String),
    /// Local persistence error.
    Infrastructure(String),
}

impl SchedulingError {
    pub fn not_found(id: SessionId) -> Self {
        SchedulingError::NotFound(id)
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        SchedulingError::InvalidState(message.into())
    }

    pub fn too_early(message: impl Into<String>) -> Self {
        SchedulingError::TooEarly(message.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SchedulingError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        SchedulingError::Upstream(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        SchedulingError::Infrastructure(message.into())
    }

    /// Stable error code for the API surface.
    pub fn code(&self) -> ErrorCode {
        match self {
            SchedulingError::NotFound(_) => ErrorCode::SessionNotFound,
            SchedulingError::RateUnavailable(_) => ErrorCode::RateUnavailable,
            SchedulingError::SlotUnavailable => ErrorCode::SlotUnavailable,
            SchedulingError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            SchedulingError::PaymentNotSuccessful(_) => ErrorCode::PaymentNotSuccessful,
            SchedulingError::PaymentLinkMissing(_) => ErrorCode::PaymentLinkMissing,
            SchedulingError::RefundFailed(_) => ErrorCode::RefundFailed,
            SchedulingError::TooEarly(_) => ErrorCode::TooEarly,
            SchedulingError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SchedulingError::Upstream(_) => ErrorCode::UpstreamFailure,
            SchedulingError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            SchedulingError::NotFound(id) => format!("Session not found: {}", id),
            SchedulingError::RateUnavailable(id) => {
                format!("No hourly rate available for therapist {}", id)
            }
            SchedulingError::SlotUnavailable => "Therapist not available for this slot".to_string(),
            SchedulingError::InvalidState(msg) => format!("Invalid state: {}", msg),
            SchedulingError::PaymentNotSuccessful(status) => {
                format!("Payment did not succeed (status: {})", status)
            }
            SchedulingError::PaymentLinkMissing(id) => {
                format!("No payment found for session {}", id)
            }
            SchedulingError::RefundFailed(msg) => format!("Refund was not acknowledged: {}", msg),
            SchedulingError::TooEarly(msg) => msg.clone(),
            SchedulingError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SchedulingError::Upstream(msg) => format!("Collaborator call failed: {}", msg),
            SchedulingError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for SchedulingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SchedulingError {}

impl From<DomainError> for SchedulingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::SessionNotFound => SchedulingError::Infrastructure(err.to_string()),
            ErrorCode::InvalidStateTransition => SchedulingError::InvalidState(err.message),
            ErrorCode::TooEarly => SchedulingError::TooEarly(err.message),
            ErrorCode::ValidationFailed => SchedulingError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::UpstreamFailure => SchedulingError::Upstream(err.message),
            _ => SchedulingError::Infrastructure(err.to_string()),
        }
    }
}

impl From<crate::ports::PaymentError> for SchedulingError {
    fn from(err: crate::ports::PaymentError) -> Self {
        SchedulingError::Upstream(err.to_string())
    }
}

impl From<ValidationError> for SchedulingError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field } => field.clone(),
            ValidationError::NotPositive { field, .. } => field.clone(),
            ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        SchedulingError::ValidationFailed {
            field,
            message: err.to_string(),
        }
    }
}
