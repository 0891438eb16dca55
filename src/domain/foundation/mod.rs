//! Shared value objects: identifiers, timestamps, error types.

mod errors;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{PatientId, PaymentId, SessionId, TherapistId};
pub use timestamp::Timestamp;
