//! Payment gateway port.
//!
//! Contract over the payment service, the authoritative source of payment
//! status and refund issuance. Statuses arrive as free text on the wire and
//! are decoded into the closed `PaymentStatus` enum; anything unrecognized
//! becomes `Unknown` rather than being silently equated with failure.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PaymentId, SessionId};

/// Port over the payment service.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Look up a payment by its id. Returns `None` when the payment does
    /// not exist.
    async fn payment(&self, id: &PaymentId) -> Result<Option<PaymentRecord>, PaymentError>;

    /// Find the payment linked to a session, if any.
    async fn find_by_session(
        &self,
        session: &SessionId,
    ) -> Result<Option<PaymentRecord>, PaymentError>;

    /// Ask the payment service to refund a payment. `Ok` means the service
    /// acknowledged the refund; any error means it did not.
    async fn issue_refund(&self, request: RefundRequest) -> Result<RefundReceipt, PaymentError>;
}

/// Payment as reported by the payment service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Payment id in the payment service.
    pub id: PaymentId,

    /// Session the payment was made for, once linked.
    pub session_id: Option<SessionId>,

    /// Decoded payment status.
    pub status: PaymentStatus,

    /// Amount paid.
    pub amount: f64,
}

/// Payment status from the payment service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Payment settled successfully. Only this status confirms a session.
    Succeeded,

    /// Payment initiated but not settled.
    Pending,

    /// Payment failed.
    Failed,

    /// Payment was refunded.
    Refunded,

    /// Status string the gateway did not recognize.
    Unknown,
}

impl PaymentStatus {
    /// Decode the remote's free-text status. The payment service still
    /// emits the legacy French literals alongside English ones.
    pub fn decode(raw: &str) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "REUSSI" | "SUCCEEDED" | "SUCCESS" => PaymentStatus::Succeeded,
            "EN_ATTENTE" | "PENDING" => PaymentStatus::Pending,
            "ECHOUE" | "FAILED" => PaymentStatus::Failed,
            "REMBOURSE" | "REFUNDED" => PaymentStatus::Refunded,
            _ => PaymentStatus::Unknown,
        }
    }

    /// True only for a settled payment.
    pub fn is_successful(&self) -> bool {
        matches!(self, PaymentStatus::Succeeded)
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentStatus::Succeeded => "succeeded",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
            PaymentStatus::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// Refund request sent to the payment service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefundRequest {
    /// Payment to refund.
    pub payment_id: PaymentId,

    /// Full amount being refunded.
    pub amount: f64,

    /// Caller-supplied cancellation reason.
    pub reason: String,
}

/// Acknowledgment returned by the payment service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefundReceipt {
    /// Refund id in the payment service.
    pub refund_id: String,

    /// Payment the refund applies to.
    pub payment_id: PaymentId,
}

/// Errors from payment gateway operations.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentError {
    /// Error code for categorization.
    pub code: PaymentErrorCode,

    /// Human-readable message.
    pub message: String,

    /// Whether the operation can be retried.
    pub retryable: bool,
}

impl PaymentError {
    /// Create a new payment error.
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            retryable: code.is_retryable(),
        }
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NetworkError, message)
    }

    /// Create a provider error.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::ProviderError, message)
    }

    /// Create a decode error for an unexpected response shape.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::DecodeError, message)
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for PaymentError {}

/// Payment error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentErrorCode {
    /// Network connectivity issue or timeout.
    NetworkError,

    /// The payment service answered with an error status.
    ProviderError,

    /// The response body did not match the expected shape.
    DecodeError,
}

impl PaymentErrorCode {
    /// Check if this error type is typically retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PaymentErrorCode::NetworkError)
    }
}

impl std::fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentErrorCode::NetworkError => "network_error",
            PaymentErrorCode::ProviderError => "provider_error",
            PaymentErrorCode::DecodeError => "decode_error",
        };
        write!(f, "{}", s)
    }
}
