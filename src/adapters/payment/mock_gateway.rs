//! Mock payment gateway for testing.
//!
//! Configurable implementation of `PaymentGateway` for unit and integration
//! tests. Supports pre-configured payments, error injection and call
//! tracking.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::foundation::{PaymentId, SessionId};
use crate::ports::{
    PaymentError, PaymentGateway, PaymentRecord, PaymentStatus, RefundReceipt, RefundRequest,
};

/// Mock payment gateway for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentGateway::new();
/// mock.add_payment(PaymentRecord { id, session_id: Some(sid), status: PaymentStatus::Succeeded, amount: 80.0 });
/// mock.set_method_error("issue_refund", PaymentError::provider("refund refused"));
/// ```
#[derive(Default)]
pub struct MockPaymentGateway {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Pre-configured payments by id.
    payments: HashMap<PaymentId, PaymentRecord>,

    /// Error to return on next call.
    next_error: Option<PaymentError>,

    /// Specific errors by method name.
    method_errors: HashMap<String, PaymentError>,

    /// Track method calls for assertions.
    call_log: Vec<MethodCall>,
}

/// Recorded method call for assertions.
#[derive(Debug, Clone)]
pub struct MethodCall {
    pub method: String,
    pub args: Vec<String>,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that already knows about a settled payment for the
    /// given session.
    pub fn with_succeeded_payment(
        payment_id: PaymentId,
        session_id: SessionId,
        amount: f64,
    ) -> Self {
        let mock = Self::new();
        mock.add_payment(PaymentRecord {
            id: payment_id,
            session_id: Some(session_id),
            status: PaymentStatus::Succeeded,
            amount,
        });
        mock
    }

    /// Add a payment to the "database".
    pub fn add_payment(&self, payment: PaymentRecord) {
        self.inner
            .lock()
            .unwrap()
            .payments
            .insert(payment.id, payment);
    }

    /// Set an error to return on the next call to any method.
    pub fn set_error(&self, error: PaymentError) {
        self.inner.lock().unwrap().next_error = Some(error);
    }

    /// Set an error for a specific method.
    pub fn set_method_error(&self, method: &str, error: PaymentError) {
        self.inner
            .lock()
            .unwrap()
            .method_errors
            .insert(method.to_string(), error);
    }

    /// Get all recorded method calls.
    pub fn calls(&self) -> Vec<MethodCall> {
        self.inner.lock().unwrap().call_log.clone()
    }

    /// Check if a method was called.
    pub fn was_called(&self, method: &str) -> bool {
        self.inner
            .lock()
            .unwrap()
            .call_log
            .iter()
            .any(|c| c.method == method)
    }

    /// Get count of calls to a method.
    pub fn call_count(&self, method: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .call_log
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    fn record_call(&self, method: &str, args: Vec<String>) {
        self.inner.lock().unwrap().call_log.push(MethodCall {
            method: method.to_string(),
            args,
        });
    }

    fn check_error(&self, method: &str) -> Result<(), PaymentError> {
        let mut state = self.inner.lock().unwrap();

        if let Some(error) = state.method_errors.get(method) {
            return Err(error.clone());
        }

        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        Ok(())
    }
}

impl Clone for MockPaymentGateway {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn payment(&self, id: &PaymentId) -> Result<Option<PaymentRecord>, PaymentError> {
        self.record_call("payment", vec![id.to_string()]);
        self.check_error("payment")?;

        let state = self.inner.lock().unwrap();
        Ok(state.payments.get(id).cloned())
    }

    async fn find_by_session(
        &self,
        session: &SessionId,
    ) -> Result<Option<PaymentRecord>, PaymentError> {
        self.record_call("find_by_session", vec![session.to_string()]);
        self.check_error("find_by_session")?;

        let state = self.inner.lock().unwrap();
        Ok(state
            .payments
            .values()
            .find(|p| p.session_id.as_ref() == Some(session))
            .cloned())
    }

    async fn issue_refund(&self, request: RefundRequest) -> Result<RefundReceipt, PaymentError> {
        self.record_call(
            "issue_refund",
            vec![request.payment_id.to_string(), request.amount.to_string()],
        );
        self.check_error("issue_refund")?;

        let mut state = self.inner.lock().unwrap();

        let payment = state
            .payments
            .get_mut(&request.payment_id)
            .ok_or_else(|| PaymentError::provider("Payment not found"))?;
        payment.status = PaymentStatus::Refunded;

        Ok(RefundReceipt {
            refund_id: format!("rf_mock_{}", uuid::Uuid::new_v4()),
            payment_id: request.payment_id,
        })
    }
}
