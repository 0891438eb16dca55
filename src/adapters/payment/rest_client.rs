//! REST client for the payment service.
//!
//! Implements `PaymentGateway` against the payment service HTTP API. The
//! service reports statuses as free text (some endpoints still emit legacy
//! French literals); this adapter decodes them into `PaymentStatus` before
//! anything downstream sees them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PaymentId, SessionId};
use crate::ports::{
    PaymentError, PaymentErrorCode, PaymentGateway, PaymentRecord, PaymentStatus, RefundReceipt,
    RefundRequest,
};

/// Payment service adapter over HTTP.
pub struct RestPaymentGateway {
    base_url: String,
    http_client: reqwest::Client,
}

/// Payment as the payment service serializes it.
#[derive(Debug, Deserialize)]
struct PaymentResponse {
    id: PaymentId,
    #[serde(default)]
    session_id: Option<SessionId>,
    status: String,
    amount: f64,
}

impl PaymentResponse {
    fn into_record(self) -> PaymentRecord {
        PaymentRecord {
            id: self.id,
            session_id: self.session_id,
            status: PaymentStatus::decode(&self.status),
            amount: self.amount,
        }
    }
}

#[derive(Debug, Serialize)]
struct RefundBody<'a> {
    amount: f64,
    reason: &'a str,
}

#[derive(Debug, Deserialize)]
struct RefundResponse {
    refund_id: String,
    payment_id: PaymentId,
}

impl RestPaymentGateway {
    /// Create a new client against the payment service base URL.
    pub fn new(base_url: impl Into<String>, http_client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
        }
    }

    async fn fetch_payment(&self, url: String) -> Result<Option<PaymentRecord>, PaymentError> {
        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(error = %error_text, "Payment service lookup failed");
            return Err(PaymentError::new(
                PaymentErrorCode::ProviderError,
                format!("Payment service error: {}", error_text),
            ));
        }

        let payment: PaymentResponse = response
            .json()
            .await
            .map_err(|e| PaymentError::decode(format!("Invalid payment response: {}", e)))?;

        Ok(Some(payment.into_record()))
    }
}

#[async_trait]
impl PaymentGateway for RestPaymentGateway {
    async fn payment(&self, id: &PaymentId) -> Result<Option<PaymentRecord>, PaymentError> {
        let url = format!("{}/api/payments/{}", self.base_url, id);
        self.fetch_payment(url).await
    }

    async fn find_by_session(
        &self,
        session: &SessionId,
    ) -> Result<Option<PaymentRecord>, PaymentError> {
        let url = format!("{}/api/payments/session/{}", self.base_url, session);
        self.fetch_payment(url).await
    }

    async fn issue_refund(&self, request: RefundRequest) -> Result<RefundReceipt, PaymentError> {
        let url = format!(
            "{}/api/payments/{}/refund",
            self.base_url, request.payment_id
        );

        let response = self
            .http_client
            .post(&url)
            .json(&RefundBody {
                amount: request.amount,
                reason: &request.reason,
            })
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(
                payment_id = %request.payment_id,
                error = %error_text,
                "Payment service refund failed"
            );
            return Err(PaymentError::new(
                PaymentErrorCode::ProviderError,
                format!("Refund refused: {}", error_text),
            ));
        }

        let receipt: RefundResponse = response
            .json()
            .await
            .map_err(|e| PaymentError::decode(format!("Invalid refund response: {}", e)))?;

        Ok(RefundReceipt {
            refund_id: receipt.refund_id,
            payment_id: receipt.payment_id,
        })
    }
}
