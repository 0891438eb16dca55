//! CancelSessionHandler - cancels a scheduled session and refunds it.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::scheduling::{SchedulingError, Session};
use crate::ports::{
    Notification, NotificationKind, Notifier, PaymentGateway, RefundRequest, SessionStore,
};

/// Command to cancel a scheduled session.
#[derive(Debug, Clone)]
pub struct CancelSessionCommand {
    pub session_id: SessionId,
    pub reason: Option<String>,
}

/// Handler for cancelling sessions.
///
/// The cancellation is persisted before the refund call. A refused refund
/// therefore leaves the session cancelled and surfaces `RefundFailed` for
/// manual reconciliation; the slot is never re-sellable while the patient
/// keeps a paid claim on it.
pub struct CancelSessionHandler {
    store: Arc<dyn SessionStore>,
    payments: Arc<dyn PaymentGateway>,
    notifier: Arc<dyn Notifier>,
}

impl CancelSessionHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        payments: Arc<dyn PaymentGateway>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            payments,
            notifier,
        }
    }

    pub async fn handle(&self, cmd: CancelSessionCommand) -> Result<Session, SchedulingError> {
        // 1. Load the session and validate the transition
        let mut session = self
            .store
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(SchedulingError::NotFound(cmd.session_id))?;
        session.cancel()?;

        // 2. A scheduled session must carry a settled payment to refund
        let payment = self
            .payments
            .find_by_session(&cmd.session_id)
            .await?
            .ok_or(SchedulingError::PaymentLinkMissing(cmd.session_id))?;

        // 3. Persist the cancellation before touching the payment service
        self.store.update(&session).await?;

        tracing::info!(
            session_id = %session.id(),
            payment_id = %payment.id,
            "Session cancelled, issuing refund"
        );

        // 4. Refund. The session stays cancelled even when this fails.
        let refund = RefundRequest {
            payment_id: payment.id,
            amount: payment.amount,
            reason: cmd
                .reason
                .unwrap_or_else(|| "Session cancelled".to_string()),
        };
        if let Err(e) = self.payments.issue_refund(refund).await {
            tracing::error!(
                session_id = %session.id(),
                payment_id = %payment.id,
                error = %e,
                "Refund was not acknowledged"
            );
            return Err(SchedulingError::RefundFailed(e.to_string()));
        }

        // 5. Best-effort notifications to both parties
        for (recipient, message) in [
            (
                *session.patient_id().as_uuid(),
                "Your session was cancelled and the payment refunded".to_string(),
            ),
            (
                *session.therapist_id().as_uuid(),
                format!(
                    "The session on {} was cancelled",
                    session.slot().start().as_datetime()
                ),
            ),
        ] {
            let notification = Notification {
                recipient,
                message,
                kind: NotificationKind::SessionCancelled,
                related_entity: *session.id().as_uuid(),
            };
            if let Err(e) = self.notifier.send(notification).await {
                tracing::warn!(session_id = %session.id(), error = %e, "Cancel notice failed");
            }
        }

        Ok(session)
    }
}
