//! ConfirmSessionHandler - verifies payment and schedules a pending session.

use std::sync::Arc;

use crate::domain::foundation::{PaymentId, SessionId};
use crate::domain::scheduling::{SchedulingError, Session};
use crate::ports::{Notification, NotificationKind, Notifier, PaymentGateway, SessionStore};

/// Command to confirm a pending session against a payment.
#[derive(Debug, Clone)]
pub struct ConfirmSessionCommand {
    pub session_id: SessionId,
    pub payment_id: PaymentId,
}

/// Handler for confirming sessions.
///
/// Confirmation succeeds only when the referenced payment settled. The
/// confirmation notification is best-effort: a delivery failure is logged
/// and never rolls the session back.
pub struct ConfirmSessionHandler {
    store: Arc<dyn SessionStore>,
    payments: Arc<dyn PaymentGateway>,
    notifier: Arc<dyn Notifier>,
}

impl ConfirmSessionHandler {
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

    pub async fn handle(&self, cmd: ConfirmSessionCommand) -> Result<Session, SchedulingError> {
        // 1. Load the session
        let mut session = self
            .store
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(SchedulingError::NotFound(cmd.session_id))?;

        // 2. The payment must exist, reference this session and be settled
        let payment = self
            .payments
            .payment(&cmd.payment_id)
            .await?
            .ok_or(SchedulingError::PaymentLinkMissing(cmd.session_id))?;

        if let Some(linked) = payment.session_id {
            if linked != cmd.session_id {
                return Err(SchedulingError::validation(
                    "payment_id",
                    "Payment belongs to a different session",
                ));
            }
        }

        if !payment.status.is_successful() {
            return Err(SchedulingError::PaymentNotSuccessful(payment.status));
        }

        // 3. Transition and persist
        session.confirm()?;
        self.store.update(&session).await?;

        tracing::info!(
            session_id = %session.id(),
            payment_id = %cmd.payment_id,
            "Session confirmed"
        );

        // 4. Best-effort notification
        let notification = Notification {
            recipient: *session.patient_id().as_uuid(),
            message: format!(
                "Your session on {} is confirmed",
                session.slot().start().as_datetime()
            ),
            kind: NotificationKind::SessionConfirmed,
            related_entity: *session.id().as_uuid(),
        };
        if let Err(e) = self.notifier.send(notification).await {
            tracing::warn!(session_id = %session.id(), error = %e, "Confirmation notice failed");
        }

        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryNotifier, InMemorySessionStore};
    use crate::adapters::payment::MockPaymentGateway;
    use crate::domain::foundation::{PatientId, TherapistId, Timestamp};
    use crate::domain::scheduling::{Modality, SessionStatus, TimeSlot};
    use crate::ports::{PaymentRecord, PaymentStatus};
    use chrono::{DateTime, Utc};

    fn pending_session() -> Session {
        let dt = DateTime::parse_from_rfc3339("2025-03-03T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        Session::book(
            SessionId::new(),
            TherapistId::new(),
            PatientId::new(),
            TimeSlot::new(Timestamp::from_datetime(dt), 60).unwrap(),
            Modality::Online,
        )
        .unwrap()
    }

    struct Fixture {
        store: Arc<InMemorySessionStore>,
        payments: MockPaymentGateway,
        notifier: Arc<InMemoryNotifier>,
        handler: ConfirmSessionHandler,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(InMemorySessionStore::new());
        let payments = MockPaymentGateway::new();
        let notifier = Arc::new(InMemoryNotifier::new());
        let handler = ConfirmSessionHandler::new(
            store.clone(),
            Arc::new(payments.clone()),
            notifier.clone(),
        );
        Fixture {
            store,
            payments,
            notifier,
            handler,
        }
    }

    #[tokio::test]
    async fn confirms_when_payment_succeeded() {
        let f = fixture();
        let session = pending_session();
        f.store.save(&session).await.unwrap();
        let payment_id = PaymentId::new();
        f.payments.add_payment(PaymentRecord {
            id: payment_id,
            session_id: Some(*session.id()),
            status: PaymentStatus::Succeeded,
            amount: 80.0,
        });

        let confirmed = f
            .handler
            .handle(ConfirmSessionCommand {
                session_id: *session.id(),
                payment_id,
            })
            .await
            .unwrap();

        assert_eq!(confirmed.status(), SessionStatus::Scheduled);
        let stored = f.store.find_by_id(session.id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), SessionStatus::Scheduled);
    }

    #[tokio::test]
    async fn sends_confirmation_notification() {
        let f = fixture();
        let session = pending_session();
        f.store.save(&session).await.unwrap();
        let payment_id = PaymentId::new();
        f.payments.add_payment(PaymentRecord {
            id: payment_id,
            session_id: Some(*session.id()),
            status: PaymentStatus::Succeeded,
            amount: 80.0,
        });

        f.handler
            .handle(ConfirmSessionCommand {
                session_id: *session.id(),
                payment_id,
            })
            .await
            .unwrap();

        let sent = f.notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].kind, NotificationKind::SessionConfirmed);
        assert_eq!(sent[0].recipient, *session.patient_id().as_uuid());
    }

    #[tokio::test]
    async fn notification_failure_does_not_roll_back() {
        let f = fixture();
        let session = pending_session();
        f.store.save(&session).await.unwrap();
        let payment_id = PaymentId::new();
        f.payments.add_payment(PaymentRecord {
            id: payment_id,
            session_id: Some(*session.id()),
            status: PaymentStatus::Succeeded,
            amount: 80.0,
        });
        f.notifier.fail_next();

        let result = f
            .handler
            .handle(ConfirmSessionCommand {
                session_id: *session.id(),
                payment_id,
            })
            .await;

        assert!(result.is_ok());
        let stored = f.store.find_by_id(session.id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), SessionStatus::Scheduled);
    }

    #[tokio::test]
    async fn rejects_unsettled_payment() {
        for status in [
            PaymentStatus::Pending,
            PaymentStatus::Failed,
            PaymentStatus::Refunded,
            PaymentStatus::Unknown,
        ] {
            let f = fixture();
            let session = pending_session();
            f.store.save(&session).await.unwrap();
            let payment_id = PaymentId::new();
            f.payments.add_payment(PaymentRecord {
                id: payment_id,
                session_id: Some(*session.id()),
                status,
                amount: 80.0,
            });

            let result = f
                .handler
                .handle(ConfirmSessionCommand {
                    session_id: *session.id(),
                    payment_id,
                })
                .await;

            assert!(
                matches!(result, Err(SchedulingError::PaymentNotSuccessful(s)) if s == status)
            );
            let stored = f.store.find_by_id(session.id()).await.unwrap().unwrap();
            assert_eq!(stored.status(), SessionStatus::PendingPayment);
        }
    }

    #[tokio::test]
    async fn rejects_missing_payment() {
        let f = fixture();
        let session = pending_session();
        f.store.save(&session).await.unwrap();

        let result = f
            .handler
            .handle(ConfirmSessionCommand {
                session_id: *session.id(),
                payment_id: PaymentId::new(),
            })
            .await;

        assert!(matches!(
            result,
            Err(SchedulingError::PaymentLinkMissing(_))
        ));
    }

    #[tokio::test]
    async fn rejects_payment_for_another_session() {
        let f = fixture();
        let session = pending_session();
        f.store.save(&session).await.unwrap();
        let payment_id = PaymentId::new();
        f.payments.add_payment(PaymentRecord {
            id: payment_id,
            session_id: Some(SessionId::new()),
            status: PaymentStatus::Succeeded,
            amount: 80.0,
        });

        let result = f
            .handler
            .handle(ConfirmSessionCommand {
                session_id: *session.id(),
                payment_id,
            })
            .await;

        assert!(matches!(
            result,
            Err(SchedulingError::ValidationFailed { .. })
        ));
    }

    #[tokio::test]
    async fn fails_for_unknown_session() {
        let f = fixture();
        let result = f
            .handler
            .handle(ConfirmSessionCommand {
                session_id: SessionId::new(),
                payment_id: PaymentId::new(),
            })
            .await;
        assert!(matches!(result, Err(SchedulingError::NotFound(_))));
    }

    #[tokio::test]
    async fn confirming_twice_is_an_invalid_transition() {
        let f = fixture();
        let session = pending_session();
        f.store.save(&session).await.unwrap();
        let payment_id = PaymentId::new();
        f.payments.add_payment(PaymentRecord {
            id: payment_id,
            session_id: Some(*session.id()),
            status: PaymentStatus::Succeeded,
            amount: 80.0,
        });

        let cmd = ConfirmSessionCommand {
            session_id: *session.id(),
            payment_id,
        };
        f.handler.handle(cmd.clone()).await.unwrap();
        let result = f.handler.handle(cmd).await;

        assert!(matches!(result, Err(SchedulingError::InvalidState(_))));
    }
}
