//! REST client for the notification service.
//!
//! Delivery is fire-and-forget: the request is spawned onto the runtime and
//! failures are logged, never propagated. Session operations must not fail
//! because a notification did not go out.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::ports::{Notification, Notifier};

/// Notification service adapter over HTTP.
pub struct RestNotifier {
    base_url: String,
    http_client: reqwest::Client,
}

impl RestNotifier {
    /// Create a new client against the notification service base URL.
    pub fn new(base_url: impl Into<String>, http_client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
        }
    }
}

#[async_trait]
impl Notifier for RestNotifier {
    async fn send(&self, notification: Notification) -> Result<(), DomainError> {
        let url = format!("{}/api/notifications", self.base_url);
        let client = self.http_client.clone();
        let recipient = notification.recipient;

        tokio::spawn(async move {
            match client.post(&url).json(&notification).send().await {
                Ok(response) if !response.status().is_success() => {
                    tracing::warn!(
                        %recipient,
                        status = %response.status(),
                        "Notification service rejected message"
                    );
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(%recipient, error = %e, "Notification delivery failed");
                }
            }
        });

        Ok(())
    }
}
