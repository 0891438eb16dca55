//! Collaborator service configuration
//!
//! Base URLs for the therapist, payment and notification services.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Collaborator service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CollaboratorsConfig {
    /// Base URL of the therapist service
    pub therapist_url: String,

    /// Base URL of the payment service
    pub payment_url: String,

    /// Base URL of the notification service
    pub notification_url: String,

    /// Outbound HTTP timeout in seconds
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,
}

impl CollaboratorsConfig {
    /// Get the outbound HTTP timeout as Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Validate collaborator configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (name, url) in [
            ("COLLABORATORS__THERAPIST_URL", &self.therapist_url),
            ("COLLABORATORS__PAYMENT_URL", &self.payment_url),
            ("COLLABORATORS__NOTIFICATION_URL", &self.notification_url),
        ] {
            if url.is_empty() {
                return Err(ValidationError::MissingRequired(name));
            }
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidCollaboratorUrl(name));
            }
        }
        if self.http_timeout_secs == 0 || self.http_timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_http_timeout() -> u64 {
    10
}
