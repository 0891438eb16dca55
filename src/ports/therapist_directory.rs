//! Therapist directory port.
//!
//! Read-only view over the therapist service: hourly rates and the weekly
//! availability calendar. The orchestrator consults it, never mutates it.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, TherapistId};
use crate::domain::scheduling::AvailabilityWindow;

/// Port over the therapist service.
#[async_trait]
pub trait TherapistDirectory: Send + Sync {
    /// Hourly rate for a therapist, or `None` when the profile carries no
    /// price.
    ///
    /// # Errors
    ///
    /// - `UpstreamFailure` when the directory cannot be reached
    async fn hourly_rate(&self, therapist: &TherapistId) -> Result<Option<f64>, DomainError>;

    /// The therapist's declared weekly availability windows. An empty list
    /// means the therapist is never bookable.
    ///
    /// # Errors
    ///
    /// - `UpstreamFailure` when the directory cannot be reached
    async fn availability_windows(
        &self,
        therapist: &TherapistId,
    ) -> Result<Vec<AvailabilityWindow>, DomainError>;
}
