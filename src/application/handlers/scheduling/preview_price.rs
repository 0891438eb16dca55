//! PreviewPriceHandler - quotes the price of a prospective session.

use std::sync::Arc;

use crate::domain::foundation::{TherapistId, ValidationError};
use crate::domain::scheduling::SchedulingError;
use crate::ports::TherapistDirectory;

/// Query for a price quote.
#[derive(Debug, Clone)]
pub struct PreviewPriceQuery {
    pub therapist_id: TherapistId,
    pub duration_minutes: i64,
}

/// Price quote. `price` is the hourly rate prorated to the duration.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewPriceResult {
    pub hourly_rate: f64,
    pub duration_minutes: i64,
    pub price: f64,
}

/// Handler for price previews.
pub struct PreviewPriceHandler {
    directory: Arc<dyn TherapistDirectory>,
}

impl PreviewPriceHandler {
    pub fn new(directory: Arc<dyn TherapistDirectory>) -> Self {
        Self { directory }
    }

    pub async fn handle(
        &self,
        query: PreviewPriceQuery,
    ) -> Result<PreviewPriceResult, SchedulingError> {
        if query.duration_minutes <= 0 {
            return Err(
                ValidationError::not_positive("duration_minutes", query.duration_minutes).into(),
            );
        }

        let hourly_rate = self
            .directory
            .hourly_rate(&query.therapist_id)
            .await?
            .ok_or(SchedulingError::RateUnavailable(query.therapist_id))?;

        let price = hourly_rate * query.duration_minutes as f64 / 60.0;

        Ok(PreviewPriceResult {
            hourly_rate,
            duration_minutes: query.duration_minutes,
            price,
        })
    }
}
