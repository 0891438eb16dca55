//! Mock therapist directory for testing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, TherapistId};
use crate::domain::scheduling::AvailabilityWindow;
use crate::ports::TherapistDirectory;

/// Configurable in-memory directory. Therapists not registered with
/// `set_rate` have no published rate; ones without `set_windows` have no
/// availability.
#[derive(Default)]
pub struct MockTherapistDirectory {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    rates: HashMap<TherapistId, f64>,
    windows: HashMap<TherapistId, Vec<AvailabilityWindow>>,
    fail_next: bool,
}

impl MockTherapistDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an hourly rate for a therapist.
    pub fn set_rate(&self, therapist: TherapistId, rate: f64) {
        self.inner.lock().unwrap().rates.insert(therapist, rate);
    }

    /// Register availability windows for a therapist.
    pub fn set_windows(&self, therapist: TherapistId, windows: Vec<AvailabilityWindow>) {
        self.inner.lock().unwrap().windows.insert(therapist, windows);
    }

    /// Make the next call fail with an upstream error.
    pub fn fail_next(&self) {
        self.inner.lock().unwrap().fail_next = true;
    }

    fn check_error(&self) -> Result<(), DomainError> {
        let mut state = self.inner.lock().unwrap();
        if state.fail_next {
            state.fail_next = false;
            return Err(DomainError::new(
                ErrorCode::UpstreamFailure,
                "Therapist service unavailable",
            ));
        }
        Ok(())
    }
}

impl Clone for MockTherapistDirectory {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl TherapistDirectory for MockTherapistDirectory {
    async fn hourly_rate(&self, therapist: &TherapistId) -> Result<Option<f64>, DomainError> {
        self.check_error()?;
        Ok(self.inner.lock().unwrap().rates.get(therapist).copied())
    }

    async fn availability_windows(
        &self,
        therapist: &TherapistId,
    ) -> Result<Vec<AvailabilityWindow>, DomainError> {
        self.check_error()?;
        Ok(self
            .inner
            .lock()
            .unwrap()
            .windows
            .get(therapist)
            .cloned()
            .unwrap_or_default())
    }
}
