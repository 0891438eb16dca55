//! Per-therapist booking locks.
//!
//! The conflict check reads the store and then writes a new session; two
//! concurrent bookings for the same therapist could both pass the read.
//! Serializing bookings per therapist closes that window. Bookings for
//! different therapists never contend.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;

use tokio::sync::Mutex;

use crate::domain::foundation::TherapistId;

/// Registry of one async mutex per therapist, created on first use.
#[derive(Default)]
pub struct TherapistLocks {
    locks: StdMutex<HashMap<TherapistId, Arc<Mutex<()>>>>,
}

impl TherapistLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the lock for a therapist. The returned handle must be `.lock()`ed
    /// by the caller; the registry mutex is only held to fetch the entry.
    pub fn lock_for(&self, therapist: &TherapistId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap();
        Arc::clone(locks.entry(*therapist).or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn same_therapist_shares_one_lock() {
        let locks = TherapistLocks::new();
        let therapist = TherapistId::new();

        let a = locks.lock_for(&therapist);
        let b = locks.lock_for(&therapist);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn different_therapists_do_not_contend() {
        let locks = TherapistLocks::new();

        let a = locks.lock_for(&TherapistId::new());
        let b = locks.lock_for(&TherapistId::new());

        let _held_a = a.lock().await;
        // Must not deadlock.
        let _held_b = b.lock().await;
    }

    #[tokio::test]
    async fn lock_serializes_critical_sections() {
        let locks = Arc::new(TherapistLocks::new());
        let therapist = TherapistId::new();
        let counter = Arc::new(StdMutex::new(0u32));

        let mut tasks = Vec::new();
        for _ in 0..8 {
            let locks = Arc::clone(&locks);
            let counter = Arc::clone(&counter);
            tasks.push(tokio::spawn(async move {
                let lock = locks.lock_for(&therapist);
                let _guard = lock.lock().await;
                let before = *counter.lock().unwrap();
                tokio::task::yield_now().await;
                *counter.lock().unwrap() = before + 1;
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(*counter.lock().unwrap(), 8);
    }
}
