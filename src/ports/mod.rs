//! Ports - contracts between the application core and the outside world.
//!
//! Each port is an `async_trait` consumed through `Arc<dyn ...>`. Adapters
//! under `crate::adapters` provide REST, Postgres, and in-memory
//! implementations.

mod notifier;
mod payment_gateway;
mod session_store;
mod therapist_directory;

pub use notifier::{Notification, NotificationKind, Notifier};
pub use payment_gateway::{
    PaymentError, PaymentErrorCode, PaymentGateway, PaymentRecord, PaymentStatus, RefundReceipt,
    RefundRequest,
};
pub use session_store::SessionStore;
pub use therapist_directory::TherapistDirectory;
