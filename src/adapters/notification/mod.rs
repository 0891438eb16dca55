//! Notification service adapters.

mod rest_client;

pub use rest_client::RestNotifier;
