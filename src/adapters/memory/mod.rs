//! In-memory adapters for tests and local development.

mod notifier;
mod session_store;

pub use notifier::InMemoryNotifier;
pub use session_store::InMemorySessionStore;
