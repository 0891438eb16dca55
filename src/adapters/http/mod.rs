//! HTTP adapters - REST API implementations.

pub mod error;
pub mod sessions;

pub use sessions::{sessions_router, SessionHandlers};
