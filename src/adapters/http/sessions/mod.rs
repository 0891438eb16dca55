//! HTTP surface for session endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::SessionHandlers;
pub use routes::sessions_router;
