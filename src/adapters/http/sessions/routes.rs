//! HTTP routes for session endpoints.

use axum::routing::{get, post, put};
use axum::Router;

use super::handlers::{
    attach_note, book_session, cancel_session, complete_session, confirm_session, get_session,
    list_by_patient, list_by_therapist, preview_price, SessionHandlers,
};

/// Creates the session router with all endpoints.
pub fn sessions_router(handlers: SessionHandlers) -> Router {
    Router::new()
        .route("/", post(book_session))
        .route("/preview-price", get(preview_price))
        .route("/:id", get(get_session))
        .route("/:id/confirm", post(confirm_session))
        .route("/:id/cancel", post(cancel_session))
        .route("/:id/complete", post(complete_session))
        .route("/:id/note", put(attach_note))
        .route("/therapist/:id", get(list_by_therapist))
        .route("/patient/:id", get(list_by_patient))
        .with_state(handlers)
}
