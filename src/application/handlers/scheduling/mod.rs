//! Session lifecycle handlers.
//!
//! One handler per operation. Handlers own `Arc<dyn Port>` collaborators and
//! hold no other state; everything stateful lives behind the ports, apart
//! from the per-therapist booking locks.

mod attach_note;
mod book_session;
mod booking_lock;
mod cancel_session;
mod complete_session;
mod confirm_session;
mod get_session;
mod list_sessions;
mod preview_price;

pub use attach_note::{AttachNoteCommand, AttachNoteHandler};
pub use book_session::{BookSessionCommand, BookSessionHandler};
pub use booking_lock::TherapistLocks;
pub use cancel_session::{CancelSessionCommand, CancelSessionHandler};
pub use complete_session::{CompleteSessionCommand, CompleteSessionHandler};
pub use confirm_session::{ConfirmSessionCommand, ConfirmSessionHandler};
pub use get_session::{GetSessionHandler, GetSessionQuery};
pub use list_sessions::ListSessionsHandler;
pub use preview_price::{PreviewPriceHandler, PreviewPriceQuery, PreviewPriceResult};
