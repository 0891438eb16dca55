//! Scheduling domain - the session aggregate, its state machine, and the
//! conflict logic that guards a therapist's calendar.

mod availability;
pub mod conflict;
mod errors;
mod modality;
mod session;
mod status;
mod time_slot;
mod video_link;

pub use availability::AvailabilityWindow;
pub use errors::SchedulingError;
pub use modality::Modality;
pub use session::Session;
pub use status::SessionStatus;
pub use time_slot::TimeSlot;
pub use video_link::VideoLink;
