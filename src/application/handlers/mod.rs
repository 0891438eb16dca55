//! Command and query handlers.

pub mod scheduling;
