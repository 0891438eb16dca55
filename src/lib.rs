//! MindfulCare - therapy session booking backend.
//!
//! Coordinates the session lifecycle (booking, payment confirmation,
//! cancellation with refund, completion) across the therapist, payment,
//! and notification services.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
