//! Adapters - concrete implementations of the ports plus the inbound HTTP
//! surface.

pub mod http;
pub mod memory;
pub mod notification;
pub mod payment;
pub mod postgres;
pub mod therapist;
