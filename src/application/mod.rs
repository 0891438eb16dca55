//! Application layer - orchestrates domain operations through the ports.

pub mod handlers;
