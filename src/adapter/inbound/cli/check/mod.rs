//! Connectivity and delivery check command handlers.

pub mod api;
pub mod telegram;
