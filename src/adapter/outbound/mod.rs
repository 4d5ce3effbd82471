//! Outbound adapters (driven side).

pub mod api;
pub mod notifier;
pub mod permission;
