//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the REST collaborator and the platform
//! notification capability.

pub mod api;
pub mod notifier;
pub mod permission;
