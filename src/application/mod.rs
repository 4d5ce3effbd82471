//! Application services (use cases).
//!
//! The dashboard state machine, the growth rule behind "new listings"
//! notifications, and the orchestrator that drives every remote read.

pub mod notification;
pub mod orchestrator;
pub mod state;
