//! Infrastructure configuration modules.

pub mod api;
pub mod logging;
pub mod notification;
pub mod poll;
pub mod settings;
pub mod telegram;
