//! Background tasks module
//!
//! This module contains the countdown tick scheduler and the task that
//! presents expiry alerts.

pub mod expiry_alert;
pub(crate) mod ticker;

// Re-export main functions
pub use expiry_alert::expiry_alert_task;
