//! Focus Timer - a single countdown timer controller
//!
//! This library provides the countdown state machine, the controller that
//! drives it with a tick scheduler, and an HTTP bridge for the presentation
//! layer that renders the timer and forwards user intents.

pub mod api;
pub mod config;
pub mod error;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::{ClockMode, Config, TimerSettings};
pub use error::TimerError;
pub use state::{AppState, TimerController, TimerSnapshot};
pub use utils::{format_time, shutdown_signal};
