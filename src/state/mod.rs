//! State management module
//!
//! This module contains the countdown state machine, the controller that owns
//! it, and the application state shared with the HTTP layer.

pub mod app_state;
pub mod controller;
pub mod snapshot;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use controller::TimerController;
pub use snapshot::{ExpiryNotice, IntentResult, TimerSnapshot, EXPIRY_BODY, EXPIRY_TITLE};
pub use timer_state::{
    duration_seconds, parse_minutes, PauseToggle, TickOutcome, TimerPhase, TimerState,
    DEFAULT_DURATION_INPUT,
};
