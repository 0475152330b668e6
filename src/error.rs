//! Error types for the timer controller

use std::sync::PoisonError;
use tokio::runtime::TryCurrentError;

/// Failures that are not part of the timer's own contract.
///
/// Invalid duration input is never an error: intents with bad input are
/// reported as ignored (see [`crate::state::IntentResult`]).
#[derive(Debug, thiserror::Error)]
pub enum TimerError {
    #[error("Failed to lock timer state: {0}")]
    StatePoisoned(String),

    #[error("No Tokio runtime to run the tick scheduler on: {0}")]
    NoRuntime(#[from] TryCurrentError),
}

impl<T> From<PoisonError<T>> for TimerError {
    fn from(err: PoisonError<T>) -> Self {
        TimerError::StatePoisoned(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TimerError>;
