//! Read-only views of the timer handed to the presentation layer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{TimerPhase, TimerState};
use crate::utils::format_time;

pub const EXPIRY_TITLE: &str = "Time's up!";
pub const EXPIRY_BODY: &str = "Your focus session is over. Take a break, then get back to it.";

/// Everything the presentation layer renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub duration_input: String,
    pub seconds_remaining: u64,
    /// `seconds_remaining` as `MM:SS`
    pub formatted: String,
    pub running: bool,
    pub paused: bool,
    pub phase: TimerPhase,
}

impl From<&TimerState> for TimerSnapshot {
    fn from(state: &TimerState) -> Self {
        Self {
            duration_input: state.duration_input().to_string(),
            seconds_remaining: state.seconds_remaining(),
            formatted: format_time(state.seconds_remaining()),
            running: state.is_running(),
            paused: state.is_paused(),
            phase: state.phase(),
        }
    }
}

/// Alert raised once when a countdown runs out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryNotice {
    pub title: String,
    pub body: String,
    pub expired_at: DateTime<Utc>,
}

impl ExpiryNotice {
    pub fn now() -> Self {
        Self {
            title: EXPIRY_TITLE.to_string(),
            body: EXPIRY_BODY.to_string(),
            expired_at: Utc::now(),
        }
    }
}

/// Outcome of a user intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentResult {
    /// The intent changed the timer
    Applied(TimerSnapshot),
    /// The intent was a no-op (invalid input or a guarded pause)
    Ignored(TimerSnapshot),
}

impl IntentResult {
    pub fn is_applied(&self) -> bool {
        matches!(self, IntentResult::Applied(_))
    }

    pub fn snapshot(&self) -> &TimerSnapshot {
        match self {
            IntentResult::Applied(snapshot) | IntentResult::Ignored(snapshot) => snapshot,
        }
    }

    pub fn into_snapshot(self) -> TimerSnapshot {
        match self {
            IntentResult::Applied(snapshot) | IntentResult::Ignored(snapshot) => snapshot,
        }
    }
}
