//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    config::ClockMode,
    state::{ExpiryNotice, IntentResult, TimerSnapshot},
};

/// Body of PUT /duration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationRequest {
    pub input: String,
}

/// API response structure for intent endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Timer phase after the intent, or "ignored"
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, timer: TimerSnapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timer,
        }
    }

    /// Create a response that reports the timer's phase
    pub fn applied(message: String, timer: TimerSnapshot) -> Self {
        Self::new(timer.phase.as_str().to_string(), message, timer)
    }

    /// Create a response for an intent that changed nothing
    pub fn ignored(message: String, timer: TimerSnapshot) -> Self {
        Self::new("ignored".to_string(), message, timer)
    }

    /// Build a response from an intent outcome
    pub fn from_intent(result: IntentResult, applied: &str, ignored: &str) -> Self {
        match result {
            IntentResult::Applied(timer) => Self::applied(applied.to_string(), timer),
            IntentResult::Ignored(timer) => Self::ignored(ignored.to_string(), timer),
        }
    }
}

/// Status response with timer and server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerSnapshot,
    pub clock: ClockMode,
    pub tick_interval_ms: u64,
    pub last_expiry: Option<ExpiryNotice>,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
