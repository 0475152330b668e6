//! Main application state management

use std::{sync::Mutex, time::Instant};
use chrono::{DateTime, Utc};

use super::TimerController;
use crate::config::TimerSettings;

/// Application state shared with the HTTP handlers
#[derive(Debug)]
pub struct AppState {
    /// The one countdown this process serves
    pub controller: TimerController,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<(String, DateTime<Utc>)>>,
}

impl AppState {
    /// Create a new AppState around an idle controller
    pub fn new(port: u16, host: String, settings: TimerSettings) -> Self {
        Self {
            controller: TimerController::new(settings),
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
        }
    }

    /// Remember the most recent user intent
    pub fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some((action.to_string(), Utc::now()));
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        match self.last_action.lock().ok().and_then(|a| a.clone()) {
            Some((action, at)) => (Some(action), Some(at)),
            None => (None, None),
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        format_uptime(self.start_time.elapsed().as_secs())
    }
}

fn format_uptime(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
