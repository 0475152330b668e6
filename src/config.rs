//! Configuration and CLI argument handling

use std::time::Duration;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::state::DEFAULT_DURATION_INPUT;

/// How a tick advances the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockMode {
    /// Subtract one second for every tick that fires
    #[default]
    Counter,
    /// Recompute the remaining seconds from an absolute deadline on every tick.
    /// Pausing keeps the sub-second remainder, so resuming re-arms the exact
    /// time that was left.
    Deadline,
}

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "focus-timer")]
#[command(about = "A countdown timer controller served to a presentation layer over HTTP")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Initial duration input in minutes
    #[arg(short, long, default_value = DEFAULT_DURATION_INPUT, allow_hyphen_values = true)]
    pub minutes: String,

    /// Tick scheduler interval in milliseconds
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Countdown clock mode
    #[arg(long, value_enum, default_value_t = ClockMode::Counter)]
    pub clock: ClockMode,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Settings for the timer controller
    pub fn timer_settings(&self) -> TimerSettings {
        TimerSettings {
            default_input: self.minutes.clone(),
            tick_interval: Duration::from_millis(self.tick_ms),
            clock: self.clock,
        }
    }
}

/// Controller settings, independent of argument parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerSettings {
    /// Duration input the timer starts with
    pub default_input: String,
    pub tick_interval: Duration,
    pub clock: ClockMode,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            default_input: DEFAULT_DURATION_INPUT.to_string(),
            tick_interval: Duration::from_secs(1),
            clock: ClockMode::Counter,
        }
    }
}
