//! Countdown state machine

use serde::{Deserialize, Serialize};

/// Duration input the timer holds at process start
pub const DEFAULT_DURATION_INPUT: &str = "10";

/// Observable phase of the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
    /// Countdown ran out. Looks like `Idle` at zero seconds, but is only
    /// reachable by ticking down, never by reset.
    Expired,
}

impl TimerPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerPhase::Idle => "idle",
            TimerPhase::Running => "running",
            TimerPhase::Paused => "paused",
            TimerPhase::Expired => "expired",
        }
    }
}

/// What a single tick did to the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer was not running; nothing changed
    Idle,
    /// Countdown moved to the contained number of seconds
    Decremented(u64),
    /// Countdown reached zero on this tick
    Expired,
    /// Timer was running with nothing left; stopped without expiring
    Halted,
}

/// Result of toggling pause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseToggle {
    Ignored,
    Paused,
    Resumed,
}

/// Parse minutes the lenient way a numeric text field is read: leading
/// whitespace, an optional sign, then the leading run of digits. Anything
/// after the digits is ignored.
///
/// Returns `None` for input without digits, for values `<= 0` and for values
/// whose length in seconds does not fit a `u64`.
pub fn parse_minutes(input: &str) -> Option<u64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || negative {
        return None;
    }

    let minutes: u64 = rest[..digits].parse().ok()?;
    if minutes == 0 {
        return None;
    }
    minutes.checked_mul(60).map(|_| minutes)
}

/// Length in seconds of a duration input, if it is valid
pub fn duration_seconds(input: &str) -> Option<u64> {
    parse_minutes(input).map(|minutes| minutes * 60)
}

/// Countdown state: the raw input plus the live countdown.
///
/// Never running and paused at the same time. Seconds only go down while
/// running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    duration_input: String,
    seconds_remaining: u64,
    running: bool,
    paused: bool,
    expired: bool,
}

impl TimerState {
    /// Create an idle timer sized from the given input (zero if invalid)
    pub fn new(duration_input: impl Into<String>) -> Self {
        let duration_input = duration_input.into();
        let seconds_remaining = duration_seconds(&duration_input).unwrap_or(0);

        Self {
            duration_input,
            seconds_remaining,
            running: false,
            paused: false,
            expired: false,
        }
    }

    pub fn duration_input(&self) -> &str {
        &self.duration_input
    }

    pub fn seconds_remaining(&self) -> u64 {
        self.seconds_remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn phase(&self) -> TimerPhase {
        if self.running {
            TimerPhase::Running
        } else if self.paused {
            TimerPhase::Paused
        } else if self.expired {
            TimerPhase::Expired
        } else {
            TimerPhase::Idle
        }
    }

    /// Store raw input. Validation waits until start or reset.
    pub fn set_duration_input(&mut self, input: impl Into<String>) {
        self.duration_input = input.into();
    }

    /// Begin a fresh run from the current input. Returns `false` and leaves
    /// everything untouched when the input is invalid.
    pub fn start(&mut self) -> bool {
        let Some(seconds) = duration_seconds(&self.duration_input) else {
            return false;
        };

        self.seconds_remaining = seconds;
        self.running = true;
        self.paused = false;
        self.expired = false;
        true
    }

    /// Pause a running countdown or resume a paused one.
    ///
    /// Ignored while the countdown sits at the starting value of the current
    /// input, and when there is nothing left to count.
    pub fn toggle_pause(&mut self) -> PauseToggle {
        if self.seconds_remaining == 0
            || duration_seconds(&self.duration_input) == Some(self.seconds_remaining)
        {
            return PauseToggle::Ignored;
        }

        self.paused = !self.paused;
        self.running = !self.paused;
        if self.paused {
            PauseToggle::Paused
        } else {
            PauseToggle::Resumed
        }
    }

    /// Stop and rewind to the current input, or to zero if it is invalid
    pub fn reset(&mut self) {
        self.running = false;
        self.paused = false;
        self.expired = false;
        self.seconds_remaining = duration_seconds(&self.duration_input).unwrap_or(0);
    }

    /// Advance the countdown by one unit
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }
        if self.seconds_remaining == 0 {
            self.running = false;
            return TickOutcome::Halted;
        }
        if self.seconds_remaining <= 1 {
            self.expire();
            return TickOutcome::Expired;
        }

        self.seconds_remaining -= 1;
        TickOutcome::Decremented(self.seconds_remaining)
    }

    /// Move the countdown to `remaining` seconds measured against a deadline.
    /// The countdown never moves up.
    pub fn sync_remaining(&mut self, remaining: u64) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }
        if self.seconds_remaining == 0 {
            self.running = false;
            return TickOutcome::Halted;
        }
        if remaining == 0 {
            self.expire();
            return TickOutcome::Expired;
        }

        self.seconds_remaining = self.seconds_remaining.min(remaining);
        TickOutcome::Decremented(self.seconds_remaining)
    }

    fn expire(&mut self) {
        self.seconds_remaining = 0;
        self.running = false;
        self.paused = false;
        self.expired = true;
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_INPUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(input: &str) -> TimerState {
        let mut state = TimerState::new(input);
        assert!(state.start());
        state
    }

    #[test]
    fn test_default_state() {
        let state = TimerState::default();
        assert_eq!(state.duration_input(), "10");
        assert_eq!(state.seconds_remaining(), 600);
        assert!(!state.is_running());
        assert!(!state.is_paused());
        assert_eq!(state.phase(), TimerPhase::Idle);
    }

    #[test]
    fn test_parse_minutes() {
        assert_eq!(parse_minutes("10"), Some(10));
        assert_eq!(parse_minutes("  7"), Some(7));
        assert_eq!(parse_minutes("+3"), Some(3));
        assert_eq!(parse_minutes("12abc"), Some(12));
        assert_eq!(parse_minutes("3.7"), Some(3));
        assert_eq!(parse_minutes("0"), None);
        assert_eq!(parse_minutes("-5"), None);
        assert_eq!(parse_minutes("abc"), None);
        assert_eq!(parse_minutes(""), None);
        assert_eq!(parse_minutes("-"), None);
        assert_eq!(parse_minutes("99999999999999999999999"), None);
        assert_eq!(parse_minutes(&u64::MAX.to_string()), None);
    }

    #[test]
    fn test_set_duration_input_does_not_touch_countdown() {
        let mut state = TimerState::default();
        state.set_duration_input("abc");
        assert_eq!(state.duration_input(), "abc");
        assert_eq!(state.seconds_remaining(), 600);
        assert!(!state.is_running());
    }

    #[test]
    fn test_start_with_valid_input() {
        let state = started("10");
        assert_eq!(state.seconds_remaining(), 600);
        assert!(state.is_running());
        assert!(!state.is_paused());
        assert_eq!(state.phase(), TimerPhase::Running);
    }

    #[test]
    fn test_start_with_invalid_input_is_ignored() {
        for input in ["0", "-5", "abc"] {
            let mut state = TimerState::default();
            state.set_duration_input(input);
            let before = state.clone();

            assert!(!state.start());
            assert_eq!(state, before, "input {:?} changed the state", input);
        }
    }

    #[test]
    fn test_invalid_start_keeps_a_running_countdown() {
        let mut state = started("1");
        state.tick();
        state.set_duration_input("nope");

        assert!(!state.start());
        assert_eq!(state.seconds_remaining(), 59);
        assert!(state.is_running());
    }

    #[test]
    fn test_start_clears_pause() {
        let mut state = started("2");
        state.tick();
        assert_eq!(state.toggle_pause(), PauseToggle::Paused);

        assert!(state.start());
        assert!(!state.is_paused());
        assert!(state.is_running());
        assert_eq!(state.seconds_remaining(), 120);
    }

    #[test]
    fn test_one_minute_runs_out_after_sixty_ticks() {
        let mut state = started("1");
        let mut expirations = 0;

        for _ in 0..60 {
            if state.tick() == TickOutcome::Expired {
                expirations += 1;
            }
        }

        assert_eq!(state.seconds_remaining(), 0);
        assert!(!state.is_running());
        assert_eq!(state.phase(), TimerPhase::Expired);
        assert_eq!(expirations, 1);

        assert_eq!(state.tick(), TickOutcome::Idle);
    }

    #[test]
    fn test_pause_right_after_start_is_ignored() {
        let mut state = started("5");
        assert_eq!(state.toggle_pause(), PauseToggle::Ignored);
        assert!(state.is_running());
        assert!(!state.is_paused());
    }

    #[test]
    fn test_pause_and_resume_after_a_tick() {
        let mut state = started("5");
        state.tick();

        assert_eq!(state.toggle_pause(), PauseToggle::Paused);
        assert!(state.is_paused());
        assert!(!state.is_running());
        assert_eq!(state.phase(), TimerPhase::Paused);

        assert_eq!(state.toggle_pause(), PauseToggle::Resumed);
        assert!(!state.is_paused());
        assert!(state.is_running());
        assert_eq!(state.seconds_remaining(), 299);
    }

    #[test]
    fn test_pause_guard_follows_current_input() {
        let mut state = TimerState::default();
        assert_eq!(state.toggle_pause(), PauseToggle::Ignored);

        // A new input makes the untouched 600 seconds no longer pristine
        state.set_duration_input("5");
        assert_eq!(state.toggle_pause(), PauseToggle::Paused);
        assert!(!state.is_running());
    }

    #[test]
    fn test_pause_after_expiry_is_ignored() {
        let mut state = started("1");
        for _ in 0..60 {
            state.tick();
        }

        assert_eq!(state.toggle_pause(), PauseToggle::Ignored);
        assert_eq!(state.phase(), TimerPhase::Expired);
    }

    #[test]
    fn test_no_decrement_while_stopped() {
        let mut state = started("1");
        state.tick();
        state.toggle_pause();

        for _ in 0..1000 {
            assert_eq!(state.tick(), TickOutcome::Idle);
        }
        assert_eq!(state.seconds_remaining(), 59);

        let mut idle = TimerState::default();
        for _ in 0..1000 {
            idle.tick();
        }
        assert_eq!(idle.seconds_remaining(), 600);
    }

    #[test]
    fn test_reset_after_partial_countdown() {
        let mut state = started("3");
        for _ in 0..42 {
            state.tick();
        }
        state.reset();

        assert_eq!(state.seconds_remaining(), 180);
        assert!(!state.is_running());
        assert_eq!(state.phase(), TimerPhase::Idle);
    }

    #[test]
    fn test_reset_with_invalid_input_goes_to_zero() {
        let mut state = started("3");
        state.set_duration_input("abc");
        state.reset();

        assert_eq!(state.seconds_remaining(), 0);
        assert!(!state.is_running());
        // Zero via reset is not an expiry
        assert_eq!(state.phase(), TimerPhase::Idle);
    }

    #[test]
    fn test_reset_clears_pause() {
        let mut state = started("3");
        state.tick();
        state.toggle_pause();
        state.reset();

        assert!(!state.is_paused());
        assert_eq!(state.phase(), TimerPhase::Idle);
    }

    #[test]
    fn test_sync_remaining() {
        let mut state = started("1");

        assert_eq!(state.sync_remaining(45), TickOutcome::Decremented(45));
        // Never moves back up
        assert_eq!(state.sync_remaining(50), TickOutcome::Decremented(45));
        assert_eq!(state.sync_remaining(1), TickOutcome::Decremented(1));
        assert_eq!(state.sync_remaining(0), TickOutcome::Expired);
        assert_eq!(state.phase(), TimerPhase::Expired);
        assert_eq!(state.sync_remaining(0), TickOutcome::Idle);
    }
}
