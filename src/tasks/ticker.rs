//! Tick scheduler for a running countdown

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::{
    config::ClockMode,
    state::{controller::TimerCore, TickOutcome},
};

/// Longest deadline a scheduler will arm; longer countdowns stay clamped here
pub(crate) const MAX_DEADLINE: Duration = Duration::from_secs(60 * 60 * 24 * 365 * 30);

/// Parameters of one scheduler instance
#[derive(Debug, Clone, Copy)]
pub(crate) struct TickerRun {
    pub generation: u64,
    pub period: Duration,
    pub clock: ClockMode,
    /// When the countdown runs out; only read in deadline mode
    pub deadline: Instant,
}

/// Drive the countdown until it runs out, is stopped, or this scheduler is
/// replaced by a newer one
pub(crate) async fn ticker_task(core: Arc<TimerCore>, run: TickerRun) {
    let period = run.period.max(Duration::from_millis(1));
    // First tick lands one full period after arming
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    debug!(
        "Scheduler {} armed: period={:?}, clock={:?}",
        run.generation, period, run.clock
    );

    loop {
        interval.tick().await;

        let applied = core.apply_tick(run.generation, |state| match run.clock {
            ClockMode::Counter => state.tick(),
            ClockMode::Deadline => state.sync_remaining(whole_seconds_until(run.deadline)),
        });

        match applied {
            Ok(Some(TickOutcome::Decremented(seconds))) => {
                debug!("Tick: {} seconds remaining", seconds);
            }
            Ok(Some(TickOutcome::Expired)) => {
                info!("Countdown expired");
                break;
            }
            Ok(Some(TickOutcome::Halted | TickOutcome::Idle)) => {
                debug!("Scheduler {} found the timer stopped", run.generation);
                break;
            }
            Ok(None) => {
                debug!("Scheduler {} superseded", run.generation);
                break;
            }
            Err(e) => {
                error!("Failed to apply tick: {}", e);
                break;
            }
        }
    }
}

/// Whole seconds left before `deadline`, rounded up
fn whole_seconds_until(deadline: Instant) -> u64 {
    let left = deadline.saturating_duration_since(Instant::now());
    left.as_secs() + u64::from(left.subsec_nanos() > 0)
}
