//! Timer controller: owns the countdown and its tick scheduler

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};
use tokio::{
    runtime::Handle,
    sync::{broadcast, watch},
    task::JoinHandle,
    time::Instant,
};
use tracing::{debug, info, warn};

use super::{ExpiryNotice, IntentResult, PauseToggle, TickOutcome, TimerSnapshot, TimerState};
use crate::{
    config::{ClockMode, TimerSettings},
    error::Result,
    tasks::ticker::{ticker_task, TickerRun, MAX_DEADLINE},
};

type TickerSlot = Option<JoinHandle<()>>;

/// State guarded by a single lock so ticks and intents never interleave
#[derive(Debug)]
pub(crate) struct Shared {
    state: TimerState,
    /// Bumped whenever a scheduler is started or canceled. A tick carrying an
    /// older generation belongs to a replaced scheduler and is dropped.
    generation: u64,
    /// Deadline of the armed scheduler
    deadline: Option<Instant>,
    /// Exact time left when a deadline run was paused
    carry: Option<Duration>,
    last_expiry: Option<ExpiryNotice>,
}

/// The part of the controller the tick scheduler shares
#[derive(Debug)]
pub(crate) struct TimerCore {
    shared: Mutex<Shared>,
    snapshot_tx: watch::Sender<TimerSnapshot>,
    expiry_tx: broadcast::Sender<ExpiryNotice>,
}

impl TimerCore {
    fn lock(&self) -> Result<MutexGuard<'_, Shared>> {
        Ok(self.shared.lock()?)
    }

    fn publish(&self, state: &TimerState) -> TimerSnapshot {
        let snapshot = TimerSnapshot::from(state);
        self.snapshot_tx.send_replace(snapshot.clone());
        snapshot
    }

    /// Apply one tick for the scheduler of `generation`.
    ///
    /// Returns `None` when that scheduler has been superseded.
    pub(crate) fn apply_tick<F>(&self, generation: u64, advance: F) -> Result<Option<TickOutcome>>
    where
        F: FnOnce(&mut TimerState) -> TickOutcome,
    {
        let mut shared = self.lock()?;
        if shared.generation != generation {
            return Ok(None);
        }

        let outcome = advance(&mut shared.state);
        if outcome != TickOutcome::Idle {
            self.publish(&shared.state);
        }

        if outcome == TickOutcome::Expired {
            let notice = ExpiryNotice::now();
            shared.last_expiry = Some(notice.clone());
            if let Err(e) = self.expiry_tx.send(notice) {
                debug!("No expiry listeners: {}", e);
            }
        }

        Ok(Some(outcome))
    }
}

/// Owns the countdown state and at most one running tick scheduler.
///
/// `start` and resuming via `toggle_pause` spawn the scheduler on the current
/// Tokio runtime; outside one they fail with [`crate::TimerError::NoRuntime`]
/// and leave the timer untouched.
#[derive(Debug)]
pub struct TimerController {
    core: Arc<TimerCore>,
    settings: TimerSettings,
    ticker: Mutex<TickerSlot>,
}

impl TimerController {
    /// Create an idle controller sized from the settings' default input
    pub fn new(settings: TimerSettings) -> Self {
        let state = TimerState::new(settings.default_input.clone());
        let (snapshot_tx, _) = watch::channel(TimerSnapshot::from(&state));
        let (expiry_tx, _) = broadcast::channel(16);

        Self {
            core: Arc::new(TimerCore {
                shared: Mutex::new(Shared {
                    state,
                    generation: 0,
                    deadline: None,
                    carry: None,
                    last_expiry: None,
                }),
                snapshot_tx,
                expiry_tx,
            }),
            settings,
            ticker: Mutex::new(None),
        }
    }

    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    /// Current state of the countdown
    pub fn snapshot(&self) -> Result<TimerSnapshot> {
        let shared = self.core.lock()?;
        Ok(TimerSnapshot::from(&shared.state))
    }

    /// Most recent expiry alert, if any run has finished
    pub fn last_expiry(&self) -> Result<Option<ExpiryNotice>> {
        let shared = self.core.lock()?;
        Ok(shared.last_expiry.clone())
    }

    /// Receive a snapshot after every change
    pub fn subscribe_snapshots(&self) -> watch::Receiver<TimerSnapshot> {
        self.core.snapshot_tx.subscribe()
    }

    /// Receive an alert every time a countdown runs out
    pub fn subscribe_expiry(&self) -> broadcast::Receiver<ExpiryNotice> {
        self.core.expiry_tx.subscribe()
    }

    /// Store raw duration input without touching the countdown
    pub fn set_duration_input(&self, input: impl Into<String>) -> Result<TimerSnapshot> {
        let mut shared = self.core.lock()?;
        shared.state.set_duration_input(input);
        debug!("Duration input set to {:?}", shared.state.duration_input());
        Ok(self.core.publish(&shared.state))
    }

    /// Start a fresh countdown from the current input
    pub fn start(&self) -> Result<IntentResult> {
        let mut shared = self.core.lock()?;
        let mut next = shared.state.clone();
        if !next.start() {
            debug!(
                "Ignoring start with invalid duration input {:?}",
                shared.state.duration_input()
            );
            return Ok(IntentResult::Ignored(TimerSnapshot::from(&shared.state)));
        }

        // Everything that can fail happens before the state changes
        let runtime = Handle::try_current()?;
        let mut slot = self.ticker.lock()?;

        shared.state = next;
        shared.carry = None;
        self.arm_ticker(&mut shared, &mut slot, &runtime);
        info!("Countdown started for {} seconds", shared.state.seconds_remaining());
        Ok(IntentResult::Applied(self.core.publish(&shared.state)))
    }

    /// Pause a running countdown or resume a paused one
    pub fn toggle_pause(&self) -> Result<IntentResult> {
        let mut shared = self.core.lock()?;
        let mut next = shared.state.clone();
        match next.toggle_pause() {
            PauseToggle::Ignored => {
                debug!(
                    "Ignoring pause toggle at {} seconds",
                    shared.state.seconds_remaining()
                );
                return Ok(IntentResult::Ignored(TimerSnapshot::from(&shared.state)));
            }
            PauseToggle::Paused => {
                let mut slot = self.ticker.lock()?;
                shared.state = next;
                if self.settings.clock == ClockMode::Deadline {
                    shared.carry = shared
                        .deadline
                        .map(|deadline| deadline.saturating_duration_since(Instant::now()));
                }
                self.disarm_ticker(&mut shared, &mut slot);
                info!("Countdown paused at {} seconds", shared.state.seconds_remaining());
            }
            PauseToggle::Resumed => {
                let runtime = Handle::try_current()?;
                let mut slot = self.ticker.lock()?;
                shared.state = next;
                self.arm_ticker(&mut shared, &mut slot, &runtime);
                info!("Countdown resumed at {} seconds", shared.state.seconds_remaining());
            }
        }

        Ok(IntentResult::Applied(self.core.publish(&shared.state)))
    }

    /// Stop and rewind to the current input (zero if it is invalid)
    pub fn reset(&self) -> Result<IntentResult> {
        let mut shared = self.core.lock()?;
        let mut slot = self.ticker.lock()?;

        shared.state.reset();
        shared.carry = None;
        self.disarm_ticker(&mut shared, &mut slot);
        info!("Countdown reset to {} seconds", shared.state.seconds_remaining());
        Ok(IntentResult::Applied(self.core.publish(&shared.state)))
    }

    /// Replace whatever scheduler is running with a new one.
    ///
    /// A deadline run resumes from the exact time carried over from its pause
    /// rather than the rounded-up seconds.
    fn arm_ticker(&self, shared: &mut Shared, slot: &mut TickerSlot, runtime: &Handle) {
        let left = shared
            .carry
            .take()
            .unwrap_or_else(|| Duration::from_secs(shared.state.seconds_remaining()));
        let deadline = Instant::now() + left.min(MAX_DEADLINE);

        shared.generation += 1;
        shared.deadline = Some(deadline);
        let run = TickerRun {
            generation: shared.generation,
            period: self.settings.tick_interval,
            clock: self.settings.clock,
            deadline,
        };

        if let Some(previous) = slot.take() {
            previous.abort();
        }
        *slot = Some(runtime.spawn(ticker_task(Arc::clone(&self.core), run)));
    }

    /// Cancel the scheduler, if any. Safe to call repeatedly.
    fn disarm_ticker(&self, shared: &mut Shared, slot: &mut TickerSlot) {
        shared.generation += 1;
        shared.deadline = None;
        if let Some(handle) = slot.take() {
            handle.abort();
        }
    }
}

impl Drop for TimerController {
    fn drop(&mut self) {
        let slot = self.ticker.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = slot.take() {
            if !handle.is_finished() {
                warn!("Timer controller dropped with an active scheduler, canceling it");
            }
            handle.abort();
        }
    }
}
