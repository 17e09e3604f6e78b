//! Timer lifecycle for reminder evaluation and clock refresh.
//!
//! # Responsibility
//! - Run the evaluation ticker and the clock ticker as two independent tasks.
//! - Tear both down together on `stop()` or when the scheduler is dropped.
//!
//! # Invariants
//! - At most one pair of tickers runs per scheduler.
//! - Ticks never hold the session lock across an await point other than the
//!   lock acquisition itself.
//! - Missed ticks are delayed, not replayed in a burst.

use crate::config::ReminderConfig;
use crate::reminder::clock::Clock;
use crate::repo::kv_repo::KeyValueStore;
use crate::session::SharedSession;
use chrono::NaiveDateTime;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

#[derive(Debug)]
pub enum SchedulerError {
    AlreadyRunning,
    /// `start()` was called outside a tokio runtime.
    NoRuntime,
    Join(String),
}

impl Display for SchedulerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyRunning => write!(f, "reminder scheduler already running"),
            Self::NoRuntime => write!(f, "reminder scheduler requires a tokio runtime"),
            Self::Join(message) => write!(f, "reminder ticker task failed: {message}"),
        }
    }
}

impl Error for SchedulerError {}

struct RunningTimers {
    cancel_token: CancellationToken,
    evaluator: JoinHandle<()>,
    clock: JoinHandle<()>,
}

/// Owns the evaluation and clock timers bound to one session.
pub struct ReminderScheduler<S: KeyValueStore + Send + 'static> {
    session: SharedSession<S>,
    clock: Arc<dyn Clock>,
    config: ReminderConfig,
    clock_tx: Arc<watch::Sender<Option<NaiveDateTime>>>,
    running: Option<RunningTimers>,
}

impl<S: KeyValueStore + Send + 'static> ReminderScheduler<S> {
    pub fn new(session: SharedSession<S>, clock: Arc<dyn Clock>, config: ReminderConfig) -> Self {
        let (clock_tx, _) = watch::channel(None);
        Self {
            session,
            clock,
            config,
            clock_tx: Arc::new(clock_tx),
            running: None,
        }
    }

    /// Spawns both tickers on the current tokio runtime.
    pub fn start(&mut self) -> Result<(), SchedulerError> {
        if self.running.is_some() {
            return Err(SchedulerError::AlreadyRunning);
        }
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| SchedulerError::NoRuntime)?;

        let cancel_token = CancellationToken::new();
        let evaluator = runtime.spawn(evaluator_loop(
            self.session.clone(),
            self.clock.clone(),
            self.config.evaluate_every,
            cancel_token.clone(),
        ));
        let clock = runtime.spawn(clock_loop(
            self.clock_tx.clone(),
            self.clock.clone(),
            self.config.clock_every,
            cancel_token.clone(),
        ));

        self.running = Some(RunningTimers {
            cancel_token,
            evaluator,
            clock,
        });
        info!(
            "event=scheduler_start module=reminder status=ok evaluate_every_ms={} clock_every_ms={}",
            self.config.evaluate_every.as_millis(),
            self.config.clock_every.as_millis()
        );
        Ok(())
    }

    /// Cancels both tickers and waits for them to exit. Idempotent.
    pub async fn stop(&mut self) -> Result<(), SchedulerError> {
        let Some(timers) = self.running.take() else {
            return Ok(());
        };
        timers.cancel_token.cancel();

        let evaluator_result = timers.evaluator.await;
        let clock_result = timers.clock.await;
        info!("event=scheduler_stop module=reminder status=ok");

        evaluator_result
            .and(clock_result)
            .map_err(|err| SchedulerError::Join(err.to_string()))
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Receiver of the latest clock reading; `None` while the tickers are stopped.
    pub fn subscribe_clock(&self) -> watch::Receiver<Option<NaiveDateTime>> {
        self.clock_tx.subscribe()
    }
}

impl<S: KeyValueStore + Send + 'static> Drop for ReminderScheduler<S> {
    fn drop(&mut self) {
        if let Some(timers) = self.running.take() {
            timers.cancel_token.cancel();
        }
    }
}

async fn evaluator_loop<S: KeyValueStore + Send + 'static>(
    session: SharedSession<S>,
    clock: Arc<dyn Clock>,
    period: Duration,
    cancel_token: CancellationToken,
) {
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel_token.cancelled() => break,
            _ = ticker.tick() => {
                let now = clock.now();
                let fired = session.lock().await.evaluate(now);
                if !fired.is_empty() {
                    info!(
                        "event=reminder_tick module=reminder status=ok fired={} at={}",
                        fired.len(),
                        now.format("%H:%M:%S")
                    );
                }
            }
        }
    }
}

async fn clock_loop(
    clock_tx: Arc<watch::Sender<Option<NaiveDateTime>>>,
    clock: Arc<dyn Clock>,
    period: Duration,
    cancel_token: CancellationToken,
) {
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel_token.cancelled() => break,
            _ = ticker.tick() => {
                clock_tx.send_replace(Some(clock.now()));
            }
        }
    }

    clock_tx.send_replace(None);
}
