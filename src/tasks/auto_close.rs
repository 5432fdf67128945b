//! Auto-Close Task
//!
//! Background task that periodically closes expired auctions.
//!
//! The task is started explicitly by the caller and owns the only place where
//! its closer passes run: timer ticks and manual triggers are handled one at a
//! time by the same loop, so passes from one task never overlap.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::auction::{current_timestamp, ExpirationCloser};
use crate::config::check_period;
use crate::error::{AuctionError, Result};

const COMMAND_BUFFER: usize = 16;

/// Requests sent from [`AutoCloseTrigger`] to the running task.
#[derive(Debug)]
enum AutoCloseCommand {
    RunNow {
        response: oneshot::Sender<Result<u64>>,
    },
}

/// Lifecycle state of an auto-close task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Running,
    Stopped,
}

// == Auto-Close Trigger ==
/// Cloneable handle for requesting an immediate pass from the task.
#[derive(Debug, Clone)]
pub struct AutoCloseTrigger {
    commands: mpsc::Sender<AutoCloseCommand>,
    cancel_token: CancellationToken,
}

impl AutoCloseTrigger {
    /// Whether the task behind this trigger still accepts work.
    pub fn is_active(&self) -> bool {
        !self.cancel_token.is_cancelled() && !self.commands.is_closed()
    }

    /// Runs one pass through the task and waits for its result.
    ///
    /// Fails with `SchedulerStopped` once the task has been cancelled.
    pub async fn trigger(&self) -> Result<u64> {
        if self.cancel_token.is_cancelled() {
            return Err(AuctionError::SchedulerStopped);
        }

        let (response, result) = oneshot::channel();
        self.commands
            .send(AutoCloseCommand::RunNow { response })
            .await
            .map_err(|_| AuctionError::SchedulerStopped)?;

        result.await.map_err(|_| AuctionError::SchedulerStopped)?
    }
}

// == Auto-Close Handle ==
/// Owner handle for a running auto-close task.
#[derive(Debug)]
pub struct AutoCloseHandle {
    trigger: AutoCloseTrigger,
    cancel_token: CancellationToken,
    join_handle: JoinHandle<()>,
    period: Duration,
}

impl AutoCloseHandle {
    /// Tick period of the task.
    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn state(&self) -> SchedulerState {
        if self.cancel_token.is_cancelled() || self.join_handle.is_finished() {
            SchedulerState::Stopped
        } else {
            SchedulerState::Running
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == SchedulerState::Running
    }

    /// Returns a cloneable trigger for manual passes.
    pub fn trigger_handle(&self) -> AutoCloseTrigger {
        self.trigger.clone()
    }

    /// Runs one pass now. See [`AutoCloseTrigger::trigger`].
    pub async fn trigger(&self) -> Result<u64> {
        self.trigger.trigger().await
    }

    /// Stops the task and waits for it to exit. A pass already in progress
    /// runs to completion first.
    pub async fn shutdown(self) {
        self.cancel_token.cancel();
        if let Err(err) = self.join_handle.await {
            warn!(error = %err, "Auto-close task ended abnormally");
        }
    }

    /// Aborts the task immediately, without letting a running pass finish.
    pub fn abort(&self) {
        self.cancel_token.cancel();
        self.join_handle.abort();
    }
}

/// Spawns the background task that closes expired auctions.
///
/// The first pass runs one full period after spawning; later passes follow
/// every `check_period(closer.interval())`. The task stops when `parent_token`
/// or the returned handle is cancelled.
///
/// # Arguments
/// * `closer` - Closer shared with the rest of the service
/// * `parent_token` - Root cancellation token; the task listens on a child of it
///
/// # Example
/// ```ignore
/// let closer = Arc::new(ExpirationCloser::new(store, Duration::from_secs(300)));
/// let handle = spawn_auto_close_task(closer, &CancellationToken::new());
/// // Later, during shutdown:
/// handle.shutdown().await;
/// ```
pub fn spawn_auto_close_task(
    closer: Arc<ExpirationCloser>,
    parent_token: &CancellationToken,
) -> AutoCloseHandle {
    let period = check_period(closer.interval());
    let cancel_token = parent_token.child_token();
    let (commands, mut command_rx) = mpsc::channel(COMMAND_BUFFER);
    let first_tick = Instant::now() + period;

    let task_token = cancel_token.clone();
    let join_handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(first_tick, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            period_secs = period.as_secs(),
            interval_secs = closer.interval().as_secs(),
            "Auto-close auction task started"
        );

        loop {
            tokio::select! {
                biased;

                _ = task_token.cancelled() => {
                    info!("Auto-close auction task stopped");
                    break;
                }
                _ = ticker.tick() => {
                    closer.close_expired(current_timestamp()).await;
                }
                Some(command) = command_rx.recv() => {
                    match command {
                        AutoCloseCommand::RunNow { response } => {
                            let result = closer.try_close_expired(current_timestamp()).await;
                            let _ = response.send(result);
                        }
                    }
                }
            }
        }
    });

    AutoCloseHandle {
        trigger: AutoCloseTrigger {
            commands,
            cancel_token: cancel_token.clone(),
        },
        cancel_token,
        join_handle,
        period,
    }
}
