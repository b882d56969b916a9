// flux/scheduler.rs
// Runs a flux on its own task at a fixed period.
//
// Cycles run inline in the task loop, so two cycles of the same flux can never
// overlap. Triggers that fall due while a cycle is still running are dropped
// (MissedTickBehavior::Skip). Shutdown is only observed between cycles.

use flux_common::Entity;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use super::poller::Poller;

const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Running,
    Stopped,
}

pub struct Scheduler<E: Entity> {
    name: String,
    state: SchedulerState,
    shutdown_tx: watch::Sender<bool>,
    task: Option<JoinHandle<Poller<E>>>,
}

impl<E: Entity> Scheduler<E> {
    /// Spawns the poll loop. The first cycle starts immediately.
    pub fn start(poller: Poller<E>) -> Self {
        let name = poller.name().to_string();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(run(poller, shutdown_rx));

        Self {
            name,
            state: SchedulerState::Running,
            shutdown_tx,
            task: Some(task),
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Signals shutdown, waits for the in-flight cycle (if any) to finish and
    /// hands the poller back. Returns `None` when already stopped or when the
    /// poll task panicked.
    pub async fn stop(&mut self) -> Option<Poller<E>> {
        let task = self.task.take()?;
        // The receiver only goes away with the task itself.
        let _ = self.shutdown_tx.send(true);
        self.state = SchedulerState::Stopped;

        match task.await {
            Ok(poller) => Some(poller),
            Err(e) => {
                error!(flux = %self.name, "Poll task ended abnormally: {e}");
                None
            }
        }
    }
}

async fn run<E: Entity>(mut poller: Poller<E>, mut shutdown_rx: watch::Receiver<bool>) -> Poller<E> {
    let period = poller.config().interval.max(MIN_PERIOD);
    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!(flux = %poller.name(), ?period, "Flux scheduler started");

    loop {
        tokio::select! {
            biased;

            // Either a stop request or the scheduler handle was dropped.
            _ = shutdown_rx.changed() => break,

            _ = interval.tick() => {
                let started = Instant::now();
                poller.poll_once().await;

                let elapsed = started.elapsed();
                if elapsed > period {
                    debug!(
                        flux = %poller.name(),
                        ?elapsed,
                        ?period,
                        "Cycle overran its period, skipping missed triggers"
                    );
                }
            }
        }
    }

    info!(flux = %poller.name(), "Flux scheduler stopped");
    poller
}
