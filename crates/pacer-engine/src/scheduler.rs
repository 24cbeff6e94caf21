//! Fixed-cadence drive for the engine's periodic activities.
//!
//! Spawns two independent tokio tasks at the configured cycle length: one
//! evaluates the session window, the other runs the budget-reset-and-drain
//! cycle. Both activities are idempotent per invocation and their relative
//! ordering within a tick does not matter. Shutdown lets an in-flight tick
//! finish and starts no new ones.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::dispatcher::Dispatcher;

/// Handle to the two running periodic tasks.
pub struct EngineScheduler {
    shutdown_tx: watch::Sender<bool>,
    session_task: JoinHandle<()>,
    drain_task: JoinHandle<()>,
}

impl EngineScheduler {
    /// Spawn the session-evaluation and drain tasks.
    #[must_use]
    pub fn start(dispatcher: Arc<Dispatcher>, cycle: Duration) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let session_task = {
            let dispatcher = Arc::clone(&dispatcher);
            let mut shutdown = shutdown_rx.clone();
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(cycle);
                loop {
                    tokio::select! {
                        _ = ticker.tick() => {
                            dispatcher.evaluate_session(Utc::now().time());
                        }
                        _ = shutdown.changed() => {
                            debug!("Session task stopping");
                            break;
                        }
                    }
                }
            })
        };

        let drain_task = {
            let dispatcher = Arc::clone(&dispatcher);
            let mut shutdown = shutdown_rx;
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(cycle);
                loop {
                    tokio::select! {
                        _ = ticker.tick() => {
                            dispatcher.drain_cycle();
                        }
                        _ = shutdown.changed() => {
                            debug!("Drain task stopping");
                            break;
                        }
                    }
                }
            })
        };

        info!(cycle_ms = cycle.as_millis() as u64, "Scheduler started");

        Self {
            shutdown_tx,
            session_task,
            drain_task,
        }
    }

    /// Stop both periodic tasks and wait for them to finish.
    ///
    /// An in-flight tick completes; no new ticks start.
    pub async fn shutdown(self) {
        // Receivers outlive the send because the tasks hold them
        let _ = self.shutdown_tx.send(true);
        let _ = self.session_task.await;
        let _ = self.drain_task.await;
        info!("Scheduler stopped");
    }
}
