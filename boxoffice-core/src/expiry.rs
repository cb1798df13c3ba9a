use std::sync::Arc;
use std::time::Duration;
use boxoffice_store::InventoryGuard;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};
use uuid::Uuid;
use crate::clock::Clock;

/// Periodically releases holds whose TTL has passed.
pub struct ExpiryWorker {
    guard: InventoryGuard,
    clock: Arc<dyn Clock>,
    interval: Duration,
}

impl ExpiryWorker {
    pub fn new(guard: InventoryGuard, clock: Arc<dyn Clock>, interval: Duration) -> Self {
        Self { guard, clock, interval }
    }

    /// One pass over every hold; returns the ids that were expired by it.
    pub async fn sweep(&self) -> Vec<Uuid> {
        let outcome = self
            .guard
            .transact(|state| state.expire_overdue(self.clock.now()))
            .await;

        for (hold_id, err) in &outcome.failed {
            error!(%hold_id, error = %err, "Failed to release expired hold");
        }
        if !outcome.expired.is_empty() {
            info!(count = outcome.expired.len(), holds = ?outcome.expired, "[Worker] Expired holds released");
        }

        outcome.expired
    }

    /// Sweeps once per interval until `shutdown` flips to true or its sender is dropped.
    ///
    /// The signal is only observed between ticks; a sweep that has started always
    /// finishes.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick fires immediately; the first sweep waits one full interval.
        ticker.tick().await;

        info!(interval_ms = self.interval.as_millis() as u64, "Expiry worker started");

        loop {
            tokio::select! {
                biased;
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    self.sweep().await;
                }
            }
        }

        info!("Expiry worker stopped");
    }

    pub fn spawn(self) -> ExpiryHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let join = tokio::spawn(self.run(shutdown_rx));
        ExpiryHandle {
            shutdown: shutdown_tx,
            join,
        }
    }
}

/// Owner of a spawned [`ExpiryWorker`].
pub struct ExpiryHandle {
    shutdown: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl ExpiryHandle {
    /// Signals the worker and waits for it to finish its current tick.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(err) = self.join.await {
            error!("Expiry worker join failed: {}", err);
        }
    }
}
