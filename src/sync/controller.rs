use std::{sync::Arc, time::Duration};

use anyhow::{anyhow, Result};
use chrono::Utc;
use log::info;
use tokio::{
    sync::{watch, Mutex},
    task::JoinHandle,
    time,
};
use tokio_util::sync::CancellationToken;

use super::state::{PendingOperation, SyncSnapshot, SyncState, SyncStatus};

/// Owns the online/offline indicator and the simulated sync.
///
/// "Sync" here is a fixed-delay simulation: going back online (or a manual
/// trigger) sleeps the configured delay and then drains the pending queue.
/// There is no transport, no retries, no conflict handling.
#[derive(Clone)]
pub struct SyncController {
    state: Arc<Mutex<SyncState>>,
    delay: Duration,
    worker: Arc<Mutex<Option<JoinHandle<()>>>>,
    cancel: Arc<Mutex<CancellationToken>>,
    snapshot_tx: Arc<watch::Sender<SyncSnapshot>>,
}

impl SyncController {
    pub fn new(delay: Duration) -> Self {
        let state = SyncState::new();
        let (snapshot_tx, _) = watch::channel(state.snapshot());

        Self {
            state: Arc::new(Mutex::new(state)),
            delay,
            worker: Arc::new(Mutex::new(None)),
            cancel: Arc::new(Mutex::new(CancellationToken::new())),
            snapshot_tx: Arc::new(snapshot_tx),
        }
    }

    pub async fn snapshot(&self) -> SyncSnapshot {
        self.state.lock().await.snapshot()
    }

    /// Watch receiver for UI surfaces; fires on every status or queue change.
    pub fn subscribe(&self) -> watch::Receiver<SyncSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub async fn go_offline(&self) {
        self.cancel_worker().await;

        let snapshot = {
            let mut state = self.state.lock().await;
            state.interrupt_sync();
            state.set_offline();
            state.snapshot()
        };

        info!("Sync indicator: offline ({} pending)", snapshot.pending_count);
        self.publish(snapshot);
    }

    pub async fn queue_operation(&self, description: &str) -> PendingOperation {
        let (operation, snapshot) = {
            let mut state = self.state.lock().await;
            let operation = state.queue(description.to_string(), Utc::now());
            (operation, state.snapshot())
        };

        self.publish(snapshot);
        operation
    }

    /// Reconnect. With pending operations this kicks off the simulated sync;
    /// with an empty queue it goes straight back to Online.
    pub async fn go_online(&self) {
        let snapshot = {
            let mut state = self.state.lock().await;
            if state.pending.is_empty() {
                state.set_online();
            } else {
                state.begin_sync();
            }
            state.snapshot()
        };

        self.publish(snapshot.clone());

        if snapshot.status == SyncStatus::Syncing {
            self.spawn_sync().await;
        }
    }

    /// Manual flush while already online.
    pub async fn sync_now(&self) -> Result<()> {
        let snapshot = {
            let mut state = self.state.lock().await;
            match state.status {
                SyncStatus::Offline => {
                    return Err(anyhow!("cannot sync while offline"));
                }
                SyncStatus::Syncing => {
                    // A sync is already in flight; let it finish.
                    return Ok(());
                }
                SyncStatus::Online => {}
            }
            state.begin_sync();
            state.snapshot()
        };

        self.publish(snapshot);
        self.spawn_sync().await;
        Ok(())
    }

    async fn spawn_sync(&self) {
        let mut worker_guard = self.worker.lock().await;
        if let Some(handle) = worker_guard.take() {
            handle.abort();
        }

        let token = {
            let mut cancel_guard = self.cancel.lock().await;
            *cancel_guard = CancellationToken::new();
            cancel_guard.clone()
        };

        let state = self.state.clone();
        let snapshot_tx = self.snapshot_tx.clone();
        let delay = self.delay;

        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    // go_offline interrupted the sync; it resets the status.
                    return;
                }
                _ = time::sleep(delay) => {}
            }

            let (flushed, snapshot) = {
                let mut guard = state.lock().await;
                let flushed = guard.finish_sync(Utc::now());
                (flushed, guard.snapshot())
            };

            info!("Simulated sync flushed {flushed} pending operation(s)");
            let _ = snapshot_tx.send(snapshot);
        });

        *worker_guard = Some(handle);
    }

    async fn cancel_worker(&self) {
        self.cancel.lock().await.cancel();
        if let Some(handle) = self.worker.lock().await.take() {
            handle.abort();
        }
    }

    fn publish(&self, snapshot: SyncSnapshot) {
        let _ = self.snapshot_tx.send(snapshot);
    }
}
