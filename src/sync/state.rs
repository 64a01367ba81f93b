use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SyncStatus {
    Online,
    Offline,
    Syncing,
}

impl Default for SyncStatus {
    fn default() -> Self {
        SyncStatus::Online
    }
}

impl SyncStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStatus::Online => "Online",
            SyncStatus::Offline => "Offline",
            SyncStatus::Syncing => "Syncing",
        }
    }
}

/// A write that happened while offline, waiting for the next simulated sync.
/// Carries a description only; nothing is replayed against the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingOperation {
    pub id: String,
    pub description: String,
    pub queued_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct SyncState {
    pub status: SyncStatus,
    pub pending: Vec<PendingOperation>,
    pub last_synced_at: Option<DateTime<Utc>>,
}

/// Read-only view published to UI subscribers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSnapshot {
    pub status: SyncStatus,
    pub pending_count: usize,
    pub last_synced_at: Option<DateTime<Utc>>,
}

impl SyncState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> SyncSnapshot {
        SyncSnapshot {
            status: self.status,
            pending_count: self.pending.len(),
            last_synced_at: self.last_synced_at,
        }
    }

    pub fn queue(&mut self, description: String, queued_at: DateTime<Utc>) -> PendingOperation {
        let operation = PendingOperation {
            id: Uuid::new_v4().to_string(),
            description,
            queued_at,
        };
        self.pending.push(operation.clone());
        operation
    }

    pub fn set_offline(&mut self) {
        self.status = SyncStatus::Offline;
    }

    /// Reconnect without a flush; `last_synced_at` only moves when a sync
    /// actually runs.
    pub fn set_online(&mut self) {
        self.status = SyncStatus::Online;
    }

    pub fn begin_sync(&mut self) {
        self.status = SyncStatus::Syncing;
    }

    /// Drain the queue and return how many operations were flushed.
    pub fn finish_sync(&mut self, now: DateTime<Utc>) -> usize {
        let flushed = self.pending.len();
        self.pending.clear();
        self.last_synced_at = Some(now);
        self.status = SyncStatus::Online;
        flushed
    }

    /// Abandon an in-flight sync without losing the queue.
    pub fn interrupt_sync(&mut self) {
        if self.status == SyncStatus::Syncing {
            self.status = SyncStatus::Offline;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_online_with_empty_queue() {
        let state = SyncState::new();
        assert_eq!(state.status, SyncStatus::Online);
        assert!(state.pending.is_empty());
        assert!(state.last_synced_at.is_none());
    }

    #[test]
    fn finish_sync_drains_queue_and_stamps_time() {
        let mut state = SyncState::new();
        let now = Utc::now();

        state.set_offline();
        state.queue("create job".into(), now);
        state.queue("update job".into(), now);
        assert_eq!(state.pending.len(), 2);

        state.begin_sync();
        assert_eq!(state.status, SyncStatus::Syncing);

        let flushed = state.finish_sync(now);
        assert_eq!(flushed, 2);
        assert!(state.pending.is_empty());
        assert_eq!(state.status, SyncStatus::Online);
        assert_eq!(state.last_synced_at, Some(now));
    }

    #[test]
    fn interrupt_sync_keeps_pending_operations() {
        let mut state = SyncState::new();
        state.set_offline();
        state.queue("create job".into(), Utc::now());
        state.begin_sync();

        state.interrupt_sync();
        assert_eq!(state.status, SyncStatus::Offline);
        assert_eq!(state.pending.len(), 1);
    }

    #[test]
    fn set_online_does_not_stamp_last_synced_at() {
        let mut state = SyncState::new();
        state.set_offline();

        state.set_online();
        assert_eq!(state.status, SyncStatus::Online);
        assert!(state.last_synced_at.is_none());
    }

    #[test]
    fn interrupt_sync_is_noop_when_not_syncing() {
        let mut state = SyncState::new();
        state.interrupt_sync();
        assert_eq!(state.status, SyncStatus::Online);
    }
}
