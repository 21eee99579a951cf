//! Persistence seams and the in-memory store.
//!
//! The runtime only ever talks to storage through the narrow traits below.
//! Batched writes are the rule: a poll or sweep collects all the records it
//! touched and hands them over in one call.
//!
//! [`MemoryStore`] implements both traits over hash maps. It backs the test
//! suites and is good enough for single-process embedding.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::station::Mount;
use crate::streamer::StreamerAccount;

// ============================================================================
// Errors
// ============================================================================

/// Error raised by a store implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store query failed: {0}")]
    Query(String),

    #[error("store write failed: {0}")]
    Write(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

// ============================================================================
// Traits
// ============================================================================

/// Persists station-owned records.
#[async_trait]
pub trait StationStore: Send + Sync {
    /// Writes the given mounts back in one batch.
    async fn persist_mounts(&self, mounts: &[Mount]) -> StoreResult<()>;
}

/// Persists streamer accounts and serves the reactivation sweep.
#[async_trait]
pub trait StreamerStore: Send + Sync {
    /// Accounts that are inactive with a cooldown deadline at or before
    /// `now`.
    async fn streamers_awaiting_reactivation(
        &self,
        now: DateTime<Utc>,
    ) -> StoreResult<Vec<StreamerAccount>>;

    /// Writes the given accounts back in one batch.
    async fn persist_streamers(&self, streamers: &[StreamerAccount]) -> StoreResult<()>;
}

// ============================================================================
// In-memory store
// ============================================================================

/// Hash-map backed store, keyed by record id.
#[derive(Debug, Default)]
pub struct MemoryStore {
    mounts: RwLock<HashMap<u32, Mount>>,
    streamers: RwLock<HashMap<u32, StreamerAccount>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preloads streamer accounts, replacing any with the same id.
    pub fn seed_streamers(&self, accounts: impl IntoIterator<Item = StreamerAccount>) {
        let mut streamers = self.streamers.write().unwrap();
        for account in accounts {
            streamers.insert(account.id, account);
        }
    }

    /// Preloads mounts, replacing any with the same id.
    pub fn seed_mounts(&self, mounts: impl IntoIterator<Item = Mount>) {
        let mut stored = self.mounts.write().unwrap();
        for mount in mounts {
            stored.insert(mount.id, mount);
        }
    }

    /// Returns a copy of the stored mount, if present.
    pub fn mount(&self, id: u32) -> Option<Mount> {
        let mounts = self.mounts.read().unwrap();
        mounts.get(&id).cloned()
    }

    /// Returns a copy of the stored streamer account, if present.
    pub fn streamer(&self, id: u32) -> Option<StreamerAccount> {
        let streamers = self.streamers.read().unwrap();
        streamers.get(&id).cloned()
    }
}

#[async_trait]
impl StationStore for MemoryStore {
    async fn persist_mounts(&self, mounts: &[Mount]) -> StoreResult<()> {
        let mut stored = self.mounts.write().unwrap();
        for mount in mounts {
            stored.insert(mount.id, mount.clone());
        }
        Ok(())
    }
}

#[async_trait]
impl StreamerStore for MemoryStore {
    async fn streamers_awaiting_reactivation(
        &self,
        now: DateTime<Utc>,
    ) -> StoreResult<Vec<StreamerAccount>> {
        let streamers = self.streamers.read().unwrap();
        let mut due: Vec<StreamerAccount> = streamers
            .values()
            .filter(|account| account.is_due(now))
            .cloned()
            .collect();
        due.sort_by_key(|account| account.id);
        Ok(due)
    }

    async fn persist_streamers(&self, accounts: &[StreamerAccount]) -> StoreResult<()> {
        let mut streamers = self.streamers.write().unwrap();
        for account in accounts {
            streamers.insert(account.id, account.clone());
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn account(id: u32, is_active: bool, reactivate_at: Option<DateTime<Utc>>) -> StreamerAccount {
        StreamerAccount {
            id,
            username: format!("dj_{id}"),
            is_active,
            reactivate_at,
        }
    }

    #[tokio::test]
    async fn awaiting_reactivation_applies_both_criteria() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let store = MemoryStore::new();
        store.seed_streamers([
            account(1, false, Some(now - chrono::Duration::minutes(5))),
            account(2, false, Some(now + chrono::Duration::minutes(5))),
            account(3, true, Some(now - chrono::Duration::minutes(5))),
            account(4, false, None),
            account(5, false, Some(now)),
        ]);

        let due = store.streamers_awaiting_reactivation(now).await.unwrap();
        let ids: Vec<_> = due.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 5]);
    }

    #[tokio::test]
    async fn persist_streamers_replaces_records() {
        let store = MemoryStore::new();
        store.seed_streamers([account(7, false, Some(Utc::now()))]);

        let mut updated = store.streamer(7).unwrap();
        updated.reactivate();
        store.persist_streamers(&[updated]).await.unwrap();

        let stored = store.streamer(7).unwrap();
        assert!(stored.is_active);
        assert!(stored.reactivate_at.is_none());
    }

    #[tokio::test]
    async fn persist_mounts_replaces_records() {
        let store = MemoryStore::new();
        let mut mount = Mount::new(3, "/radio.mp3");
        store.seed_mounts([mount.clone()]);

        mount.listeners_total = 12;
        mount.listeners_unique = 9;
        store.persist_mounts(&[mount]).await.unwrap();

        let stored = store.mount(3).unwrap();
        assert_eq!(stored.listeners_total, 12);
        assert_eq!(stored.listeners_unique, 9);
    }
}
