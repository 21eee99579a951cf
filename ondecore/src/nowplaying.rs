//! Listener snapshots and the stats client seam.
//!
//! A [`NowPlaying`] value is one poll result: listener counts plus, when
//! requested, the individual connected clients. Frontend adapters obtain
//! per-stream snapshots through the [`StatsClient`] trait and fold them
//! into one station-wide report with [`NowPlaying::merge`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

// ============================================================================
// Snapshot values
// ============================================================================

/// Listener counts for one stream or one whole station.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listeners {
    /// All current connections.
    pub total: u32,
    /// Connections deduplicated by the frontend (by IP and user agent).
    pub unique: u32,
}

impl Listeners {
    /// Adds the counts of `other` onto these.
    ///
    /// Unique counts are summed as well, so a listener connected to two
    /// mounts of the same station is counted twice. Frontends only
    /// deduplicate within a single stream.
    pub fn merge(self, other: Listeners) -> Listeners {
        Listeners {
            total: self.total.saturating_add(other.total),
            unique: self.unique.saturating_add(other.unique),
        }
    }
}

/// One connected listener as reported by a frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamClient {
    /// Client identifier unique within one poll of one stream.
    pub uid: String,
    /// Remote address, with proxy forwarding already unwrapped where the
    /// frontend exposes it.
    pub ip: String,
    /// Reported user agent, possibly empty.
    pub user_agent: String,
    /// Seconds this client has been connected.
    pub connected_secs: u64,
    /// Mount tag of the stream the client is attached to. Adapters rewrite
    /// this to `local_{mount_id}` so aggregated reports stay attributable.
    pub mount: String,
}

/// A now-playing snapshot for one stream, or an aggregate over a station.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NowPlaying {
    pub listeners: Listeners,
    pub clients: Vec<StreamClient>,
}

impl NowPlaying {
    /// An empty snapshot: zero listeners, no clients.
    ///
    /// Used both as the aggregate seed and as the substitute for a stream
    /// whose poll failed.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Folds `other` into this snapshot: counts are summed and client lists
    /// concatenated, preserving order.
    pub fn merge(mut self, other: NowPlaying) -> NowPlaying {
        self.listeners = self.listeners.merge(other.listeners);
        self.clients.extend(other.clients);
        self
    }
}

// ============================================================================
// Stats client seam
// ============================================================================

/// Error raised by a [`StatsClient`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    /// The frontend could not be reached.
    #[error("stats request failed: {0}")]
    Request(String),

    /// The frontend answered with a non-success status.
    #[error("stats endpoint returned HTTP {0}")]
    Status(u16),

    /// The response body could not be decoded.
    #[error("could not decode stats payload: {0}")]
    Decode(String),
}

/// Queries one frontend process for per-stream listener snapshots.
///
/// `stream_index` is the 1-based index of the stream inside the frontend,
/// matching the order mounts were written into its configuration.
#[async_trait]
pub trait StatsClient: Send + Sync {
    async fn now_playing(
        &self,
        base_url: &Url,
        admin_password: &str,
        stream_index: u32,
        include_clients: bool,
    ) -> Result<NowPlaying, StatsError>;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn client(uid: &str, mount: &str) -> StreamClient {
        StreamClient {
            uid: uid.to_string(),
            ip: "203.0.113.9".to_string(),
            user_agent: "TestPlayer/1.0".to_string(),
            connected_secs: 42,
            mount: mount.to_string(),
        }
    }

    #[test]
    fn blank_is_zeroed() {
        let blank = NowPlaying::blank();
        assert_eq!(blank.listeners.total, 0);
        assert_eq!(blank.listeners.unique, 0);
        assert!(blank.clients.is_empty());
    }

    #[test]
    fn merge_with_blank_is_identity() {
        let snapshot = NowPlaying {
            listeners: Listeners { total: 7, unique: 5 },
            clients: vec![client("1", "local_3")],
        };

        let merged = snapshot.clone().merge(NowPlaying::blank());
        assert_eq!(merged, snapshot);

        let merged = NowPlaying::blank().merge(snapshot.clone());
        assert_eq!(merged, snapshot);
    }

    #[test]
    fn merge_sums_counts_and_concatenates_clients() {
        let left = NowPlaying {
            listeners: Listeners { total: 2, unique: 2 },
            clients: vec![client("1", "local_1"), client("2", "local_1")],
        };
        let right = NowPlaying {
            listeners: Listeners { total: 3, unique: 1 },
            clients: vec![client("9", "local_2")],
        };

        let merged = left.merge(right);
        assert_eq!(merged.listeners.total, 5);
        assert_eq!(merged.listeners.unique, 3);
        let uids: Vec<_> = merged.clients.iter().map(|c| c.uid.as_str()).collect();
        assert_eq!(uids, vec!["1", "2", "9"]);
    }

    #[test]
    fn merged_clients_keep_their_mount_tags() {
        let left = NowPlaying {
            listeners: Listeners { total: 1, unique: 1 },
            clients: vec![client("1", "local_4")],
        };
        let right = NowPlaying {
            listeners: Listeners { total: 1, unique: 1 },
            clients: vec![client("2", "local_8")],
        };

        let merged = left.merge(right);
        let mounts: Vec<_> = merged.clients.iter().map(|c| c.mount.as_str()).collect();
        assert_eq!(mounts, vec!["local_4", "local_8"]);
    }
}
