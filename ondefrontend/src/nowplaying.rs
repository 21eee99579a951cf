//! Station-wide now-playing aggregation.
//!
//! One aggregation pass polls every mount of a station concurrently,
//! writes the fresh per-mount listener counts back into the station and
//! its store, and folds the per-mount snapshots into a single station
//! report rooted at the default mount.

use std::sync::Arc;

use futures::future::join_all;
use ondecore::{NowPlaying, Station, StationStore, StatsClient};
use tracing::error;
use url::Url;

use crate::error::Result;

/// Polls one station's frontend and folds the results.
///
/// Mounts are queried by their 1-based position in the station's mount
/// list, matching the stream indices the configuration generator hands to
/// the frontend.
pub struct NowPlayingAggregator {
    stats: Arc<dyn StatsClient>,
    store: Arc<dyn StationStore>,
    base_url: Url,
    admin_password: String,
}

impl NowPlayingAggregator {
    pub fn new(
        stats: Arc<dyn StatsClient>,
        store: Arc<dyn StationStore>,
        base_url: Url,
        admin_password: impl Into<String>,
    ) -> Self {
        Self {
            stats,
            store,
            base_url,
            admin_password: admin_password.into(),
        }
    }

    /// Runs one aggregation pass over `station`.
    ///
    /// All mounts are queried concurrently; the pass continues once every
    /// query has settled. A failed query is logged and replaced by an
    /// empty snapshot so one broken stream cannot poison its siblings.
    /// Updated mounts are persisted in a single batch before returning.
    pub async fn aggregate(
        &self,
        station: &mut Station,
        include_clients: bool,
    ) -> Result<NowPlaying> {
        let queries = station.mounts.iter().enumerate().map(|(index, mount)| {
            let stream_index = (index + 1) as u32;
            let mount_name = mount.name.clone();
            async move {
                match self
                    .stats
                    .now_playing(
                        &self.base_url,
                        &self.admin_password,
                        stream_index,
                        include_clients,
                    )
                    .await
                {
                    Ok(snapshot) => snapshot,
                    Err(err) => {
                        error!(
                            mount = %mount_name,
                            stream_index,
                            error = %err,
                            "now-playing query failed, substituting an empty snapshot"
                        );
                        NowPlaying::blank()
                    }
                }
            }
        });
        let results = join_all(queries).await;

        let mut station_report: Option<NowPlaying> = None;
        let mut secondary = Vec::new();

        for (mount, mut snapshot) in station.mounts.iter_mut().zip(results) {
            // Attribute each client to the mount its stream belongs to.
            for client in &mut snapshot.clients {
                client.mount = format!("local_{}", mount.id);
            }

            mount.listeners_total = snapshot.listeners.total;
            mount.listeners_unique = snapshot.listeners.unique;

            if mount.is_default {
                station_report = Some(snapshot);
            } else {
                secondary.push(snapshot);
            }
        }

        // Without a default mount there is nothing to root the station
        // report on; the per-mount counts above still stand.
        let report = match station_report {
            Some(mut report) => {
                for snapshot in secondary {
                    report = report.merge(snapshot);
                }
                report
            }
            None => NowPlaying::blank(),
        };

        self.store.persist_mounts(&station.mounts).await?;
        Ok(report)
    }
}

// ============================================================================
// Tests
// ============================================================================
