//! The frontend adapter trait.

use std::path::PathBuf;

use async_trait::async_trait;
use ondecore::{NowPlaying, Station};
use url::Url;

use crate::error::Result;
use crate::types::FrontendType;

/// A generated frontend configuration, ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    /// Rendered configuration file contents.
    pub config: String,
    /// Path of the IP ban file referenced by the configuration.
    pub ip_ban_path: PathBuf,
    /// Path of the user agent ban file referenced by the configuration.
    pub user_agent_ban_path: PathBuf,
}

/// Drives one kind of broadcast frontend (SHOUTcast, Icecast, ...).
///
/// Implementations are stateless with respect to stations: every method
/// takes the station it operates on, so a single adapter instance serves
/// the whole installation. Collaborators (environment, stores, stats
/// client) are injected at construction.
#[async_trait]
pub trait FrontendAdapter: Send + Sync {
    /// Which frontend software this adapter drives.
    fn kind(&self) -> FrontendType;

    /// Locates the frontend binary on this host.
    ///
    /// Returns `None` when the software is not installed; that is a normal
    /// answer, not an error.
    fn binary_path(&self) -> Option<PathBuf>;

    /// Probes the installed binary for its version.
    ///
    /// `None` when the binary is absent, fails to run, or prints something
    /// unrecognizable.
    async fn version(&self) -> Option<String>;

    /// Where the configuration file of `station` lives.
    fn configuration_path(&self, station: &Station) -> PathBuf;

    /// Renders the full configuration for `station`, writing the ban files
    /// it references as a side effect.
    async fn generate_configuration(&self, station: &Station) -> Result<AdapterConfig>;

    /// Renders the configuration and writes it to
    /// [`FrontendAdapter::configuration_path`].
    async fn write_configuration(&self, station: &Station) -> Result<PathBuf>;

    /// Command line that starts the frontend for `station`, or `None` when
    /// the binary is not installed.
    fn command(&self, station: &Station) -> Option<String>;

    /// Public admin interface URL of the frontend for `station`.
    fn admin_url(&self, station: &Station) -> Url;

    /// Polls the frontend for listener figures across all mounts of
    /// `station`.
    ///
    /// Freshly polled per-mount counts are written into `station` and
    /// persisted; the returned snapshot is the station-wide aggregate. A
    /// mount whose poll fails contributes an empty snapshot instead of
    /// failing the whole pass.
    async fn now_playing(&self, station: &mut Station, include_clients: bool)
        -> Result<NowPlaying>;
}
