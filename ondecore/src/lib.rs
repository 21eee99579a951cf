//! # OndeCast Core
//!
//! Shared entities and runtime seams for the OndeCast broadcast suite:
//!
//! - Station, mount and streamer records ([`station`], [`streamer`])
//! - Listener snapshots and the stats client seam ([`nowplaying`])
//! - Persistence traits and an in-memory store ([`store`])
//! - Process execution, certificates and time ([`process`], [`certs`],
//!   [`clock`])
//! - The installation environment ([`env`])
//!
//! The crates driving concrete frontends (ondeshoutcast, ...) and the
//! periodic tasks (ondesync) build on these types; nothing in here talks
//! to a particular server implementation.
//!
//! ## Example
//!
//! ```
//! use ondecore::{Mount, Station, FrontendSettings};
//! use url::Url;
//!
//! let station = Station {
//!     id: 1,
//!     name: "Onde Nocturne".to_string(),
//!     short_name: "onde_nocturne".to_string(),
//!     is_enabled: true,
//!     frontend_type: "shoutcast2".to_string(),
//!     frontend: FrontendSettings::default(),
//!     timezone: "Europe/Paris".to_string(),
//!     public_url: Url::parse("https://radio.example.com").unwrap(),
//!     mounts: vec![Mount::new(1, "/radio.mp3")],
//! };
//!
//! assert!(station.default_mount().is_none());
//! ```

pub mod certs;
pub mod clock;
pub mod env;
pub mod nowplaying;
pub mod process;
pub mod station;
pub mod store;
pub mod streamer;

// Re-export the primary types at the crate root.
pub use certs::{AcmeCertificates, CertificateProvider};
pub use clock::{Clock, FixedClock, SystemClock};
pub use env::{Environment, DEFAULT_BASE_DIR, DEFAULT_LOCAL_URI, ENV_CONFIG_FILE};
pub use nowplaying::{Listeners, NowPlaying, StatsClient, StatsError, StreamClient};
pub use process::{ProcessError, ProcessOutput, ProcessRunner, TokioProcessRunner};
pub use station::{FrontendSettings, Mount, Station, DEFAULT_MAX_LISTENERS};
pub use store::{MemoryStore, StationStore, StoreError, StoreResult, StreamerStore};
pub use streamer::StreamerAccount;
