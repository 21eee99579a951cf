//! # OndeCast SHOUTcast Integration
//!
//! SHOUTcast DNAS v2 support for the OndeCast broadcast suite:
//!
//! - [`ShoutcastFrontend`]: the [`ondefrontend::FrontendAdapter`]
//!   implementation covering binary discovery, version probing,
//!   `sc_serv.conf` generation with ban side files, launch command and
//!   admin URL construction, and station-wide listener polling
//! - [`ShoutcastStatsClient`]: the HTTP client behind the polling,
//!   speaking the DNAS statistics and admin JSON endpoints
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use ondecore::{Environment, MemoryStore};
//! use ondefrontend::{AdapterRegistry, FrontendType};
//! use ondeshoutcast::ShoutcastFrontend;
//!
//! # fn example() -> anyhow::Result<()> {
//! let env = Arc::new(Environment::load()?);
//! let store = Arc::new(MemoryStore::new());
//!
//! let registry = AdapterRegistry::builder()
//!     .register(
//!         FrontendType::Shoutcast,
//!         Arc::new(ShoutcastFrontend::new(env, store)?),
//!     )
//!     .build();
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod frontend;
pub mod models;
pub mod stats;

// Re-export the primary types at the crate root.
pub use error::{Error, Result};
pub use frontend::{
    ShoutcastFrontend, ShoutcastFrontendBuilder, CONFIG_FILE, SHOUTCAST_BINARY,
    SHOUTCAST_SERVER_DIR, VERSION_PROBE_TIMEOUT,
};
pub use models::{StatisticsResponse, StreamListener, StreamStats};
pub use stats::{
    ShoutcastStatsClient, ShoutcastStatsClientBuilder, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_USER_AGENT,
};
