//! # OndeCast Frontend
//!
//! Everything shared by broadcast frontend integrations:
//!
//! - The [`FrontendAdapter`] trait every concrete frontend implements
//! - The [`AdapterRegistry`] resolving a station's adapter identifier to
//!   a live adapter instance
//! - [`ConfigAssembly`], the ordered `key=value` builder behind generated
//!   configurations, with custom-fragment override support
//! - Ban list rendering in the SHOUTcast file format ([`banlist`])
//! - The station-wide [`NowPlayingAggregator`]
//!
//! Concrete integrations such as `ondeshoutcast` implement
//! [`FrontendAdapter`] and register themselves:
//!
//! ```ignore
//! use std::sync::Arc;
//! use ondefrontend::{AdapterRegistry, FrontendType};
//!
//! let registry = AdapterRegistry::builder()
//!     .register(FrontendType::Shoutcast, Arc::new(shoutcast_adapter))
//!     .build();
//!
//! let adapter = registry.resolve_for(&station)?;
//! let config = adapter.generate_configuration(&station).await?;
//! ```

pub mod adapter;
pub mod banlist;
pub mod config;
pub mod error;
pub mod nowplaying;
pub mod registry;
pub mod types;

// Re-export the primary types at the crate root.
pub use adapter::{AdapterConfig, FrontendAdapter};
pub use banlist::{render_ban_list, write_ban_list, BAN_LIST_SEPARATOR};
pub use config::ConfigAssembly;
pub use error::{FrontendError, Result};
pub use nowplaying::NowPlayingAggregator;
pub use registry::{AdapterRegistry, AdapterRegistryBuilder};
pub use types::{BackendType, FrontendType, RemoteType};
