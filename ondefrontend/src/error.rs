//! Error types for frontend adapters.

use ondecore::StoreError;

/// Convenience alias used throughout the frontend crates.
pub type Result<T> = std::result::Result<T, FrontendError>;

/// Error raised by the adapter registry or a frontend adapter.
#[derive(Debug, thiserror::Error)]
pub enum FrontendError {
    /// The requested adapter type identifier is not registered.
    #[error("unknown frontend adapter type: {0}")]
    UnknownAdapter(String),

    /// A persistence call failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Writing a configuration or ban file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything adapter-specific that does not fit the variants above.
    #[error("{0}")]
    Other(String),
}

impl FrontendError {
    /// Creates an `Other` error from any displayable value.
    pub fn other(message: impl std::fmt::Display) -> Self {
        Self::Other(message.to_string())
    }
}
