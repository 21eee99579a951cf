//! Error types for the SHOUTcast integration.

use ondecore::StatsError;
use thiserror::Error;

/// Result type alias for SHOUTcast operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to a DNAS server.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed (network, timeout, decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL construction or parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The DNAS answered with a non-success status code.
    #[error("DNAS returned HTTP {0}")]
    Status(u16),
}

// The stats seam speaks StatsError; collapse transport details into it.
impl From<Error> for StatsError {
    fn from(err: Error) -> Self {
        match err {
            Error::Http(e) if e.is_decode() => StatsError::Decode(e.to_string()),
            Error::Http(e) => StatsError::Request(e.to_string()),
            Error::InvalidUrl(e) => StatsError::Request(e.to_string()),
            Error::Status(code) => StatsError::Status(code),
        }
    }
}
