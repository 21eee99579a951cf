//! Adapter type identifiers.
//!
//! Stations reference the software running each of their roles by a short
//! lower-case identifier stored with the station record. The enums here
//! give those identifiers a closed, typed home plus display names for
//! interfaces.

use std::fmt;
use std::str::FromStr;

use crate::error::FrontendError;

// ============================================================================
// Frontend
// ============================================================================

/// Software serving listeners for a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrontendType {
    Icecast,
    Shoutcast,
    Remote,
}

impl FrontendType {
    /// The identifier stored with station records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Icecast => "icecast",
            Self::Shoutcast => "shoutcast2",
            Self::Remote => "remote",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Icecast => "Icecast 2.4",
            Self::Shoutcast => "SHOUTcast 2",
            Self::Remote => "Remote",
        }
    }
}

impl fmt::Display for FrontendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrontendType {
    type Err = FrontendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "icecast" => Ok(Self::Icecast),
            "shoutcast2" => Ok(Self::Shoutcast),
            "remote" => Ok(Self::Remote),
            other => Err(FrontendError::UnknownAdapter(other.to_string())),
        }
    }
}

// ============================================================================
// Backend
// ============================================================================

/// Software producing the audio feed of a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendType {
    Liquidsoap,
    None,
}

impl BackendType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Liquidsoap => "liquidsoap",
            Self::None => "none",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Liquidsoap => "Liquidsoap",
            Self::None => "Disabled",
        }
    }
}

impl fmt::Display for BackendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendType {
    type Err = FrontendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "liquidsoap" => Ok(Self::Liquidsoap),
            "none" => Ok(Self::None),
            other => Err(FrontendError::UnknownAdapter(other.to_string())),
        }
    }
}

// ============================================================================
// Remote relays
// ============================================================================

/// Software behind a remote relay entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteType {
    Shoutcast1,
    Shoutcast2,
    Icecast,
    OndeRelay,
}

impl RemoteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shoutcast1 => "shoutcast1",
            Self::Shoutcast2 => "shoutcast2",
            Self::Icecast => "icecast",
            Self::OndeRelay => "onderelay",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Shoutcast1 => "SHOUTcast 1",
            Self::Shoutcast2 => "SHOUTcast 2",
            Self::Icecast => "Icecast",
            Self::OndeRelay => "OndeRelay",
        }
    }
}

impl fmt::Display for RemoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RemoteType {
    type Err = FrontendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shoutcast1" => Ok(Self::Shoutcast1),
            "shoutcast2" => Ok(Self::Shoutcast2),
            "icecast" => Ok(Self::Icecast),
            "onderelay" => Ok(Self::OndeRelay),
            other => Err(FrontendError::UnknownAdapter(other.to_string())),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
