//! Installation environment.
//!
//! [`Environment`] describes where an OndeCast installation lives on disk
//! and how local frontend processes are reached. It is loaded once at
//! startup and shared read-only; every path the suite touches is derived
//! from it.
//!
//! ## Usage
//!
//! ```no_run
//! use ondecore::Environment;
//!
//! let env = Environment::load()?;
//! println!("station configs under {:?}", env.stations_dir());
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;
use url::Url;

use crate::station::Station;

/// Environment variable pointing at an alternate environment file.
pub const ENV_CONFIG_FILE: &str = "ONDECAST_CONFIG";

/// Default installation root.
pub const DEFAULT_BASE_DIR: &str = "/var/ondecast";

/// Default base URI for reaching frontend processes on this host.
pub const DEFAULT_LOCAL_URI: &str = "http://127.0.0.1";

/// Filesystem and network layout of one installation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    /// Installation root. Station data, server binaries and shared state
    /// all live underneath it.
    pub base_dir: PathBuf,
    /// Base URI for local frontend processes, without a port.
    pub local_uri: Url,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from(DEFAULT_BASE_DIR),
            local_uri: Url::parse(DEFAULT_LOCAL_URI).expect("default local URI parses"),
        }
    }
}

impl Environment {
    /// Loads the environment, honoring the `ONDECAST_CONFIG` variable.
    ///
    /// Without the variable the compiled-in defaults are used.
    pub fn load() -> Result<Self> {
        match std::env::var(ENV_CONFIG_FILE) {
            Ok(path) if !path.is_empty() => Self::from_yaml_file(Path::new(&path)),
            _ => Ok(Self::default()),
        }
    }

    /// Loads the environment from a YAML file. Missing keys keep their
    /// default values.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read environment file {}", path.display()))?;
        let env: Environment = serde_yaml::from_str(&raw)
            .with_context(|| format!("failed to parse environment file {}", path.display()))?;
        info!(path = %path.display(), base_dir = %env.base_dir.display(), "loaded environment");
        Ok(env)
    }

    /// Directory holding one subdirectory per station.
    pub fn stations_dir(&self) -> PathBuf {
        self.base_dir.join("stations")
    }

    /// Directory holding installed server software.
    pub fn servers_dir(&self) -> PathBuf {
        self.base_dir.join("servers")
    }

    /// Directory holding ACME-managed certificates.
    pub fn acme_dir(&self) -> PathBuf {
        self.base_dir.join("acme")
    }

    /// Configuration directory of one station.
    pub fn station_config_dir(&self, station: &Station) -> PathBuf {
        self.stations_dir().join(&station.short_name).join("config")
    }

    /// The local frontend URI with a concrete port filled in.
    pub fn local_uri_with_port(&self, port: u16) -> Url {
        let mut uri = self.local_uri.clone();
        uri.set_port(Some(port)).expect("local URI accepts a port");
        uri
    }
}
