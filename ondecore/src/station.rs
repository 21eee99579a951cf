//! Station and mount point records.
//!
//! A [`Station`] is the unit everything else in the suite operates on: one
//! broadcast with one frontend process, a set of mount points and a public
//! URL. The records here are plain values; loading and saving them is the
//! job of the [`crate::store`] traits.

use serde::{Deserialize, Serialize};
use url::Url;

/// Fallback listener cap applied when a station does not set one.
pub const DEFAULT_MAX_LISTENERS: u32 = 250;

// ============================================================================
// Station
// ============================================================================

/// A single broadcast station and its runtime settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    /// Stable numeric identifier.
    pub id: u32,
    /// Human-readable name ("Onde Nocturne").
    pub name: String,
    /// URL- and filesystem-safe slug ("onde_nocturne"). Used to derive the
    /// per-station directory tree.
    pub short_name: String,
    /// Disabled stations keep their records but no process is supervised
    /// for them.
    pub is_enabled: bool,
    /// Identifier of the frontend adapter driving this station, as resolved
    /// by the adapter registry ("shoutcast2", "icecast", ...).
    pub frontend_type: String,
    /// Frontend process settings.
    pub frontend: FrontendSettings,
    /// IANA timezone name for schedule evaluation.
    pub timezone: String,
    /// Public-facing base URL of the station.
    pub public_url: Url,
    /// Mount points, in their configured order. Stream indices handed to the
    /// frontend are derived from this order.
    pub mounts: Vec<Mount>,
}

impl Station {
    /// Returns the default mount, if one is flagged.
    ///
    /// When several mounts carry the flag the last one wins, matching the
    /// aggregation pass which lets a later default replace an earlier one.
    pub fn default_mount(&self) -> Option<&Mount> {
        self.mounts.iter().rev().find(|mount| mount.is_default)
    }

    /// Looks up a mount by its numeric id.
    pub fn mount(&self, id: u32) -> Option<&Mount> {
        self.mounts.iter().find(|mount| mount.id == id)
    }
}

// ============================================================================
// Frontend settings
// ============================================================================

/// Settings consumed by the frontend process of a station.
///
/// Ban lists are stored as newline-separated text blobs. Use
/// [`FrontendSettings::banned_ip_list`] and
/// [`FrontendSettings::banned_user_agent_list`] to get them as entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendSettings {
    /// TCP port the frontend binds.
    pub port: u16,
    /// Password sources must present to stream.
    pub source_password: String,
    /// Password for the frontend admin interface.
    pub admin_password: String,
    /// Listener cap; `None` falls back to [`DEFAULT_MAX_LISTENERS`].
    pub max_listeners: Option<u32>,
    /// Raw `key=value` fragment appended over the generated configuration.
    pub custom_config: Option<String>,
    /// SHOUTcast licence id, when the station has one.
    pub sc_license_id: Option<String>,
    /// SHOUTcast user id, when the station has one.
    pub sc_user_id: Option<String>,
    /// Newline-separated banned IP addresses.
    pub banned_ips: String,
    /// Newline-separated banned user agents.
    pub banned_user_agents: String,
}

impl Default for FrontendSettings {
    fn default() -> Self {
        Self {
            port: 8000,
            source_password: String::new(),
            admin_password: String::new(),
            max_listeners: None,
            custom_config: None,
            sc_license_id: None,
            sc_user_id: None,
            banned_ips: String::new(),
            banned_user_agents: String::new(),
        }
    }
}

impl FrontendSettings {
    /// Banned IPs as trimmed, non-empty entries.
    pub fn banned_ip_list(&self) -> Vec<&str> {
        split_ban_text(&self.banned_ips)
    }

    /// Banned user agents as trimmed, non-empty entries.
    pub fn banned_user_agent_list(&self) -> Vec<&str> {
        split_ban_text(&self.banned_user_agents)
    }
}

fn split_ban_text(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

// ============================================================================
// Mount
// ============================================================================

/// A mount point of a station.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mount {
    /// Stable numeric identifier.
    pub id: u32,
    /// Path of the mount on the frontend ("/radio.mp3").
    pub name: String,
    /// Display label shown to listeners.
    pub display_name: String,
    /// The default mount represents the station as a whole in aggregated
    /// listener reports.
    pub is_default: bool,
    /// Listener count from the most recent poll.
    pub listeners_total: u32,
    /// Unique listener count from the most recent poll.
    pub listeners_unique: u32,
    /// Intro file played to connecting listeners, relative to the station
    /// configuration directory.
    pub intro_path: Option<String>,
    /// Upstream URL when this mount relays another stream.
    pub relay_url: Option<String>,
    /// SHOUTcast authhash for directory listing.
    pub authhash: Option<String>,
    /// Maximum seconds a listener may stay connected; zero or absent means
    /// unlimited.
    pub max_listener_duration: Option<u32>,
}

impl Mount {
    /// Creates a mount with the given id and path, everything else unset.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id,
            display_name: name.clone(),
            name,
            is_default: false,
            listeners_total: 0,
            listeners_unique: 0,
            intro_path: None,
            relay_url: None,
            authhash: None,
            max_listener_duration: None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::DEFAULT_LOCAL_URI;

    fn station_with_mounts(mounts: Vec<Mount>) -> Station {
        Station {
            id: 1,
            name: "Test Station".to_string(),
            short_name: "test_station".to_string(),
            is_enabled: true,
            frontend_type: "shoutcast2".to_string(),
            frontend: FrontendSettings::default(),
            timezone: "UTC".to_string(),
            public_url: Url::parse(DEFAULT_LOCAL_URI).unwrap(),
            mounts,
        }
    }

    #[test]
    fn default_mount_is_found() {
        let mut second = Mount::new(2, "/mobile.mp3");
        second.is_default = true;
        let station = station_with_mounts(vec![Mount::new(1, "/radio.mp3"), second]);

        assert_eq!(station.default_mount().map(|m| m.id), Some(2));
    }

    #[test]
    fn last_default_mount_wins() {
        let mut first = Mount::new(1, "/a.mp3");
        first.is_default = true;
        let mut second = Mount::new(2, "/b.mp3");
        second.is_default = true;
        let station = station_with_mounts(vec![first, second]);

        assert_eq!(station.default_mount().map(|m| m.id), Some(2));
    }

    #[test]
    fn no_default_mount_yields_none() {
        let station = station_with_mounts(vec![Mount::new(1, "/radio.mp3")]);
        assert!(station.default_mount().is_none());
    }

    #[test]
    fn ban_lists_skip_blank_lines() {
        let settings = FrontendSettings {
            banned_ips: "10.0.0.1\n\n  192.168.1.5  \n".to_string(),
            banned_user_agents: String::new(),
            ..FrontendSettings::default()
        };

        assert_eq!(settings.banned_ip_list(), vec!["10.0.0.1", "192.168.1.5"]);
        assert!(settings.banned_user_agent_list().is_empty());
    }

    #[test]
    fn mount_lookup_by_id() {
        let station = station_with_mounts(vec![Mount::new(5, "/radio.mp3")]);
        assert_eq!(station.mount(5).map(|m| m.name.as_str()), Some("/radio.mp3"));
        assert!(station.mount(6).is_none());
    }
}
