//! Streamer (live DJ) accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A credentialed account allowed to stream live to a station.
///
/// When a streamer disconnects, the backend may deactivate the account and
/// stamp [`StreamerAccount::reactivate_at`] with the end of an enforced
/// cooldown. The reactivation sweep flips such accounts back on once the
/// cooldown has elapsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamerAccount {
    /// Stable numeric identifier.
    pub id: u32,
    /// Login name presented by the streaming client.
    pub username: String,
    /// Whether the account may currently connect.
    pub is_active: bool,
    /// End of the deactivation cooldown, if one is pending.
    pub reactivate_at: Option<DateTime<Utc>>,
}

impl StreamerAccount {
    /// True when the account is inactive and its cooldown has elapsed.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        !self.is_active && self.reactivate_at.map(|at| at <= now).unwrap_or(false)
    }

    /// Re-enables the account and clears the pending cooldown.
    pub fn reactivate(&mut self) {
        self.is_active = true;
        self.reactivate_at = None;
    }
}
