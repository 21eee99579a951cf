//! Streamer account reactivation sweep.
//!
//! Streamer accounts can be deactivated with a cooldown deadline (for
//! example after an unclean disconnect). This task selects every account
//! whose deadline has passed, flips it back to active, and persists the
//! whole batch in one write. The sweep is idempotent: accounts still in
//! cooldown are untouched and an account is only ever reactivated once.

use std::sync::Arc;

use async_trait::async_trait;
use ondecore::{Clock, StreamerStore};
use tracing::{debug, info};

use crate::{Cadence, Result, SyncTask};

/// Re-enables streamer accounts whose cooldown has elapsed.
pub struct ReactivateStreamers {
    streamers: Arc<dyn StreamerStore>,
    clock: Arc<dyn Clock>,
}

impl ReactivateStreamers {
    pub fn new(streamers: Arc<dyn StreamerStore>, clock: Arc<dyn Clock>) -> Self {
        Self { streamers, clock }
    }

    /// Runs one sweep and returns how many accounts were reactivated.
    pub async fn sweep(&self) -> Result<usize> {
        let now = self.clock.now();
        let mut due = self.streamers.streamers_awaiting_reactivation(now).await?;
        if due.is_empty() {
            debug!("no streamer accounts awaiting reactivation");
            return Ok(0);
        }

        for account in &mut due {
            debug!(username = %account.username, "reactivating streamer account");
            account.reactivate();
        }

        self.streamers.persist_streamers(&due).await?;
        info!(count = due.len(), "reactivated streamer accounts");
        Ok(due.len())
    }
}

#[async_trait]
impl SyncTask for ReactivateStreamers {
    fn name(&self) -> &'static str {
        "reactivate-streamers"
    }

    fn cadence(&self) -> Cadence {
        Cadence::EVERY_MINUTE
    }

    async fn run(&self) -> Result<()> {
        self.sweep().await.map(|_| ())
    }
}

// ============================================================================
// Tests
// ============================================================================
