//! # OndeCast Sync
//!
//! Periodic maintenance tasks for the OndeCast broadcast suite. Each task
//! implements [`SyncTask`]: a name, a [`Cadence`] describing how often it
//! wants to run, and the work itself. An external job runner owns the
//! actual scheduling and is expected to serialize repeated runs of the
//! same task.
//!
//! Shipped tasks:
//!
//! - [`ReactivateStreamers`]: re-enables streamer accounts whose
//!   deactivation cooldown has elapsed.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use ondecore::StoreError;

pub mod reactivate;

pub use reactivate::ReactivateStreamers;

/// Result type alias for task runs.
pub type Result<T> = std::result::Result<T, TaskError>;

/// Error raised by a task run.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

// ============================================================================
// Cadence
// ============================================================================

/// How often a task should be invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cadence(Duration);

impl Cadence {
    pub const EVERY_MINUTE: Cadence = Cadence(Duration::from_secs(60));
    pub const EVERY_FIVE_MINUTES: Cadence = Cadence(Duration::from_secs(5 * 60));
    pub const EVERY_HOUR: Cadence = Cadence(Duration::from_secs(60 * 60));

    /// A cadence with an arbitrary period.
    pub const fn every(period: Duration) -> Self {
        Cadence(period)
    }

    /// The period between two invocations.
    pub const fn period(&self) -> Duration {
        self.0
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "every {}s", self.0.as_secs())
    }
}

// ============================================================================
// Task trait
// ============================================================================

/// A maintenance task run periodically by an external job runner.
#[async_trait]
pub trait SyncTask: Send + Sync {
    /// Stable task name, used in logs and scheduling.
    fn name(&self) -> &'static str;

    /// How often the runner should invoke [`SyncTask::run`].
    fn cadence(&self) -> Cadence;

    /// Performs one run of the task.
    async fn run(&self) -> Result<()>;
}
