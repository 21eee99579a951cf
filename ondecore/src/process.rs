//! Child process execution seam.
//!
//! Frontend adapters shell out for exactly one thing today, probing a
//! server binary for its version string, but every spawn goes through the
//! [`ProcessRunner`] trait so tests can intercept it.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

/// Outcome of a finished child process.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// Whether the process exited with status zero.
    pub success: bool,
    /// Captured standard output, lossily decoded as UTF-8.
    pub stdout: String,
}

/// Error raised when a child process could not produce output.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("failed to run {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("process did not finish within {0:?}")]
    TimedOut(Duration),
}

/// Runs one binary to completion and captures its output.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(
        &self,
        binary: &Path,
        args: &[&str],
        working_dir: Option<&Path>,
        timeout: Duration,
    ) -> Result<ProcessOutput, ProcessError>;
}

/// [`ProcessRunner`] backed by `tokio::process`.
///
/// The child is spawned with stdin closed and stderr discarded. If the
/// timeout elapses the child is killed when the pending future is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioProcessRunner;

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(
        &self,
        binary: &Path,
        args: &[&str],
        working_dir: Option<&Path>,
        timeout: Duration,
    ) -> Result<ProcessOutput, ProcessError> {
        let mut command = Command::new(binary);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        if let Some(dir) = working_dir {
            command.current_dir(dir);
        }

        debug!(binary = %binary.display(), ?args, "running child process");

        match tokio::time::timeout(timeout, command.output()).await {
            Ok(Ok(output)) => Ok(ProcessOutput {
                success: output.status.success(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            }),
            Ok(Err(source)) => Err(ProcessError::Spawn {
                binary: binary.display().to_string(),
                source,
            }),
            Err(_) => Err(ProcessError::TimedOut(timeout)),
        }
    }
}
