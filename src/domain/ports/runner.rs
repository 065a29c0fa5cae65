//! External command runner port.

use async_trait::async_trait;
use thiserror::Error;

/// Errors the runner can report before a command produces an exit status.
///
/// A command that runs to completion with a nonzero status is NOT a runner
/// error; it comes back as a [`CommandOutput`] and the convergence layer
/// decides what a nonzero status means.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The command could not be spawned at all (missing binary, permission).
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        /// Command name that failed to spawn.
        command: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The command did not exit within the configured timeout.
    #[error("command `{command}` timed out after {timeout_secs}s")]
    TimedOut {
        /// Command name that timed out.
        command: String,
        /// Timeout that elapsed.
        timeout_secs: u64,
    },

    /// Reading the command's output or waiting on it failed.
    #[error("i/o error while running `{command}`: {source}")]
    Io {
        /// Command name being run.
        command: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Exit status and captured output of one external command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Process exit status; 0 means success.
    pub status: i32,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl CommandOutput {
    /// Whether the command exited zero.
    #[must_use]
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Executes a named external command with arguments and waits for it.
///
/// The call blocks (asynchronously) until the subprocess exits or the
/// implementation's timeout elapses. Implementations own the timeout policy;
/// the convergence layer only sees the result.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `command` with `args`, returning its exit status and output.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] when the command cannot be spawned, times
    /// out, or its output cannot be read. A nonzero exit status is a
    /// successful `Ok` return.
    async fn run(&self, command: &str, args: &[String]) -> Result<CommandOutput, RunnerError>;
}
