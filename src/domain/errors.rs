//! Domain errors for account convergence.

use thiserror::Error;

use super::ports::{LookupError, RunnerError};

/// Render an argument vector for error messages.
fn join_args(args: &[String]) -> String {
    args.join(" ")
}

/// Errors that can abort a single convergence call.
///
/// A dispatch failure is fatal for the current resource and is never retried
/// here; the caller decides whether the overall run continues. Captured
/// command output is carried verbatim so operators can diagnose tool-level
/// failures without this layer masking them.
#[derive(Debug, Error)]
pub enum ConvergeError {
    /// An external command exited non-zero.
    #[error(
        "command `{command} {}` exited with status {status}: {stderr}",
        join_args(.args)
    )]
    Dispatch {
        /// Command name that was dispatched.
        command: String,
        /// Full argument vector.
        args: Vec<String>,
        /// Nonzero exit status.
        status: i32,
        /// Captured standard output.
        stdout: String,
        /// Captured standard error.
        stderr: String,
    },

    /// The runner failed before the command could report an exit status.
    #[error(transparent)]
    Runner(#[from] RunnerError),

    /// Observed-state lookup failed.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// The desired spec violates an invariant.
    #[error("invalid account spec: {0}")]
    InvalidSpec(String),

    /// An action required an existing account, but none was observed.
    #[error("account not found: {0}")]
    AccountMissing(String),

    /// Lock was requested for an account that has no password to lock.
    #[error("cannot lock account {0}: no password is set")]
    NoPasswordToLock(String),
}

/// Convenience result alias for convergence operations.
pub type ConvergeResult<T> = Result<T, ConvergeError>;
