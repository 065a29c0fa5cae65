//! Observed-state lookup port.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::AccountSpec;

/// Errors from reading the account database.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The account database could not be read.
    #[error("failed to read account database {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A database line did not parse.
    #[error("malformed entry at {path}:{line}")]
    Malformed {
        /// Path of the database file.
        path: String,
        /// One-based line number.
        line: usize,
    },
}

/// Source of observed account state.
///
/// The convergence core never calls this directly; callers resolve the
/// observed spec up front and hand it in. An absent result means the account
/// does not exist.
#[async_trait]
pub trait AccountLookup: Send + Sync {
    /// Look up the current state of `username`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] when the underlying database cannot be read
    /// or parsed. A missing account is `Ok(None)`, not an error.
    async fn lookup(&self, username: &str) -> Result<Option<AccountSpec>, LookupError>;
}
