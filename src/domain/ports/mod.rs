//! Ports: trait seams between the convergence core and its collaborators.

pub mod lookup;
pub mod password;
pub mod runner;

pub use lookup::{AccountLookup, LookupError};
pub use password::{PasswordHandling, PasswordStrategy};
pub use runner::{CommandOutput, CommandRunner, RunnerError};
