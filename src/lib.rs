//! Accord - declarative OS user account convergence.
//!
//! Accord reconciles the observed state of OS user accounts toward a
//! declared desired state by computing the minimal attribute diff,
//! compiling it into an ordered command plan for the platform's account
//! tools, and dispatching it idempotently: converging the same spec twice
//! against matching state produces no second-time side effect.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture
//! principles:
//!
//! - **Domain Layer** (`domain`): value types, ports, and errors
//! - **Service Layer** (`services`): diff, option compilation, policy, and
//!   the convergence controller
//! - **Adapters** (`adapters`): command runners and account lookups
//! - **Infrastructure Layer** (`infrastructure`): configuration loading
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use accord::adapters::RecordingRunner;
//! use accord::domain::models::AccountSpec;
//! use accord::services::{ConvergenceController, Dialect};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let runner = Arc::new(RecordingRunner::new());
//! let controller = ConvergenceController::for_dialect(Dialect::useradd(), runner);
//!
//! let mut desired = AccountSpec::named("adam");
//! desired.uid = Some(1000);
//!
//! let outcome = controller.converge(&desired, None).await?;
//! assert!(outcome.changed());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    AccountAction, AccountField, AccountSpec, CommandPlan, Config, ConvergeOutcome,
    DesiredAction, DispatchedCommand, PlannedOption, TriState,
};
pub use domain::ports::{
    AccountLookup, CommandOutput, CommandRunner, LookupError, PasswordHandling, PasswordStrategy,
    RunnerError,
};
pub use domain::{ConvergeError, ConvergeResult};
pub use infrastructure::{ConfigError, ConfigLoader};
pub use services::{ConvergenceController, Dialect, FoldIntoModify, SolarisPasswordStrategy};
