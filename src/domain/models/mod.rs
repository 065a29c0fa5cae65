//! Domain models: pure value types with no I/O.

pub mod account;
pub mod config;
pub mod plan;

pub use account::{AccountField, AccountSpec, DesiredAction, TriState};
pub use config::{Config, ExecutorConfig, LoggingConfig, LookupConfig};
pub use plan::{AccountAction, CommandPlan, ConvergeOutcome, DispatchedCommand, PlannedOption};
