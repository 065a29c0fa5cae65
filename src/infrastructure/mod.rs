//! Infrastructure: configuration, logging, and other process-level concerns.

pub mod config;
pub mod logging;

pub use config::{ConfigError, ConfigLoader};
