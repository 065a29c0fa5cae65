//! CLI command implementations.

pub mod account;
pub mod converge;

use std::path::Path;

use anyhow::{Context, Result};

use crate::adapters::PasswdFileLookup;
use crate::domain::models::Config;
use crate::infrastructure::ConfigLoader;
use crate::services::Dialect;

/// Shared per-invocation wiring: config, dialect, and observed-state source.
pub(crate) struct Runtime {
    pub config: Config,
    pub dialect: &'static Dialect,
    pub lookup: PasswdFileLookup,
}

pub(crate) fn load_runtime(config_path: Option<&Path>) -> Result<Runtime> {
    let config = match config_path {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    let dialect = Dialect::by_name(&config.dialect)
        .with_context(|| format!("unknown dialect {}", config.dialect))?;
    let lookup = PasswdFileLookup::from_config(&config.lookup);
    Ok(Runtime {
        config,
        dialect,
        lookup,
    })
}
