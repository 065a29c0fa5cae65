//! Desired-state manifest parsing.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::models::AccountSpec;

/// A YAML manifest declaring the desired state of one or more accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Desired account specs, converged in order.
    pub accounts: Vec<AccountSpec>,
}

impl Manifest {
    /// Load and validate a manifest from a YAML file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed, when it declares no
    /// accounts, or when any spec has an empty username.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest {}", path.display()))?;
        let manifest: Manifest = serde_yaml::from_str(&contents)
            .with_context(|| format!("failed to parse manifest {}", path.display()))?;

        if manifest.accounts.is_empty() {
            bail!("manifest {} declares no accounts", path.display());
        }
        for spec in &manifest.accounts {
            spec.validate()
                .with_context(|| format!("invalid account spec in {}", path.display()))?;
        }
        Ok(manifest)
    }
}
