//! `accord remove`, `accord lock`, and `accord unlock`.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use crate::adapters::ShellRunner;
use crate::cli::output;
use crate::domain::models::{AccountSpec, TriState};
use crate::domain::ports::AccountLookup;
use crate::services::ConvergenceController;

use super::{load_runtime, Runtime};

fn controller_for(runtime: &Runtime) -> ConvergenceController {
    let runner = Arc::new(ShellRunner::from_config(&runtime.config.executor));
    ConvergenceController::for_dialect(runtime.dialect, runner)
}

/// Remove an account; removing an absent account is a successful no-op.
///
/// # Errors
///
/// Fails on config, lookup, or dispatch errors.
pub async fn remove(
    username: &str,
    manage_home: bool,
    config_path: Option<&Path>,
    json: bool,
) -> Result<()> {
    let runtime = load_runtime(config_path)?;
    let desired = AccountSpec {
        manage_home: if manage_home {
            TriState::Enabled
        } else {
            TriState::Unset
        },
        ..AccountSpec::named(username)
    };
    let observed = runtime.lookup.lookup(username).await?;
    let outcome = controller_for(&runtime)
        .remove(&desired, observed.as_ref())
        .await?;
    output::print_outcome(username, &outcome, json)
}

/// Lock an account's password.
///
/// # Errors
///
/// Fails when the account is missing, has no password, or the lock command
/// fails.
pub async fn lock(username: &str, config_path: Option<&Path>, json: bool) -> Result<()> {
    let runtime = load_runtime(config_path)?;
    let desired = AccountSpec::named(username);
    let observed = runtime.lookup.lookup(username).await?;
    let outcome = controller_for(&runtime)
        .lock(&desired, observed.as_ref())
        .await?;
    output::print_outcome(username, &outcome, json)
}

/// Unlock an account's password.
///
/// # Errors
///
/// Fails when the account is missing or the unlock command fails.
pub async fn unlock(username: &str, config_path: Option<&Path>, json: bool) -> Result<()> {
    let runtime = load_runtime(config_path)?;
    let desired = AccountSpec::named(username);
    let observed = runtime.lookup.lookup(username).await?;
    let outcome = controller_for(&runtime)
        .unlock(&desired, observed.as_ref())
        .await?;
    output::print_outcome(username, &outcome, json)
}
