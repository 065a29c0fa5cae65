//! `accord converge` and `accord plan`.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::adapters::{RecordingRunner, ShellRunner};
use crate::cli::manifest::Manifest;
use crate::cli::output;
use crate::domain::ports::AccountLookup;
use crate::services::ConvergenceController;

use super::load_runtime;

/// Converge every account in the manifest, in order.
///
/// With `dry_run`, commands are recorded instead of dispatched and the plan
/// is printed. A dispatch failure aborts the run at the failing account.
///
/// # Errors
///
/// Fails on config, manifest, lookup, or dispatch errors.
pub async fn execute(
    manifest_path: &Path,
    dry_run: bool,
    config_path: Option<&Path>,
    json: bool,
) -> Result<()> {
    let runtime = load_runtime(config_path)?;
    let manifest = Manifest::load(manifest_path)?;
    info!(
        accounts = manifest.accounts.len(),
        dialect = runtime.dialect.name,
        dry_run,
        "starting convergence run"
    );

    if dry_run {
        let recorder = Arc::new(RecordingRunner::new());
        let controller = ConvergenceController::for_dialect(runtime.dialect, recorder.clone());
        for desired in &manifest.accounts {
            let observed = runtime.lookup.lookup(&desired.username).await?;
            controller.apply(desired, observed.as_ref()).await?;
        }
        return output::print_plan(&recorder.calls(), json);
    }

    let runner = Arc::new(ShellRunner::from_config(&runtime.config.executor));
    let controller = ConvergenceController::for_dialect(runtime.dialect, runner);
    for desired in &manifest.accounts {
        let observed = runtime.lookup.lookup(&desired.username).await?;
        let outcome = controller.apply(desired, observed.as_ref()).await?;
        output::print_outcome(&desired.username, &outcome, json)?;
    }
    Ok(())
}
