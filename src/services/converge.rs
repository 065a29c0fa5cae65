//! Convergence controller.
//!
//! Orchestrates one convergence call: diff the desired spec against observed
//! state, compile the option plan, and dispatch the platform command. The
//! call is a strict sequence with no internal parallelism; the only
//! suspension point is the runner's blocking dispatch.
//!
//! Idempotence is the contract here: converging the same desired spec twice
//! against now-matching observed state dispatches zero commands the second
//! time.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::domain::errors::{ConvergeError, ConvergeResult};
use crate::domain::models::{
    AccountAction, AccountField, AccountSpec, CommandPlan, ConvergeOutcome, DesiredAction,
    DispatchedCommand, PlannedOption, TriState,
};
use crate::domain::ports::{CommandRunner, PasswordHandling, PasswordStrategy};

use super::home_policy::{self, HomePolicy};
use super::options::{universal_options, Dialect};
use super::password::{FoldIntoModify, SolarisPasswordStrategy};
use super::diff;

/// Run a command through the runner and convert a nonzero exit status into a
/// dispatch error carrying the full command line and captured output.
pub(crate) async fn run_checked(
    runner: &dyn CommandRunner,
    command: &str,
    args: Vec<String>,
) -> ConvergeResult<DispatchedCommand> {
    debug!(command, ?args, "dispatching");
    let output = runner.run(command, &args).await?;
    if !output.success() {
        return Err(ConvergeError::Dispatch {
            command: command.to_string(),
            args,
            status: output.status,
            stdout: output.stdout,
            stderr: output.stderr,
        });
    }
    Ok(DispatchedCommand {
        command: command.to_string(),
        args,
    })
}

/// Drives desired state onto the system through the bound dialect, password
/// strategy, and command runner.
///
/// No state is shared between calls; concurrent convergence of independent
/// accounts is safe without locking.
pub struct ConvergenceController {
    dialect: &'static Dialect,
    password: Box<dyn PasswordStrategy>,
    runner: Arc<dyn CommandRunner>,
}

impl ConvergenceController {
    /// Build a controller with an explicit password strategy.
    #[must_use]
    pub fn new(
        dialect: &'static Dialect,
        password: Box<dyn PasswordStrategy>,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        Self {
            dialect,
            password,
            runner,
        }
    }

    /// Build a controller with the dialect's native password strategy:
    /// Solaris manages passwords out of band, everything else folds them
    /// into the modify command.
    #[must_use]
    pub fn for_dialect(dialect: &'static Dialect, runner: Arc<dyn CommandRunner>) -> Self {
        let password: Box<dyn PasswordStrategy> = if dialect.name == "solaris" {
            Box::new(SolarisPasswordStrategy::new())
        } else {
            Box::new(FoldIntoModify)
        };
        Self::new(dialect, password, runner)
    }

    /// The dialect this controller compiles against.
    #[must_use]
    pub fn dialect(&self) -> &'static Dialect {
        self.dialect
    }

    /// Dispatch on the spec's requested action.
    ///
    /// Converge is the default; remove, lock, and unlock are explicit
    /// actions driven by the spec's action flag, never by diffing.
    ///
    /// # Errors
    ///
    /// Propagates the errors of the selected action.
    pub async fn apply(
        &self,
        desired: &AccountSpec,
        observed: Option<&AccountSpec>,
    ) -> ConvergeResult<ConvergeOutcome> {
        match desired.action {
            DesiredAction::Converge => self.converge(desired, observed).await,
            DesiredAction::Remove => self.remove(desired, observed).await,
            DesiredAction::Lock => self.lock(desired, observed).await,
            DesiredAction::Unlock => self.unlock(desired, observed).await,
        }
    }

    /// Converge observed state toward the desired spec.
    ///
    /// Creates the account when `observed` is absent, otherwise modifies
    /// only what differs. Dispatches nothing when nothing differs.
    ///
    /// # Errors
    ///
    /// Returns [`ConvergeError`] when the spec is invalid or any dispatched
    /// command fails.
    #[instrument(skip_all, fields(username = %desired.username, dialect = self.dialect.name))]
    pub async fn converge(
        &self,
        desired: &AccountSpec,
        observed: Option<&AccountSpec>,
    ) -> ConvergeResult<ConvergeOutcome> {
        desired.validate()?;
        let policy = home_policy::resolve(desired);
        match observed {
            None => self.create(desired, policy).await,
            Some(current) => self.update(desired, current, policy).await,
        }
    }

    /// Creation sets every specified attribute; there is nothing to compare
    /// against, so the change set is simply every field the spec sets.
    async fn create(
        &self,
        desired: &AccountSpec,
        policy: HomePolicy,
    ) -> ConvergeResult<ConvergeOutcome> {
        let changed = diff::diff(desired, None);
        let options = universal_options(&changed, desired, self.dialect, policy);
        let plan = CommandPlan::new(self.dialect.create_command, options, &desired.username);

        info!(username = %desired.username, "creating account");
        let mut commands = vec![run_checked(self.runner.as_ref(), &plan.command, plan.argv()).await?];

        // The variant strategy can only set a password once the account
        // exists, so it runs after the create dispatch.
        if let PasswordHandling::Handled(extra) = self
            .password
            .apply(desired, None, self.runner.as_ref())
            .await?
        {
            commands.extend(extra);
        }

        Ok(ConvergeOutcome::Applied {
            action: AccountAction::Create,
            commands,
        })
    }

    async fn update(
        &self,
        desired: &AccountSpec,
        current: &AccountSpec,
        policy: HomePolicy,
    ) -> ConvergeResult<ConvergeOutcome> {
        // The strategy runs before the generic path so that a handled
        // password never reaches the modify command's option list.
        let handling = self
            .password
            .apply(desired, Some(current), self.runner.as_ref())
            .await?;

        let mut changed = diff::diff(desired, Some(current));
        let mut commands = match handling {
            PasswordHandling::Handled(dispatched) => {
                changed.remove(&AccountField::Password);
                dispatched
            }
            PasswordHandling::Generic => Vec::new(),
        };

        let options = universal_options(&changed, desired, self.dialect, policy);
        let plan = CommandPlan::new(self.dialect.modify_command, options, &desired.username);
        if plan.has_no_options() {
            // A modify command with no options is at best a wasted call and
            // at worst tool-dependent undefined behavior; skip it entirely.
            if commands.is_empty() {
                debug!(username = %desired.username, "already converged");
                return Ok(ConvergeOutcome::Unchanged);
            }
            return Ok(ConvergeOutcome::Applied {
                action: AccountAction::Update,
                commands,
            });
        }

        info!(username = %desired.username, "updating account");
        commands.push(run_checked(self.runner.as_ref(), &plan.command, plan.argv()).await?);

        Ok(ConvergeOutcome::Applied {
            action: AccountAction::Update,
            commands,
        })
    }

    /// Remove the account. Removing an absent account is a no-op, not an
    /// error. The home directory is deleted with it only when the spec
    /// explicitly enables home management.
    ///
    /// # Errors
    ///
    /// Returns [`ConvergeError`] when the spec is invalid or the remove
    /// command fails.
    #[instrument(skip_all, fields(username = %desired.username))]
    pub async fn remove(
        &self,
        desired: &AccountSpec,
        observed: Option<&AccountSpec>,
    ) -> ConvergeResult<ConvergeOutcome> {
        desired.validate()?;
        if observed.is_none() {
            debug!(username = %desired.username, "account already absent");
            return Ok(ConvergeOutcome::Unchanged);
        }

        let mut options = Vec::new();
        if desired.manage_home == TriState::Enabled {
            options.push(PlannedOption::bare(self.dialect.remove_home_flag));
        }
        let plan = CommandPlan::new(self.dialect.remove_command, options, &desired.username);

        info!(username = %desired.username, "removing account");
        let dispatched = run_checked(self.runner.as_ref(), &plan.command, plan.argv()).await?;
        Ok(ConvergeOutcome::Applied {
            action: AccountAction::Remove,
            commands: vec![dispatched],
        })
    }

    /// Lock the account's password. Requires the account to exist and to
    /// have a password; locking an already-locked account is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ConvergeError::AccountMissing`] when the account does not
    /// exist, [`ConvergeError::NoPasswordToLock`] when it has no password,
    /// or a dispatch error when the lock command fails.
    #[instrument(skip_all, fields(username = %desired.username))]
    pub async fn lock(
        &self,
        desired: &AccountSpec,
        observed: Option<&AccountSpec>,
    ) -> ConvergeResult<ConvergeOutcome> {
        desired.validate()?;
        let Some(current) = observed else {
            return Err(ConvergeError::AccountMissing(desired.username.clone()));
        };
        match &current.password {
            None => Err(ConvergeError::NoPasswordToLock(desired.username.clone())),
            Some(hash) if hash.starts_with('!') => {
                debug!(username = %desired.username, "account already locked");
                Ok(ConvergeOutcome::Unchanged)
            }
            Some(_) => {
                let plan = CommandPlan::new(
                    self.dialect.modify_command,
                    vec![PlannedOption::bare(self.dialect.lock_flag)],
                    &desired.username,
                );
                info!(username = %desired.username, "locking account");
                let dispatched =
                    run_checked(self.runner.as_ref(), &plan.command, plan.argv()).await?;
                Ok(ConvergeOutcome::Applied {
                    action: AccountAction::Lock,
                    commands: vec![dispatched],
                })
            }
        }
    }

    /// Unlock the account's password. Unlocking an account that is not
    /// locked is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ConvergeError::AccountMissing`] when the account does not
    /// exist, or a dispatch error when the unlock command fails.
    #[instrument(skip_all, fields(username = %desired.username))]
    pub async fn unlock(
        &self,
        desired: &AccountSpec,
        observed: Option<&AccountSpec>,
    ) -> ConvergeResult<ConvergeOutcome> {
        desired.validate()?;
        let Some(current) = observed else {
            return Err(ConvergeError::AccountMissing(desired.username.clone()));
        };
        match &current.password {
            Some(hash) if hash.starts_with('!') => {
                let plan = CommandPlan::new(
                    self.dialect.modify_command,
                    vec![PlannedOption::bare(self.dialect.unlock_flag)],
                    &desired.username,
                );
                info!(username = %desired.username, "unlocking account");
                let dispatched =
                    run_checked(self.runner.as_ref(), &plan.command, plan.argv()).await?;
                Ok(ConvergeOutcome::Applied {
                    action: AccountAction::Unlock,
                    commands: vec![dispatched],
                })
            }
            _ => {
                debug!(username = %desired.username, "account not locked");
                Ok(ConvergeOutcome::Unchanged)
            }
        }
    }
}
