//! Password strategy implementations.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::errors::ConvergeError;
use crate::domain::models::AccountSpec;
use crate::domain::ports::{CommandRunner, PasswordHandling, PasswordStrategy};

use super::converge::run_checked;

/// Default strategy: the password is just another attribute and folds into
/// the generic modify command through the dialect registry.
#[derive(Debug, Default)]
pub struct FoldIntoModify;

#[async_trait]
impl PasswordStrategy for FoldIntoModify {
    async fn apply(
        &self,
        _desired: &AccountSpec,
        _observed: Option<&AccountSpec>,
        _runner: &dyn CommandRunner,
    ) -> Result<PasswordHandling, ConvergeError> {
        Ok(PasswordHandling::Generic)
    }
}

/// Solaris variant: passwords are set through a dedicated command, never
/// through `usermod`. Always reports handled, so a password-only change
/// leaves the generic option list empty and no bare modify command runs.
#[derive(Debug)]
pub struct SolarisPasswordStrategy {
    command: String,
}

impl SolarisPasswordStrategy {
    /// Strategy using the platform's default password tool.
    #[must_use]
    pub fn new() -> Self {
        Self {
            command: "passwd".to_string(),
        }
    }

    /// Strategy using a custom password command, mainly for tests.
    #[must_use]
    pub fn with_command(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    fn password_differs(desired: &AccountSpec, observed: Option<&AccountSpec>) -> bool {
        match (&desired.password, observed) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(want), Some(current)) => current.password.as_ref() != Some(want),
        }
    }
}

impl Default for SolarisPasswordStrategy {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasswordStrategy for SolarisPasswordStrategy {
    async fn apply(
        &self,
        desired: &AccountSpec,
        observed: Option<&AccountSpec>,
        runner: &dyn CommandRunner,
    ) -> Result<PasswordHandling, ConvergeError> {
        if !Self::password_differs(desired, observed) {
            debug!(username = %desired.username, "password already converged");
            return Ok(PasswordHandling::Handled(Vec::new()));
        }
        let Some(password) = &desired.password else {
            return Ok(PasswordHandling::Handled(Vec::new()));
        };

        let args = vec![
            "-p".to_string(),
            password.clone(),
            desired.username.clone(),
        ];
        let dispatched = run_checked(runner, &self.command, args).await?;
        Ok(PasswordHandling::Handled(vec![dispatched]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::recording::RecordingRunner;

    #[tokio::test]
    async fn test_fold_into_modify_never_handles() {
        let runner = RecordingRunner::new();
        let desired = AccountSpec {
            password: Some("hash".to_string()),
            ..AccountSpec::named("adam")
        };

        let handling = FoldIntoModify
            .apply(&desired, None, &runner)
            .await
            .unwrap();
        assert_eq!(handling, PasswordHandling::Generic);
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_solaris_dispatches_on_password_change() {
        let runner = RecordingRunner::new();
        let desired = AccountSpec {
            password: Some("newhash".to_string()),
            ..AccountSpec::named("adam")
        };
        let observed = AccountSpec {
            password: Some("oldhash".to_string()),
            ..AccountSpec::named("adam")
        };

        let handling = SolarisPasswordStrategy::new()
            .apply(&desired, Some(&observed), &runner)
            .await
            .unwrap();

        assert!(handling.is_handled());
        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "passwd");
        assert_eq!(calls[0].1, vec!["-p", "newhash", "adam"]);
    }

    #[tokio::test]
    async fn test_solaris_handles_without_dispatch_when_matching() {
        let runner = RecordingRunner::new();
        let spec = AccountSpec {
            password: Some("hash".to_string()),
            ..AccountSpec::named("adam")
        };

        let handling = SolarisPasswordStrategy::new()
            .apply(&spec, Some(&spec.clone()), &runner)
            .await
            .unwrap();

        assert_eq!(handling, PasswordHandling::Handled(Vec::new()));
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_solaris_dispatch_failure_surfaces() {
        let runner = RecordingRunner::failing(1, "permission denied");
        let desired = AccountSpec {
            password: Some("hash".to_string()),
            ..AccountSpec::named("adam")
        };

        let err = SolarisPasswordStrategy::new()
            .apply(&desired, None, &runner)
            .await
            .unwrap_err();
        assert!(matches!(err, ConvergeError::Dispatch { status: 1, .. }));
    }
}
