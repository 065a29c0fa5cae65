//! Password management strategy port.
//!
//! Password handling is the one place where platform dialects genuinely
//! diverge in mechanism rather than just flag spelling. The strategy is an
//! explicit capability bound to the controller at construction time, not a
//! subclass override, so the generic/variant boundary stays visible.

use async_trait::async_trait;

use crate::domain::errors::ConvergeError;
use crate::domain::models::{AccountSpec, DispatchedCommand};

use super::runner::CommandRunner;

/// How a strategy dealt with the password attribute for one convergence call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordHandling {
    /// Not handled here; the password folds into the generic option list.
    Generic,
    /// Handled by the strategy's own mechanism. The generic path must
    /// exclude the password field so it is not applied twice. Carries the
    /// commands the strategy dispatched, possibly none when the observed
    /// password already matched.
    Handled(Vec<DispatchedCommand>),
}

impl PasswordHandling {
    /// Whether the strategy took ownership of the password attribute.
    #[must_use]
    pub fn is_handled(&self) -> bool {
        matches!(self, PasswordHandling::Handled(_))
    }
}

/// Polymorphic password capability.
///
/// The default strategy leaves the password to the generic modify command.
/// A platform variant supplies its own mechanism and reports
/// [`PasswordHandling::Handled`], which both excludes the password from the
/// generic option list and, via empty-plan suppression, prevents a bare
/// modify command when the password was the only change.
#[async_trait]
pub trait PasswordStrategy: Send + Sync {
    /// Apply the desired password state, dispatching through `runner` when
    /// the strategy owns the mechanism.
    ///
    /// `observed` is `None` when the account was just created and had no
    /// prior state.
    ///
    /// # Errors
    ///
    /// Returns [`ConvergeError`] when the strategy's own dispatch fails.
    async fn apply(
        &self,
        desired: &AccountSpec,
        observed: Option<&AccountSpec>,
        runner: &dyn CommandRunner,
    ) -> Result<PasswordHandling, ConvergeError>;
}
