//! Command plans and convergence outcomes.
//!
//! A [`CommandPlan`] is the compiled form of one convergence decision: a
//! command name, an ordered option list, and the trailing positional
//! username. Plans are built fresh per convergence call and consumed
//! immediately by the runner.

use serde::{Deserialize, Serialize};

/// External action a convergence call decided to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountAction {
    /// Create a new account.
    Create,
    /// Modify an existing account.
    Update,
    /// Remove an existing account.
    Remove,
    /// Lock an account's password.
    Lock,
    /// Unlock an account's password.
    Unlock,
}

impl std::fmt::Display for AccountAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AccountAction::Create => "create",
            AccountAction::Update => "update",
            AccountAction::Remove => "remove",
            AccountAction::Lock => "lock",
            AccountAction::Unlock => "unlock",
        };
        f.write_str(name)
    }
}

/// One compiled command-line option: a flag plus its value, if the flag
/// takes one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedOption {
    /// Flag literal, e.g. `-u`.
    pub flag: String,
    /// Flag argument; `None` for bare flags like `-M`.
    pub value: Option<String>,
}

impl PlannedOption {
    /// A flag that takes a value.
    #[must_use]
    pub fn with_value(flag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            flag: flag.into(),
            value: Some(value.into()),
        }
    }

    /// A bare flag.
    #[must_use]
    pub fn bare(flag: impl Into<String>) -> Self {
        Self {
            flag: flag.into(),
            value: None,
        }
    }
}

/// Fully compiled command invocation, ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandPlan {
    /// Command name, e.g. `useradd`.
    pub command: String,
    /// Ordered option list.
    pub options: Vec<PlannedOption>,
    /// Trailing positional account name.
    pub username: String,
}

impl CommandPlan {
    /// Build a plan from its parts.
    #[must_use]
    pub fn new(
        command: impl Into<String>,
        options: Vec<PlannedOption>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            command: command.into(),
            options,
            username: username.into(),
        }
    }

    /// Whether the plan carries no options at all.
    #[must_use]
    pub fn has_no_options(&self) -> bool {
        self.options.is_empty()
    }

    /// Render the argument vector: options in order, then the username.
    #[must_use]
    pub fn argv(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(self.options.len() * 2 + 1);
        for option in &self.options {
            args.push(option.flag.clone());
            if let Some(value) = &option.value {
                args.push(value.clone());
            }
        }
        args.push(self.username.clone());
        args
    }
}

/// Record of a command that was actually dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchedCommand {
    /// Command name.
    pub command: String,
    /// Full argument vector.
    pub args: Vec<String>,
}

impl DispatchedCommand {
    /// Human-readable rendering, e.g. `usermod -L adam`.
    #[must_use]
    pub fn display(&self) -> String {
        let mut out = self.command.clone();
        for arg in &self.args {
            out.push(' ');
            out.push_str(arg);
        }
        out
    }
}

/// Result of one convergence call.
///
/// `Unchanged` is a successful outcome, observably distinct from any error:
/// it means the observed state already satisfied the desired spec and zero
/// external commands ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ConvergeOutcome {
    /// No changes were needed; nothing was dispatched.
    Unchanged,
    /// One or more commands were dispatched successfully.
    Applied {
        /// The action that was taken.
        action: AccountAction,
        /// Every command dispatched for this call, in order.
        commands: Vec<DispatchedCommand>,
    },
}

impl ConvergeOutcome {
    /// Whether this call dispatched anything.
    #[must_use]
    pub fn changed(&self) -> bool {
        matches!(self, ConvergeOutcome::Applied { .. })
    }
}
