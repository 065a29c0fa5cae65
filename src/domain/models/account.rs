//! Account specification model.
//!
//! An [`AccountSpec`] describes an OS user account, either as the declared
//! target state (desired) or as the state read back from the system
//! (observed). Both sides share the same shape; an account that does not
//! exist is represented by the absence of an observed spec, not by an empty
//! one.
//!
//! Attributes are declarative: an attribute left unset in a desired spec is
//! not enforced, even when the observed account has a value for it.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::errors::ConvergeError;

/// Three-valued flag: unset (inherit the default), explicitly enabled, or
/// explicitly disabled.
///
/// Modeled as its own enum rather than `Option<bool>` so that policy tables
/// over tri-state inputs are exhaustive and checked by the compiler. On the
/// wire (YAML manifests, JSON output) it maps to absent / `true` / `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TriState {
    /// No explicit value; the consumer's default applies.
    #[default]
    Unset,
    /// Explicitly turned on.
    Enabled,
    /// Explicitly turned off.
    Disabled,
}

impl TriState {
    /// Whether no explicit value was given.
    #[must_use]
    pub fn is_unset(&self) -> bool {
        *self == TriState::Unset
    }

    /// The explicit boolean value, if one was given.
    #[must_use]
    pub fn explicit(self) -> Option<bool> {
        match self {
            TriState::Unset => None,
            TriState::Enabled => Some(true),
            TriState::Disabled => Some(false),
        }
    }
}

impl From<Option<bool>> for TriState {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => TriState::Unset,
            Some(true) => TriState::Enabled,
            Some(false) => TriState::Disabled,
        }
    }
}

impl Serialize for TriState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.explicit().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TriState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<bool>::deserialize(deserializer).map(TriState::from)
    }
}

/// The action a desired spec asks for.
///
/// Convergence is the default and is driven by diffing; the rest are
/// explicit actions dispatched directly to their own commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesiredAction {
    /// Reconcile observed state toward the spec (create or update).
    #[default]
    Converge,
    /// Remove the account.
    Remove,
    /// Lock the account's password.
    Lock,
    /// Unlock the account's password.
    Unlock,
}

impl DesiredAction {
    /// Whether this is the default converge action.
    #[must_use]
    pub fn is_converge(&self) -> bool {
        *self == DesiredAction::Converge
    }
}

/// Specification of a single user account.
///
/// The username is the identity key and is always present; every other
/// attribute is optional. Desired specs usually come from a YAML manifest,
/// observed specs from an [`AccountLookup`](crate::domain::ports::AccountLookup)
/// implementation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSpec {
    /// Account name. Identity key; never empty.
    pub username: String,

    /// Requested action; defaults to converge.
    #[serde(default, skip_serializing_if = "DesiredAction::is_converge")]
    pub action: DesiredAction,

    /// GECOS / comment field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Numeric user id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<u32>,

    /// Numeric primary group id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gid: Option<u32>,

    /// Login shell path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,

    /// Pre-hashed password, in whatever form the platform tools accept.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Home directory path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home: Option<String>,

    /// Whether the home directory should be managed alongside the account.
    /// Unset behaves like enabled; see
    /// [`home_policy`](crate::services::home_policy).
    #[serde(default, skip_serializing_if = "TriState::is_unset")]
    pub manage_home: TriState,

    /// Allow a uid that duplicates an existing account's (`-o`).
    #[serde(default, skip_serializing_if = "TriState::is_unset")]
    pub non_unique: TriState,

    /// Per-resource override of the home-management capability. When set it
    /// takes precedence over the `manage_home` default resolution.
    #[serde(default, skip_serializing_if = "TriState::is_unset")]
    pub supports_manage_home: TriState,
}

impl AccountSpec {
    /// Create an empty spec for the given username.
    #[must_use]
    pub fn named(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    /// Check the spec invariants that must hold before convergence.
    ///
    /// # Errors
    ///
    /// Returns [`ConvergeError::InvalidSpec`] when the username is empty.
    pub fn validate(&self) -> Result<(), ConvergeError> {
        if self.username.is_empty() {
            return Err(ConvergeError::InvalidSpec(
                "account username must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// A diffable account attribute.
///
/// [`AccountField::CANONICAL`] fixes the order in which options are compiled,
/// so generated commands are deterministic regardless of how a change set was
/// assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountField {
    /// GECOS / comment.
    Comment,
    /// Primary group id.
    Gid,
    /// User id.
    Uid,
    /// Login shell.
    Shell,
    /// Password hash.
    Password,
    /// Home directory path.
    Home,
}

impl AccountField {
    /// Fixed compile order for options.
    pub const CANONICAL: [AccountField; 6] = [
        AccountField::Comment,
        AccountField::Gid,
        AccountField::Uid,
        AccountField::Shell,
        AccountField::Password,
        AccountField::Home,
    ];

    /// The value the desired spec declares for this field, rendered as the
    /// command-line argument string, or `None` when the field is unset.
    #[must_use]
    pub fn desired_value(self, spec: &AccountSpec) -> Option<String> {
        match self {
            AccountField::Comment => spec.comment.clone(),
            AccountField::Gid => spec.gid.map(|gid| gid.to_string()),
            AccountField::Uid => spec.uid.map(|uid| uid.to_string()),
            AccountField::Shell => spec.shell.clone(),
            AccountField::Password => spec.password.clone(),
            AccountField::Home => spec.home.clone(),
        }
    }

    /// Whether the desired and observed values for this field differ.
    ///
    /// Ids compare numerically, everything else compares as strings. A field
    /// the desired spec leaves unset never differs; a field set on the
    /// desired side but absent on the observed side always does.
    #[must_use]
    pub fn differs(self, desired: &AccountSpec, observed: &AccountSpec) -> bool {
        match self {
            AccountField::Comment => option_differs(&desired.comment, &observed.comment),
            AccountField::Gid => option_differs(&desired.gid, &observed.gid),
            AccountField::Uid => option_differs(&desired.uid, &observed.uid),
            AccountField::Shell => option_differs(&desired.shell, &observed.shell),
            AccountField::Password => option_differs(&desired.password, &observed.password),
            AccountField::Home => option_differs(&desired.home, &observed.home),
        }
    }
}

fn option_differs<T: PartialEq>(desired: &Option<T>, observed: &Option<T>) -> bool {
    match (desired, observed) {
        (None, _) => false,
        (Some(_), None) => true,
        (Some(want), Some(have)) => want != have,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tristate_default_is_unset() {
        assert_eq!(TriState::default(), TriState::Unset);
        assert!(TriState::Unset.is_unset());
        assert_eq!(TriState::Unset.explicit(), None);
        assert_eq!(TriState::Enabled.explicit(), Some(true));
        assert_eq!(TriState::Disabled.explicit(), Some(false));
    }

    #[test]
    fn test_tristate_yaml_mapping() {
        #[derive(Deserialize)]
        struct Wrapper {
            #[serde(default)]
            flag: TriState,
        }

        let absent: Wrapper = serde_yaml::from_str("{}").unwrap();
        assert_eq!(absent.flag, TriState::Unset);

        let enabled: Wrapper = serde_yaml::from_str("flag: true").unwrap();
        assert_eq!(enabled.flag, TriState::Enabled);

        let disabled: Wrapper = serde_yaml::from_str("flag: false").unwrap();
        assert_eq!(disabled.flag, TriState::Disabled);
    }

    #[test]
    fn test_validate_rejects_empty_username() {
        let spec = AccountSpec::default();
        assert!(spec.validate().is_err());
        assert!(AccountSpec::named("adam").validate().is_ok());
    }

    #[test]
    fn test_differs_ignores_unset_desired_fields() {
        let desired = AccountSpec::named("adam");
        let mut observed = AccountSpec::named("adam");
        observed.uid = Some(1000);
        observed.comment = Some("Adam".to_string());

        for field in AccountField::CANONICAL {
            assert!(!field.differs(&desired, &observed));
        }
    }

    #[test]
    fn test_differs_when_observed_is_missing_value() {
        let mut desired = AccountSpec::named("adam");
        desired.shell = Some("/bin/zsh".to_string());
        let observed = AccountSpec::named("adam");

        assert!(AccountField::Shell.differs(&desired, &observed));
    }

    #[test]
    fn test_spec_manifest_roundtrip() {
        let yaml = r"
username: adam
uid: 1000
shell: /bin/bash
manage_home: false
";
        let spec: AccountSpec = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(spec.username, "adam");
        assert_eq!(spec.uid, Some(1000));
        assert_eq!(spec.manage_home, TriState::Disabled);
        assert_eq!(spec.supports_manage_home, TriState::Unset);

        let json = serde_json::to_string(&spec).unwrap();
        let back: AccountSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spec);
    }
}
