//! Home-directory management policy.
//!
//! Two independent tri-state signals feed this decision: the spec's
//! `manage_home` attribute and the `supports_manage_home` capability
//! override. Precedence, in order:
//!
//! 1. If `supports_manage_home` is explicitly set, it is the authoritative
//!    supports signal; otherwise supports defaults to true.
//! 2. The home directory is managed iff the supports signal holds AND
//!    `manage_home` is not explicitly disabled. Unset and explicitly
//!    enabled behave identically: the default is to manage.
//!
//! Every combination of the two tri-states maps to a defined outcome; there
//! is no invalid pairing.

use crate::domain::models::{AccountSpec, TriState};

/// Resolved home-directory policy for one convergence call.
///
/// Recomputed per call from the desired spec; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomePolicy {
    /// Whether home management is supported at all for this resource.
    pub supports_manage_home: bool,
    /// Whether this convergence manages the home directory. When false, the
    /// compiled options gain the dialect's suppress-home flag.
    pub managing: bool,
}

/// Resolve the policy from the desired spec's tri-state signals.
#[must_use]
pub fn resolve(desired: &AccountSpec) -> HomePolicy {
    let supports_manage_home = desired.supports_manage_home.explicit().unwrap_or(true);
    let managing = supports_manage_home && desired.manage_home != TriState::Disabled;
    HomePolicy {
        supports_manage_home,
        managing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(manage_home: TriState, supports: TriState) -> AccountSpec {
        AccountSpec {
            manage_home,
            supports_manage_home: supports,
            ..AccountSpec::named("adam")
        }
    }

    // Full tri-state table: (manage_home, supports, expected supports,
    // expected managing).
    const TABLE: [(TriState, TriState, bool, bool); 9] = [
        (TriState::Unset, TriState::Unset, true, true),
        (TriState::Enabled, TriState::Unset, true, true),
        (TriState::Disabled, TriState::Unset, true, false),
        (TriState::Unset, TriState::Enabled, true, true),
        (TriState::Enabled, TriState::Enabled, true, true),
        (TriState::Disabled, TriState::Enabled, true, false),
        (TriState::Unset, TriState::Disabled, false, false),
        (TriState::Enabled, TriState::Disabled, false, false),
        (TriState::Disabled, TriState::Disabled, false, false),
    ];

    #[test]
    fn test_tristate_policy_table() {
        for (manage_home, supports, expect_supports, expect_managing) in TABLE {
            let policy = resolve(&spec(manage_home, supports));
            assert_eq!(
                policy.supports_manage_home, expect_supports,
                "supports for manage_home={manage_home:?} supports={supports:?}"
            );
            assert_eq!(
                policy.managing, expect_managing,
                "managing for manage_home={manage_home:?} supports={supports:?}"
            );
        }
    }

    #[test]
    fn test_default_is_managing() {
        let policy = resolve(&AccountSpec::named("adam"));
        assert!(policy.supports_manage_home);
        assert!(policy.managing);
    }

    #[test]
    fn test_explicit_enable_matches_default() {
        let default = resolve(&spec(TriState::Unset, TriState::Unset));
        let explicit = resolve(&spec(TriState::Enabled, TriState::Enabled));
        assert_eq!(default, explicit);
    }
}
