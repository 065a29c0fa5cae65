//! Option compiler and command dialects.
//!
//! A [`Dialect`] is the read-only registry mapping account fields to the
//! flag literals of one platform's account tools. Registries are defined
//! once as statics and never mutated at run time.
//!
//! Compilation walks [`AccountField::CANONICAL`], not the change set, so the
//! emitted option order is stable across calls and testable byte-for-byte.

use std::collections::HashSet;

use crate::domain::models::{AccountField, AccountSpec, PlannedOption, TriState};

use super::home_policy::HomePolicy;

/// Per-platform command registry for account management tools.
#[derive(Debug)]
pub struct Dialect {
    /// Dialect name, used for config selection.
    pub name: &'static str,
    /// Command that creates an account.
    pub create_command: &'static str,
    /// Command that modifies an account.
    pub modify_command: &'static str,
    /// Command that removes an account.
    pub remove_command: &'static str,
    /// Field-to-flag registry. A field with no entry is not manageable in
    /// this dialect and compiles to nothing.
    flags: &'static [(AccountField, &'static str)],
    /// Flag that suppresses home-directory management.
    pub suppress_home_flag: &'static str,
    /// Flag passed to the remove command to also delete the home directory.
    pub remove_home_flag: &'static str,
    /// Flag allowing a duplicate uid.
    pub non_unique_flag: &'static str,
    /// Modify-command flag that locks the password.
    pub lock_flag: &'static str,
    /// Modify-command flag that unlocks the password.
    pub unlock_flag: &'static str,
}

static USERADD: Dialect = Dialect {
    name: "useradd",
    create_command: "useradd",
    modify_command: "usermod",
    remove_command: "userdel",
    flags: &[
        (AccountField::Comment, "-c"),
        (AccountField::Gid, "-g"),
        (AccountField::Uid, "-u"),
        (AccountField::Shell, "-s"),
        (AccountField::Password, "-p"),
        (AccountField::Home, "-d"),
    ],
    suppress_home_flag: "-M",
    remove_home_flag: "-r",
    non_unique_flag: "-o",
    lock_flag: "-L",
    unlock_flag: "-U",
};

// Same tool family, but passwords never go through usermod: the Solaris
// variant's password strategy owns that mechanism, so the registry has no
// password entry.
static SOLARIS: Dialect = Dialect {
    name: "solaris",
    create_command: "useradd",
    modify_command: "usermod",
    remove_command: "userdel",
    flags: &[
        (AccountField::Comment, "-c"),
        (AccountField::Gid, "-g"),
        (AccountField::Uid, "-u"),
        (AccountField::Shell, "-s"),
        (AccountField::Home, "-d"),
    ],
    suppress_home_flag: "-M",
    remove_home_flag: "-r",
    non_unique_flag: "-o",
    lock_flag: "-L",
    unlock_flag: "-U",
};

impl Dialect {
    /// The generic Linux `useradd` dialect.
    #[must_use]
    pub fn useradd() -> &'static Dialect {
        &USERADD
    }

    /// The Solaris variant: same tools, password managed out of band.
    #[must_use]
    pub fn solaris() -> &'static Dialect {
        &SOLARIS
    }

    /// Resolve a dialect by configured name.
    #[must_use]
    pub fn by_name(name: &str) -> Option<&'static Dialect> {
        match name {
            "useradd" => Some(&USERADD),
            "solaris" => Some(&SOLARIS),
            _ => None,
        }
    }

    /// The flag literal for a field, when this dialect can manage it.
    #[must_use]
    pub fn flag_for(&self, field: AccountField) -> Option<&'static str> {
        self.flags
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map(|(_, flag)| *flag)
    }
}

/// Compile changed fields into an ordered option list.
///
/// Fields are visited in canonical order regardless of the change set's
/// iteration order. Fields the dialect has no flag for are skipped silently.
/// When a uid option is emitted and the spec allows duplicate uids, the
/// dialect's non-unique flag is appended after the field options.
#[must_use]
pub fn compile(
    changed: &HashSet<AccountField>,
    desired: &AccountSpec,
    dialect: &Dialect,
) -> Vec<PlannedOption> {
    let mut options = Vec::new();
    let mut uid_emitted = false;
    for field in AccountField::CANONICAL {
        if !changed.contains(&field) {
            continue;
        }
        let Some(flag) = dialect.flag_for(field) else {
            continue;
        };
        if let Some(value) = field.desired_value(desired) {
            uid_emitted |= field == AccountField::Uid;
            options.push(PlannedOption::with_value(flag, value));
        }
    }
    if uid_emitted && desired.non_unique == TriState::Enabled {
        options.push(PlannedOption::bare(dialect.non_unique_flag));
    }
    options
}

/// Compile the full option list for a create or modify command: canonical
/// field options first, then the policy-derived suppress-home flag when home
/// management is disabled.
#[must_use]
pub fn universal_options(
    changed: &HashSet<AccountField>,
    desired: &AccountSpec,
    dialect: &Dialect,
    policy: HomePolicy,
) -> Vec<PlannedOption> {
    let mut options = compile(changed, desired, dialect);
    if !policy.managing {
        options.push(PlannedOption::bare(dialect.suppress_home_flag));
    }
    options
}
