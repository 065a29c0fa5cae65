//! Attribute diff engine.
//!
//! Pure comparison of a desired spec against observed state. The result is
//! the minimal set of fields that actually need enforcement: fields the
//! desired spec leaves unset are never included, no matter what the observed
//! account carries, because desired state is declarative.

use std::collections::HashSet;

use crate::domain::models::{AccountField, AccountSpec};

/// Compute the set of fields whose desired value differs from observed.
///
/// When `observed` is `None` the account does not exist and every field the
/// desired spec sets is considered changed. Absent fields on either side are
/// valid inputs, not failures.
#[must_use]
pub fn diff(desired: &AccountSpec, observed: Option<&AccountSpec>) -> HashSet<AccountField> {
    AccountField::CANONICAL
        .into_iter()
        .filter(|field| match observed {
            Some(current) => field.differs(desired, current),
            None => field.desired_value(desired).is_some(),
        })
        .collect()
}
