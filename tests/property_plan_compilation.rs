//! Property tests for diff minimality and compile-order determinism.

use std::collections::HashSet;

use proptest::prelude::*;

use accord::domain::models::{AccountField, AccountSpec};
use accord::services::{options, Dialect};
use accord::services::diff::diff;

fn arb_spec(username: &'static str) -> impl Strategy<Value = AccountSpec> {
    (
        proptest::option::of("[a-zA-Z ]{1,12}"),
        proptest::option::of(0u32..60_000),
        proptest::option::of(0u32..60_000),
        proptest::option::of(prop_oneof![
            Just("/bin/bash".to_string()),
            Just("/bin/sh".to_string()),
            Just("/usr/bin/zsh".to_string()),
        ]),
        proptest::option::of("[a-z0-9$./]{4,16}"),
        proptest::option::of(prop_oneof![
            Just("/home/adam".to_string()),
            Just("/srv/adam".to_string()),
        ]),
    )
        .prop_map(move |(comment, uid, gid, shell, password, home)| AccountSpec {
            comment,
            uid,
            gid,
            shell,
            password,
            home,
            ..AccountSpec::named(username)
        })
}

proptest! {
    /// The diff contains exactly the fields where the desired spec sets a
    /// value that the observed spec lacks or contradicts.
    #[test]
    fn diff_is_minimal(desired in arb_spec("adam"), observed in arb_spec("adam")) {
        let changed = diff(&desired, Some(&observed));

        for field in AccountField::CANONICAL {
            let expected = match (field.desired_value(&desired), field.desired_value(&observed)) {
                (None, _) => false,
                (Some(_), None) => true,
                (Some(want), Some(have)) => want != have,
            };
            prop_assert_eq!(
                changed.contains(&field),
                expected,
                "field {:?}",
                field
            );
        }
    }

    /// A matching observed spec always diffs to the empty set.
    #[test]
    fn diff_of_identical_specs_is_empty(desired in arb_spec("adam")) {
        let observed = desired.clone();
        prop_assert!(diff(&desired, Some(&observed)).is_empty());
    }

    /// Against an absent account, the diff is every set field.
    #[test]
    fn diff_against_absent_is_every_set_field(desired in arb_spec("adam")) {
        let changed = diff(&desired, None);
        for field in AccountField::CANONICAL {
            prop_assert_eq!(
                changed.contains(&field),
                field.desired_value(&desired).is_some()
            );
        }
    }

    /// Compilation emits flags in canonical field order regardless of how
    /// the change set was assembled, and is stable across calls.
    #[test]
    fn compile_order_is_canonical_and_stable(
        desired in arb_spec("adam"),
        mask in proptest::collection::vec(any::<bool>(), 6),
    ) {
        let changed: HashSet<AccountField> = AccountField::CANONICAL
            .into_iter()
            .zip(mask)
            .filter_map(|(field, keep)| keep.then_some(field))
            .collect();

        let dialect = Dialect::useradd();
        let first = options::compile(&changed, &desired, dialect);
        let second = options::compile(&changed, &desired, dialect);
        prop_assert_eq!(&first, &second);

        // The emitted flag sequence must be a subsequence of the canonical
        // flag order.
        let canonical_flags: Vec<&str> = AccountField::CANONICAL
            .into_iter()
            .filter_map(|field| dialect.flag_for(field))
            .collect();
        let mut cursor = 0;
        for option in &first {
            let position = canonical_flags[cursor..]
                .iter()
                .position(|flag| *flag == option.flag);
            prop_assert!(position.is_some(), "flag {} out of order", option.flag);
            cursor += position.unwrap() + 1;
        }
    }
}
