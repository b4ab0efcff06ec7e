//! Property-based tests for attribute merging and locator resolution.
//!
//! These tests use proptest to generate random inputs and verify that the
//! merge and templating invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::attributes::AttributeSet;
    use crate::release::DebianLocators;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    /// Strategy: a small attribute set with unique keys and string values.
    fn attribute_sets() -> impl Strategy<Value = AttributeSet> {
        prop::collection::btree_map("[a-z_]{1,10}", "[a-zA-Z0-9:/._-]{0,20}", 0..8)
            .prop_map(|map: BTreeMap<String, String>| AttributeSet::from_pairs(map))
    }

    // ============================================================================
    // shallow merge property tests
    // ============================================================================

    proptest! {
        /// Property: merging is deterministic (same inputs = same output)
        #[test]
        fn merge_is_deterministic(base in attribute_sets(), overrides in attribute_sets()) {
            let first = base.merged_with(&overrides);
            let second = base.merged_with(&overrides);
            prop_assert_eq!(first, second);
        }

        /// Property: merging the same overrides twice changes nothing
        #[test]
        fn merge_is_idempotent(base in attribute_sets(), overrides in attribute_sets()) {
            let once = base.merged_with(&overrides);
            let twice = once.merged_with(&overrides);
            prop_assert_eq!(once, twice);
        }

        /// Property: every override key wins key-for-key
        #[test]
        fn merge_override_keys_win(base in attribute_sets(), overrides in attribute_sets()) {
            let merged = base.merged_with(&overrides);
            for (key, value) in overrides.iter() {
                prop_assert_eq!(merged.get(key), Some(value));
            }
        }

        /// Property: keys only present in the base are retained unchanged
        #[test]
        fn merge_retains_base_only_keys(base in attribute_sets(), overrides in attribute_sets()) {
            let merged = base.merged_with(&overrides);
            for (key, value) in base.iter() {
                if !overrides.contains_key(key) {
                    prop_assert_eq!(merged.get(key), Some(value));
                }
            }
        }

        /// Property: the merged set contains exactly the union of the keys
        #[test]
        fn merge_key_set_is_union(base in attribute_sets(), overrides in attribute_sets()) {
            let merged = base.merged_with(&overrides);
            let mut expected: Vec<&str> = base.keys().chain(overrides.keys()).collect();
            expected.sort_unstable();
            expected.dedup();
            prop_assert_eq!(merged.len(), expected.len());
        }

        /// Property: merged keys stay unique
        #[test]
        fn merge_keys_stay_unique(base in attribute_sets(), overrides in attribute_sets()) {
            let merged = base.merged_with(&overrides);
            let mut keys: Vec<&str> = merged.keys().collect();
            let total = keys.len();
            keys.sort_unstable();
            keys.dedup();
            prop_assert_eq!(keys.len(), total);
        }

        /// Property: merging an empty set in either direction is the identity
        #[test]
        fn merge_empty_is_identity(base in attribute_sets()) {
            let empty = AttributeSet::new();
            prop_assert_eq!(base.merged_with(&empty), base.clone());
            prop_assert_eq!(empty.merged_with(&base), base);
        }
    }

    // ============================================================================
    // locator resolution property tests
    // ============================================================================

    proptest! {
        /// Property: locator resolution is deterministic for any release name
        #[test]
        fn debian_locators_are_deterministic(release in "[a-z]{1,12}") {
            let first = DebianLocators::resolve(&release, "9", None);
            let second = DebianLocators::resolve(&release, "9", None);
            prop_assert_eq!(first, second);
        }

        /// Property: any release string flows into the location verbatim
        #[test]
        fn debian_locators_embed_release(release in "[a-z0-9]{1,12}") {
            let locators = DebianLocators::resolve(&release, "9", None);
            prop_assert!(locators.location.contains(&release));
            prop_assert!(locators.release.contains(&release));
            prop_assert!(locators.release.ends_with("-backports"));
            prop_assert!(locators.release_nochange.ends_with("-backports-nochange"));
        }
    }
}
