//! Phase 2: Default Merging
//!
//! Produces the effective default attribute sets for the pass by
//! shallow-merging the user-supplied default overrides on top of the
//! built-in baselines. Applied once per declaration family (repository
//! defaults, GPG key defaults) before any per-entry override.
//!
//! Overriding a default set is additive: supplying `repo_defaults` with a
//! single `proxy` key yields a proxy on top of the full built-in baseline,
//! not a baseline reduced to one key.

use super::EffectiveDefaults;
use crate::attributes::AttributeSet;
use crate::config::Params;
use crate::defaults;

/// Shallow-merge user default overrides onto a built-in baseline.
///
/// Every key in `user_overrides` replaces the same key in `builtin`; keys
/// present only in `builtin` are retained; keys present only in
/// `user_overrides` are added.
pub fn merge_defaults(builtin: &AttributeSet, user_overrides: &AttributeSet) -> AttributeSet {
    builtin.merged_with(user_overrides)
}

/// Execute phase 2: compute the effective defaults for the pass.
pub fn execute(params: &Params) -> EffectiveDefaults {
    match params {
        Params::Debian(debian) => EffectiveDefaults {
            repo: merge_defaults(&defaults::debian_source_defaults(), &debian.source_defaults),
            key: AttributeSet::new(),
        },
        Params::RedHat(redhat) => EffectiveDefaults {
            repo: merge_defaults(&defaults::redhat_repo_defaults(), &redhat.repo_defaults),
            key: merge_defaults(&defaults::redhat_gpgkey_defaults(), &redhat.gpgkey_defaults),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DebianParams, RedHatParams};

    #[test]
    fn test_merge_defaults_user_wins() {
        let builtin = AttributeSet::from_pairs([("enabled", "1"), ("gpgcheck", "1")]);
        let user = AttributeSet::from_pairs([("gpgcheck", "0")]);

        let merged = merge_defaults(&builtin, &user);
        assert_eq!(merged.get("enabled").unwrap(), "1");
        assert_eq!(merged.get("gpgcheck").unwrap(), "0");
    }

    #[test]
    fn test_execute_redhat_baseline_survives_partial_override() {
        let params = Params::RedHat(RedHatParams {
            repo_defaults: AttributeSet::from_pairs([("proxy", "http://my.proxy.com:8000")]),
            ..Default::default()
        });

        let effective = execute(&params);
        assert_eq!(effective.repo.get("proxy").unwrap(), "http://my.proxy.com:8000");
        assert_eq!(effective.repo.get("enabled").unwrap(), "1");
        assert_eq!(effective.repo.get("mirrorlist").unwrap(), "absent");
        assert_eq!(
            effective.repo.get("require").unwrap(),
            "Anchor[openstack_extras_redhat]"
        );
    }

    #[test]
    fn test_execute_redhat_gpgkey_defaults() {
        let params = Params::RedHat(RedHatParams {
            gpgkey_defaults: AttributeSet::from_pairs([("owner", "steve")]),
            ..Default::default()
        });

        let effective = execute(&params);
        assert_eq!(effective.key.get("owner").unwrap(), "steve");
        assert_eq!(effective.key.get("group").unwrap(), "root");
        assert_eq!(effective.key.get("mode").unwrap(), "0644");
    }

    #[test]
    fn test_execute_debian_starts_from_empty_baseline() {
        let params = Params::Debian(DebianParams {
            source_defaults: AttributeSet::from_pairs([("include_src", "true")]),
            ..Default::default()
        });

        let effective = execute(&params);
        assert_eq!(effective.repo.len(), 1);
        assert_eq!(effective.repo.get("include_src").unwrap(), "true");
        assert!(effective.key.is_empty());
    }
}
