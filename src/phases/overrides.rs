//! Phase 3: Override Application
//!
//! Builds the candidate declaration set for the pass: the built-in entries
//! templated from the phase-1 locators, with the per-entry user overrides
//! from the `source_hash` / `repo_hash` / `gpgkey_hash` parameters applied
//! on top of the phase-2 effective defaults.
//!
//! ## Override semantics
//!
//! - Every user entry is shallow-merged onto the effective defaults, user
//!   key winning key-for-key. Entry-specific built-in attributes do not
//!   leak into user entries: a user entry that shadows a built-in name
//!   replaces that built-in outright.
//! - User entries are emitted first, in insertion order, followed by the
//!   built-ins they did not shadow.
//! - A user entry shadowing a built-in inherits the built-in's gate
//!   component; entries with new names are never gated.
//! - Attribute keys outside the per-kind whitelist are logged as warnings
//!   and passed through.

use super::gating::Component;
use super::locators::Locators;
use super::{Candidate, CandidateSet, EffectiveDefaults};
use crate::attributes::{AttributeSet, OverrideMap};
use crate::config::{DebianParams, Params, RedHatParams, RuntimeCapability};
use crate::declaration::{DeclareKind, GuardedAction, KeyDeclaration, RepoDeclaration, RepoKind};
use crate::defaults;
use crate::release::{DebianLocators, EpelLocators, RdoLocators};
use log::warn;

/// Execute phase 3: build the candidate declarations for the pass.
pub fn execute(
    params: &Params,
    locators: &Locators,
    effective: &EffectiveDefaults,
    capability: RuntimeCapability,
) -> CandidateSet {
    match (params, locators) {
        (Params::Debian(debian), Locators::Debian(locators)) => {
            debian_candidates(debian, locators, effective)
        }
        (Params::RedHat(redhat), Locators::RedHat { rdo, epel }) => {
            redhat_candidates(redhat, rdo, epel, effective, capability)
        }
        // Locators come from phase 1 on the same params; families cannot
        // diverge within one pass.
        _ => unreachable!("locator family does not match parameter family"),
    }
}

/// Merge user repository entries over the built-in base entries.
///
/// Exposed for the per-family builders; the emission-order and
/// component-inheritance rules live here.
pub fn apply_overrides(
    base_entries: Vec<(Option<Component>, String, AttributeSet)>,
    effective_defaults: &AttributeSet,
    user_entries: &OverrideMap,
    kind: RepoKind,
) -> Vec<Candidate<RepoDeclaration>> {
    let mut candidates = Vec::with_capacity(base_entries.len() + user_entries.len());

    for (name, attributes) in user_entries.iter() {
        warn_unrecognized(kind.into(), name, attributes);
        let component = base_entries
            .iter()
            .find(|(_, base_name, _)| base_name == name)
            .and_then(|(component, _, _)| *component);
        let declaration = RepoDeclaration {
            name: name.to_string(),
            kind,
            attributes: effective_defaults.merged_with(attributes),
        };
        candidates.push(Candidate {
            component,
            declaration,
        });
    }

    for (component, name, attributes) in base_entries {
        if user_entries.contains(&name) {
            continue;
        }
        candidates.push(Candidate {
            component,
            declaration: RepoDeclaration {
                name,
                kind,
                attributes,
            },
        });
    }

    candidates
}

/// Merge user GPG key entries over the built-in key files, same rules as
/// [`apply_overrides`].
fn apply_key_overrides(
    base_entries: Vec<(Option<Component>, String, AttributeSet)>,
    effective_defaults: &AttributeSet,
    user_entries: &OverrideMap,
) -> Vec<Candidate<KeyDeclaration>> {
    let mut candidates = Vec::with_capacity(base_entries.len() + user_entries.len());

    for (path, attributes) in user_entries.iter() {
        warn_unrecognized(DeclareKind::File, path, attributes);
        let component = base_entries
            .iter()
            .find(|(_, base_path, _)| base_path == path)
            .and_then(|(component, _, _)| *component);
        candidates.push(Candidate {
            component,
            declaration: KeyDeclaration {
                path: path.to_string(),
                attributes: effective_defaults.merged_with(attributes),
            },
        });
    }

    for (component, path, attributes) in base_entries {
        if user_entries.contains(&path) {
            continue;
        }
        candidates.push(Candidate {
            component,
            declaration: KeyDeclaration { path, attributes },
        });
    }

    candidates
}

fn warn_unrecognized(kind: DeclareKind, name: &str, attributes: &AttributeSet) {
    for key in attributes.unrecognized_keys(kind.recognized_keys()) {
        warn!(
            "unrecognized {} attribute '{}' on '{}', passing through",
            kind, key, name
        );
    }
}

fn debian_candidates(
    params: &DebianParams,
    locators: &DebianLocators,
    effective: &EffectiveDefaults,
) -> CandidateSet {
    let mut backports = AttributeSet::new();
    backports.set("location", locators.location.clone());
    backports.set("release", locators.release.clone());
    backports.set("repos", "main");

    let mut nochange = AttributeSet::new();
    nochange.set("location", locators.location.clone());
    nochange.set("release", locators.release_nochange.clone());
    nochange.set("repos", "main");

    // The require hint sits under user attributes, so an explicit per-entry
    // require still wins.
    let mut entry_defaults = effective.repo.clone();
    if params.package_require {
        backports.set("require", defaults::BACKPORTS_KEYRING_REQUIRE);
        nochange.set("require", defaults::BACKPORTS_KEYRING_REQUIRE);
        entry_defaults.set("require", defaults::BACKPORTS_KEYRING_REQUIRE);
    }

    let base_entries = vec![
        (None, "debian-openstack-backports".to_string(), backports),
        (None, "debian-openstack-backports-nochange".to_string(), nochange),
    ];

    let mut candidates = CandidateSet::new();
    candidates.repos = apply_overrides(
        base_entries,
        &entry_defaults,
        &params.source_hash,
        RepoKind::AptSource,
    );
    candidates.actions.push(Candidate::gated(
        Component::BackportsKeyring,
        GuardedAction {
            name: format!("installing {}", defaults::BACKPORTS_KEYRING_PACKAGE),
            command: format!(
                "/usr/bin/apt-get -y --allow-unauthenticated install {}",
                defaults::BACKPORTS_KEYRING_PACKAGE
            ),
            probe: format!("/usr/bin/dpkg -s {}", defaults::BACKPORTS_KEYRING_PACKAGE),
            tries: 3,
            try_sleep: 1,
        },
    ));
    candidates
}

fn redhat_candidates(
    params: &RedHatParams,
    rdo: &RdoLocators,
    epel: &EpelLocators,
    effective: &EffectiveDefaults,
    capability: RuntimeCapability,
) -> CandidateSet {
    let cloud_key_path = format!("{}/{}", defaults::GPG_KEY_DIR, defaults::CLOUD_SIG_KEY);
    let virt_key_path = format!("{}/{}", defaults::GPG_KEY_DIR, defaults::VIRT_SIG_KEY);

    let mut rdo_release = effective.repo.clone();
    rdo_release.set("baseurl", rdo.release_baseurl.clone());
    rdo_release.set("descr", rdo.release_descr.clone());
    rdo_release.set("gpgkey", format!("file://{}", cloud_key_path));

    let mut rdo_qemu_ev = effective.repo.clone();
    rdo_qemu_ev.set("baseurl", rdo.virt_baseurl.clone());
    rdo_qemu_ev.set("descr", rdo.virt_descr.clone());
    rdo_qemu_ev.set("gpgkey", format!("file://{}", virt_key_path));

    let mut epel_repo = effective.repo.clone();
    match capability {
        RuntimeCapability::Metalink => epel_repo.set("metalink", epel.metalink.clone()),
        RuntimeCapability::BaseurlOnly => epel_repo.set("baseurl", epel.baseurl.clone()),
    }
    epel_repo.set("descr", epel.descr.clone());
    epel_repo.set("gpgkey", epel.gpgkey.clone());
    epel_repo.set("failovermethod", "priority");

    let base_repos = vec![
        (Some(Component::RdoRelease), "rdo-release".to_string(), rdo_release),
        (Some(Component::RdoQemuEv), "rdo-qemu-ev".to_string(), rdo_qemu_ev),
        (Some(Component::Epel), "epel".to_string(), epel_repo),
    ];

    let mut cloud_key = effective.key.clone();
    cloud_key.set(
        "source",
        format!("{}/{}", defaults::KEY_SOURCE_BASE, defaults::CLOUD_SIG_KEY),
    );
    let mut virt_key = effective.key.clone();
    virt_key.set(
        "source",
        format!("{}/{}", defaults::KEY_SOURCE_BASE, defaults::VIRT_SIG_KEY),
    );

    let base_keys = vec![
        (Some(Component::RdoRelease), cloud_key_path, cloud_key),
        (Some(Component::RdoQemuEv), virt_key_path, virt_key),
    ];

    let mut candidates = CandidateSet::new();
    candidates.repos = apply_overrides(
        base_repos,
        &effective.repo,
        &params.repo_hash,
        RepoKind::YumRepo,
    );
    candidates.keys = apply_key_overrides(base_keys, &effective.key, &params.gpgkey_hash);
    candidates.actions.push(Candidate::gated(
        Component::YumPriorities,
        GuardedAction {
            name: "installing_yum-plugin-priorities".to_string(),
            command: "/usr/bin/yum install -y yum-plugin-priorities".to_string(),
            probe: "/usr/bin/rpm -qa | /usr/bin/grep -q yum-plugin-priorities".to_string(),
            tries: 3,
            try_sleep: 1,
        },
    ));
    candidates
}
