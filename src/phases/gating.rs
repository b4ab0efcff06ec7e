//! Phase 4: Conditional Gating
//!
//! Decides which built-in components survive into the resolved output,
//! driven purely by the boolean `manage_*` flags. The decision logic is a
//! single table ([`Gates::allows`]); the rest of this module just filters
//! the candidate set through it and carries the `purge_unmanaged`
//! pass-through flag onto the result.
//!
//! User-named entries carry no component tag and are never gated. A user
//! entry that shadows a built-in name inherits the built-in's component and
//! is gated with it.

use super::CandidateSet;
use crate::config::{DebianParams, Params, RedHatParams};
use crate::declaration::ResolvedConfiguration;

/// The built-in components controlled by `manage_*` flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    /// The Debian backports keyring install action (`manage_deb`).
    BackportsKeyring,
    /// The `rdo-release` repository and its signing key (`manage_rdo`).
    RdoRelease,
    /// The `rdo-qemu-ev` repository and its signing key (`manage_virt`).
    RdoQemuEv,
    /// The `epel` repository (`manage_epel`).
    Epel,
    /// The yum priorities plugin install action (`manage_priorities`).
    YumPriorities,
}

/// The gate flags for one resolution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gates {
    pub manage_deb: bool,
    pub manage_rdo: bool,
    pub manage_epel: bool,
    pub manage_virt: bool,
    pub manage_priorities: bool,
    /// Pass-through: ask the runtime to remove unmanaged repositories.
    pub purge_unmanaged: bool,
}

impl Default for Gates {
    fn default() -> Self {
        Self {
            manage_deb: true,
            manage_rdo: true,
            manage_epel: false,
            manage_virt: true,
            manage_priorities: true,
            purge_unmanaged: false,
        }
    }
}

impl Gates {
    /// Gate flags for a Debian pass. RedHat components keep their defaults;
    /// no Debian candidate ever carries them.
    pub fn debian(params: &DebianParams) -> Self {
        Self {
            manage_deb: params.manage_deb,
            ..Default::default()
        }
    }

    /// Gate flags for a RedHat pass.
    pub fn redhat(params: &RedHatParams) -> Self {
        Self {
            manage_rdo: params.manage_rdo,
            manage_epel: params.manage_epel,
            manage_virt: params.manage_virt,
            manage_priorities: params.manage_priorities,
            purge_unmanaged: params.purge_unmanaged,
            ..Default::default()
        }
    }

    /// Gate flags for either family.
    pub fn for_params(params: &Params) -> Self {
        match params {
            Params::Debian(debian) => Self::debian(debian),
            Params::RedHat(redhat) => Self::redhat(redhat),
        }
    }

    /// The decision table: is `component` emitted under these flags?
    pub fn allows(&self, component: Component) -> bool {
        match component {
            Component::BackportsKeyring => self.manage_deb,
            Component::RdoRelease => self.manage_rdo,
            Component::RdoQemuEv => self.manage_virt,
            Component::Epel => self.manage_epel,
            Component::YumPriorities => self.manage_priorities,
        }
    }
}

/// Execute phase 4: filter the candidate set through the gates.
pub fn execute(candidates: CandidateSet, gates: &Gates) -> ResolvedConfiguration {
    let allowed = |component: &Option<Component>| match component {
        Some(component) => gates.allows(*component),
        None => true,
    };

    ResolvedConfiguration {
        repos: candidates
            .repos
            .into_iter()
            .filter(|candidate| allowed(&candidate.component))
            .map(|candidate| candidate.declaration)
            .collect(),
        keys: candidates
            .keys
            .into_iter()
            .filter(|candidate| allowed(&candidate.component))
            .map(|candidate| candidate.declaration)
            .collect(),
        actions: candidates
            .actions
            .into_iter()
            .filter(|candidate| allowed(&candidate.component))
            .map(|candidate| candidate.declaration)
            .collect(),
        purge_unmanaged: gates.purge_unmanaged,
    }
}
