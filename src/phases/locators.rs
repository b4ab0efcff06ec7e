//! Phase 1: Locator Mapping
//!
//! Maps the abstract release identifier in the parameter snapshot to the
//! concrete distribution-specific locators the later phases template the
//! built-in declarations from. Pure and total: unknown release names flow
//! through as literal text.

use crate::config::Params;
use crate::release::{DebianLocators, EpelLocators, RdoLocators};

/// Locators for one resolution pass, per OS family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locators {
    Debian(DebianLocators),
    RedHat {
        rdo: RdoLocators,
        epel: EpelLocators,
    },
}

/// Execute phase 1: resolve locators from the parameter snapshot.
pub fn execute(params: &Params) -> Locators {
    match params {
        Params::Debian(debian) => Locators::Debian(DebianLocators::resolve(
            &debian.release,
            &debian.distro_version,
            debian.mirror.as_deref(),
        )),
        Params::RedHat(redhat) => Locators::RedHat {
            rdo: RdoLocators::resolve(
                &redhat.release,
                &redhat.os_major_version,
                &redhat.centos_mirror_url,
            ),
            epel: EpelLocators::resolve(&redhat.os_major_version),
        },
    }
}
