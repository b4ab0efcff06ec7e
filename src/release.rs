//! # Release Locator Mapping
//!
//! This module maps an abstract OpenStack release identifier (e.g. "ussuri",
//! "train") to the concrete distribution-specific locators that parameterize
//! the built-in repository declarations: mirror URLs, APT release suffixes,
//! repository descriptions, and GPG key file paths.
//!
//! Mapping is purely textual: release names are not validated against an
//! enum, so an unknown release simply flows into the produced URLs and
//! descriptions verbatim. Every function here is a pure function of its
//! inputs with no failure mode.

use crate::defaults;

/// Debian codename for a Debian distribution version.
///
/// Versions outside the table fall back to `stretch`, the baseline the
/// OpenStack backports archive is built against.
pub fn debian_codename(distro_version: &str) -> &'static str {
    match distro_version {
        "7" => "wheezy",
        "8" => "jessie",
        "9" => "stretch",
        "10" => "buster",
        _ => "stretch",
    }
}

/// Capitalize the first character of a release name for human-readable
/// descriptions ("train" becomes "Train").
pub fn capitalize(release: &str) -> String {
    let mut chars = release.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Locators for the Debian OpenStack backports archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebianLocators {
    /// APT source location, e.g. `http://stretch-ussuri.debian.net/debian`.
    pub location: String,
    /// Backports release suffix, e.g. `stretch-ussuri-backports`.
    pub release: String,
    /// Nochange backports release suffix, e.g.
    /// `stretch-ussuri-backports-nochange`.
    pub release_nochange: String,
}

impl DebianLocators {
    /// Resolve locators for `release` on the given distribution version.
    ///
    /// `mirror` overrides the templated default location when set.
    pub fn resolve(release: &str, distro_version: &str, mirror: Option<&str>) -> Self {
        let codename = debian_codename(distro_version);
        let location = match mirror {
            Some(mirror) => mirror.to_string(),
            None => format!("http://{}-{}.debian.net/debian", codename, release),
        };
        Self {
            location,
            release: format!("{}-{}-backports", codename, release),
            release_nochange: format!("{}-{}-backports-nochange", codename, release),
        }
    }
}

/// Locators for the RDO release and QEMU EV repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RdoLocators {
    /// Base URL of the `rdo-release` repository.
    pub release_baseurl: String,
    /// Description of the `rdo-release` repository, e.g.
    /// `OpenStack Train Repository`.
    pub release_descr: String,
    /// Base URL of the `rdo-qemu-ev` repository.
    pub virt_baseurl: String,
    /// Description of the `rdo-qemu-ev` repository.
    pub virt_descr: String,
}

impl RdoLocators {
    /// Resolve locators for `release` on the given OS major version against
    /// `mirror` (e.g. `http://mirror.centos.org`).
    pub fn resolve(release: &str, os_major: &str, mirror: &str) -> Self {
        Self {
            release_baseurl: format!(
                "{}/centos/{}/cloud/$basearch/openstack-{}/",
                mirror, os_major, release
            ),
            release_descr: format!("OpenStack {} Repository", capitalize(release)),
            virt_baseurl: format!("{}/centos/{}/virt/$basearch/kvm-common/", mirror, os_major),
            virt_descr: format!("RDO CentOS-{} - QEMU EV", os_major),
        }
    }
}

/// Locators for the EPEL repository on a given OS major version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpelLocators {
    /// Metalink URL, used when the reconciliation runtime supports metalink
    /// attributes.
    pub metalink: String,
    /// Plain mirror base URL, the fallback when metalink is unsupported.
    pub baseurl: String,
    /// Repository description.
    pub descr: String,
    /// GPG key file path under the host key directory.
    pub gpgkey: String,
}

impl EpelLocators {
    /// Resolve EPEL locators for the given OS major version.
    pub fn resolve(os_major: &str) -> Self {
        Self {
            metalink: format!(
                "https://mirrors.fedoraproject.org/metalink?repo=epel-{}&arch=$basearch",
                os_major
            ),
            baseurl: format!("https://download.fedoraproject.org/pub/epel/{}/$basearch", os_major),
            descr: format!("Extra Packages for Enterprise Linux {} - $basearch", os_major),
            gpgkey: format!("file://{}/RPM-GPG-KEY-EPEL-{}", defaults::GPG_KEY_DIR, os_major),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debian_codename_table() {
        assert_eq!(debian_codename("7"), "wheezy");
        assert_eq!(debian_codename("8"), "jessie");
        assert_eq!(debian_codename("9"), "stretch");
        assert_eq!(debian_codename("10"), "buster");
    }

    #[test]
    fn test_debian_codename_unknown_falls_back_to_stretch() {
        assert_eq!(debian_codename("42"), "stretch");
        assert_eq!(debian_codename(""), "stretch");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("train"), "Train");
        assert_eq!(capitalize("juno"), "Juno");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_debian_locators_ussuri() {
        let locators = DebianLocators::resolve("ussuri", "9", None);
        assert_eq!(locators.location, "http://stretch-ussuri.debian.net/debian");
        assert_eq!(locators.release, "stretch-ussuri-backports");
        assert_eq!(locators.release_nochange, "stretch-ussuri-backports-nochange");
    }

    #[test]
    fn test_debian_locators_pike() {
        let locators = DebianLocators::resolve("pike", "9", None);
        assert_eq!(locators.location, "http://stretch-pike.debian.net/debian");
        assert_eq!(locators.release, "stretch-pike-backports");
    }

    #[test]
    fn test_debian_locators_mirror_override() {
        let locators = DebianLocators::resolve("ussuri", "9", Some("http://mymirror/debian/"));
        assert_eq!(locators.location, "http://mymirror/debian/");
        // Suffixes stay templated even with a mirror override
        assert_eq!(locators.release, "stretch-ussuri-backports");
    }

    #[test]
    fn test_debian_locators_unknown_release_flows_through() {
        let locators = DebianLocators::resolve("zebra", "9", None);
        assert_eq!(locators.location, "http://stretch-zebra.debian.net/debian");
        assert_eq!(locators.release, "stretch-zebra-backports");
    }

    #[test]
    fn test_debian_locators_deterministic() {
        let a = DebianLocators::resolve("ussuri", "9", None);
        let b = DebianLocators::resolve("ussuri", "9", None);
        assert_eq!(a, b);
    }

    #[test]
    fn test_rdo_locators_ussuri_default_mirror() {
        let locators = RdoLocators::resolve("ussuri", "7", "http://mirror.centos.org");
        assert_eq!(
            locators.release_baseurl,
            "http://mirror.centos.org/centos/7/cloud/$basearch/openstack-ussuri/"
        );
        assert_eq!(locators.release_descr, "OpenStack Ussuri Repository");
        assert_eq!(
            locators.virt_baseurl,
            "http://mirror.centos.org/centos/7/virt/$basearch/kvm-common/"
        );
        assert_eq!(locators.virt_descr, "RDO CentOS-7 - QEMU EV");
    }

    #[test]
    fn test_rdo_locators_mirror_override() {
        let locators = RdoLocators::resolve("train", "7", "http://mirror.dfw.rax.openstack.org");
        assert_eq!(
            locators.release_baseurl,
            "http://mirror.dfw.rax.openstack.org/centos/7/cloud/$basearch/openstack-train/"
        );
        assert_eq!(locators.release_descr, "OpenStack Train Repository");
    }

    #[test]
    fn test_rdo_locators_juno() {
        let locators = RdoLocators::resolve("juno", "7", "http://mirror.centos.org");
        assert_eq!(
            locators.release_baseurl,
            "http://mirror.centos.org/centos/7/cloud/$basearch/openstack-juno/"
        );
        assert_eq!(locators.release_descr, "OpenStack Juno Repository");
    }

    #[test]
    fn test_epel_locators() {
        let locators = EpelLocators::resolve("7");
        assert_eq!(
            locators.metalink,
            "https://mirrors.fedoraproject.org/metalink?repo=epel-7&arch=$basearch"
        );
        assert_eq!(
            locators.baseurl,
            "https://download.fedoraproject.org/pub/epel/7/$basearch"
        );
        assert_eq!(locators.descr, "Extra Packages for Enterprise Linux 7 - $basearch");
        assert_eq!(locators.gpgkey, "file:///etc/pki/rpm-gpg/RPM-GPG-KEY-EPEL-7");
    }
}
