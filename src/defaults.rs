//! Default values and built-in baselines for repository resolution.
//!
//! This module centralizes the constants and baseline attribute sets shared
//! by both resolution pipelines: default release and distribution versions,
//! mirror bases, ordering anchors, and the built-in default attribute sets
//! that user-supplied defaults are shallow-merged onto.

use crate::attributes::AttributeSet;

/// Default OpenStack release resolved when no release is given.
pub const DEFAULT_RELEASE: &str = "ussuri";

/// Default Debian distribution version (maps to the `stretch` codename).
pub const DEFAULT_DEBIAN_DISTRO_VERSION: &str = "9";

/// Default RedHat-family OS major version.
pub const DEFAULT_OS_MAJOR_VERSION: &str = "7";

/// Default CentOS mirror base used for the RDO repositories.
pub const DEFAULT_CENTOS_MIRROR: &str = "http://mirror.centos.org";

/// Host directory holding RPM GPG key files.
pub const GPG_KEY_DIR: &str = "/etc/pki/rpm-gpg";

/// File name of the CentOS Cloud SIG signing key (signs `rdo-release`).
pub const CLOUD_SIG_KEY: &str = "RPM-GPG-KEY-CentOS-SIG-Cloud";

/// File name of the CentOS Virtualization SIG signing key (signs
/// `rdo-qemu-ev`).
pub const VIRT_SIG_KEY: &str = "RPM-GPG-KEY-CentOS-SIG-Virtualization";

/// Source base the reconciliation runtime serves key material from.
pub const KEY_SOURCE_BASE: &str = "puppet:///modules/openstack_extras";

/// Ordering anchor referenced by RedHat repo and key declarations. Key files
/// complete `before` the anchor; repositories `require` it.
pub const REDHAT_ANCHOR: &str = "Anchor[openstack_extras_redhat]";

/// Named reference to the yum metadata refresh triggered after repository
/// changes.
pub const YUM_REFRESH: &str = "Exec[yum_refresh]";

/// Package providing the Debian OpenStack backports archive keyring.
pub const BACKPORTS_KEYRING_PACKAGE: &str = "openstack-backports-archive-keyring";

/// Named reference to the keyring install action, used as a `require` hint
/// when `package_require` is set.
pub const BACKPORTS_KEYRING_REQUIRE: &str = "Exec[installing openstack-backports-archive-keyring]";

/// Built-in baseline defaults for RedHat yum repositories.
///
/// User-supplied `repo_defaults` are shallow-merged on top of this set, so
/// overriding a single key (say, adding a proxy) keeps the rest intact.
pub fn redhat_repo_defaults() -> AttributeSet {
    AttributeSet::from_pairs([
        ("enabled", "1"),
        ("gpgcheck", "1"),
        ("mirrorlist", "absent"),
        ("require", REDHAT_ANCHOR),
        ("notify", YUM_REFRESH),
    ])
}

/// Built-in baseline defaults for RedHat GPG key files.
pub fn redhat_gpgkey_defaults() -> AttributeSet {
    AttributeSet::from_pairs([
        ("owner", "root"),
        ("group", "root"),
        ("mode", "0644"),
        ("before", REDHAT_ANCHOR),
    ])
}

/// Built-in baseline defaults for Debian APT sources.
///
/// Empty: the built-in backports sources carry their attributes directly,
/// and user sources start from whatever `source_defaults` supplies.
pub fn debian_source_defaults() -> AttributeSet {
    AttributeSet::new()
}
