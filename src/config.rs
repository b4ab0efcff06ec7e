//! # Resolution Parameters
//!
//! This module defines the input parameter surface of the resolution engine
//! and the logic for parsing it from a YAML parameter file.
//!
//! ## Key Components
//!
//! - **`Params`**: the per-family parameter set for one resolution pass,
//!   either [`DebianParams`] or [`RedHatParams`].
//! - **`RuntimeCapability`**: an explicit statement of whether the
//!   reconciliation runtime supports yum `metalink` attributes, which
//!   selects between the two EPEL attribute templates. Passed in rather
//!   than probed, so the engine stays testable without a live runtime.
//!
//! ## Parsing
//!
//! Parsing happens in two stages, so that structural errors surface with
//! the right type. Scalar fields deserialize directly via `serde`; absent
//! keys take the documented defaults. The override-hash fields
//! (`source_hash`, `repo_hash`, `gpgkey_hash`) and the default-override
//! fields are captured as raw YAML first and converted through the typed
//! [`AttributeSet`]/[`OverrideMap`] constructors, which preserve entry order
//! and reject non-mapping and non-scalar shapes with
//! [`Error::AttributeType`](crate::error::Error::AttributeType) — the one
//! hard failure mode of a resolution pass.

use crate::attributes::{AttributeSet, OverrideMap};
use crate::defaults;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// The OS families the engine resolves for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    Debian,
    RedHat,
}

impl OsFamily {
    /// Stable lowercase name, as written in the parameter file.
    pub fn as_str(&self) -> &'static str {
        match self {
            OsFamily::Debian => "debian",
            OsFamily::RedHat => "redhat",
        }
    }
}

/// Whether the reconciliation runtime understands yum `metalink`
/// attributes.
///
/// Selects between the metalink and plain-baseurl EPEL templates. This is a
/// property of the runtime version, supplied explicitly by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeCapability {
    /// The runtime supports `metalink` (the modern default).
    #[default]
    Metalink,
    /// The runtime predates metalink support; EPEL falls back to a plain
    /// mirror `baseurl`.
    BaseurlOnly,
}

/// Parameters for a Debian-family resolution pass.
#[derive(Debug, Clone, PartialEq)]
pub struct DebianParams {
    /// Target OpenStack release name. Any string is accepted.
    pub release: String,
    /// Emit the backports keyring install action.
    pub manage_deb: bool,
    /// Additional or overriding APT sources, by name.
    pub source_hash: OverrideMap,
    /// Defaults merged under every `source_hash` entry.
    pub source_defaults: AttributeSet,
    /// Make every emitted source require the keyring install action.
    pub package_require: bool,
    /// Debian distribution version, mapped to a codename.
    pub distro_version: String,
    /// Override for the templated backports mirror location.
    pub mirror: Option<String>,
}

impl Default for DebianParams {
    fn default() -> Self {
        Self {
            release: defaults::DEFAULT_RELEASE.to_string(),
            manage_deb: true,
            source_hash: OverrideMap::new(),
            source_defaults: AttributeSet::new(),
            package_require: false,
            distro_version: defaults::DEFAULT_DEBIAN_DISTRO_VERSION.to_string(),
            mirror: None,
        }
    }
}

/// Parameters for a RedHat-family resolution pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RedHatParams {
    /// Target OpenStack release name. Any string is accepted.
    pub release: String,
    /// Emit the `rdo-release` repository and its signing key.
    pub manage_rdo: bool,
    /// Emit the `epel` repository.
    pub manage_epel: bool,
    /// Emit the `rdo-qemu-ev` repository and its signing key.
    pub manage_virt: bool,
    /// Emit the yum priorities plugin install action.
    pub manage_priorities: bool,
    /// Ask the runtime to remove repositories outside the resolved set.
    /// Passed through, never computed.
    pub purge_unmanaged: bool,
    /// Additional or overriding yum repositories, by name.
    pub repo_hash: OverrideMap,
    /// Additional or overriding GPG key files, by path.
    pub gpgkey_hash: OverrideMap,
    /// Overrides merged onto the built-in repository defaults.
    pub repo_defaults: AttributeSet,
    /// Overrides merged onto the built-in GPG key file defaults.
    pub gpgkey_defaults: AttributeSet,
    /// Mirror base for the RDO repositories.
    pub centos_mirror_url: String,
    /// RedHat-family OS major version.
    pub os_major_version: String,
}

impl Default for RedHatParams {
    fn default() -> Self {
        Self {
            release: defaults::DEFAULT_RELEASE.to_string(),
            manage_rdo: true,
            manage_epel: false,
            manage_virt: true,
            manage_priorities: true,
            purge_unmanaged: false,
            repo_hash: OverrideMap::new(),
            gpgkey_hash: OverrideMap::new(),
            repo_defaults: AttributeSet::new(),
            gpgkey_defaults: AttributeSet::new(),
            centos_mirror_url: defaults::DEFAULT_CENTOS_MIRROR.to_string(),
            os_major_version: defaults::DEFAULT_OS_MAJOR_VERSION.to_string(),
        }
    }
}

/// The complete input snapshot for one resolution pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Params {
    Debian(DebianParams),
    RedHat(RedHatParams),
}

impl Params {
    /// The OS family these parameters resolve for.
    pub fn family(&self) -> OsFamily {
        match self {
            Params::Debian(_) => OsFamily::Debian,
            Params::RedHat(_) => OsFamily::RedHat,
        }
    }

    /// Target release name.
    pub fn release(&self) -> &str {
        match self {
            Params::Debian(params) => &params.release,
            Params::RedHat(params) => &params.release,
        }
    }
}

/// Raw scalar surface of the Debian parameters; hash-typed fields are
/// converted separately so shape errors carry the attribute-type variant.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawDebianParams {
    release: String,
    manage_deb: bool,
    source_hash: serde_yaml::Value,
    source_defaults: serde_yaml::Value,
    package_require: bool,
    distro_version: String,
    mirror: Option<String>,
}

impl Default for RawDebianParams {
    fn default() -> Self {
        let typed = DebianParams::default();
        Self {
            release: typed.release,
            manage_deb: typed.manage_deb,
            source_hash: serde_yaml::Value::Null,
            source_defaults: serde_yaml::Value::Null,
            package_require: typed.package_require,
            distro_version: typed.distro_version,
            mirror: typed.mirror,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawRedHatParams {
    release: String,
    manage_rdo: bool,
    manage_epel: bool,
    manage_virt: bool,
    manage_priorities: bool,
    purge_unmanaged: bool,
    repo_hash: serde_yaml::Value,
    gpgkey_hash: serde_yaml::Value,
    repo_defaults: serde_yaml::Value,
    gpgkey_defaults: serde_yaml::Value,
    centos_mirror_url: String,
    os_major_version: String,
}

impl Default for RawRedHatParams {
    fn default() -> Self {
        let typed = RedHatParams::default();
        Self {
            release: typed.release,
            manage_rdo: typed.manage_rdo,
            manage_epel: typed.manage_epel,
            manage_virt: typed.manage_virt,
            manage_priorities: typed.manage_priorities,
            purge_unmanaged: typed.purge_unmanaged,
            repo_hash: serde_yaml::Value::Null,
            gpgkey_hash: serde_yaml::Value::Null,
            repo_defaults: serde_yaml::Value::Null,
            gpgkey_defaults: serde_yaml::Value::Null,
            centos_mirror_url: typed.centos_mirror_url,
            os_major_version: typed.os_major_version,
        }
    }
}

impl DebianParams {
    fn from_raw(raw: RawDebianParams) -> Result<Self> {
        Ok(Self {
            release: raw.release,
            manage_deb: raw.manage_deb,
            source_hash: OverrideMap::from_yaml(&raw.source_hash, "source_hash")?,
            source_defaults: AttributeSet::from_yaml(&raw.source_defaults, "source_defaults")?,
            package_require: raw.package_require,
            distro_version: raw.distro_version,
            mirror: raw.mirror,
        })
    }
}

impl RedHatParams {
    fn from_raw(raw: RawRedHatParams) -> Result<Self> {
        Ok(Self {
            release: raw.release,
            manage_rdo: raw.manage_rdo,
            manage_epel: raw.manage_epel,
            manage_virt: raw.manage_virt,
            manage_priorities: raw.manage_priorities,
            purge_unmanaged: raw.purge_unmanaged,
            repo_hash: OverrideMap::from_yaml(&raw.repo_hash, "repo_hash")?,
            gpgkey_hash: OverrideMap::from_yaml(&raw.gpgkey_hash, "gpgkey_hash")?,
            repo_defaults: AttributeSet::from_yaml(&raw.repo_defaults, "repo_defaults")?,
            gpgkey_defaults: AttributeSet::from_yaml(&raw.gpgkey_defaults, "gpgkey_defaults")?,
            centos_mirror_url: raw.centos_mirror_url,
            os_major_version: raw.os_major_version,
        })
    }
}

/// Parse a YAML parameter document into a [`Params`] snapshot.
///
/// The document must be a mapping with a `family` key naming the pipeline;
/// every other key is optional and falls back to its documented default.
///
/// # Examples
///
/// ```
/// let params = openstack_repos::config::parse("family: debian\nrelease: pike\n").unwrap();
/// assert_eq!(params.release(), "pike");
/// ```
pub fn parse(yaml: &str) -> Result<Params> {
    let doc: serde_yaml::Value = serde_yaml::from_str(yaml)?;
    if !matches!(doc, serde_yaml::Value::Mapping(_)) {
        return Err(Error::ConfigParse {
            message: "parameter file must be a YAML mapping".to_string(),
            hint: Some("start the file with 'family: debian' or 'family: redhat'".to_string()),
        });
    }

    let family = match doc.get("family") {
        Some(value) => value.as_str().ok_or_else(|| Error::ConfigParse {
            message: "'family' must be a string".to_string(),
            hint: Some("use 'family: debian' or 'family: redhat'".to_string()),
        })?,
        None => {
            return Err(Error::ConfigParse {
                message: "missing 'family' key".to_string(),
                hint: Some("add 'family: debian' or 'family: redhat'".to_string()),
            })
        }
    };

    match family {
        "debian" => {
            let raw: RawDebianParams = serde_yaml::from_value(doc.clone())?;
            Ok(Params::Debian(DebianParams::from_raw(raw)?))
        }
        "redhat" => {
            let raw: RawRedHatParams = serde_yaml::from_value(doc.clone())?;
            Ok(Params::RedHat(RedHatParams::from_raw(raw)?))
        }
        other => Err(Error::UnknownFamily {
            family: other.to_string(),
        }),
    }
}

/// Read and parse a parameter file from disk.
pub fn from_file(path: &Path) -> Result<Params> {
    let contents = fs::read_to_string(path)?;
    parse(&contents)
}
