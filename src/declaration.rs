//! # Declarations and the Reconciliation Interface
//!
//! This module defines the value objects produced by a resolution pass and
//! the interface through which they are handed to the external
//! resource-reconciliation runtime.
//!
//! ## Key Components
//!
//! - **`RepoDeclaration`**: a resolved package repository (APT source or
//!   yum repo) with its full attribute set.
//! - **`KeyDeclaration`**: a GPG key file that must exist on the host,
//!   including an ordering hint placing it before the repositories that
//!   trust it.
//! - **`GuardedAction`**: an exec-once-if-absent action (e.g. installing a
//!   keyring package), gated by an idempotency probe and bounded by a retry
//!   policy.
//! - **`ResolvedConfiguration`**: the complete output of one pass. Value
//!   objects only, produced fresh each pass and never mutated afterwards.
//! - **`Reconciler`**: the `declare(kind, name, attributes)` interface the
//!   engine emits through. The engine performs no host I/O itself; a
//!   [`RecordingReconciler`] is provided for tests and for rendering.
//!
//! Ordering between declarations is declarative: key files carry `before`
//! hints and repositories carry `require` hints naming a shared anchor, and
//! the external runtime enforces them. The emitter additionally sequences
//! kinds (files, then repositories, then actions) so a linear consumer sees
//! dependencies first.

use crate::attributes::AttributeSet;
use crate::error::Result;
use serde::Serialize;
use std::fmt;

/// The resource kinds the engine declares against the reconciliation
/// runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclareKind {
    /// A Debian APT source.
    AptSource,
    /// A RedHat yum repository.
    YumRepo,
    /// A file holding GPG key material.
    File,
    /// A guarded, idempotent exec action.
    Exec,
}

impl DeclareKind {
    /// Stable lowercase name of the kind, as rendered in output.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclareKind::AptSource => "apt_source",
            DeclareKind::YumRepo => "yumrepo",
            DeclareKind::File => "file",
            DeclareKind::Exec => "exec",
        }
    }

    /// Attribute keys recognized for this kind.
    ///
    /// Unrecognized keys are warned about and passed through rather than
    /// rejected, so the surface stays permissive for runtime-specific
    /// attributes.
    pub fn recognized_keys(&self) -> &'static [&'static str] {
        match self {
            DeclareKind::AptSource => &[
                "location",
                "release",
                "repos",
                "include_src",
                "include_deb",
                "key",
                "key_server",
                "key_source",
                "pin",
                "architecture",
                "allow_unsigned",
                "require",
                "notify",
                "before",
            ],
            DeclareKind::YumRepo => &[
                "baseurl",
                "descr",
                "enabled",
                "gpgcheck",
                "gpgkey",
                "mirrorlist",
                "metalink",
                "failovermethod",
                "priority",
                "proxy",
                "exclude",
                "includepkgs",
                "skip_if_unavailable",
                "require",
                "notify",
                "before",
            ],
            DeclareKind::File => &[
                "owner",
                "group",
                "mode",
                "source",
                "content",
                "before",
                "require",
            ],
            DeclareKind::Exec => &[
                "command",
                "unless",
                "logoutput",
                "tries",
                "try_sleep",
                "path",
                "require",
                "notify",
                "before",
            ],
        }
    }
}

impl fmt::Display for DeclareKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two package repository kinds, one per OS family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RepoKind {
    AptSource,
    YumRepo,
}

impl From<RepoKind> for DeclareKind {
    fn from(kind: RepoKind) -> Self {
        match kind {
            RepoKind::AptSource => DeclareKind::AptSource,
            RepoKind::YumRepo => DeclareKind::YumRepo,
        }
    }
}

/// A fully-resolved package repository declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoDeclaration {
    /// Unique name across the whole resolved output.
    pub name: String,
    /// Repository kind.
    pub kind: RepoKind,
    /// Complete attribute set: effective defaults plus entry-specific
    /// attributes plus any user overrides.
    pub attributes: AttributeSet,
}

/// A GPG key file that must be present on the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyDeclaration {
    /// Absolute path of the key file.
    pub path: String,
    /// Owner/group/mode/source attributes plus the `before` ordering hint.
    pub attributes: AttributeSet,
}

/// An exec-once-if-absent action with a bounded retry policy.
///
/// The `probe` is an `unless`-style idempotency check: the external runtime
/// runs the command only when the probe fails, and retries up to `tries`
/// times with `try_sleep` seconds between attempts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuardedAction {
    /// Unique action name.
    pub name: String,
    /// Command to execute.
    pub command: String,
    /// Idempotency probe; success suppresses the command.
    pub probe: String,
    /// Maximum attempts.
    pub tries: i64,
    /// Seconds to sleep between attempts.
    pub try_sleep: i64,
}

impl GuardedAction {
    /// Render the action as the attribute set its `exec` declaration
    /// carries.
    pub fn attributes(&self) -> AttributeSet {
        let mut attributes = AttributeSet::new();
        attributes.set("command", self.command.clone());
        attributes.set("unless", self.probe.clone());
        attributes.set("logoutput", "on_failure");
        attributes.set("tries", self.tries);
        attributes.set("try_sleep", self.try_sleep);
        attributes
    }
}

/// The complete output of one resolution pass.
///
/// Produced fresh from the input snapshot each pass; carries no identity
/// beyond the pass and is never mutated after construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResolvedConfiguration {
    /// Resolved repository declarations, in emission order.
    pub repos: Vec<RepoDeclaration>,
    /// Resolved GPG key file declarations, in emission order.
    pub keys: Vec<KeyDeclaration>,
    /// Resolved guarded actions, in emission order.
    pub actions: Vec<GuardedAction>,
    /// Pass-through flag telling the reconciliation runtime to remove
    /// repository resources not present in this set. Never computed by the
    /// engine.
    pub purge_unmanaged: bool,
}

impl ResolvedConfiguration {
    /// Look up a repository declaration by name.
    pub fn repo(&self, name: &str) -> Option<&RepoDeclaration> {
        self.repos.iter().find(|repo| repo.name == name)
    }

    /// Look up a key declaration by path.
    pub fn key(&self, path: &str) -> Option<&KeyDeclaration> {
        self.keys.iter().find(|key| key.path == path)
    }

    /// Look up a guarded action by name.
    pub fn action(&self, name: &str) -> Option<&GuardedAction> {
        self.actions.iter().find(|action| action.name == name)
    }

    /// Total number of declarations across all kinds.
    pub fn len(&self) -> usize {
        self.repos.len() + self.keys.len() + self.actions.len()
    }

    /// Whether the pass resolved to nothing at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One `declare(kind, name, attributes)` call against the reconciliation
/// runtime.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Declare {
    pub kind: DeclareKind,
    pub name: String,
    pub attributes: AttributeSet,
}

/// The external reconciliation interface.
///
/// The engine only computes declarative intent; implementations of this
/// trait own the application of that intent to real host state, including
/// execution ordering, locking, and idempotent convergence.
pub trait Reconciler {
    /// Declare that a resource of `kind` named `name` should exist with
    /// `attributes`.
    fn declare(&mut self, kind: DeclareKind, name: &str, attributes: &AttributeSet) -> Result<()>;
}

/// A [`Reconciler`] that records every declare call.
///
/// Backs the tests and the CLI renderer.
#[derive(Debug, Default)]
pub struct RecordingReconciler {
    /// The recorded calls, in the order they were made.
    pub calls: Vec<Declare>,
}

impl RecordingReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of all recorded declarations, in call order.
    pub fn names(&self) -> Vec<&str> {
        self.calls.iter().map(|call| call.name.as_str()).collect()
    }
}

impl Reconciler for RecordingReconciler {
    fn declare(&mut self, kind: DeclareKind, name: &str, attributes: &AttributeSet) -> Result<()> {
        self.calls.push(Declare {
            kind,
            name: name.to_string(),
            attributes: attributes.clone(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_kind_names() {
        assert_eq!(DeclareKind::AptSource.as_str(), "apt_source");
        assert_eq!(DeclareKind::YumRepo.as_str(), "yumrepo");
        assert_eq!(DeclareKind::File.as_str(), "file");
        assert_eq!(DeclareKind::Exec.as_str(), "exec");
    }

    #[test]
    fn test_repo_kind_converts_to_declare_kind() {
        assert_eq!(DeclareKind::from(RepoKind::AptSource), DeclareKind::AptSource);
        assert_eq!(DeclareKind::from(RepoKind::YumRepo), DeclareKind::YumRepo);
    }

    #[test]
    fn test_recognized_keys_cover_contract_attributes() {
        assert!(DeclareKind::AptSource.recognized_keys().contains(&"location"));
        assert!(DeclareKind::AptSource.recognized_keys().contains(&"key_server"));
        assert!(DeclareKind::YumRepo.recognized_keys().contains(&"metalink"));
        assert!(DeclareKind::YumRepo.recognized_keys().contains(&"proxy"));
        assert!(DeclareKind::File.recognized_keys().contains(&"source"));
        assert!(DeclareKind::Exec.recognized_keys().contains(&"try_sleep"));
    }

    #[test]
    fn test_guarded_action_attributes() {
        let action = GuardedAction {
            name: "installing_yum-plugin-priorities".to_string(),
            command: "/usr/bin/yum install -y yum-plugin-priorities".to_string(),
            probe: "/usr/bin/rpm -qa | /usr/bin/grep -q yum-plugin-priorities".to_string(),
            tries: 3,
            try_sleep: 1,
        };

        let attributes = action.attributes();
        assert_eq!(
            attributes.get("command").unwrap(),
            "/usr/bin/yum install -y yum-plugin-priorities"
        );
        assert_eq!(
            attributes.get("unless").unwrap(),
            "/usr/bin/rpm -qa | /usr/bin/grep -q yum-plugin-priorities"
        );
        assert_eq!(attributes.get("logoutput").unwrap(), "on_failure");
        assert_eq!(*attributes.get("tries").unwrap(), 3);
        assert_eq!(*attributes.get("try_sleep").unwrap(), 1);
    }

    #[test]
    fn test_resolved_configuration_lookup() {
        let resolved = ResolvedConfiguration {
            repos: vec![RepoDeclaration {
                name: "rdo-release".to_string(),
                kind: RepoKind::YumRepo,
                attributes: AttributeSet::from_pairs([("enabled", "1")]),
            }],
            keys: vec![],
            actions: vec![],
            purge_unmanaged: false,
        };

        assert!(resolved.repo("rdo-release").is_some());
        assert!(resolved.repo("epel").is_none());
        assert_eq!(resolved.len(), 1);
        assert!(!resolved.is_empty());
    }

    #[test]
    fn test_recording_reconciler_records_in_order() {
        let mut reconciler = RecordingReconciler::new();
        let attributes = AttributeSet::from_pairs([("repos", "main")]);

        reconciler
            .declare(DeclareKind::AptSource, "debian-openstack-backports", &attributes)
            .unwrap();
        reconciler
            .declare(DeclareKind::Exec, "installing openstack-backports-archive-keyring", &attributes)
            .unwrap();

        assert_eq!(
            reconciler.names(),
            vec![
                "debian-openstack-backports",
                "installing openstack-backports-archive-keyring"
            ]
        );
        assert_eq!(reconciler.calls[0].kind, DeclareKind::AptSource);
    }
}
