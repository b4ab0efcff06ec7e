//! Implementation of the 5 phases of a resolution pass.
//!
//! ## Overview
//!
//! A resolution pass follows 5 phases:
//! 1. Locator Mapping - Map the release name to distribution-specific locators
//! 2. Default Merging - Merge built-in baselines with user default overrides
//! 3. Override Application - Build candidate declarations and apply per-entry overrides
//! 4. Conditional Gating - Keep or drop built-in components per the manage flags
//! 5. Declaration Emission - Serialize the resolved set into declare() calls
//!
//! Each phase is a pure function of the phases before it and the input
//! parameter snapshot. Phases 1-4 are wired together by the
//! [`orchestrator`]; phase 5 consumes the resolved output separately so
//! callers can inspect the [`ResolvedConfiguration`] without committing to a
//! reconciler.

use crate::attributes::AttributeSet;
use crate::declaration::{GuardedAction, KeyDeclaration, RepoDeclaration};
use gating::Component;

// Phase modules
pub mod emit;
pub mod gating;
pub mod locators;
pub mod merging;
pub mod orchestrator;
pub mod overrides;

// Re-export phase modules to make the pipeline order explicit
pub use emit as phase5;
pub use gating as phase4;
pub use locators as phase1;
pub use merging as phase2;
pub use overrides as phase3;

/// Effective default attribute sets for one pass, one per declaration
/// family.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectiveDefaults {
    /// Defaults applied to repository entries (Debian `source_defaults`,
    /// RedHat `repo_defaults`).
    pub repo: AttributeSet,
    /// Defaults applied to GPG key file entries (RedHat `gpgkey_defaults`;
    /// unused on Debian, where keys arrive via a keyring package).
    pub key: AttributeSet,
}

/// A candidate declaration, tagged with the built-in component it belongs
/// to so the gate evaluator can keep or drop it.
///
/// User-named entries that do not shadow a built-in carry no component and
/// are never gated.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<T> {
    /// The built-in component this candidate belongs to, if any.
    pub component: Option<Component>,
    /// The declaration itself.
    pub declaration: T,
}

impl<T> Candidate<T> {
    /// A candidate controlled by a `manage_*` flag.
    pub fn gated(component: Component, declaration: T) -> Self {
        Self {
            component: Some(component),
            declaration,
        }
    }

    /// A candidate that is always emitted.
    pub fn ungated(declaration: T) -> Self {
        Self {
            component: None,
            declaration,
        }
    }
}

/// All candidate declarations produced by the override applier, before
/// gating.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateSet {
    /// Candidate repository declarations, in emission order.
    pub repos: Vec<Candidate<RepoDeclaration>>,
    /// Candidate GPG key file declarations, in emission order.
    pub keys: Vec<Candidate<KeyDeclaration>>,
    /// Candidate guarded actions, in emission order.
    pub actions: Vec<Candidate<GuardedAction>>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }
}
