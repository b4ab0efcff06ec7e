//! # OpenStack Repository Resolution Library
//!
//! This library computes the OS-level package repository configuration for
//! hosts that consume an OpenStack package distribution: Debian APT
//! sources, RedHat yum repositories, the GPG key files that sign them, and
//! the guarded install actions that bootstrap them. It is designed to be
//! used by the `openstack-repos` command-line tool but can also be embedded
//! by anything that owns a reconciliation runtime.
//!
//! The engine only computes *what* should exist. Applying the result to a
//! host - running apt/yum, writing key files, enforcing ordering - belongs
//! to an external reconciliation runtime reached through the
//! [`Reconciler`](declaration::Reconciler) interface.
//!
//! ## Quick Example
//!
//! ```
//! use openstack_repos::config::{DebianParams, Params, RuntimeCapability};
//! use openstack_repos::phases::orchestrator;
//!
//! // Resolve the Debian pipeline for the "pike" release
//! let params = Params::Debian(DebianParams {
//!     release: "pike".to_string(),
//!     ..Default::default()
//! });
//! let resolved = orchestrator::resolve(&params, RuntimeCapability::default());
//!
//! let backports = resolved.repo("debian-openstack-backports").unwrap();
//! assert_eq!(
//!     backports.attributes.get("location").unwrap(),
//!     "http://stretch-pike.debian.net/debian"
//! );
//! assert_eq!(
//!     backports.attributes.get("release").unwrap(),
//!     "stretch-pike-backports"
//! );
//! ```
//!
//! ## Core Concepts
//!
//! The library is built around a few key concepts:
//!
//! - **Parameters (`config`)**: the sparse, per-family input snapshot -
//!   release name, manage flags, override hashes, default overrides - with
//!   documented defaults for everything absent.
//! - **Attribute Sets (`attributes`)**: typed, unique-keyed scalar
//!   collections with one shallow-merge rule, replacing loosely-typed
//!   nested hashes.
//! - **Locators (`release`)**: textual templating from a release name to
//!   mirror URLs, suffixes, and key paths. Permissive by design: any
//!   release string is legal.
//! - **Declarations (`declaration`)**: the value objects a pass produces,
//!   and the `declare(kind, name, attributes)` interface they leave
//!   through.
//! - **Phases (`phases`)**: the five-stage pipeline that turns parameters
//!   into declarations.
//!
//! ## Execution Flow
//!
//! The main entry point is `phases::orchestrator`, which executes the
//! following high-level steps:
//!
//! 1.  **Locator Mapping**: template release-specific locators.
//! 2.  **Default Merging**: merge built-in baselines with user default
//!     overrides.
//! 3.  **Override Application**: build candidates and merge per-entry
//!     overrides.
//! 4.  **Conditional Gating**: keep or drop built-in components per the
//!     `manage_*` flags.
//! 5.  **Declaration Emission**: hand the resolved set to a reconciler in
//!     dependency order.
//!
//! A pass is a pure function of its inputs: identical snapshots always
//! resolve to identical output, and the engine holds no mutable state
//! between passes.

pub mod attributes;
pub mod config;
pub mod declaration;
pub mod defaults;
pub mod error;
pub mod output;
pub mod phases;
pub mod release;
pub mod suggestions;

#[cfg(test)]
mod attributes_proptest;
