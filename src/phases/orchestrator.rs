//! Orchestrator for a complete resolution pass
//!
//! This module wires phases 1-4 into a single `resolve` entry point and
//! phases 1-5 into `resolve_and_emit`, providing a clean API for one pass
//! over one input snapshot.

use super::{phase1, phase2, phase3, phase4, phase5};
use crate::config::{Params, RuntimeCapability};
use crate::declaration::{Reconciler, ResolvedConfiguration};
use crate::error::Result;
use crate::phases::gating::Gates;

/// Execute one resolution pass (phases 1-4).
///
/// This is a pure function of the input snapshot:
/// 1. Map the release name to distribution-specific locators
/// 2. Merge built-in baselines with user default overrides
/// 3. Build candidate declarations and apply per-entry overrides
/// 4. Gate built-in components through the manage flags
///
/// Identical inputs always yield an identical [`ResolvedConfiguration`].
pub fn resolve(params: &Params, capability: RuntimeCapability) -> ResolvedConfiguration {
    // Phase 1: Locator Mapping
    let locators = phase1::execute(params);

    // Phase 2: Default Merging
    let effective = phase2::execute(params);

    // Phase 3: Override Application
    let candidates = phase3::execute(params, &locators, &effective, capability);

    // Phase 4: Conditional Gating
    phase4::execute(candidates, &Gates::for_params(params))
}

/// Execute a complete pass including emission (phases 1-5), feeding every
/// resolved declaration to `reconciler` in dependency order.
pub fn resolve_and_emit<R: Reconciler>(
    params: &Params,
    capability: RuntimeCapability,
    reconciler: &mut R,
) -> Result<ResolvedConfiguration> {
    let resolved = resolve(params, capability);

    // Phase 5: Declaration Emission
    phase5::execute(&resolved, reconciler)?;

    Ok(resolved)
}
