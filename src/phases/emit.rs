//! Phase 5: Declaration Emission
//!
//! Serializes a [`ResolvedConfiguration`] into the sequence of
//! `declare(kind, name, attributes)` calls the external reconciliation
//! runtime consumes.
//!
//! Emission order is dependency order for a linear consumer: GPG key files
//! first, then repositories, then guarded actions. Fine-grained ordering is
//! still declarative, carried by the `before`/`require` named-reference
//! hints inside the attribute sets; the runtime enforces those regardless
//! of call order. The engine performs no I/O here.

use crate::declaration::{Declare, DeclareKind, Reconciler, ResolvedConfiguration};
use crate::error::Result;

/// Render the resolved configuration as an ordered sequence of declare
/// calls without committing to a reconciler.
pub fn declarations(resolved: &ResolvedConfiguration) -> Vec<Declare> {
    let mut calls = Vec::with_capacity(resolved.len());

    for key in &resolved.keys {
        calls.push(Declare {
            kind: DeclareKind::File,
            name: key.path.clone(),
            attributes: key.attributes.clone(),
        });
    }
    for repo in &resolved.repos {
        calls.push(Declare {
            kind: repo.kind.into(),
            name: repo.name.clone(),
            attributes: repo.attributes.clone(),
        });
    }
    for action in &resolved.actions {
        calls.push(Declare {
            kind: DeclareKind::Exec,
            name: action.name.clone(),
            attributes: action.attributes(),
        });
    }

    calls
}

/// Execute phase 5: feed every declaration to `reconciler` in emission
/// order.
pub fn execute<R: Reconciler>(resolved: &ResolvedConfiguration, reconciler: &mut R) -> Result<()> {
    for call in declarations(resolved) {
        reconciler.declare(call.kind, &call.name, &call.attributes)?;
    }
    Ok(())
}
