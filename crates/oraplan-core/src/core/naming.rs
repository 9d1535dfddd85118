// crates/oraplan-core/src/core/naming.rs
// ============================================================================
// Module: Oraplan Instance Naming
// Description: Per-instance identifier and final snapshot name derivation.
// Purpose: Reproduce the two-digit suffix convention deterministically.
// Dependencies: crate::core::identifiers
// ============================================================================

//! ## Overview
//! Multi-instance and replica deployments derive one identifier per instance
//! by appending a two-digit, 1-based suffix to the base identifier. A single
//! primary instance keeps the base identifier unchanged. The suffix
//! convention covers single digits only; requests that would need a tenth
//! instance are rejected rather than guessing a wider padding.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::identifiers::DbIdentifier;
use crate::core::identifiers::IdentifierError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum instances derivable under the `-0{n}` suffix convention.
pub const MAX_INSTANCES_PER_REQUEST: u32 = 9;

/// Suffix appended to resolved identifiers for final snapshots.
const FINAL_SNAPSHOT_SUFFIX: &str = "-final";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Identifier derivation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NamingError {
    /// Instance index does not fit the single-digit suffix convention.
    #[error("instance index {0} exceeds the two-digit suffix convention")]
    InstanceIndexOverflow(u32),
    /// Suffixed identifier no longer satisfies identifier rules.
    #[error("derived identifier is invalid: {0}")]
    DerivedIdentifier(#[from] IdentifierError),
}

// ============================================================================
// SECTION: Derivation
// ============================================================================

/// Derives the resolved identifier for every instance of a request.
///
/// A suffix is applied when more than one instance is requested or the
/// deployment is a replica; otherwise the base identifier is returned
/// unchanged as the only entry.
///
/// # Errors
///
/// Returns [`NamingError::InstanceIndexOverflow`] when the count exceeds
/// [`MAX_INSTANCES_PER_REQUEST`], and [`NamingError::DerivedIdentifier`] when
/// a suffixed identifier violates identifier rules (base too long).
pub fn instance_identifiers(
    base: &DbIdentifier,
    instance_count: u32,
    replica: bool,
) -> Result<Vec<DbIdentifier>, NamingError> {
    if instance_count <= 1 && !replica {
        return Ok(vec![base.clone()]);
    }
    if instance_count > MAX_INSTANCES_PER_REQUEST {
        return Err(NamingError::InstanceIndexOverflow(instance_count));
    }
    let mut out = Vec::new();
    for index in 0..instance_count {
        out.push(indexed_identifier(base, index)?);
    }
    Ok(out)
}

/// Derives the final snapshot identifier for one resolved instance.
///
/// Returns `None` when snapshots are skipped. An explicit override replaces
/// the derived `{identifier}-final` form verbatim.
#[must_use]
pub fn final_snapshot_identifier(
    resolved: &DbIdentifier,
    skip_final_snapshot: bool,
    explicit: Option<&str>,
) -> Option<String> {
    if skip_final_snapshot {
        return None;
    }
    match explicit {
        Some(name) => Some(name.to_string()),
        None => Some(format!("{resolved}{FINAL_SNAPSHOT_SUFFIX}")),
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds the `{base}-0{index+1}` identifier for a 0-based index.
fn indexed_identifier(base: &DbIdentifier, index: u32) -> Result<DbIdentifier, NamingError> {
    let ordinal = index + 1;
    if ordinal > MAX_INSTANCES_PER_REQUEST {
        return Err(NamingError::InstanceIndexOverflow(ordinal));
    }
    Ok(DbIdentifier::parse(format!("{base}-0{ordinal}"))?)
}
