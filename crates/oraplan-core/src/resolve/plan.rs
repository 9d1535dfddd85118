// crates/oraplan-core/src/resolve/plan.rs
// ============================================================================
// Module: Oraplan Deployment Plan
// Description: Resolved plan structure emitted by the topology resolver.
// Purpose: Package per-instance specs and shared groups for provisioning.
// Dependencies: crate::core, serde
// ============================================================================

//! ## Overview
//! A deployment plan is the resolver's complete output: one entry per
//! instance plus the shared parameter group, option group, subnet group,
//! security group, log groups, and the secret record for primary
//! deployments. The fingerprint covers everything except itself.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::credentials::SecretRecord;
use crate::core::hashing::FingerprintError;
use crate::core::hashing::PlanFingerprint;
use crate::core::hashing::fingerprint_canonical_json;
use crate::core::resources::DbInstanceSpec;
use crate::core::resources::LogGroupSpec;
use crate::core::resources::OptionGroupSpec;
use crate::core::resources::ParameterGroupSpec;
use crate::core::resources::SecurityGroupSpec;
use crate::core::resources::SubnetGroupSpec;

// ============================================================================
// SECTION: Instance Plan
// ============================================================================

/// Resolved plan for one instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstancePlan {
    /// Resolved instance identifier.
    pub identifier: String,
    /// Database instance specification.
    pub db_instance: DbInstanceSpec,
    /// Log groups for this instance's exported logs.
    pub log_groups: Vec<LogGroupSpec>,
}

// ============================================================================
// SECTION: Deployment Plan
// ============================================================================

/// Complete resolved deployment plan.
///
/// # Invariants
/// - Derived once per request; never mutated afterwards.
/// - `option_group` and `secret` are populated for primary deployments only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentPlan {
    /// Per-instance plans in derivation order.
    pub instances: Vec<InstancePlan>,
    /// Parameter group; primary deployments only.
    pub parameter_group: Option<ParameterGroupSpec>,
    /// Option group; primary deployments only.
    pub option_group: Option<OptionGroupSpec>,
    /// Subnet group over the filtered subnet set; absent for in-region replicas.
    pub subnet_group: Option<SubnetGroupSpec>,
    /// Security group with resolved rules.
    pub security_group: SecurityGroupSpec,
    /// Secret record; primary deployments only.
    pub secret: Option<SecretRecord>,
}

impl DeploymentPlan {
    /// Computes the canonical fingerprint of this plan.
    ///
    /// # Errors
    ///
    /// Returns [`FingerprintError`] when canonicalization fails.
    pub fn fingerprint(&self) -> Result<PlanFingerprint, FingerprintError> {
        fingerprint_canonical_json(self)
    }
}
