// crates/oraplan-core/src/core/resources.rs
// ============================================================================
// Module: Oraplan Resource Specifications
// Description: Resource specifications emitted by a resolved plan.
// Purpose: Provide the stable output vocabulary consumed by provisioning.
// Dependencies: crate::core::{identifiers, network, options, topology}, serde
// ============================================================================

//! ## Overview
//! A resolved plan is a set of resource specifications: per-instance database
//! specs, one parameter group, one option group (primary only), a subnet
//! group, a security group, and log groups. Every specification carries the
//! merged tag set. Mode-conditional database fields are options populated per
//! the topology's field-ownership table, never partially.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::KmsKeyId;
use crate::core::identifiers::SourceDbArn;
use crate::core::identifiers::SubnetId;
use crate::core::network::SecurityRuleSet;
use crate::core::options::ParameterSpec;
use crate::core::options::ResolvedOption;
use crate::core::topology::StorageKind;

// ============================================================================
// SECTION: Tags
// ============================================================================

/// Tag mapping applied to every resource.
pub type TagMap = BTreeMap<String, String>;

/// Merges request tags over the injected mandatory tag set.
///
/// Request tags win on key collision; the mandatory set is never mutated.
#[must_use]
pub fn merge_tags(mandatory: &TagMap, request: &TagMap) -> TagMap {
    let mut merged = mandatory.clone();
    for (key, value) in request {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

// ============================================================================
// SECTION: Log Groups
// ============================================================================

/// Oracle log kinds exported to log groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    /// Alert log.
    Alert,
    /// Audit log.
    Audit,
    /// Listener log.
    Listener,
    /// Trace files.
    Trace,
}

impl LogKind {
    /// All exported log kinds in deterministic order.
    pub const ALL: [Self; 4] = [Self::Alert, Self::Audit, Self::Listener, Self::Trace];

    /// Returns the log kind's export name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Alert => "alert",
            Self::Audit => "audit",
            Self::Listener => "listener",
            Self::Trace => "trace",
        }
    }
}

/// Log group specification for one instance and log kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogGroupSpec {
    /// Log group name.
    pub name: String,
    /// Exported log kind.
    pub kind: LogKind,
    /// Retention in days.
    pub retention_days: u16,
    /// Merged tags.
    pub tags: TagMap,
}

impl LogGroupSpec {
    /// Builds the log group name for an instance identifier and kind.
    #[must_use]
    pub fn name_for(identifier: &str, kind: LogKind) -> String {
        format!("/aws/rds/instance/{identifier}/{}", kind.as_str())
    }
}

// ============================================================================
// SECTION: Database Instance
// ============================================================================

/// Database instance specification with mode-conditional fields.
///
/// # Invariants
/// - Fields owned by a topology mode the instance is not in are `None`,
///   never partially populated (the provisioning engine inherits them from
///   the replication source).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbInstanceSpec {
    /// Resolved instance identifier.
    pub identifier: String,
    /// Engine name; primary only.
    pub engine: Option<String>,
    /// Engine version; primary only.
    pub engine_version: Option<String>,
    /// Allocated storage in GiB; primary and cross-region.
    pub allocated_storage: Option<u32>,
    /// Autoscaling ceiling in GiB; primary and cross-region.
    pub max_allocated_storage: Option<u32>,
    /// Storage kind; primary and cross-region.
    pub storage_type: Option<StorageKind>,
    /// Provisioned IOPS; primary and cross-region io1 storage.
    pub iops: Option<u32>,
    /// Master username; primary only.
    pub username: Option<String>,
    /// Database name; primary only.
    pub db_name: Option<String>,
    /// Listener port.
    pub port: u16,
    /// Option group reference; primary only.
    pub option_group: Option<String>,
    /// Parameter group reference; primary only.
    pub parameter_group: Option<String>,
    /// Subnet group reference; primary and cross-region.
    pub subnet_group: Option<String>,
    /// Backup retention in days; primary and cross-region.
    pub backup_retention_period: Option<u16>,
    /// Preferred backup window; primary and cross-region.
    pub backup_window: Option<String>,
    /// Replication source for in-region replicas.
    pub replicate_source_db: Option<String>,
    /// Replication source ARN for cross-region replicas.
    pub replicate_source_arn: Option<SourceDbArn>,
    /// Encryption key reference.
    pub kms_key: Option<KmsKeyId>,
    /// Final snapshot identifier; absent when snapshots are skipped.
    pub final_snapshot_identifier: Option<String>,
    /// Skips the final snapshot on deletion.
    pub skip_final_snapshot: bool,
    /// Exported log kinds.
    pub exported_logs: Vec<LogKind>,
    /// Merged tags.
    pub tags: TagMap,
}

// ============================================================================
// SECTION: Groups
// ============================================================================

/// Parameter group specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterGroupSpec {
    /// Group name.
    pub name: String,
    /// Engine parameter group family, e.g. `oracle-ee-19`.
    pub family: String,
    /// Parameters, in document order.
    pub parameters: Vec<ParameterSpec>,
    /// Merged tags.
    pub tags: TagMap,
}

/// Option group specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionGroupSpec {
    /// Group name.
    pub name: String,
    /// Engine name the group applies to.
    pub engine_name: String,
    /// Major engine version the group applies to.
    pub major_engine_version: String,
    /// Selected options with port defaults applied.
    pub options: Vec<ResolvedOption>,
    /// Merged tags.
    pub tags: TagMap,
}

/// Subnet group specification over the filtered subnet set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubnetGroupSpec {
    /// Group name.
    pub name: String,
    /// Subnets that passed the availability filter.
    pub subnet_ids: Vec<SubnetId>,
    /// Merged tags.
    pub tags: TagMap,
}

/// Security group specification with resolved rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityGroupSpec {
    /// Group name.
    pub name: String,
    /// Resolved ingress and egress rules.
    pub rules: SecurityRuleSet,
    /// Merged tags.
    pub tags: TagMap,
}
