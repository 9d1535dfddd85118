// crates/oraplan-core/src/core/topology.rs
// ============================================================================
// Module: Oraplan Deployment Topology
// Description: Deployment request model and topology mode specifications.
// Purpose: Define canonical deployment requests with validation helpers.
// Dependencies: crate::core::{credentials, identifiers, network, resources}, serde
// ============================================================================

//! ## Overview
//! A deployment request describes one Oracle RDS deployment: its identifier,
//! instance count, topology mode, network rules, and tags. The three topology
//! modes are a closed tagged variant so that fields owned by one mode cannot
//! be populated in another. Requests are validated at load time, before any
//! external input is consulted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::credentials::Environment;
use crate::core::credentials::PasswordError;
use crate::core::credentials::PasswordPolicy;
use crate::core::identifiers::DbIdentifier;
use crate::core::identifiers::KmsKeyId;
use crate::core::identifiers::SourceDbArn;
use crate::core::naming::MAX_INSTANCES_PER_REQUEST;
use crate::core::network::NetworkSpec;
use crate::core::resources::TagMap;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum Oracle database name length.
pub(crate) const MAX_DB_NAME_LENGTH: usize = 8;
/// Maximum backup retention period in days.
pub(crate) const MAX_BACKUP_RETENTION_DAYS: u16 = 35;
/// Lowest database port accepted by the provisioning engine.
pub(crate) const MIN_DB_PORT: u16 = 1150;

// ============================================================================
// SECTION: Engine Specification
// ============================================================================

/// Supported Oracle engine families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineFamily {
    /// Oracle Enterprise Edition.
    OracleEe,
    /// Oracle Standard Edition 2.
    OracleSe2,
}

impl EngineFamily {
    /// Returns the canonical engine name consumed by the provisioning engine.
    #[must_use]
    pub const fn engine_name(&self) -> &'static str {
        match self {
            Self::OracleEe => "oracle-ee",
            Self::OracleSe2 => "oracle-se2",
        }
    }
}

/// Engine family and version for primary instances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSpec {
    /// Engine family.
    pub family: EngineFamily,
    /// Engine version string.
    pub version: String,
}

impl EngineSpec {
    /// Returns the major engine version (leading dotted component).
    #[must_use]
    pub fn major_version(&self) -> &str {
        self.version.split('.').next().unwrap_or(&self.version)
    }
}

// ============================================================================
// SECTION: Storage Specification
// ============================================================================

/// Supported storage kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    /// General purpose SSD (gp2).
    Gp2,
    /// General purpose SSD (gp3).
    Gp3,
    /// Provisioned IOPS SSD (io1).
    Io1,
}

impl StorageKind {
    /// Returns the storage type string consumed by the provisioning engine.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gp2 => "gp2",
            Self::Gp3 => "gp3",
            Self::Io1 => "io1",
        }
    }
}

/// Storage sizing and performance specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSpec {
    /// Storage kind.
    pub kind: StorageKind,
    /// Allocated storage in GiB.
    pub allocated_gb: u32,
    /// Optional autoscaling ceiling in GiB.
    pub max_allocated_gb: Option<u32>,
    /// Provisioned IOPS, required for io1 storage.
    pub iops: Option<u32>,
}

// ============================================================================
// SECTION: Backup Specification
// ============================================================================

/// Automated backup configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupSpec {
    /// Retention period in days.
    pub retention_days: u16,
    /// Optional preferred backup window (`HH:MM-HH:MM`, UTC).
    pub window: Option<String>,
}

// ============================================================================
// SECTION: Option Binding and Credential Policy
// ============================================================================

/// Binding between a primary instance and its option document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionBinding {
    /// Selects the SSL option list instead of the default list.
    pub enable_ssl: bool,
}

/// Credential generation and storage policy for primary instances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPolicy {
    /// Password composition policy.
    pub password: PasswordPolicy,
    /// Target environment, selects the secret path prefix.
    pub environment: Environment,
    /// Deletes all prior secret versions before the one-shot write.
    pub delete_prior_versions: bool,
}

// ============================================================================
// SECTION: Topology Modes
// ============================================================================

/// Primary (standalone) instance specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimarySpec {
    /// Engine family and version.
    pub engine: EngineSpec,
    /// Storage specification.
    pub storage: StorageSpec,
    /// Oracle database name.
    pub db_name: String,
    /// Optional listener port override.
    pub port: Option<u16>,
    /// Option document binding.
    pub option_binding: OptionBinding,
    /// Credential generation policy.
    pub credentials: CredentialPolicy,
    /// Backup configuration.
    pub backup: BackupSpec,
    /// Optional encryption key.
    pub kms_key: Option<KmsKeyId>,
}

/// In-region read replica specification.
///
/// # Invariants
/// - Engine, storage, credentials, and option group are inherited from the
///   source instance and therefore have no fields here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadReplicaSpec {
    /// Identifier of the source instance in the same region.
    pub source_identifier: DbIdentifier,
}

/// Cross-region replica specification.
///
/// # Invariants
/// - Engine and credentials are inherited from the source; storage, backup,
///   and subnet placement are configured locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossRegionSpec {
    /// ARN of the source instance in the origin region.
    pub source_arn: SourceDbArn,
    /// Storage specification for the replica region.
    pub storage: StorageSpec,
    /// Backup configuration for the replica region.
    pub backup: BackupSpec,
    /// Optional encryption key in the replica region.
    pub kms_key: Option<KmsKeyId>,
}

/// Deployment topology mode.
///
/// # Invariants
/// - Exactly one mode is active per request; fields owned by one mode cannot
///   be expressed in another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Topology {
    /// Standalone, independently configured instance.
    Primary(PrimarySpec),
    /// In-region read replica mirroring a primary.
    ReadReplica(ReadReplicaSpec),
    /// Read replica located in a different region.
    CrossRegionReplica(CrossRegionSpec),
}

impl Topology {
    /// Returns true for either replica mode.
    #[must_use]
    pub const fn is_replica(&self) -> bool {
        matches!(self, Self::ReadReplica(_) | Self::CrossRegionReplica(_))
    }

    /// Returns the primary specification when this is a primary deployment.
    #[must_use]
    pub const fn as_primary(&self) -> Option<&PrimarySpec> {
        match self {
            Self::Primary(primary) => Some(primary),
            Self::ReadReplica(_) | Self::CrossRegionReplica(_) => None,
        }
    }
}

// ============================================================================
// SECTION: Deployment Request
// ============================================================================

/// Canonical deployment request, immutable for one evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRequest {
    /// Base database identifier.
    pub identifier: DbIdentifier,
    /// Number of instances to derive.
    pub instance_count: u32,
    /// Topology mode.
    pub topology: Topology,
    /// Network placement and ingress rules.
    pub network: NetworkSpec,
    /// Skips the final snapshot on deletion.
    pub skip_final_snapshot: bool,
    /// Explicit final snapshot identifier override.
    pub final_snapshot_override: Option<String>,
    /// Log group retention in days.
    pub log_retention_days: u16,
    /// Request-level tags, merged over the mandatory tag set.
    pub tags: TagMap,
}

impl DeploymentRequest {
    /// Validates all request-local invariants.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] when validation fails.
    pub fn validate(&self) -> Result<(), RequestError> {
        ensure_instance_count(self.instance_count)?;
        ensure_snapshot_fields(self.skip_final_snapshot, self.final_snapshot_override.as_deref())?;
        ensure_ingress_rules(&self.network)?;

        match &self.topology {
            Topology::Primary(primary) => {
                if self.network.vpc_id.is_none() {
                    return Err(RequestError::MissingVpc);
                }
                ensure_engine(&primary.engine)?;
                ensure_storage(&primary.storage)?;
                ensure_db_name(&primary.db_name)?;
                ensure_port(primary.port)?;
                ensure_backup(&primary.backup)?;
                primary.credentials.password.validate()?;
            }
            Topology::ReadReplica(_) => {}
            Topology::CrossRegionReplica(replica) => {
                if self.network.vpc_id.is_none() {
                    return Err(RequestError::MissingVpc);
                }
                ensure_storage(&replica.storage)?;
                ensure_backup(&replica.backup)?;
            }
        }

        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Deployment request validation errors.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Instance count is zero.
    #[error("instance count must be at least 1")]
    ZeroInstanceCount,
    /// Instance count exceeds the supported suffix range.
    #[error("instance count {count} exceeds the supported maximum of {max}")]
    TooManyInstances {
        /// Requested instance count.
        count: u32,
        /// Supported maximum.
        max: u32,
    },
    /// Engine version string is empty.
    #[error("engine version must be non-empty")]
    EmptyEngineVersion,
    /// Database name violates Oracle naming rules.
    #[error("invalid database name: {0}")]
    InvalidDbName(String),
    /// io1 storage requires provisioned IOPS.
    #[error("io1 storage requires iops")]
    MissingIops,
    /// IOPS were provided for a storage kind that does not accept them.
    #[error("iops are not supported for {0} storage")]
    UnexpectedIops(&'static str),
    /// Storage autoscaling ceiling is below the allocation.
    #[error("max allocated storage {max} is below allocated storage {allocated}")]
    MaxStorageBelowAllocated {
        /// Allocated storage in GiB.
        allocated: u32,
        /// Configured ceiling in GiB.
        max: u32,
    },
    /// Backup retention exceeds the provider maximum.
    #[error("backup retention {0} exceeds {MAX_BACKUP_RETENTION_DAYS} days")]
    RetentionTooLong(u16),
    /// Backup window is not of the form `HH:MM-HH:MM`.
    #[error("invalid backup window: {0}")]
    InvalidBackupWindow(String),
    /// Listener port is below the accepted range.
    #[error("port {0} is below the minimum of {MIN_DB_PORT}")]
    PortTooLow(u16),
    /// Primary and cross-region deployments require a VPC.
    #[error("vpc id is required for subnet group construction")]
    MissingVpc,
    /// An ingress rule names no peer.
    #[error("ingress rule {0} defines neither cidr blocks nor security groups")]
    IngressRuleWithoutPeer(usize),
    /// An ingress rule has an inverted port range.
    #[error("ingress rule {index} has inverted port range {from}-{to}")]
    InvertedPortRange {
        /// Rule position in the request.
        index: usize,
        /// Range start.
        from: u16,
        /// Range end.
        to: u16,
    },
    /// A final snapshot override was given while snapshots are skipped.
    #[error("final snapshot override conflicts with skip_final_snapshot")]
    SnapshotOverrideConflict,
    /// Password policy is invalid.
    #[error("invalid password policy: {0}")]
    Password(#[from] PasswordError),
}

// ============================================================================
// SECTION: Validation Helpers
// ============================================================================

/// Ensures the instance count fits the derivable suffix range.
fn ensure_instance_count(count: u32) -> Result<(), RequestError> {
    if count == 0 {
        return Err(RequestError::ZeroInstanceCount);
    }
    if count > MAX_INSTANCES_PER_REQUEST {
        return Err(RequestError::TooManyInstances {
            count,
            max: MAX_INSTANCES_PER_REQUEST,
        });
    }
    Ok(())
}

/// Ensures snapshot skip and override are not combined.
fn ensure_snapshot_fields(skip: bool, explicit: Option<&str>) -> Result<(), RequestError> {
    if skip && explicit.is_some() {
        return Err(RequestError::SnapshotOverrideConflict);
    }
    Ok(())
}

/// Ensures every ingress rule names a peer and a sane port range.
fn ensure_ingress_rules(network: &NetworkSpec) -> Result<(), RequestError> {
    for (index, rule) in network.ingress.iter().enumerate() {
        if rule.cidr_blocks.is_empty() && rule.security_group_ids.is_empty() {
            return Err(RequestError::IngressRuleWithoutPeer(index));
        }
        if let (Some(from), Some(to)) = (rule.from_port, rule.to_port)
            && from > to
        {
            return Err(RequestError::InvertedPortRange {
                index,
                from,
                to,
            });
        }
    }
    Ok(())
}

/// Ensures the engine version is populated.
fn ensure_engine(engine: &EngineSpec) -> Result<(), RequestError> {
    if engine.version.trim().is_empty() {
        return Err(RequestError::EmptyEngineVersion);
    }
    Ok(())
}

/// Ensures storage sizing and IOPS rules hold.
fn ensure_storage(storage: &StorageSpec) -> Result<(), RequestError> {
    match storage.kind {
        StorageKind::Io1 => {
            if storage.iops.is_none() {
                return Err(RequestError::MissingIops);
            }
        }
        StorageKind::Gp2 => {
            if storage.iops.is_some() {
                return Err(RequestError::UnexpectedIops(StorageKind::Gp2.as_str()));
            }
        }
        StorageKind::Gp3 => {}
    }
    if let Some(max) = storage.max_allocated_gb
        && max < storage.allocated_gb
    {
        return Err(RequestError::MaxStorageBelowAllocated {
            allocated: storage.allocated_gb,
            max,
        });
    }
    Ok(())
}

/// Ensures the database name satisfies Oracle naming rules.
fn ensure_db_name(name: &str) -> Result<(), RequestError> {
    if name.is_empty() {
        return Err(RequestError::InvalidDbName("name is empty".to_string()));
    }
    if name.len() > MAX_DB_NAME_LENGTH {
        return Err(RequestError::InvalidDbName(format!(
            "name exceeds {MAX_DB_NAME_LENGTH} characters"
        )));
    }
    let first = name.as_bytes()[0];
    if !first.is_ascii_alphabetic() {
        return Err(RequestError::InvalidDbName("name must start with a letter".to_string()));
    }
    if !name.chars().all(|ch| ch.is_ascii_alphanumeric()) {
        return Err(RequestError::InvalidDbName("name must be alphanumeric".to_string()));
    }
    Ok(())
}

/// Ensures a configured port is inside the accepted range.
fn ensure_port(port: Option<u16>) -> Result<(), RequestError> {
    if let Some(port) = port
        && port < MIN_DB_PORT
    {
        return Err(RequestError::PortTooLow(port));
    }
    Ok(())
}

/// Ensures backup retention and window are well formed.
fn ensure_backup(backup: &BackupSpec) -> Result<(), RequestError> {
    if backup.retention_days > MAX_BACKUP_RETENTION_DAYS {
        return Err(RequestError::RetentionTooLong(backup.retention_days));
    }
    if let Some(window) = &backup.window
        && !is_valid_window(window)
    {
        return Err(RequestError::InvalidBackupWindow(window.clone()));
    }
    Ok(())
}

/// Checks the `HH:MM-HH:MM` backup window shape.
fn is_valid_window(window: &str) -> bool {
    let Some((start, end)) = window.split_once('-') else {
        return false;
    };
    is_valid_clock(start) && is_valid_clock(end)
}

/// Checks a single `HH:MM` clock value.
fn is_valid_clock(value: &str) -> bool {
    let Some((hours, minutes)) = value.split_once(':') else {
        return false;
    };
    let Ok(hours) = hours.parse::<u8>() else {
        return false;
    };
    let Ok(minutes) = minutes.parse::<u8>() else {
        return false;
    };
    hours < 24 && minutes < 60 && value.len() == 5
}
