// crates/oraplan-config/src/config.rs
// ============================================================================
// Module: Oraplan Configuration
// Description: Deployment request loading and validation for Oraplan.
// Purpose: Provide strict, fail-closed request parsing with hard limits.
// Dependencies: oraplan-core, serde, toml
// ============================================================================

//! ## Overview
//! Deployment requests are loaded from a TOML file with strict size and path
//! limits. The raw document is converted into core request types with
//! cross-field validation: sections owned by one topology mode are rejected
//! when another mode is selected, so a request cannot smuggle replica and
//! primary fields at the same time. Missing or invalid configuration fails
//! closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use oraplan_core::BackupSpec;
use oraplan_core::CredentialPolicy;
use oraplan_core::CrossRegionSpec;
use oraplan_core::DbIdentifier;
use oraplan_core::DeploymentRequest;
use oraplan_core::EngineFamily;
use oraplan_core::EngineSpec;
use oraplan_core::Environment;
use oraplan_core::IngressRule;
use oraplan_core::KmsKeyId;
use oraplan_core::NetworkSpec;
use oraplan_core::OptionBinding;
use oraplan_core::PasswordPolicy;
use oraplan_core::PrimarySpec;
use oraplan_core::ReadReplicaSpec;
use oraplan_core::SourceDbArn;
use oraplan_core::StorageKind;
use oraplan_core::StorageSpec;
use oraplan_core::TagMap;
use oraplan_core::Topology;
use oraplan_core::VpcId;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "oraplan.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "ORAPLAN_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum number of ingress rules per request.
pub(crate) const MAX_INGRESS_RULES: usize = 32;
/// Maximum number of request-level tags.
pub(crate) const MAX_TAGS: usize = 64;
/// Maximum tag key length.
pub(crate) const MAX_TAG_KEY_LENGTH: usize = 128;
/// Maximum tag value length.
pub(crate) const MAX_TAG_VALUE_LENGTH: usize = 256;
/// Default log retention in days.
pub(crate) const DEFAULT_LOG_RETENTION_DAYS: u16 = 30;

// ============================================================================
// SECTION: Raw Configuration Model
// ============================================================================

/// Topology mode selector in the raw document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentMode {
    /// Standalone primary instance.
    Primary,
    /// In-region read replica.
    ReadReplica,
    /// Cross-region replica.
    CrossRegionReplica,
}

/// `[deployment]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeploymentConfig {
    /// Base database identifier.
    pub identifier: String,
    /// Number of instances; defaults to 1.
    #[serde(default = "default_instance_count")]
    pub instance_count: u32,
    /// Topology mode.
    pub mode: DeploymentMode,
    /// Skips the final snapshot on deletion.
    #[serde(default)]
    pub skip_final_snapshot: bool,
    /// Explicit final snapshot identifier override.
    #[serde(default)]
    pub final_snapshot_override: Option<String>,
    /// Log group retention in days.
    #[serde(default = "default_log_retention_days")]
    pub log_retention_days: u16,
    /// Optional encryption key.
    #[serde(default)]
    pub kms_key: Option<String>,
}

/// `[engine]` section; primary mode only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Engine family.
    pub family: EngineFamily,
    /// Engine version string.
    pub version: String,
}

/// `[storage]` section; primary and cross-region modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Storage kind.
    pub kind: StorageKind,
    /// Allocated storage in GiB.
    pub allocated_gb: u32,
    /// Optional autoscaling ceiling in GiB.
    #[serde(default)]
    pub max_allocated_gb: Option<u32>,
    /// Provisioned IOPS, required for io1 storage.
    #[serde(default)]
    pub iops: Option<u32>,
}

/// `[database]` section; primary mode only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Oracle database name.
    pub name: String,
    /// Optional listener port override.
    #[serde(default)]
    pub port: Option<u16>,
}

/// `[options]` section; primary mode only.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionsConfig {
    /// Selects the SSL option list instead of the default list.
    #[serde(default)]
    pub enable_ssl: bool,
}

/// `[credentials.password]` subsection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PasswordConfig {
    /// Total password length.
    pub length: usize,
    /// Minimum uppercase characters.
    #[serde(default)]
    pub min_upper: usize,
    /// Minimum lowercase characters.
    #[serde(default)]
    pub min_lower: usize,
    /// Minimum digit characters.
    #[serde(default)]
    pub min_digit: usize,
    /// Minimum special characters.
    #[serde(default)]
    pub min_special: usize,
}

/// `[credentials]` section; primary mode only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialsConfig {
    /// Target environment.
    pub environment: Environment,
    /// Deletes all prior secret versions before writing.
    #[serde(default)]
    pub delete_prior_versions: bool,
    /// Optional password policy override.
    #[serde(default)]
    pub password: Option<PasswordConfig>,
}

/// `[backup]` section; primary and cross-region modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackupConfig {
    /// Retention period in days.
    pub retention_days: u16,
    /// Optional preferred backup window.
    #[serde(default)]
    pub window: Option<String>,
}

/// `[replica]` section; replica modes only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReplicaConfig {
    /// Source identifier for in-region replicas.
    #[serde(default)]
    pub source_identifier: Option<String>,
    /// Source ARN for cross-region replicas.
    #[serde(default)]
    pub source_arn: Option<String>,
}

/// `[[network.ingress]]` entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IngressConfig {
    /// Optional rule description.
    #[serde(default)]
    pub description: Option<String>,
    /// Range start.
    #[serde(default)]
    pub from_port: Option<u16>,
    /// Range end.
    #[serde(default)]
    pub to_port: Option<u16>,
    /// Transport protocol.
    #[serde(default)]
    pub protocol: Option<String>,
    /// Peer CIDR blocks.
    #[serde(default)]
    pub cidr_blocks: Vec<String>,
    /// Peer security group identifiers.
    #[serde(default)]
    pub security_group_ids: Vec<String>,
}

/// `[network]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkConfig {
    /// VPC to place the deployment in.
    #[serde(default)]
    pub vpc_id: Option<String>,
    /// Ordered ingress rule entries.
    #[serde(default)]
    pub ingress: Vec<IngressConfig>,
}

/// Root request document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestConfig {
    /// `[deployment]` section.
    pub deployment: DeploymentConfig,
    /// `[engine]` section.
    #[serde(default)]
    pub engine: Option<EngineConfig>,
    /// `[storage]` section.
    #[serde(default)]
    pub storage: Option<StorageConfig>,
    /// `[database]` section.
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    /// `[options]` section.
    #[serde(default)]
    pub options: Option<OptionsConfig>,
    /// `[credentials]` section.
    #[serde(default)]
    pub credentials: Option<CredentialsConfig>,
    /// `[backup]` section.
    #[serde(default)]
    pub backup: Option<BackupConfig>,
    /// `[replica]` section.
    #[serde(default)]
    pub replica: Option<ReplicaConfig>,
    /// `[network]` section.
    #[serde(default)]
    pub network: NetworkConfig,
    /// `[tags]` table.
    #[serde(default)]
    pub tags: TagMap,
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default instance count.
const fn default_instance_count() -> u32 {
    1
}

/// Default log retention in days.
const fn default_log_retention_days() -> u16 {
    DEFAULT_LOG_RETENTION_DAYS
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Loading
// ============================================================================

/// Loads and converts a deployment request from a TOML file.
///
/// The path resolves from the explicit argument, then the `ORAPLAN_CONFIG`
/// environment variable, then the default filename. The converted request is
/// fully validated before it is returned.
///
/// # Errors
///
/// Returns [`ConfigError`] when the file cannot be read, parsed, or
/// validated.
pub fn load_request(path: Option<&Path>) -> Result<DeploymentRequest, ConfigError> {
    let path = resolve_path(path)?;
    validate_path(&path)?;
    let metadata =
        fs::metadata(&path).map_err(|err| ConfigError::Io(format!("{}: {err}", path.display())))?;
    if metadata.len() > MAX_CONFIG_FILE_SIZE as u64 {
        return Err(ConfigError::Invalid(format!(
            "config file exceeds {MAX_CONFIG_FILE_SIZE} bytes"
        )));
    }
    let text = fs::read_to_string(&path)
        .map_err(|err| ConfigError::Io(format!("{}: {err}", path.display())))?;
    request_from_toml(&text)
}

/// Parses and converts a deployment request from TOML text.
///
/// # Errors
///
/// Returns [`ConfigError`] when parsing or validation fails.
pub fn request_from_toml(text: &str) -> Result<DeploymentRequest, ConfigError> {
    if text.len() > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::Invalid(format!(
            "config document exceeds {MAX_CONFIG_FILE_SIZE} bytes"
        )));
    }
    let raw: RequestConfig =
        toml::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))?;
    let request = convert_request(raw)?;
    request.validate().map_err(|err| ConfigError::Invalid(err.to_string()))?;
    Ok(request)
}

// ============================================================================
// SECTION: Conversion
// ============================================================================

/// Converts the raw document into a core deployment request.
fn convert_request(raw: RequestConfig) -> Result<DeploymentRequest, ConfigError> {
    let identifier = DbIdentifier::parse(raw.deployment.identifier.clone())
        .map_err(|err| ConfigError::Invalid(format!("deployment.identifier: {err}")))?;
    let kms_key = convert_kms_key(raw.deployment.kms_key.as_deref())?;
    let topology = convert_topology(&raw, kms_key)?;
    let network = convert_network(&raw.network)?;
    validate_tags(&raw.tags)?;

    Ok(DeploymentRequest {
        identifier,
        instance_count: raw.deployment.instance_count,
        topology,
        network,
        skip_final_snapshot: raw.deployment.skip_final_snapshot,
        final_snapshot_override: raw.deployment.final_snapshot_override,
        log_retention_days: raw.deployment.log_retention_days,
        tags: raw.tags,
    })
}

/// Converts the mode-specific sections into a topology variant.
fn convert_topology(
    raw: &RequestConfig,
    kms_key: Option<KmsKeyId>,
) -> Result<Topology, ConfigError> {
    match raw.deployment.mode {
        DeploymentMode::Primary => {
            reject_section(raw.replica.is_some(), "replica", "primary")?;
            let engine = raw
                .engine
                .as_ref()
                .ok_or_else(|| missing_section("engine", "primary"))?;
            let storage = raw
                .storage
                .as_ref()
                .ok_or_else(|| missing_section("storage", "primary"))?;
            let database = raw
                .database
                .as_ref()
                .ok_or_else(|| missing_section("database", "primary"))?;
            let credentials = raw
                .credentials
                .as_ref()
                .ok_or_else(|| missing_section("credentials", "primary"))?;
            let backup = raw
                .backup
                .as_ref()
                .ok_or_else(|| missing_section("backup", "primary"))?;
            let options = raw.options.unwrap_or_default();

            Ok(Topology::Primary(PrimarySpec {
                engine: EngineSpec {
                    family: engine.family,
                    version: engine.version.clone(),
                },
                storage: convert_storage(storage),
                db_name: database.name.clone(),
                port: database.port,
                option_binding: OptionBinding {
                    enable_ssl: options.enable_ssl,
                },
                credentials: convert_credentials(credentials),
                backup: convert_backup(backup),
                kms_key,
            }))
        }
        DeploymentMode::ReadReplica => {
            if kms_key.is_some() {
                return Err(ConfigError::Invalid(
                    "deployment.kms_key is not used by read_replica mode".to_string(),
                ));
            }
            reject_section(raw.engine.is_some(), "engine", "read_replica")?;
            reject_section(raw.storage.is_some(), "storage", "read_replica")?;
            reject_section(raw.database.is_some(), "database", "read_replica")?;
            reject_section(raw.options.is_some(), "options", "read_replica")?;
            reject_section(raw.credentials.is_some(), "credentials", "read_replica")?;
            reject_section(raw.backup.is_some(), "backup", "read_replica")?;
            let replica = raw
                .replica
                .as_ref()
                .ok_or_else(|| missing_section("replica", "read_replica"))?;
            let source = replica.source_identifier.as_deref().ok_or_else(|| {
                ConfigError::Invalid("replica.source_identifier is required".to_string())
            })?;
            if replica.source_arn.is_some() {
                return Err(ConfigError::Invalid(
                    "replica.source_arn is not used by read_replica mode".to_string(),
                ));
            }
            let source_identifier = DbIdentifier::parse(source)
                .map_err(|err| ConfigError::Invalid(format!("replica.source_identifier: {err}")))?;
            Ok(Topology::ReadReplica(ReadReplicaSpec {
                source_identifier,
            }))
        }
        DeploymentMode::CrossRegionReplica => {
            reject_section(raw.engine.is_some(), "engine", "cross_region_replica")?;
            reject_section(raw.database.is_some(), "database", "cross_region_replica")?;
            reject_section(raw.options.is_some(), "options", "cross_region_replica")?;
            reject_section(raw.credentials.is_some(), "credentials", "cross_region_replica")?;
            let replica = raw
                .replica
                .as_ref()
                .ok_or_else(|| missing_section("replica", "cross_region_replica"))?;
            let storage = raw
                .storage
                .as_ref()
                .ok_or_else(|| missing_section("storage", "cross_region_replica"))?;
            let backup = raw
                .backup
                .as_ref()
                .ok_or_else(|| missing_section("backup", "cross_region_replica"))?;
            let source = replica.source_arn.as_deref().ok_or_else(|| {
                ConfigError::Invalid("replica.source_arn is required".to_string())
            })?;
            if replica.source_identifier.is_some() {
                return Err(ConfigError::Invalid(
                    "replica.source_identifier is not used by cross_region_replica mode"
                        .to_string(),
                ));
            }
            if source.trim().is_empty() {
                return Err(ConfigError::Invalid("replica.source_arn is empty".to_string()));
            }
            Ok(Topology::CrossRegionReplica(CrossRegionSpec {
                source_arn: SourceDbArn::new(source),
                storage: convert_storage(storage),
                backup: convert_backup(backup),
                kms_key,
            }))
        }
    }
}

/// Converts the storage section.
fn convert_storage(storage: &StorageConfig) -> StorageSpec {
    StorageSpec {
        kind: storage.kind,
        allocated_gb: storage.allocated_gb,
        max_allocated_gb: storage.max_allocated_gb,
        iops: storage.iops,
    }
}

/// Converts the backup section.
fn convert_backup(backup: &BackupConfig) -> BackupSpec {
    BackupSpec {
        retention_days: backup.retention_days,
        window: backup.window.clone(),
    }
}

/// Converts the credentials section, applying the default password policy.
fn convert_credentials(credentials: &CredentialsConfig) -> CredentialPolicy {
    let password = credentials.password.map_or_else(PasswordPolicy::default, |policy| {
        PasswordPolicy {
            length: policy.length,
            min_upper: policy.min_upper,
            min_lower: policy.min_lower,
            min_digit: policy.min_digit,
            min_special: policy.min_special,
        }
    });
    CredentialPolicy {
        password,
        environment: credentials.environment,
        delete_prior_versions: credentials.delete_prior_versions,
    }
}

/// Converts the network section with the ingress rule bound applied.
fn convert_network(network: &NetworkConfig) -> Result<NetworkSpec, ConfigError> {
    if network.ingress.len() > MAX_INGRESS_RULES {
        return Err(ConfigError::Invalid(format!(
            "network.ingress exceeds {MAX_INGRESS_RULES} rules"
        )));
    }
    let ingress = network
        .ingress
        .iter()
        .map(|rule| IngressRule {
            description: rule.description.clone(),
            from_port: rule.from_port,
            to_port: rule.to_port,
            protocol: rule.protocol.clone(),
            cidr_blocks: rule.cidr_blocks.clone(),
            security_group_ids: rule.security_group_ids.clone(),
        })
        .collect();
    Ok(NetworkSpec {
        vpc_id: network.vpc_id.clone().map(VpcId::new),
        ingress,
    })
}

/// Converts the optional encryption key field.
fn convert_kms_key(raw: Option<&str>) -> Result<Option<KmsKeyId>, ConfigError> {
    raw.map(|value| {
        KmsKeyId::parse(value)
            .map_err(|err| ConfigError::Invalid(format!("deployment.kms_key: {err}")))
    })
    .transpose()
}

// ============================================================================
// SECTION: Validation Helpers
// ============================================================================

/// Resolves the config path from the argument or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates tag count and key/value lengths.
fn validate_tags(tags: &TagMap) -> Result<(), ConfigError> {
    if tags.len() > MAX_TAGS {
        return Err(ConfigError::Invalid(format!("tags exceed {MAX_TAGS} entries")));
    }
    for (key, value) in tags {
        if key.trim().is_empty() {
            return Err(ConfigError::Invalid("tag key must be non-empty".to_string()));
        }
        if key.len() > MAX_TAG_KEY_LENGTH {
            return Err(ConfigError::Invalid(format!("tag key {key:?} too long")));
        }
        if value.len() > MAX_TAG_VALUE_LENGTH {
            return Err(ConfigError::Invalid(format!("tag value for {key:?} too long")));
        }
    }
    Ok(())
}

/// Builds the missing-section error for a mode.
fn missing_section(section: &str, mode: &str) -> ConfigError {
    ConfigError::Invalid(format!("[{section}] is required for {mode} mode"))
}

/// Rejects a section that belongs to another mode.
fn reject_section(present: bool, section: &str, mode: &str) -> Result<(), ConfigError> {
    if present {
        return Err(ConfigError::Invalid(format!("[{section}] is not used by {mode} mode")));
    }
    Ok(())
}
