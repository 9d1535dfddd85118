// crates/oraplan-core/src/resolve/engine.rs
// ============================================================================
// Module: Oraplan Topology Resolver
// Description: Single-pass derivation of resource specifications from a request.
// Purpose: Apply mode-conditional field selection, filtering, and naming rules.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! The resolver turns a validated deployment request plus its external inputs
//! (option document, discovered subnet candidates, injected mandatory tags)
//! into a complete deployment plan. The request is validated first, before
//! any external input is consulted; external-dependency failures such as an
//! exhausted subnet set are fatal and surfaced verbatim. No retries and no
//! partial plans exist at this layer.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::credentials::MASTER_USERNAME;
use crate::core::credentials::PasswordError;
use crate::core::credentials::SecretRecord;
use crate::core::credentials::generate_password;
use crate::core::credentials::secret_path;
use crate::core::identifiers::DbIdentifier;
use crate::core::naming::NamingError;
use crate::core::naming::final_snapshot_identifier;
use crate::core::naming::instance_identifiers;
use crate::core::network::SubnetCandidate;
use crate::core::network::expand_security_rules;
use crate::core::network::filter_usable_subnets;
use crate::core::options::DEFAULT_NON_SSL_PORT;
use crate::core::options::DEFAULT_SSL_PORT;
use crate::core::options::OptionDoc;
use crate::core::options::OptionDocError;
use crate::core::resources::DbInstanceSpec;
use crate::core::resources::LogGroupSpec;
use crate::core::resources::LogKind;
use crate::core::resources::OptionGroupSpec;
use crate::core::resources::ParameterGroupSpec;
use crate::core::resources::SecurityGroupSpec;
use crate::core::resources::SubnetGroupSpec;
use crate::core::resources::TagMap;
use crate::core::resources::merge_tags;
use crate::core::topology::CrossRegionSpec;
use crate::core::topology::DeploymentRequest;
use crate::core::topology::PrimarySpec;
use crate::core::topology::ReadReplicaSpec;
use crate::core::topology::RequestError;
use crate::core::topology::Topology;
use crate::resolve::plan::DeploymentPlan;
use crate::resolve::plan::InstancePlan;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Topology resolution errors.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Request validation failed.
    #[error("invalid deployment request: {0}")]
    Request(#[from] RequestError),
    /// Identifier derivation failed.
    #[error("identifier derivation failed: {0}")]
    Naming(#[from] NamingError),
    /// Option document validation failed.
    #[error("invalid option document: {0}")]
    Options(#[from] OptionDocError),
    /// Primary deployments require an option document.
    #[error("primary deployment requires an option document")]
    MissingOptionDoc,
    /// No subnet passed the IP-availability filter.
    #[error("no subnet has more than the minimum available ip addresses")]
    NoUsableSubnet,
    /// Password generation failed.
    #[error("credential generation failed: {0}")]
    Credential(#[from] PasswordError),
}

// ============================================================================
// SECTION: Resolver
// ============================================================================

/// Deterministic topology resolver.
///
/// Holds the injected mandatory tag set; everything else arrives per
/// resolution call.
#[derive(Debug, Clone)]
pub struct TopologyResolver {
    /// Mandatory tags merged under every resource's request tags.
    mandatory_tags: TagMap,
}

impl TopologyResolver {
    /// Creates a resolver with the injected mandatory tag set.
    #[must_use]
    pub const fn new(mandatory_tags: TagMap) -> Self {
        Self {
            mandatory_tags,
        }
    }

    /// Resolves a deployment request into a complete plan.
    ///
    /// `options` is required for primary deployments and ignored for replica
    /// modes; `candidates` are the externally discovered subnets for the
    /// request's VPC.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] when the request, option document, or subnet
    /// set cannot produce a valid plan.
    pub fn resolve(
        &self,
        request: &DeploymentRequest,
        options: Option<&OptionDoc>,
        candidates: &[SubnetCandidate],
    ) -> Result<DeploymentPlan, ResolveError> {
        request.validate()?;

        let tags = merge_tags(&self.mandatory_tags, &request.tags);
        let identifiers = instance_identifiers(
            &request.identifier,
            request.instance_count,
            request.topology.is_replica(),
        )?;
        let security_group = security_group(request, &tags);

        match &request.topology {
            Topology::Primary(primary) => {
                let doc = options.ok_or(ResolveError::MissingOptionDoc)?;
                doc.validate()?;
                resolve_primary(request, primary, doc, candidates, &identifiers, &tags, security_group)
            }
            Topology::ReadReplica(replica) => {
                Ok(resolve_read_replica(request, replica, &identifiers, &tags, security_group))
            }
            Topology::CrossRegionReplica(replica) => {
                resolve_cross_region(request, replica, candidates, &identifiers, &tags, security_group)
            }
        }
    }
}

// ============================================================================
// SECTION: Mode Resolution Helpers
// ============================================================================

/// Resolves a primary deployment.
#[allow(clippy::too_many_arguments, reason = "Internal helper fed from one call site.")]
fn resolve_primary(
    request: &DeploymentRequest,
    primary: &PrimarySpec,
    doc: &OptionDoc,
    candidates: &[SubnetCandidate],
    identifiers: &[DbIdentifier],
    tags: &TagMap,
    security_group: SecurityGroupSpec,
) -> Result<DeploymentPlan, ResolveError> {
    let subnet_group = subnet_group(request, candidates, tags)?;
    let enable_ssl = primary.option_binding.enable_ssl;
    let port = primary
        .port
        .unwrap_or(if enable_ssl { DEFAULT_SSL_PORT } else { DEFAULT_NON_SSL_PORT });

    let parameter_group = ParameterGroupSpec {
        name: format!("{}-params", request.identifier),
        family: format!(
            "{}-{}",
            primary.engine.family.engine_name(),
            primary.engine.major_version()
        ),
        parameters: doc.parameter_group_parameters.clone(),
        tags: tags.clone(),
    };
    let option_group = OptionGroupSpec {
        name: format!("{}-options", request.identifier),
        engine_name: primary.engine.family.engine_name().to_string(),
        major_engine_version: primary.engine.major_version().to_string(),
        options: doc.resolved_options(enable_ssl),
        tags: tags.clone(),
    };

    let instances = identifiers
        .iter()
        .map(|identifier| {
            let spec = primary_instance_spec(
                request,
                primary,
                identifier,
                port,
                &parameter_group.name,
                &option_group.name,
                &subnet_group.name,
                tags,
            );
            instance_plan(identifier, spec, request.log_retention_days, tags)
        })
        .collect::<Vec<_>>();

    let secret = secret_record(primary, identifiers, port)?;

    Ok(DeploymentPlan {
        instances,
        parameter_group: Some(parameter_group),
        option_group: Some(option_group),
        subnet_group: Some(subnet_group),
        security_group,
        secret: Some(secret),
    })
}

/// Resolves an in-region read replica deployment.
fn resolve_read_replica(
    request: &DeploymentRequest,
    replica: &ReadReplicaSpec,
    identifiers: &[DbIdentifier],
    tags: &TagMap,
    security_group: SecurityGroupSpec,
) -> DeploymentPlan {
    let instances = identifiers
        .iter()
        .map(|identifier| {
            let spec = DbInstanceSpec {
                identifier: identifier.to_string(),
                engine: None,
                engine_version: None,
                allocated_storage: None,
                max_allocated_storage: None,
                storage_type: None,
                iops: None,
                username: None,
                db_name: None,
                port: DEFAULT_NON_SSL_PORT,
                option_group: None,
                parameter_group: None,
                subnet_group: None,
                backup_retention_period: None,
                backup_window: None,
                replicate_source_db: Some(replica.source_identifier.to_string()),
                replicate_source_arn: None,
                kms_key: None,
                final_snapshot_identifier: final_snapshot_identifier(
                    identifier,
                    request.skip_final_snapshot,
                    request.final_snapshot_override.as_deref(),
                ),
                skip_final_snapshot: request.skip_final_snapshot,
                exported_logs: LogKind::ALL.to_vec(),
                tags: tags.clone(),
            };
            instance_plan(identifier, spec, request.log_retention_days, tags)
        })
        .collect();

    DeploymentPlan {
        instances,
        parameter_group: None,
        option_group: None,
        subnet_group: None,
        security_group,
        secret: None,
    }
}

/// Resolves a cross-region replica deployment.
fn resolve_cross_region(
    request: &DeploymentRequest,
    replica: &CrossRegionSpec,
    candidates: &[SubnetCandidate],
    identifiers: &[DbIdentifier],
    tags: &TagMap,
    security_group: SecurityGroupSpec,
) -> Result<DeploymentPlan, ResolveError> {
    let subnet_group = subnet_group(request, candidates, tags)?;

    let instances = identifiers
        .iter()
        .map(|identifier| {
            let spec = DbInstanceSpec {
                identifier: identifier.to_string(),
                engine: None,
                engine_version: None,
                allocated_storage: Some(replica.storage.allocated_gb),
                max_allocated_storage: replica.storage.max_allocated_gb,
                storage_type: Some(replica.storage.kind),
                iops: replica.storage.iops,
                username: None,
                db_name: None,
                port: DEFAULT_NON_SSL_PORT,
                option_group: None,
                parameter_group: None,
                subnet_group: Some(subnet_group.name.clone()),
                backup_retention_period: Some(replica.backup.retention_days),
                backup_window: replica.backup.window.clone(),
                replicate_source_db: None,
                replicate_source_arn: Some(replica.source_arn.clone()),
                kms_key: replica.kms_key.clone(),
                final_snapshot_identifier: final_snapshot_identifier(
                    identifier,
                    request.skip_final_snapshot,
                    request.final_snapshot_override.as_deref(),
                ),
                skip_final_snapshot: request.skip_final_snapshot,
                exported_logs: LogKind::ALL.to_vec(),
                tags: tags.clone(),
            };
            instance_plan(identifier, spec, request.log_retention_days, tags)
        })
        .collect();

    Ok(DeploymentPlan {
        instances,
        parameter_group: None,
        option_group: None,
        subnet_group: Some(subnet_group),
        security_group,
        secret: None,
    })
}

// ============================================================================
// SECTION: Construction Helpers
// ============================================================================

/// Builds the database instance spec for one primary instance.
#[allow(clippy::too_many_arguments, reason = "Internal helper fed from one call site.")]
fn primary_instance_spec(
    request: &DeploymentRequest,
    primary: &PrimarySpec,
    identifier: &DbIdentifier,
    port: u16,
    parameter_group: &str,
    option_group: &str,
    subnet_group: &str,
    tags: &TagMap,
) -> DbInstanceSpec {
    DbInstanceSpec {
        identifier: identifier.to_string(),
        engine: Some(primary.engine.family.engine_name().to_string()),
        engine_version: Some(primary.engine.version.clone()),
        allocated_storage: Some(primary.storage.allocated_gb),
        max_allocated_storage: primary.storage.max_allocated_gb,
        storage_type: Some(primary.storage.kind),
        iops: primary.storage.iops,
        username: Some(MASTER_USERNAME.to_string()),
        db_name: Some(primary.db_name.clone()),
        port,
        option_group: Some(option_group.to_string()),
        parameter_group: Some(parameter_group.to_string()),
        subnet_group: Some(subnet_group.to_string()),
        backup_retention_period: Some(primary.backup.retention_days),
        backup_window: primary.backup.window.clone(),
        replicate_source_db: None,
        replicate_source_arn: None,
        kms_key: primary.kms_key.clone(),
        final_snapshot_identifier: final_snapshot_identifier(
            identifier,
            request.skip_final_snapshot,
            request.final_snapshot_override.as_deref(),
        ),
        skip_final_snapshot: request.skip_final_snapshot,
        exported_logs: LogKind::ALL.to_vec(),
        tags: tags.clone(),
    }
}

/// Wraps an instance spec with its per-instance log groups.
fn instance_plan(
    identifier: &DbIdentifier,
    db_instance: DbInstanceSpec,
    log_retention_days: u16,
    tags: &TagMap,
) -> InstancePlan {
    let log_groups = LogKind::ALL
        .iter()
        .map(|kind| LogGroupSpec {
            name: LogGroupSpec::name_for(identifier.as_str(), *kind),
            kind: *kind,
            retention_days: log_retention_days,
            tags: tags.clone(),
        })
        .collect();
    InstancePlan {
        identifier: identifier.to_string(),
        db_instance,
        log_groups,
    }
}

/// Builds the subnet group from filtered candidates; empty sets are fatal.
fn subnet_group(
    request: &DeploymentRequest,
    candidates: &[SubnetCandidate],
    tags: &TagMap,
) -> Result<SubnetGroupSpec, ResolveError> {
    let usable = filter_usable_subnets(candidates);
    if usable.is_empty() {
        return Err(ResolveError::NoUsableSubnet);
    }
    Ok(SubnetGroupSpec {
        name: format!("{}-subnets", request.identifier),
        subnet_ids: usable.into_iter().map(|candidate| candidate.subnet_id).collect(),
        tags: tags.clone(),
    })
}

/// Builds the security group with expanded rules.
fn security_group(request: &DeploymentRequest, tags: &TagMap) -> SecurityGroupSpec {
    SecurityGroupSpec {
        name: format!("{}-sg", request.identifier),
        rules: expand_security_rules(&request.network.ingress),
        tags: tags.clone(),
    }
}

/// Generates the secret record for a primary deployment.
fn secret_record(
    primary: &PrimarySpec,
    identifiers: &[DbIdentifier],
    port: u16,
) -> Result<SecretRecord, ResolveError> {
    let password = generate_password(&primary.credentials.password)?;
    // The network address is known only after apply; the resolved identifier
    // is the stable key the address is derived from.
    let host = identifiers.first().map(ToString::to_string).unwrap_or_default();
    Ok(SecretRecord {
        path: secret_path(primary.credentials.environment, &host),
        username: MASTER_USERNAME.to_string(),
        password,
        host,
        port,
        delete_prior_versions: primary.credentials.delete_prior_versions,
    })
}
