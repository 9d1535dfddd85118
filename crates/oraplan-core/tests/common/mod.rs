// crates/oraplan-core/tests/common/mod.rs
// =============================================================================
// Module: Core Test Helpers
// Description: Shared request, document, and subnet builders for core tests.
// Purpose: Reduce duplication across integration tests for oraplan-core.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::collections::BTreeMap;

use oraplan_core::BackupSpec;
use oraplan_core::CredentialPolicy;
use oraplan_core::CrossRegionSpec;
use oraplan_core::DbIdentifier;
use oraplan_core::DeploymentRequest;
use oraplan_core::EngineFamily;
use oraplan_core::EngineSpec;
use oraplan_core::Environment;
use oraplan_core::IngressRule;
use oraplan_core::NetworkSpec;
use oraplan_core::OptionBinding;
use oraplan_core::OptionDoc;
use oraplan_core::OptionSetting;
use oraplan_core::OptionSpec;
use oraplan_core::ParameterSpec;
use oraplan_core::PasswordPolicy;
use oraplan_core::PrimarySpec;
use oraplan_core::ReadReplicaSpec;
use oraplan_core::SourceDbArn;
use oraplan_core::StorageKind;
use oraplan_core::StorageSpec;
use oraplan_core::SubnetCandidate;
use oraplan_core::SubnetId;
use oraplan_core::TagMap;
use oraplan_core::Topology;
use oraplan_core::VpcId;

/// Returns a validated identifier or panics (test-only).
pub fn identifier(id: &str) -> DbIdentifier {
    DbIdentifier::parse(id).expect("valid test identifier")
}

/// Returns the default storage used by test requests.
pub fn storage() -> StorageSpec {
    StorageSpec {
        kind: StorageKind::Gp3,
        allocated_gb: 100,
        max_allocated_gb: Some(500),
        iops: None,
    }
}

/// Returns the default primary specification used by test requests.
pub fn primary_spec() -> PrimarySpec {
    PrimarySpec {
        engine: EngineSpec {
            family: EngineFamily::OracleEe,
            version: "19.0.0.0.ru-2024-01.rur-2024-01.r1".to_string(),
        },
        storage: storage(),
        db_name: "ORCL".to_string(),
        port: None,
        option_binding: OptionBinding {
            enable_ssl: false,
        },
        credentials: CredentialPolicy {
            password: PasswordPolicy::default(),
            environment: Environment::NonProduction,
            delete_prior_versions: true,
        },
        backup: BackupSpec {
            retention_days: 14,
            window: Some("03:00-04:00".to_string()),
        },
        kms_key: None,
    }
}

/// Returns a single-instance primary request.
pub fn primary_request() -> DeploymentRequest {
    DeploymentRequest {
        identifier: identifier("ordb"),
        instance_count: 1,
        topology: Topology::Primary(primary_spec()),
        network: NetworkSpec {
            vpc_id: Some(VpcId::new("vpc-0abc")),
            ingress: vec![app_ingress()],
        },
        skip_final_snapshot: false,
        final_snapshot_override: None,
        log_retention_days: 30,
        tags: request_tags(),
    }
}

/// Returns an in-region read replica request.
pub fn replica_request() -> DeploymentRequest {
    DeploymentRequest {
        identifier: identifier("ordb"),
        instance_count: 1,
        topology: Topology::ReadReplica(ReadReplicaSpec {
            source_identifier: identifier("ordb-source"),
        }),
        network: NetworkSpec {
            vpc_id: None,
            ingress: vec![app_ingress()],
        },
        skip_final_snapshot: true,
        final_snapshot_override: None,
        log_retention_days: 30,
        tags: request_tags(),
    }
}

/// Returns a cross-region replica request.
pub fn cross_region_request() -> DeploymentRequest {
    DeploymentRequest {
        identifier: identifier("ordb"),
        instance_count: 1,
        topology: Topology::CrossRegionReplica(CrossRegionSpec {
            source_arn: SourceDbArn::new("arn:aws:rds:eu-west-1:123456789012:db:ordb-source"),
            storage: storage(),
            backup: BackupSpec {
                retention_days: 7,
                window: None,
            },
            kms_key: None,
        }),
        network: NetworkSpec {
            vpc_id: Some(VpcId::new("vpc-0abc")),
            ingress: Vec::new(),
        },
        skip_final_snapshot: true,
        final_snapshot_override: None,
        log_retention_days: 30,
        tags: request_tags(),
    }
}

/// Returns an ingress rule with an explicit CIDR peer.
pub fn app_ingress() -> IngressRule {
    IngressRule {
        description: Some("application subnets".to_string()),
        from_port: None,
        to_port: None,
        protocol: None,
        cidr_blocks: vec!["10.0.0.0/16".to_string()],
        security_group_ids: Vec::new(),
    }
}

/// Returns a valid option document with distinct SSL and non-SSL lists.
pub fn option_doc() -> OptionDoc {
    OptionDoc {
        parameter_group_parameters: vec![
            ParameterSpec {
                name: "open_cursors".to_string(),
                value: "300".to_string(),
                apply_method: oraplan_core::ApplyMethod::Immediate,
            },
            ParameterSpec {
                name: "processes".to_string(),
                value: "600".to_string(),
                apply_method: oraplan_core::ApplyMethod::PendingReboot,
            },
        ],
        option_group_options: vec![OptionSpec {
            option_name: "STATSPACK".to_string(),
            port: None,
            version: None,
            settings: Vec::new(),
        }],
        ssl_option: vec![OptionSpec {
            option_name: "SSL".to_string(),
            port: None,
            version: None,
            settings: vec![OptionSetting {
                name: "SQLNET.SSL_VERSION".to_string(),
                value: "1.2".to_string(),
            }],
        }],
    }
}

/// Returns subnet candidates straddling the availability threshold.
pub fn subnets() -> Vec<SubnetCandidate> {
    vec![
        subnet("subnet-a", "eu-west-1a", 200),
        subnet("subnet-b", "eu-west-1b", 6),
        subnet("subnet-c", "eu-west-1c", 5),
    ]
}

/// Returns one private subnet candidate.
pub fn subnet(id: &str, az: &str, available: u32) -> SubnetCandidate {
    let mut tags = BTreeMap::new();
    tags.insert("Network".to_string(), "Private".to_string());
    SubnetCandidate {
        subnet_id: SubnetId::new(id),
        vpc_id: VpcId::new("vpc-0abc"),
        availability_zone: az.to_string(),
        available_ip_count: available,
        tags,
    }
}

/// Returns the injected mandatory tag set.
pub fn mandatory_tags() -> TagMap {
    let mut tags = BTreeMap::new();
    tags.insert("owner".to_string(), "dba".to_string());
    tags.insert("cost-center".to_string(), "4711".to_string());
    tags
}

/// Returns the request-level tag set.
pub fn request_tags() -> TagMap {
    let mut tags = BTreeMap::new();
    tags.insert("service".to_string(), "billing".to_string());
    tags
}
