// crates/oraplan-core/tests/resolver.rs
// ============================================================================
// Module: Topology Resolver Tests
// Description: End-to-end resolution tests for all three topology modes.
// Purpose: Pin mode-conditional field selection and plan composition.
// Dependencies: oraplan-core
// ============================================================================
//! ## Overview
//! Resolves canonical requests and asserts the field-ownership table: fields
//! owned by another mode are entirely absent, never partially populated.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use oraplan_core::DEFAULT_NON_SSL_PORT;
use oraplan_core::DEFAULT_SSL_PORT;
use oraplan_core::LogKind;
use oraplan_core::MASTER_USERNAME;
use oraplan_core::ResolveError;
use oraplan_core::Topology;
use oraplan_core::TopologyResolver;

use crate::common::cross_region_request;
use crate::common::mandatory_tags;
use crate::common::option_doc;
use crate::common::primary_request;
use crate::common::replica_request;
use crate::common::subnets;

// ============================================================================
// SECTION: Primary Mode
// ============================================================================

/// A primary plan populates every primary-owned field.
#[test]
fn primary_plan_is_fully_populated() {
    let resolver = TopologyResolver::new(mandatory_tags());
    let plan =
        resolver.resolve(&primary_request(), Some(&option_doc()), &subnets()).unwrap();

    assert_eq!(plan.instances.len(), 1);
    let instance = &plan.instances[0].db_instance;
    assert_eq!(instance.identifier, "ordb");
    assert_eq!(instance.engine.as_deref(), Some("oracle-ee"));
    assert!(instance.engine_version.is_some());
    assert_eq!(instance.allocated_storage, Some(100));
    assert_eq!(instance.username.as_deref(), Some(MASTER_USERNAME));
    assert_eq!(instance.db_name.as_deref(), Some("ORCL"));
    assert_eq!(instance.port, DEFAULT_NON_SSL_PORT);
    assert_eq!(instance.option_group.as_deref(), Some("ordb-options"));
    assert_eq!(instance.parameter_group.as_deref(), Some("ordb-params"));
    assert_eq!(instance.subnet_group.as_deref(), Some("ordb-subnets"));
    assert_eq!(instance.backup_retention_period, Some(14));
    assert!(instance.replicate_source_db.is_none());
    assert!(instance.replicate_source_arn.is_none());
    assert_eq!(instance.final_snapshot_identifier.as_deref(), Some("ordb-final"));

    let parameter_group = plan.parameter_group.unwrap();
    assert_eq!(parameter_group.family, "oracle-ee-19");
    let option_group = plan.option_group.unwrap();
    assert_eq!(option_group.major_engine_version, "19");
    assert_eq!(option_group.options[0].option_name, "STATSPACK");

    let subnet_group = plan.subnet_group.unwrap();
    let ids: Vec<&str> = subnet_group.subnet_ids.iter().map(oraplan_core::SubnetId::as_str).collect();
    assert_eq!(ids, vec!["subnet-a", "subnet-b"]);

    let secret = plan.secret.unwrap();
    assert_eq!(secret.username, MASTER_USERNAME);
    assert_eq!(secret.path, "rds/aws-orcl-nonprod/ordb");
    assert_eq!(secret.port, DEFAULT_NON_SSL_PORT);
    assert!(secret.delete_prior_versions);
}

/// Enabling SSL switches the option list and the default port.
#[test]
fn primary_ssl_switches_options_and_port() {
    let resolver = TopologyResolver::new(mandatory_tags());
    let mut request = primary_request();
    let Topology::Primary(primary) = &mut request.topology else {
        panic!("expected primary topology");
    };
    primary.option_binding.enable_ssl = true;

    let plan = resolver.resolve(&request, Some(&option_doc()), &subnets()).unwrap();
    assert_eq!(plan.instances[0].db_instance.port, DEFAULT_SSL_PORT);
    let option_group = plan.option_group.unwrap();
    assert_eq!(option_group.options[0].option_name, "SSL");
    assert_eq!(option_group.options[0].port, DEFAULT_SSL_PORT);
}

/// A multi-instance primary derives suffixed identifiers and log groups.
#[test]
fn multi_instance_primary_is_suffixed() {
    let resolver = TopologyResolver::new(mandatory_tags());
    let mut request = primary_request();
    request.instance_count = 2;

    let plan = resolver.resolve(&request, Some(&option_doc()), &subnets()).unwrap();
    let identifiers: Vec<&str> =
        plan.instances.iter().map(|instance| instance.identifier.as_str()).collect();
    assert_eq!(identifiers, vec!["ordb-01", "ordb-02"]);
    assert_eq!(plan.instances[0].log_groups.len(), LogKind::ALL.len());
    assert_eq!(
        plan.instances[1].log_groups[0].name,
        "/aws/rds/instance/ordb-02/alert"
    );
    let secret = plan.secret.unwrap();
    assert_eq!(secret.host, "ordb-01");
}

/// A primary without an option document is rejected.
#[test]
fn primary_requires_option_doc() {
    let resolver = TopologyResolver::new(mandatory_tags());
    let err = resolver.resolve(&primary_request(), None, &subnets()).unwrap_err();
    assert!(matches!(err, ResolveError::MissingOptionDoc));
}

// ============================================================================
// SECTION: Read Replica Mode
// ============================================================================

/// A read replica inherits everything: primary-owned fields are absent.
#[test]
fn read_replica_fields_are_absent() {
    let resolver = TopologyResolver::new(mandatory_tags());
    let plan = resolver.resolve(&replica_request(), None, &[]).unwrap();

    let instance = &plan.instances[0].db_instance;
    assert_eq!(instance.identifier, "ordb-01");
    assert!(instance.engine.is_none());
    assert!(instance.engine_version.is_none());
    assert!(instance.allocated_storage.is_none());
    assert!(instance.max_allocated_storage.is_none());
    assert!(instance.username.is_none());
    assert!(instance.db_name.is_none());
    assert!(instance.option_group.is_none());
    assert!(instance.parameter_group.is_none());
    assert!(instance.subnet_group.is_none());
    assert!(instance.backup_retention_period.is_none());
    assert!(instance.backup_window.is_none());
    assert_eq!(instance.replicate_source_db.as_deref(), Some("ordb-source"));

    assert!(plan.parameter_group.is_none());
    assert!(plan.option_group.is_none());
    assert!(plan.subnet_group.is_none());
    assert!(plan.secret.is_none());
}

// ============================================================================
// SECTION: Cross-Region Mode
// ============================================================================

/// A cross-region replica keeps storage, backup, and subnet placement.
#[test]
fn cross_region_keeps_replica_branch_fields() {
    let resolver = TopologyResolver::new(mandatory_tags());
    let plan = resolver.resolve(&cross_region_request(), None, &subnets()).unwrap();

    let instance = &plan.instances[0].db_instance;
    assert!(instance.engine.is_none());
    assert!(instance.username.is_none());
    assert!(instance.db_name.is_none());
    assert!(instance.option_group.is_none());
    assert_eq!(instance.allocated_storage, Some(100));
    assert_eq!(instance.subnet_group.as_deref(), Some("ordb-subnets"));
    assert_eq!(instance.backup_retention_period, Some(7));
    assert!(instance.replicate_source_arn.is_some());
    assert!(instance.replicate_source_db.is_none());

    assert!(plan.parameter_group.is_none());
    assert!(plan.option_group.is_none());
    assert!(plan.subnet_group.is_some());
    assert!(plan.secret.is_none());
}

// ============================================================================
// SECTION: Tags and Fingerprint
// ============================================================================

/// Request tags merge over mandatory tags on every resource.
#[test]
fn tags_merge_over_mandatory_set() {
    let resolver = TopologyResolver::new(mandatory_tags());
    let mut request = primary_request();
    request.tags.insert("owner".to_string(), "billing-dba".to_string());

    let plan = resolver.resolve(&request, Some(&option_doc()), &subnets()).unwrap();
    let tags = &plan.security_group.tags;
    assert_eq!(tags.get("owner").map(String::as_str), Some("billing-dba"));
    assert_eq!(tags.get("cost-center").map(String::as_str), Some("4711"));
    assert_eq!(tags.get("service").map(String::as_str), Some("billing"));
    assert_eq!(&plan.instances[0].db_instance.tags, tags);
}

/// Identical inputs produce identical fingerprints; differing inputs differ.
#[test]
fn fingerprint_is_deterministic() {
    let resolver = TopologyResolver::new(mandatory_tags());
    let request = replica_request();
    let first = resolver.resolve(&request, None, &[]).unwrap();
    let second = resolver.resolve(&request, None, &[]).unwrap();
    assert_eq!(first.fingerprint().unwrap(), second.fingerprint().unwrap());

    let mut changed = replica_request();
    changed.log_retention_days = 7;
    let third = resolver.resolve(&changed, None, &[]).unwrap();
    assert_ne!(first.fingerprint().unwrap(), third.fingerprint().unwrap());
}
