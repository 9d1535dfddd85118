// crates/oraplan-providers/tests/subnet_source.rs
// ============================================================================
// Module: JSON Subnet Source Tests
// Description: Tests for inventory loading, tag filtering, and path limits.
// Purpose: Validate discovery contract, traversal prevention, and size limits.
// Dependencies: oraplan-providers, oraplan-core, tempfile
// ============================================================================
//! ## Overview
//! Tests the JSON subnet source for the discovery contract (VPC match plus
//! private network tag), path traversal prevention, and file size limits.

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

use std::fs;

use oraplan_core::SubnetSource;
use oraplan_core::VpcId;
use oraplan_providers::JsonSubnetSource;
use oraplan_providers::JsonSubnetSourceConfig;
use tempfile::tempdir;

use crate::common::inventory_json;

// ============================================================================
// SECTION: Discovery Contract
// ============================================================================

/// Discovery returns only private subnets in the requested VPC.
#[test]
fn discovery_filters_vpc_and_tag() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("subnets.json"), inventory_json()).unwrap();

    let source = JsonSubnetSource::new(
        JsonSubnetSourceConfig {
            root: Some(dir.path().to_path_buf()),
            ..JsonSubnetSourceConfig::default()
        },
        "subnets.json",
    );
    let candidates = source.discover(&VpcId::new("vpc-0abc")).unwrap();
    let ids: Vec<&str> = candidates.iter().map(|c| c.subnet_id.as_str()).collect();
    assert_eq!(ids, vec!["subnet-a", "subnet-d"]);
}

/// Discovery leaves IP-availability filtering to the core.
#[test]
fn discovery_does_not_filter_availability() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("subnets.json"), inventory_json()).unwrap();

    let source = JsonSubnetSource::new(
        JsonSubnetSourceConfig {
            root: Some(dir.path().to_path_buf()),
            ..JsonSubnetSourceConfig::default()
        },
        "subnets.json",
    );
    let candidates = source.discover(&VpcId::new("vpc-0abc")).unwrap();
    assert!(candidates.iter().any(|c| c.available_ip_count < 5));
}

/// An unknown VPC yields an empty candidate set, not an error.
#[test]
fn unknown_vpc_yields_empty_set() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("subnets.json"), inventory_json()).unwrap();

    let source = JsonSubnetSource::new(
        JsonSubnetSourceConfig {
            root: Some(dir.path().to_path_buf()),
            ..JsonSubnetSourceConfig::default()
        },
        "subnets.json",
    );
    assert!(source.discover(&VpcId::new("vpc-none")).unwrap().is_empty());
}

// ============================================================================
// SECTION: File Handling
// ============================================================================

/// Traversal outside the root is rejected.
#[test]
fn traversal_is_rejected() {
    let dir = tempdir().unwrap();
    let outside = dir.path().join("outside.json");
    fs::write(&outside, inventory_json()).unwrap();
    let inner = dir.path().join("inner");
    fs::create_dir(&inner).unwrap();

    let source = JsonSubnetSource::new(
        JsonSubnetSourceConfig {
            root: Some(inner),
            ..JsonSubnetSourceConfig::default()
        },
        "../outside.json",
    );
    assert!(source.discover(&VpcId::new("vpc-0abc")).is_err());
}

/// Oversized inventories are rejected.
#[test]
fn oversized_inventory_is_rejected() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("subnets.json"), inventory_json()).unwrap();

    let source = JsonSubnetSource::new(
        JsonSubnetSourceConfig {
            root: Some(dir.path().to_path_buf()),
            max_bytes: 16,
        },
        "subnets.json",
    );
    assert!(source.discover(&VpcId::new("vpc-0abc")).is_err());
}

/// Malformed inventories are rejected.
#[test]
fn malformed_inventory_is_rejected() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("subnets.json"), "{not json").unwrap();

    let source = JsonSubnetSource::new(
        JsonSubnetSourceConfig {
            root: Some(dir.path().to_path_buf()),
            ..JsonSubnetSourceConfig::default()
        },
        "subnets.json",
    );
    assert!(source.discover(&VpcId::new("vpc-0abc")).is_err());
}
