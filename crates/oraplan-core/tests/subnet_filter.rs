// crates/oraplan-core/tests/subnet_filter.rs
// ============================================================================
// Module: Subnet Filter Tests
// Description: Tests for the IP-availability subnet filter.
// Purpose: Pin the strict threshold and the fatal empty-set behavior.
// Dependencies: oraplan-core
// ============================================================================
//! ## Overview
//! Exercises `filter_usable_subnets` around the availability threshold and
//! the resolver's rejection of exhausted subnet sets.

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

use oraplan_core::MIN_AVAILABLE_IP_ADDRESSES;
use oraplan_core::ResolveError;
use oraplan_core::TopologyResolver;
use oraplan_core::filter_usable_subnets;

use crate::common::mandatory_tags;
use crate::common::option_doc;
use crate::common::primary_request;
use crate::common::subnet;

// ============================================================================
// SECTION: Threshold Behavior
// ============================================================================

/// The threshold is strict: exactly the minimum is excluded.
#[test]
fn threshold_is_strictly_greater_than() {
    let candidates = vec![
        subnet("subnet-low", "eu-west-1a", MIN_AVAILABLE_IP_ADDRESSES),
        subnet("subnet-high", "eu-west-1b", MIN_AVAILABLE_IP_ADDRESSES + 1),
    ];
    let usable = filter_usable_subnets(&candidates);
    assert_eq!(usable.len(), 1);
    assert_eq!(usable[0].subnet_id.as_str(), "subnet-high");
}

/// Filtering preserves candidate order.
#[test]
fn filter_preserves_order() {
    let candidates = vec![
        subnet("subnet-c", "eu-west-1c", 100),
        subnet("subnet-a", "eu-west-1a", 50),
        subnet("subnet-b", "eu-west-1b", 3),
    ];
    let usable = filter_usable_subnets(&candidates);
    let ids: Vec<&str> = usable.iter().map(|s| s.subnet_id.as_str()).collect();
    assert_eq!(ids, vec!["subnet-c", "subnet-a"]);
}

/// An all-exhausted candidate set filters to empty.
#[test]
fn exhausted_set_filters_to_empty() {
    let candidates = vec![
        subnet("subnet-a", "eu-west-1a", 0),
        subnet("subnet-b", "eu-west-1b", MIN_AVAILABLE_IP_ADDRESSES),
    ];
    assert!(filter_usable_subnets(&candidates).is_empty());
}

// ============================================================================
// SECTION: Resolver Integration
// ============================================================================

/// Plan construction fails when no subnet passes the filter.
#[test]
fn resolver_rejects_exhausted_subnets() {
    let resolver = TopologyResolver::new(mandatory_tags());
    let request = primary_request();
    let doc = option_doc();
    let candidates = vec![subnet("subnet-a", "eu-west-1a", 2)];
    let err = resolver.resolve(&request, Some(&doc), &candidates).unwrap_err();
    assert!(matches!(err, ResolveError::NoUsableSubnet));
}

/// Plan construction also fails on an empty candidate set.
#[test]
fn resolver_rejects_empty_candidates() {
    let resolver = TopologyResolver::new(mandatory_tags());
    let request = primary_request();
    let doc = option_doc();
    let err = resolver.resolve(&request, Some(&doc), &[]).unwrap_err();
    assert!(matches!(err, ResolveError::NoUsableSubnet));
}
