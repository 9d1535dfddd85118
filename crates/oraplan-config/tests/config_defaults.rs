// crates/oraplan-config/tests/config_defaults.rs
// ============================================================================
// Module: Request Default Tests
// Description: Tests for defaults applied during request conversion.
// Purpose: Pin instance count, retention, option, and password defaults.
// Dependencies: oraplan-config, oraplan-core
// ============================================================================
//! ## Overview
//! Exercises the documented defaults: one instance, thirty-day log
//! retention, the non-SSL option list, and the default password policy.

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

use oraplan_core::PasswordPolicy;
use oraplan_core::Topology;

use crate::common::primary_toml;
use crate::common::request;

/// Omitted scalar fields take their documented defaults.
#[test]
fn deployment_defaults_apply() {
    let loaded = request(&primary_toml()).unwrap();
    assert_eq!(loaded.instance_count, 1);
    assert_eq!(loaded.log_retention_days, 30);
    assert!(!loaded.skip_final_snapshot);
    assert!(loaded.final_snapshot_override.is_none());
    assert!(loaded.tags.is_empty());
}

/// An omitted options section defaults to the non-SSL list.
#[test]
fn options_default_to_non_ssl() {
    let loaded = request(&primary_toml()).unwrap();
    let Topology::Primary(primary) = &loaded.topology else {
        panic!("expected primary topology");
    };
    assert!(!primary.option_binding.enable_ssl);
}

/// An omitted password policy is the documented default.
#[test]
fn password_policy_defaults_apply() {
    let loaded = request(&primary_toml()).unwrap();
    let Topology::Primary(primary) = &loaded.topology else {
        panic!("expected primary topology");
    };
    assert_eq!(primary.credentials.password, PasswordPolicy::default());
    assert!(!primary.credentials.delete_prior_versions);
}

/// Partial password sections default the omitted minimums to zero.
#[test]
fn partial_password_policy_defaults_minimums() {
    let toml_str = primary_toml().replace(
        "[credentials]",
        "[credentials]\npassword = { length = 16 }",
    );
    let loaded = request(&toml_str).unwrap();
    let Topology::Primary(primary) = &loaded.topology else {
        panic!("expected primary topology");
    };
    assert_eq!(primary.credentials.password.length, 16);
    assert_eq!(primary.credentials.password.min_upper, 0);
}
